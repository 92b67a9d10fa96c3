//! Round robin scheduling (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! 1. Sort by arrival (ties by id); start the clock at the first arrival and
//!    enqueue everything that has arrived.
//! 2. With an empty ready queue, idle until the next arrival.
//! 3. Otherwise dequeue the head and run it for `min(quantum, remaining)`.
//! 4. Enqueue processes that arrived during the slice, *then* re-enqueue the
//!    preempted process, so it never cuts ahead of those arrivals.
//!
//! Waiting time accumulates as the gap between leaving the CPU (or arriving)
//! and the next dispatch, which always equals `turnaround - burst`.

use std::collections::VecDeque;

use super::simulation::{by_arrival, Simulation};
use super::{Algorithm, Scheduler, SchedulerConfig};
use crate::error::ConfigError;
use crate::models::{ExecutionLog, Process, Timeline};

/// Round robin scheduler.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::scheduler::{RoundRobinScheduler, Scheduler};
///
/// let processes = vec![Process::new(1, 4, 1, 0), Process::new(2, 3, 1, 0)];
/// let mut scheduler = RoundRobinScheduler::new(&processes, 2).unwrap();
/// scheduler.run();
///
/// assert_eq!(scheduler.timeline().dispatch_order(), vec![1, 2, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    input: Vec<Process>,
    completed: Vec<Process>,
    sim: Simulation,
    time_quantum: i64,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given quantum.
    ///
    /// # Errors
    /// [`ConfigError::InvalidTimeQuantum`] if `time_quantum <= 0`.
    pub fn new(processes: &[Process], time_quantum: i64) -> Result<Self, ConfigError> {
        let config = SchedulerConfig::default().with_time_quantum(time_quantum);
        Self::with_config(processes, &config)
    }

    /// Creates a scheduler from a config. Only `time_quantum` is read.
    pub fn with_config(processes: &[Process], config: &SchedulerConfig) -> Result<Self, ConfigError> {
        let time_quantum = config.validate_time_quantum()?;
        Ok(Self {
            input: processes.iter().map(Process::fresh).collect(),
            completed: Vec::new(),
            sim: Simulation::default(),
            time_quantum,
        })
    }

    /// The configured quantum.
    pub fn time_quantum(&self) -> i64 {
        self.time_quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn run(&mut self) -> Vec<Process> {
        let mut pending: VecDeque<Process> = by_arrival(&self.input).into();
        let total = pending.len();
        let mut sim = Simulation::starting_at(pending.front().map_or(0, |p| p.arrival_time));
        let mut ready: VecDeque<Process> = sim.take_arrivals(&mut pending).into();
        let mut completed = Vec::with_capacity(total);

        while completed.len() < total {
            let Some(mut process) = ready.pop_front() else {
                if let Some(next) = pending.front().map(|p| p.arrival_time) {
                    sim.idle_until(next);
                    ready.extend(sim.take_arrivals(&mut pending));
                }
                continue;
            };

            sim.run_slice(&mut process, self.time_quantum);
            ready.extend(sim.take_arrivals(&mut pending));

            if process.is_completed() {
                sim.finish(&mut process);
                completed.push(process);
            } else {
                process.preempt(sim.clock);
                ready.push_back(process);
            }
        }

        sim.report(self.name(), completed.len());
        self.sim = sim;
        self.completed = completed;
        self.completed.clone()
    }

    fn processes(&self) -> &[Process] {
        &self.completed
    }

    fn timeline(&self) -> &Timeline {
        &self.sim.timeline
    }

    fn execution_log(&self) -> &ExecutionLog {
        &self.sim.log
    }
}
