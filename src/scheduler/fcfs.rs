//! First-come, first-served scheduling.
//!
//! # Algorithm
//!
//! 1. Sort processes by arrival time (ties by id).
//! 2. Start the clock at the first arrival.
//! 3. For each process in order: idle until it arrives if needed, then run
//!    its whole burst.
//!
//! Non-preemptive; the order is fixed by the initial sort.

use super::simulation::{by_arrival, Simulation};
use super::{Algorithm, Scheduler};
use crate::models::{ExecutionLog, Process, Timeline};

/// First-come, first-served scheduler.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::scheduler::{FcfsScheduler, Scheduler};
///
/// let processes = vec![Process::new(1, 5, 1, 0), Process::new(2, 3, 1, 1)];
/// let mut scheduler = FcfsScheduler::new(&processes);
/// let done = scheduler.run();
///
/// assert_eq!(done[1].completion_time, Some(8));
/// assert_eq!(done[1].waiting_time, 4);
/// ```
#[derive(Debug, Clone)]
pub struct FcfsScheduler {
    input: Vec<Process>,
    completed: Vec<Process>,
    sim: Simulation,
}

impl FcfsScheduler {
    /// Creates a scheduler over private copies of `processes`.
    pub fn new(processes: &[Process]) -> Self {
        Self {
            input: processes.iter().map(Process::fresh).collect(),
            completed: Vec::new(),
            sim: Simulation::default(),
        }
    }
}

impl Scheduler for FcfsScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn run(&mut self) -> Vec<Process> {
        let queue = by_arrival(&self.input);
        let Some(first) = queue.first() else {
            self.completed.clear();
            self.sim = Simulation::default();
            return Vec::new();
        };

        let mut sim = Simulation::starting_at(first.arrival_time);
        let mut completed = Vec::with_capacity(queue.len());

        for mut process in queue {
            sim.idle_until(process.arrival_time);
            process.admit();
            sim.run_to_completion(&mut process);
            completed.push(process);
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
