//! Non-preemptive priority scheduling.
//!
//! Same decision loop as shortest-job-first, keyed on
//! `(priority, arrival_time, id)` ascending. Lower priority values win.
//! Each process is dispatched exactly once, so its response time equals its
//! waiting time.

use super::simulation::{by_arrival, Simulation};
use super::{Algorithm, Scheduler};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{ExecutionLog, Process, Timeline};

/// Non-preemptive priority scheduler.
#[derive(Debug, Clone)]
pub struct PriorityScheduler {
    input: Vec<Process>,
    completed: Vec<Process>,
    sim: Simulation,
    engine: RuleEngine,
}

impl PriorityScheduler {
    /// Creates a scheduler over private copies of `processes`.
    pub fn new(processes: &[Process]) -> Self {
        Self {
            input: processes.iter().map(Process::fresh).collect(),
            completed: Vec::new(),
            sim: Simulation::default(),
            engine: RuleEngine::new()
                .with_rule(rules::HighestPriority)
                .with_tie_breaker(rules::EarliestArrival),
        }
    }
}

impl Scheduler for PriorityScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn run(&mut self) -> Vec<Process> {
        let remaining = by_arrival(&self.input);
        let mut sim = Simulation::starting_at(remaining.first().map_or(0, |p| p.arrival_time));

        let completed = sim.run_by_selection(remaining, &self.engine);

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
