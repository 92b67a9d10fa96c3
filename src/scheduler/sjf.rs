//! Shortest-job-first scheduling (non-preemptive, "shortest job next").
//!
//! # Algorithm
//!
//! At every decision point the candidates are the uncompleted processes
//! with `arrival_time <= clock`. The one with the smallest burst runs to
//! completion; ties go to the earlier arrival, then the lower id. A shorter
//! job arriving mid-run waits for the next decision point.

use super::simulation::{by_arrival, Simulation};
use super::{Algorithm, Scheduler};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{ExecutionLog, Process, Timeline};

/// Shortest-job-first scheduler.
#[derive(Debug, Clone)]
pub struct SjfScheduler {
    input: Vec<Process>,
    completed: Vec<Process>,
    sim: Simulation,
    engine: RuleEngine,
}

impl SjfScheduler {
    /// Creates a scheduler over private copies of `processes`.
    pub fn new(processes: &[Process]) -> Self {
        Self {
            input: processes.iter().map(Process::fresh).collect(),
            completed: Vec::new(),
            sim: Simulation::default(),
            engine: RuleEngine::new()
                .with_rule(rules::ShortestBurst)
                .with_tie_breaker(rules::EarliestArrival),
        }
    }
}

impl Scheduler for SjfScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
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

#[cfg(test)]
mod tests {
    use super::*;

    fn by_id(done: &[Process], id: u32) -> &Process {
        done.iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_sjf_picks_shortest_available() {
        let processes = vec![
            Process::new(1, 6, 1, 0),
            Process::new(2, 8, 1, 1),
            Process::new(3, 2, 1, 2),
            Process::new(4, 3, 1, 3),
        ];
        let mut s = SjfScheduler::new(&processes);
        let done = s.run();

        // P1 is alone at t=0, then shortest-first among arrived.
        assert_eq!(s.timeline().dispatch_order(), vec![1, 3, 4, 2]);
        assert_eq!(by_id(&done, 3).waiting_time, 4); // starts at 6
        assert_eq!(by_id(&done, 4).waiting_time, 5); // starts at 8
        assert_eq!(by_id(&done, 2).waiting_time, 10); // starts at 11
        assert_eq!(by_id(&done, 2).completion_time, Some(19));
    }

    #[test]
    fn test_sjf_non_preemptive() {
        // A 1-tick job arriving during a 10-tick run does not interrupt it.
        let processes = vec![Process::new(1, 10, 1, 0), Process::new(2, 1, 1, 1)];
        let mut s = SjfScheduler::new(&processes);
        let done = s.run();

        assert_eq!(by_id(&done, 1).completion_time, Some(10));
        assert_eq!(by_id(&done, 2).completion_time, Some(11));
        assert_eq!(s.timeline().len(), 2);
    }

    #[test]
    fn test_sjf_tie_breaks() {
        // Same burst: earlier arrival first, then lower id.
        let processes = vec![
            Process::new(1, 5, 1, 0),
            Process::new(4, 2, 1, 2),
            Process::new(3, 2, 1, 1),
            Process::new(2, 2, 1, 1),
        ];
        let mut s = SjfScheduler::new(&processes);
        s.run();
        assert_eq!(s.timeline().dispatch_order(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sjf_idle_then_resume() {
        let processes = vec![Process::new(1, 2, 1, 0), Process::new(2, 2, 1, 5)];
        let mut s = SjfScheduler::new(&processes);
        let done = s.run();

        assert_eq!(s.timeline().idle_time(), 3);
        assert_eq!(by_id(&done, 2).completion_time, Some(7));
        assert!(s.timeline().is_contiguous());
    }

    #[test]
    fn test_sjf_empty() {
        let mut s = SjfScheduler::new(&[]);
        assert!(s.run().is_empty());
        assert!(s.timeline().is_empty());
    }
}
