//! Discrete-time stepping core shared by all schedulers.
//!
//! Owns the simulation clock, the Gantt timeline and the execution log.
//! Algorithms decide *which* process runs next and for how long; this
//! module advances the clock and keeps the records consistent.

use std::collections::VecDeque;

use crate::dispatching::{rules, RuleEngine};
use crate::models::{ExecutionLog, LogEvent, Process, Timeline};

/// Clock, timeline and log of one run.
#[derive(Debug, Clone, Default)]
pub(crate) struct Simulation {
    pub clock: i64,
    pub timeline: Timeline,
    pub log: ExecutionLog,
}

/// Arrival order: arrival time, then id.
pub(crate) fn arrival_order() -> RuleEngine {
    RuleEngine::new().with_rule(rules::EarliestArrival)
}

/// Fresh working copies sorted by arrival.
pub(crate) fn by_arrival(processes: &[Process]) -> Vec<Process> {
    let mut working: Vec<Process> = processes.iter().map(Process::fresh).collect();
    arrival_order().sort(&mut working);
    working
}

impl Simulation {
    /// Starts the clock at `time`.
    pub fn starting_at(time: i64) -> Self {
        Self {
            clock: time,
            ..Self::default()
        }
    }

    /// Idles the CPU until `time`. No-op if the clock is already there.
    pub fn idle_until(&mut self, time: i64) {
        if time <= self.clock {
            return;
        }
        self.log.record(self.clock, LogEvent::Idle { until: time });
        self.timeline.push_idle(self.clock, time);
        self.clock = time;
    }

    /// Runs a process for its whole remaining burst, then completes it.
    pub fn run_to_completion(&mut self, process: &mut Process) {
        let start = self.clock;
        process.dispatch(start);
        self.log.record(
            start,
            LogEvent::Started {
                id: process.id,
                burst: process.remaining_time,
            },
        );

        let used = process.execute(process.remaining_time);
        self.clock += used;
        self.timeline.push_run(process.id, start, self.clock);
        self.finish(process);
    }

    /// Dispatches a process for at most `quantum` ticks.
    ///
    /// Returns the time used. The caller decides whether the process
    /// completes or goes back to a ready queue.
    pub fn run_slice(&mut self, process: &mut Process, quantum: i64) -> i64 {
        let start = self.clock;
        process.dispatch(start);
        let slice = quantum.min(process.remaining_time);
        self.log.record(
            start,
            LogEvent::Running {
                id: process.id,
                slice,
                remaining: process.remaining_time,
                priority: process.effective_priority,
            },
        );

        let used = process.execute(slice);
        self.clock += used;
        self.timeline.push_run(process.id, start, self.clock);
        used
    }

    /// Completes a process at the current clock.
    pub fn finish(&mut self, process: &mut Process) {
        process.complete(self.clock);
        self.log
            .record(self.clock, LogEvent::Completed { id: process.id });
    }

    /// Pops every pending process that has arrived by the current clock.
    ///
    /// `pending` must be in arrival order. Returned processes are admitted
    /// (ready) and keep that order.
    pub fn take_arrivals(&mut self, pending: &mut VecDeque<Process>) -> Vec<Process> {
        let mut arrived = Vec::new();
        while pending
            .front()
            .is_some_and(|p| p.arrival_time <= self.clock)
        {
            if let Some(mut p) = pending.pop_front() {
                p.admit();
                self.log.record(
                    p.arrival_time,
                    LogEvent::Arrived {
                        id: p.id,
                        priority: p.effective_priority,
                    },
                );
                arrived.push(p);
            }
        }
        arrived
    }

    /// Non-preemptive selection loop.
    ///
    /// At each step the candidates are the processes that have arrived; the
    /// engine picks one and it runs to completion. With no candidates the
    /// CPU idles until the next arrival. Returns processes in completion
    /// order.
    pub fn run_by_selection(&mut self, mut remaining: Vec<Process>, engine: &RuleEngine) -> Vec<Process> {
        let mut completed = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let clock = self.clock;
            let Some(idx) = engine.select_best_where(&remaining, |p| p.arrival_time <= clock) else {
                if let Some(next) = remaining.iter().map(|p| p.arrival_time).min() {
                    self.idle_until(next);
                }
                continue;
            };

            let mut process = remaining.remove(idx);
            process.admit();
            self.run_to_completion(&mut process);
            completed.push(process);
        }

        completed
    }

    /// Emits a summary of the finished run at debug level.
    pub fn report(&self, algorithm: &str, completed: usize) {
        log::debug!(
            "{algorithm}: completed {completed} processes by t={} (span {}, idle {})",
            self.clock,
            self.timeline.span(),
            self.timeline.idle_time()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessState, Slot};

    #[test]
    fn test_idle_until() {
        let mut sim = Simulation::starting_at(2);
        sim.idle_until(1); // behind: ignored
        sim.idle_until(2); // equal: ignored
        assert!(sim.timeline.is_empty());

        sim.idle_until(5);
        assert_eq!(sim.clock, 5);
        assert_eq!(sim.timeline.entries()[0].slot, Slot::Idle);
        assert_eq!(sim.log.len(), 1);
    }

    #[test]
    fn test_run_to_completion() {
        let mut sim = Simulation::starting_at(3);
        let mut p = Process::new(1, 4, 1, 1);
        p.admit();
        sim.run_to_completion(&mut p);

        assert_eq!(sim.clock, 7);
        assert_eq!(p.state, ProcessState::Completed);
        assert_eq!(p.waiting_time, 2);
        assert_eq!(p.response_time, Some(2));
        assert_eq!(p.turnaround_time, 6);
    }

    #[test]
    fn test_run_slice_short_final() {
        let mut sim = Simulation::starting_at(0);
        let mut p = Process::new(1, 3, 1, 0);
        p.admit();
        assert_eq!(sim.run_slice(&mut p, 2), 2);
        p.preempt(sim.clock);
        assert_eq!(sim.run_slice(&mut p, 2), 1);
        assert!(p.is_completed());
        assert_eq!(sim.timeline.len(), 2);
    }

    #[test]
    fn test_take_arrivals() {
        let mut sim = Simulation::starting_at(3);
        let mut pending: VecDeque<Process> = by_arrival(&[
            Process::new(3, 1, 1, 9),
            Process::new(2, 1, 1, 3),
            Process::new(1, 1, 1, 0),
        ])
        .into();

        let arrived = sim.take_arrivals(&mut pending);
        let ids: Vec<u32> = arrived.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(arrived.iter().all(|p| p.state == ProcessState::Ready));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_by_arrival_ties_by_id() {
        let sorted = by_arrival(&[
            Process::new(5, 1, 1, 2),
            Process::new(2, 1, 1, 2),
            Process::new(9, 1, 1, 0),
        ]);
        let ids: Vec<u32> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }
}
