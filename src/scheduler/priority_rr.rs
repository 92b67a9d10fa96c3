//! Priority round robin with aging.
//!
//! # Algorithm
//!
//! Round robin within each priority level, one FIFO queue per level. The
//! lowest-numbered non-empty level is always served first.
//!
//! # Aging
//!
//! When a process that has already run is dispatched again, its wait since
//! leaving the CPU is compared to `aging_factor`. If it waited at least that
//! long and its effective priority is above 1, the priority drops by one.
//! The new level takes effect on its next enqueue.
//!
//! # Reference
//! Silberschatz et al., "Operating System Concepts", Ch. 5.3 (Priority Scheduling, aging)

use std::collections::{BTreeMap, VecDeque};

use super::simulation::{by_arrival, Simulation};
use super::{Algorithm, Scheduler, SchedulerConfig};
use crate::error::ConfigError;
use crate::models::{ExecutionLog, LogEvent, Process, Timeline};

/// Highest precedence an aged process can reach.
pub const MIN_AGED_PRIORITY: i32 = 1;

/// Ready queues keyed by effective priority, FIFO within a level.
#[derive(Debug, Clone, Default)]
struct PriorityQueues {
    levels: BTreeMap<i32, VecDeque<Process>>,
}

impl PriorityQueues {
    fn push(&mut self, process: Process) {
        self.levels
            .entry(process.effective_priority)
            .or_default()
            .push_back(process);
    }

    fn extend(&mut self, processes: impl IntoIterator<Item = Process>) {
        for p in processes {
            self.push(p);
        }
    }

    /// Pops the head of the most important level, pruning emptied levels.
    fn pop(&mut self) -> Option<Process> {
        loop {
            let mut entry = self.levels.first_entry()?;
            match entry.get_mut().pop_front() {
                Some(p) => {
                    if entry.get().is_empty() {
                        entry.remove();
                    }
                    return Some(p);
                }
                None => {
                    entry.remove();
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.levels.values().all(VecDeque::is_empty)
    }
}

/// Priority round robin scheduler with aging.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::scheduler::{PriorityRoundRobinScheduler, Scheduler, SchedulerConfig};
///
/// let processes = vec![Process::new(1, 4, 2, 0), Process::new(2, 2, 1, 0)];
/// let config = SchedulerConfig::default().with_time_quantum(2).with_aging_factor(3);
/// let mut scheduler = PriorityRoundRobinScheduler::with_config(&processes, &config).unwrap();
/// scheduler.run();
///
/// // P2 holds the higher level and finishes first.
/// assert_eq!(scheduler.timeline().dispatch_order(), vec![2, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityRoundRobinScheduler {
    input: Vec<Process>,
    completed: Vec<Process>,
    sim: Simulation,
    time_quantum: i64,
    aging_factor: i64,
}

impl PriorityRoundRobinScheduler {
    /// Creates a scheduler with the given quantum and aging factor.
    ///
    /// # Errors
    /// [`ConfigError`] if either value is not positive.
    pub fn new(processes: &[Process], time_quantum: i64, aging_factor: i64) -> Result<Self, ConfigError> {
        let config = SchedulerConfig {
            time_quantum,
            aging_factor,
        };
        Self::with_config(processes, &config)
    }

    /// Creates a scheduler from a config.
    pub fn with_config(processes: &[Process], config: &SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            input: processes.iter().map(Process::fresh).collect(),
            completed: Vec::new(),
            sim: Simulation::default(),
            time_quantum: config.time_quantum,
            aging_factor: config.aging_factor,
        })
    }

    /// The configured quantum.
    pub fn time_quantum(&self) -> i64 {
        self.time_quantum
    }

    /// The configured aging threshold.
    pub fn aging_factor(&self) -> i64 {
        self.aging_factor
    }

    /// Applies aging to a process about to be re-dispatched.
    fn age(&self, sim: &mut Simulation, process: &mut Process) {
        if !process.has_run() {
            return;
        }
        let waited = sim.clock - process.last_running_time;
        if waited >= self.aging_factor && process.effective_priority > MIN_AGED_PRIORITY {
            let from = process.effective_priority;
            process.effective_priority -= 1;
            sim.log.record(
                sim.clock,
                LogEvent::PriorityAged {
                    id: process.id,
                    from,
                    to: process.effective_priority,
                },
            );
        }
    }
}

impl Scheduler for PriorityRoundRobinScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::PriorityRoundRobin
    }

    fn run(&mut self) -> Vec<Process> {
        let mut pending: VecDeque<Process> = by_arrival(&self.input).into();
        let total = pending.len();
        let mut sim = Simulation::starting_at(pending.front().map_or(0, |p| p.arrival_time));
        let mut ready = PriorityQueues::default();
        ready.extend(sim.take_arrivals(&mut pending));
        let mut completed = Vec::with_capacity(total);

        while completed.len() < total {
            let Some(mut process) = ready.pop() else {
                if let Some(next) = pending.front().map(|p| p.arrival_time) {
                    sim.idle_until(next);
                    ready.extend(sim.take_arrivals(&mut pending));
                }
                continue;
            };

            self.age(&mut sim, &mut process);
            sim.run_slice(&mut process, self.time_quantum);
            ready.extend(sim.take_arrivals(&mut pending));

            if process.is_completed() {
                sim.finish(&mut process);
                completed.push(process);
            } else {
                process.preempt(sim.clock);
                ready.push(process);
            }
        }
        debug_assert!(ready.is_empty());

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

    fn run(processes: &[Process], quantum: i64, aging: i64) -> (Vec<Process>, PriorityRoundRobinScheduler) {
        let mut s = PriorityRoundRobinScheduler::new(processes, quantum, aging).unwrap();
        let done = s.run();
        (done, s)
    }

    fn aging_events(s: &PriorityRoundRobinScheduler) -> Vec<(i64, u32, i32, i32)> {
        s.execution_log()
            .entries()
            .iter()
            .filter_map(|e| match e.event {
                LogEvent::PriorityAged { id, from, to } => Some((e.time, id, from, to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_queues_pop_lowest_level_fifo() {
        let mut q = PriorityQueues::default();
        q.push(Process::new(1, 1, 3, 0));
        q.push(Process::new(2, 1, 1, 0));
        q.push(Process::new(3, 1, 3, 0));
        q.push(Process::new(4, 1, 1, 0));

        let order: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|p| p.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
        assert!(q.is_empty());
        assert!(q.levels.is_empty());
    }

    #[test]
    fn test_prr_higher_level_first() {
        let processes = vec![
            Process::new(1, 3, 3, 0),
            Process::new(2, 3, 1, 0),
            Process::new(3, 2, 2, 0),
        ];
        let (done, s) = run(&processes, 2, 100);

        // Level 1 drains (round robin with itself), then level 2, then 3.
        assert_eq!(s.timeline().dispatch_order(), vec![2, 2, 3, 1, 1]);
        assert_eq!(by_id(&done, 2).completion_time, Some(3));
        assert_eq!(by_id(&done, 3).completion_time, Some(5));
        assert_eq!(by_id(&done, 1).completion_time, Some(8));
    }

    #[test]
    fn test_prr_round_robin_within_level() {
        let processes = vec![Process::new(1, 4, 1, 0), Process::new(2, 3, 1, 0)];
        let (_, s) = run(&processes, 2, 100);
        assert_eq!(s.timeline().dispatch_order(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_prr_aging_promotes_waiting_process() {
        // P1 (prio 3) runs once, then waits behind P2 (prio 2, burst 6).
        let processes = vec![Process::new(1, 4, 3, 0), Process::new(2, 6, 2, 1)];
        let (done, s) = run(&processes, 2, 3);

        // P1 0-2, P2 2-4, 4-6, 6-8, P1 8-10 (waited 6 >= 3 → 3 to 2).
        assert_eq!(s.timeline().dispatch_order(), vec![1, 2, 2, 2, 1]);
        assert_eq!(aging_events(&s), vec![(8, 1, 3, 2)]);
        assert_eq!(by_id(&done, 1).effective_priority, 2);
        assert_eq!(by_id(&done, 1).priority, 3);
        assert_eq!(by_id(&done, 1).completion_time, Some(10));
    }

    #[test]
    fn test_prr_aging_changes_next_enqueue() {
        // After aging, P1 shares level 1 with P2 and round-robins with it.
        let processes = vec![Process::new(1, 6, 2, 0), Process::new(2, 8, 1, 1)];
        let (_, s) = run(&processes, 2, 2);

        // P1 0-2; P2 2-4, 4-6, 6-8, 8-10 (level 1 alone);
        // P2 done at 10; P1 waited 8 → level 1, finishes 10-14.
        assert_eq!(s.timeline().dispatch_order(), vec![1, 2, 2, 2, 2, 1, 1]);
        assert_eq!(aging_events(&s), vec![(10, 1, 2, 1)]);
    }

    #[test]
    fn test_prr_aging_bounded_at_one() {
        let processes = vec![Process::new(1, 4, 1, 0), Process::new(2, 4, 1, 0)];
        let (done, s) = run(&processes, 1, 1);
        assert!(aging_events(&s).is_empty());
        assert!(done.iter().all(|p| p.effective_priority == 1));
    }

    #[test]
    fn test_prr_first_dispatch_never_ages() {
        let processes = vec![Process::new(1, 10, 1, 0), Process::new(2, 1, 5, 0)];
        let (done, s) = run(&processes, 2, 1);
        // P2 waits 10 ticks for its only dispatch; no aging on first run.
        assert!(aging_events(&s).is_empty());
        assert_eq!(by_id(&done, 2).effective_priority, 5);
        assert_eq!(by_id(&done, 2).waiting_time, 10);
    }

    #[test]
    fn test_prr_invariants_with_idle() {
        let processes = vec![
            Process::new(1, 3, 2, 0),
            Process::new(2, 5, 1, 6),
            Process::new(3, 2, 3, 7),
        ];
        let (done, s) = run(&processes, 2, 4);
        assert_eq!(s.timeline().idle_time(), 3);
        assert!(s.timeline().is_contiguous());
        for p in &done {
            assert_eq!(p.turnaround_time, p.waiting_time + p.burst_time);
        }
    }

    #[test]
    fn test_prr_invalid_config() {
        assert_eq!(
            PriorityRoundRobinScheduler::new(&[], 2, 0).unwrap_err(),
            ConfigError::InvalidAgingFactor(0)
        );
        assert_eq!(
            PriorityRoundRobinScheduler::new(&[], -1, 3).unwrap_err(),
            ConfigError::InvalidTimeQuantum(-1)
        );
    }
}
