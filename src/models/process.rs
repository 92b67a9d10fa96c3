//! Process model.
//!
//! A process is one simulated task competing for a single CPU. It carries
//! static inputs (burst, priority, arrival) set by the caller and mutable
//! accounting state driven by exactly one scheduler during a run.
//!
//! # Lifecycle
//!
//! ```text
//! New ──admit──▶ Ready ──dispatch/execute──▶ Running ──┬──preempt──▶ Ready
//!                                                      └──complete─▶ Completed
//! ```
//!
//! # Time Representation
//! All times are integer simulation ticks relative to t=0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier, assigned by the caller.
pub type ProcessId = u32;

/// Execution state of a process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Created, not yet admitted to a ready queue.
    #[default]
    New,
    /// Eligible to run, waiting for the CPU.
    Ready,
    /// Currently holding the CPU.
    Running,
    /// Finished; all metrics are final.
    Completed,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// A simulated process.
///
/// `priority` follows the convention lower value = higher precedence.
/// Priority round robin ages `effective_priority` only; `priority` keeps
/// the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Total CPU time required (> 0).
    pub burst_time: i64,
    /// Input priority (lower = more important).
    pub priority: i32,
    /// Time at which the process becomes eligible to run.
    pub arrival_time: i64,

    /// CPU time still owed.
    pub remaining_time: i64,
    /// Accumulated time spent ready but not running.
    pub waiting_time: i64,
    /// Longest single stretch spent in a ready queue.
    pub max_waiting_time: i64,
    /// Current lifecycle state.
    pub state: ProcessState,
    /// Time the process last entered a ready queue or left the CPU.
    pub last_running_time: i64,
    /// CPU time executed so far.
    pub cpu_time_acquired: i64,
    /// Priority used for queue placement (aged by priority round robin).
    pub effective_priority: i32,

    /// Completion time. `None` until completed.
    pub completion_time: Option<i64>,
    /// completion_time - arrival_time. Zero until completed.
    pub turnaround_time: i64,
    /// Time from arrival to first dispatch. `None` until first dispatch.
    pub response_time: Option<i64>,
}

impl Process {
    /// Creates a new process in the `New` state.
    pub fn new(id: ProcessId, burst_time: i64, priority: i32, arrival_time: i64) -> Self {
        Self {
            id,
            burst_time,
            priority,
            arrival_time,
            remaining_time: burst_time,
            waiting_time: 0,
            max_waiting_time: 0,
            state: ProcessState::New,
            last_running_time: arrival_time,
            cpu_time_acquired: 0,
            effective_priority: priority,
            completion_time: None,
            turnaround_time: 0,
            response_time: None,
        }
    }

    /// Pristine copy built from the static inputs only.
    ///
    /// Schedulers work on fresh copies so the caller's records are never
    /// touched and repeated runs start from the same state.
    pub fn fresh(&self) -> Self {
        Self::new(self.id, self.burst_time, self.priority, self.arrival_time)
    }

    /// Moves a new process into the ready state.
    ///
    /// Waiting is measured from `arrival_time`, regardless of when the
    /// scheduler notices the arrival.
    pub fn admit(&mut self) {
        if self.state == ProcessState::New {
            self.state = ProcessState::Ready;
            self.last_running_time = self.arrival_time;
        }
    }

    /// Hands the CPU to this process at `current_time`.
    ///
    /// Records the response time on the first dispatch and folds the time
    /// spent ready into `waiting_time`. Returns that wait.
    pub fn dispatch(&mut self, current_time: i64) -> i64 {
        self.admit();
        if self.response_time.is_none() {
            self.response_time = Some(current_time - self.arrival_time);
        }
        let waited = current_time - self.last_running_time;
        self.update_waiting_time(current_time);
        self.last_running_time = current_time;
        waited
    }

    /// Runs the process for up to `time_slice` ticks.
    ///
    /// Returns the time actually consumed: `min(time_slice, remaining_time)`,
    /// or 0 for a completed process. Negative slices are treated as 0.
    pub fn execute(&mut self, time_slice: i64) -> i64 {
        if self.is_completed() {
            return 0;
        }
        let time_used = time_slice.max(0).min(self.remaining_time);
        self.cpu_time_acquired += time_used;
        self.remaining_time -= time_used;
        self.state = ProcessState::Running;
        time_used
    }

    /// Returns a running process to the ready state at `current_time`.
    pub fn preempt(&mut self, current_time: i64) {
        if self.state == ProcessState::Running {
            self.state = ProcessState::Ready;
            self.last_running_time = current_time;
        }
    }

    /// Marks the process completed at `current_time` and finalizes metrics.
    pub fn complete(&mut self, current_time: i64) {
        self.state = ProcessState::Completed;
        self.completion_time = Some(current_time);
        self.turnaround_time = current_time - self.arrival_time;
        self.remaining_time = 0;
        self.last_running_time = current_time;
    }

    /// Adds the gap since `last_running_time` to the waiting time.
    ///
    /// Only applies while the process is ready.
    pub fn update_waiting_time(&mut self, current_time: i64) {
        if self.state == ProcessState::Ready {
            let wait_period = current_time - self.last_running_time;
            self.waiting_time += wait_period;
            self.max_waiting_time = self.max_waiting_time.max(wait_period);
        }
    }

    /// Whether the process owes no more CPU time.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.remaining_time <= 0
    }

    /// Whether the process has been on the CPU at least once.
    #[inline]
    pub fn has_run(&self) -> bool {
        self.cpu_time_acquired > 0
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_new() {
        let p = Process::new(1, 5, 3, 2);
        assert_eq!(p.remaining_time, 5);
        assert_eq!(p.state, ProcessState::New);
        assert_eq!(p.effective_priority, 3);
        assert_eq!(p.completion_time, None);
        assert_eq!(p.response_time, None);
        assert!(!p.is_completed());
    }

    #[test]
    fn test_execute_partial_and_full() {
        let mut p = Process::new(1, 5, 1, 0);
        assert_eq!(p.execute(2), 2);
        assert_eq!(p.remaining_time, 3);
        assert_eq!(p.cpu_time_acquired, 2);
        assert_eq!(p.state, ProcessState::Running);

        // Slice larger than what remains
        assert_eq!(p.execute(10), 3);
        assert_eq!(p.remaining_time, 0);
        assert!(p.is_completed());
    }

    #[test]
    fn test_execute_completed_is_noop() {
        let mut p = Process::new(1, 2, 1, 0);
        p.execute(2);
        p.complete(2);
        let before = p.clone();
        assert_eq!(p.execute(4), 0);
        assert_eq!(p, before);
    }

    #[test]
    fn test_execute_negative_slice() {
        let mut p = Process::new(1, 4, 1, 0);
        assert_eq!(p.execute(-3), 0);
        assert_eq!(p.remaining_time, 4);
    }

    #[test]
    fn test_complete_metrics() {
        let mut p = Process::new(7, 3, 1, 4);
        p.execute(1);
        p.complete(12);
        assert_eq!(p.state, ProcessState::Completed);
        assert_eq!(p.completion_time, Some(12));
        assert_eq!(p.turnaround_time, 8);
        assert_eq!(p.remaining_time, 0);
    }

    #[test]
    fn test_update_waiting_only_when_ready() {
        let mut p = Process::new(1, 5, 1, 0);
        // New: ignored
        p.update_waiting_time(10);
        assert_eq!(p.waiting_time, 0);

        p.admit();
        p.update_waiting_time(3);
        assert_eq!(p.waiting_time, 3);
        assert_eq!(p.max_waiting_time, 3);
    }

    #[test]
    fn test_dispatch_cycle_accumulates_wait() {
        let mut p = Process::new(1, 4, 1, 1);
        p.admit();

        assert_eq!(p.dispatch(3), 2);
        assert_eq!(p.response_time, Some(2));
        p.execute(2);
        p.preempt(5);

        assert_eq!(p.dispatch(9), 4);
        p.execute(2);
        p.complete(11);

        assert_eq!(p.response_time, Some(2)); // set once
        assert_eq!(p.waiting_time, 6);
        assert_eq!(p.max_waiting_time, 4);
        assert_eq!(p.turnaround_time, p.waiting_time + p.burst_time);
    }

    #[test]
    fn test_fresh_discards_state() {
        let mut p = Process::new(2, 6, 4, 3);
        p.dispatch(5);
        p.execute(6);
        p.complete(11);
        p.effective_priority = 1;

        let f = p.fresh();
        assert_eq!(f, Process::new(2, 6, 4, 3));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProcessState::Ready.to_string(), "READY");
        assert_eq!(Process::new(3, 1, 1, 0).to_string(), "P3");
    }
}
