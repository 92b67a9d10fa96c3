//! Execution log.
//!
//! Human-readable trace of a run. Diagnostic only, but deterministic for a
//! given input, so it is safe to compare across runs.

use std::fmt;

use super::ProcessId;

/// A timestamped event in the execution log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Simulation time of the event.
    pub time: i64,
    /// What happened.
    pub event: LogEvent,
}

/// Events recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// The CPU sat idle until the given time.
    Idle { until: i64 },
    /// A process became ready.
    Arrived { id: ProcessId, priority: i32 },
    /// A non-preemptive dispatch: the process runs its whole burst.
    Started { id: ProcessId, burst: i64 },
    /// A preemptive dispatch for one slice.
    Running {
        id: ProcessId,
        slice: i64,
        remaining: i64,
        priority: i32,
    },
    /// Aging raised the precedence of a process.
    PriorityAged { id: ProcessId, from: i32, to: i32 },
    /// A process finished.
    Completed { id: ProcessId },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time {}: ", self.time)?;
        match &self.event {
            LogEvent::Idle { until } => write!(f, "CPU idle until {until}"),
            LogEvent::Arrived { id, priority } => {
                write!(f, "Process {id} arrived with priority {priority}")
            }
            LogEvent::Started { id, burst } => {
                write!(f, "Starting Process {id} (burst time: {burst})")
            }
            LogEvent::Running {
                id,
                slice,
                remaining,
                priority,
            } => write!(
                f,
                "Running Process {id} for {slice} units (remaining: {remaining}, priority: {priority})"
            ),
            LogEvent::PriorityAged { id, from, to } => write!(
                f,
                "Process {id} priority increased from {from} to {to} due to aging"
            ),
            LogEvent::Completed { id } => write!(f, "Completed Process {id}"),
        }
    }
}

/// Ordered execution log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionLog {
    entries: Vec<LogEntry>,
}

impl ExecutionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event at `time`.
    pub fn record(&mut self, time: i64, event: LogEvent) {
        log::trace!("t={time}: {event:?}");
        self.entries.push(LogEntry { time, event });
    }

    /// All entries in order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Rendered log lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
