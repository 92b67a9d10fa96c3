//! Gantt timeline model.
//!
//! A timeline is the ordered record of what occupied the CPU over each
//! interval of a run. Idle gaps are recorded explicitly, so a finished
//! timeline covers `[first arrival, last completion)` with no holes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProcessId;

/// What occupied the CPU during an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// No process was ready.
    Idle,
    /// The given process was running.
    Process(ProcessId),
}

impl Slot {
    /// The process id, or `None` for idle slots.
    pub fn process_id(&self) -> Option<ProcessId> {
        match self {
            Slot::Idle => None,
            Slot::Process(id) => Some(*id),
        }
    }

    /// Whether this is an idle slot.
    pub fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Idle => f.write_str("IDLE"),
            Slot::Process(id) => write!(f, "P{id}"),
        }
    }
}

/// One contiguous interval `[start, end)` of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// What ran.
    pub slot: Slot,
    /// Start time (inclusive).
    pub start: i64,
    /// End time (exclusive).
    pub end: i64,
}

impl GanttEntry {
    /// Creates an entry.
    pub fn new(slot: Slot, start: i64, end: i64) -> Self {
        Self { slot, start, end }
    }

    /// Interval length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Ordered Gantt timeline of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<GanttEntry>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `id` ran during `[start, end)`. Empty intervals are
    /// dropped.
    pub fn push_run(&mut self, id: ProcessId, start: i64, end: i64) {
        if end > start {
            self.entries.push(GanttEntry::new(Slot::Process(id), start, end));
        }
    }

    /// Records an idle interval. Empty intervals are dropped.
    pub fn push_idle(&mut self, start: i64, end: i64) {
        if end > start {
            self.entries.push(GanttEntry::new(Slot::Idle, start, end));
        }
    }

    /// All entries in time order.
    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time from the first entry's start to the last entry's end.
    pub fn span(&self) -> i64 {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0,
        }
    }

    /// Total time spent idle.
    pub fn idle_time(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.slot.is_idle())
            .map(GanttEntry::duration)
            .sum()
    }

    /// Total time spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| !e.slot.is_idle())
            .map(GanttEntry::duration)
            .sum()
    }

    /// Whether every entry starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].end == w[1].start)
    }

    /// All execution slices of one process.
    pub fn slices_for(&self, id: ProcessId) -> Vec<&GanttEntry> {
        self.entries
            .iter()
            .filter(|e| e.slot == Slot::Process(id))
            .collect()
    }

    /// Process ids in the order they were dispatched (one per slice).
    pub fn dispatch_order(&self) -> Vec<ProcessId> {
        self.entries
            .iter()
            .filter_map(|e| e.slot.process_id())
            .collect()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("(empty)");
        }
        for e in &self.entries {
            write!(f, "| {} [{}-{}] ", e.slot, e.start, e.end)?;
        }
        f.write_str("|")
    }
}
