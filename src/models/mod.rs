//! CPU scheduling domain models.
//!
//! Provides the data types shared by every scheduling algorithm: the
//! process record, the Gantt timeline, and the execution log.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Batch queue |
//! |------------|------------------|-------------|
//! | Process | Task / thread | Job |
//! | Timeline | CPU trace | Run history |
//! | ExecutionLog | Scheduler trace | Audit log |

mod execution_log;
mod process;
mod timeline;

pub use execution_log::{ExecutionLog, LogEntry, LogEvent};
pub use process::{Process, ProcessId, ProcessState};
pub use timeline::{GanttEntry, Slot, Timeline};
