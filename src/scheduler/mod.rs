//! CPU scheduling algorithms and run metrics.
//!
//! Every algorithm is a discrete-time simulation over private copies of the
//! caller's processes. Build one, call [`Scheduler::run`], then read back
//! the completed processes, the Gantt timeline, the execution log and the
//! derived [`Statistics`].
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection |
//! |-----------|-----------|-----------|
//! | FCFS | no | arrival order |
//! | SJF | no | shortest burst among arrived |
//! | Priority | no | lowest priority value among arrived |
//! | Round Robin | yes | FIFO, fixed quantum |
//! | Priority RR | yes | lowest non-empty priority level, FIFO within, aging |
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::Process;
//! use u_cpusched::scheduler::{Algorithm, SchedulerConfig};
//!
//! let processes = vec![
//!     Process::new(1, 5, 2, 0),
//!     Process::new(2, 3, 1, 1),
//!     Process::new(3, 1, 3, 2),
//! ];
//! let config = SchedulerConfig::default();
//!
//! for algorithm in Algorithm::ALL {
//!     let mut scheduler = algorithm.build(&processes, &config).unwrap();
//!     let done = scheduler.run();
//!     assert_eq!(done.len(), 3);
//!     assert!(scheduler.timeline().is_contiguous());
//! }
//! ```

mod config;
mod fcfs;
mod kpi;
mod priority;
mod priority_rr;
mod round_robin;
mod simulation;
mod sjf;

pub use config::{SchedulerConfig, DEFAULT_AGING_FACTOR, DEFAULT_TIME_QUANTUM};
pub use fcfs::FcfsScheduler;
pub use kpi::Statistics;
pub use priority::PriorityScheduler;
pub use priority_rr::{PriorityRoundRobinScheduler, MIN_AGED_PRIORITY};
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{ExecutionLog, Process, Timeline};

/// A CPU scheduling algorithm over one process set.
///
/// `run` always restarts from the pristine inputs given at construction,
/// so calling it again reproduces the same result.
pub trait Scheduler: Send + fmt::Debug {
    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;

    /// Simulates until every process completes.
    ///
    /// Returns the completed processes in completion order.
    fn run(&mut self) -> Vec<Process>;

    /// Completed processes of the last run.
    fn processes(&self) -> &[Process];

    /// Gantt timeline of the last run.
    fn timeline(&self) -> &Timeline;

    /// Execution log of the last run.
    fn execution_log(&self) -> &ExecutionLog;

    /// Display name.
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    /// Metrics of the last run.
    fn statistics(&self) -> Statistics {
        Statistics::calculate(self.processes(), self.timeline())
    }
}

/// The available scheduling algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// First-come, first-served.
    Fcfs,
    /// Shortest job first (non-preemptive).
    Sjf,
    /// Priority (non-preemptive).
    Priority,
    /// Round robin.
    RoundRobin,
    /// Priority round robin with aging.
    PriorityRoundRobin,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
        Algorithm::PriorityRoundRobin,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First Come First Serve",
            Algorithm::Sjf => "Shortest Job First",
            Algorithm::Priority => "Priority Scheduling",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::PriorityRoundRobin => "Round Robin with Priority",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub fn code(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin => "rr",
            Algorithm::PriorityRoundRobin => "prr",
        }
    }

    /// Whether `time_quantum` applies.
    pub fn uses_time_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin | Algorithm::PriorityRoundRobin)
    }

    /// Whether `aging_factor` applies.
    pub fn uses_aging(&self) -> bool {
        matches!(self, Algorithm::PriorityRoundRobin)
    }

    /// Whether running processes can be preempted.
    pub fn is_preemptive(&self) -> bool {
        self.uses_time_quantum()
    }

    /// Builds a scheduler over private copies of `processes`.
    ///
    /// Only the options the algorithm uses are validated.
    ///
    /// # Errors
    /// [`ConfigError`] for a non-positive quantum or aging factor.
    pub fn build(
        &self,
        processes: &[Process],
        config: &SchedulerConfig,
    ) -> Result<Box<dyn Scheduler>, ConfigError> {
        let scheduler: Box<dyn Scheduler> = match self {
            Algorithm::Fcfs => Box::new(FcfsScheduler::new(processes)),
            Algorithm::Sjf => Box::new(SjfScheduler::new(processes)),
            Algorithm::Priority => Box::new(PriorityScheduler::new(processes)),
            Algorithm::RoundRobin => Box::new(RoundRobinScheduler::with_config(processes, config)?),
            Algorithm::PriorityRoundRobin => {
                Box::new(PriorityRoundRobinScheduler::with_config(processes, config)?)
            }
        };
        Ok(scheduler)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "priority" => Ok(Algorithm::Priority),
            "rr" | "round-robin" => Ok(Algorithm::RoundRobin),
            "prr" | "priority-rr" | "priority-round-robin" => Ok(Algorithm::PriorityRoundRobin),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}
