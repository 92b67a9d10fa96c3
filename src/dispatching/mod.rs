//! Selection rules and rule engine for dispatching.
//!
//! Provides the ordering rules used by the non-preemptive schedulers to pick
//! the next process, and by every scheduler to order simultaneous arrivals.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, RuleEngine};
//! use u_cpusched::models::Process;
//!
//! // Shortest job first: burst, then arrival, then id.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_tie_breaker(rules::EarliestArrival);
//!
//! let processes = vec![Process::new(1, 8, 1, 0), Process::new(2, 3, 1, 0)];
//! assert_eq!(engine.select_best(&processes), Some(1));
//! ```

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = selected first.
pub type RuleScore = i64;

/// A rule that ranks processes for dispatch.
///
/// # Score Convention
/// **Lower score = higher precedence.** Rules return smaller values for
/// processes that should run first.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "PRIO").
    fn name(&self) -> &'static str;

    /// Scores a process. Lower = dispatched earlier.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
