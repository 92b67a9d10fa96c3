//! Rule engine for multi-key dispatching.
//!
//! Applies rules in sequence: the next rule is consulted only when all
//! previous rules tie. Remaining ties go to the lowest process id, so the
//! order is always deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use super::SelectionRule;
use crate::models::Process;

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, RuleEngine};
///
/// // Priority scheduling: priority, then arrival, then id.
/// let engine = RuleEngine::new()
///     .with_rule(rules::HighestPriority)
///     .with_tie_breaker(rules::EarliestArrival);
/// assert_eq!(engine.rule_names(), vec!["PRIO", "FCFS"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary rule.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: SelectionRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Orders two processes. `Less` = `a` runs first.
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    }

    /// Sorts processes in dispatch order.
    pub fn sort(&self, processes: &mut [Process]) {
        processes.sort_by(|a, b| self.compare(a, b));
    }

    /// Index of the process that should run first.
    pub fn select_best(&self, processes: &[Process]) -> Option<usize> {
        self.select_best_where(processes, |_| true)
    }

    /// Index of the first process in dispatch order among those matching
    /// `eligible`. Earlier indices win exact ties.
    pub fn select_best_where<F>(&self, processes: &[Process], eligible: F) -> Option<usize>
    where
        F: Fn(&Process) -> bool,
    {
        processes
            .iter()
            .enumerate()
            .filter(|(_, p)| eligible(*p))
            .min_by(|(ia, a), (ib, b)| self.compare(a, b).then(ia.cmp(ib)))
            .map(|(i, _)| i)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
