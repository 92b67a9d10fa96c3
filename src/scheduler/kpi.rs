//! Scheduling run metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from the completed processes
//! of a run and its Gantt timeline.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | Mean time spent ready but not running |
//! | Avg Turnaround | Mean completion - arrival |
//! | Avg Response | Mean first dispatch - arrival |
//! | Total Execution Time | Last completion - first arrival |
//! | Throughput | Completed processes / total execution time |
//! | CPU Utilization | (timeline span - idle) / span × 100 |
//!
//! # Reference
//! Silberschatz et al., "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Process, Timeline};

/// Aggregate metrics of a scheduling run.
///
/// Times are in simulation ticks; utilization is a percentage (0..=100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of completed processes.
    pub completed: usize,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Longest single ready-queue wait of any process.
    pub max_waiting_time: i64,
    /// Last completion minus first arrival.
    pub total_execution_time: i64,
    /// Time the CPU sat idle.
    pub idle_time: i64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Percentage of the timeline spent running processes.
    pub cpu_utilization: f64,
}

impl Statistics {
    /// Computes metrics from completed processes and their timeline.
    ///
    /// Processes without a completion time are ignored. Empty input yields
    /// all zeros.
    pub fn calculate(processes: &[Process], timeline: &Timeline) -> Self {
        let done: Vec<&Process> = processes
            .iter()
            .filter(|p| p.completion_time.is_some())
            .collect();
        if done.is_empty() {
            return Self::default();
        }

        let n = done.len() as f64;
        let total_waiting: i64 = done.iter().map(|p| p.waiting_time).sum();
        let total_turnaround: i64 = done.iter().map(|p| p.turnaround_time).sum();
        let total_response: i64 = done.iter().filter_map(|p| p.response_time).sum();
        let max_waiting_time = done.iter().map(|p| p.max_waiting_time).max().unwrap_or(0);

        let last_completion = done.iter().filter_map(|p| p.completion_time).max().unwrap_or(0);
        let first_arrival = done.iter().map(|p| p.arrival_time).min().unwrap_or(0);
        let total_execution_time = last_completion - first_arrival;

        let throughput = if total_execution_time > 0 {
            n / total_execution_time as f64
        } else {
            0.0
        };

        let span = timeline.span();
        let idle_time = timeline.idle_time();
        let cpu_utilization = if span > 0 {
            (span - idle_time) as f64 / span as f64 * 100.0
        } else {
            0.0
        };

        Self {
            completed: done.len(),
            avg_waiting_time: total_waiting as f64 / n,
            avg_turnaround_time: total_turnaround as f64 / n,
            avg_response_time: total_response as f64 / n,
            max_waiting_time,
            total_execution_time,
            idle_time,
            throughput,
            cpu_utilization,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Waiting Time    : {:.2} time units", self.avg_waiting_time)?;
        writeln!(f, "Average Turnaround Time : {:.2} time units", self.avg_turnaround_time)?;
        writeln!(f, "Average Response Time   : {:.2} time units", self.avg_response_time)?;
        writeln!(f, "Total Execution Time    : {} time units", self.total_execution_time)?;
        writeln!(f, "Throughput              : {:.4} processes/time unit", self.throughput)?;
        write!(f, "CPU Utilization         : {:.2}%", self.cpu_utilization)
    }
}
