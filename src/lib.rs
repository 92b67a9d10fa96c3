//! CPU scheduling simulator.
//!
//! Runs a fixed set of processes through a classic single-CPU scheduling
//! algorithm in discrete time and records what happened: per-process
//! waiting, turnaround, response and completion times, a Gantt timeline
//! with idle gaps, and a human-readable execution log.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Timeline`, `ExecutionLog`
//! - **`dispatching`**: Selection rules and the rule engine used to pick the
//!   next process
//! - **`scheduler`**: FCFS, SJF, Priority, Round Robin and Priority Round
//!   Robin with aging, plus run `Statistics`
//! - **`validation`**: Input integrity checks (duplicate IDs, bad times)
//! - **`generator`**: Random workloads with arrival patterns
//! - **`csv`**: Process, result and Gantt CSV files
//! - **`error`**: Configuration and CSV errors
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::Process;
//! use u_cpusched::scheduler::{Algorithm, SchedulerConfig};
//!
//! let processes = vec![
//!     Process::new(1, 5, 1, 0),
//!     Process::new(2, 3, 1, 1),
//!     Process::new(3, 1, 1, 2),
//! ];
//!
//! let mut scheduler = Algorithm::Fcfs
//!     .build(&processes, &SchedulerConfig::default())
//!     .unwrap();
//! let done = scheduler.run();
//!
//! let completions: Vec<_> = done.iter().map(|p| p.completion_time).collect();
//! assert_eq!(completions, vec![Some(5), Some(8), Some(9)]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum, Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod csv;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;
