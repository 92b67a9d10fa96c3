//! Random process-set generation.
//!
//! Builds test workloads with configurable burst, priority and arrival
//! ranges plus an arrival pattern. All ranges are inclusive.
//!
//! # Arrival patterns
//!
//! | Pattern | Arrivals |
//! |---------|----------|
//! | `Random` | independent uniform draws |
//! | `Uniform` | evenly spaced across the range |
//! | `Burst` | clustered on `count / 3 + 1` random instants |
//! | `Grouped` | within ±5 of a per-priority base instant |

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessId};

/// Half-width of the arrival window around a priority group's base.
const GROUP_WINDOW: i64 = 5;

/// Reorders a `(min, max)` pair so `min <= max`.
fn ordered<T: Ord + Copy>((a, b): (T, T)) -> (T, T) {
    (a.min(b), a.max(b))
}

/// How arrival times are distributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPattern {
    /// Independent uniform arrivals.
    #[default]
    Random,
    /// Evenly spaced arrivals.
    Uniform,
    /// Several processes arrive at once, then a gap.
    Burst,
    /// Processes of the same priority arrive close together.
    Grouped,
}

/// Random process generator.
///
/// Ranges are normalized when generating, so a reversed pair (for example
/// from deserialized input) behaves like its ordered form.
///
/// # Example
///
/// ```
/// use u_cpusched::generator::{ArrivalPattern, ProcessGenerator};
///
/// let processes = ProcessGenerator::new()
///     .with_burst_range(1, 10)
///     .with_arrival_range(0, 20)
///     .with_pattern(ArrivalPattern::Uniform)
///     .generate_seeded(5, 42);
///
/// assert_eq!(processes.len(), 5);
/// assert_eq!(processes[0].arrival_time, 0);
/// assert_eq!(processes[4].arrival_time, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessGenerator {
    /// Burst time range.
    pub burst_range: (i64, i64),
    /// Priority range.
    pub priority_range: (i32, i32),
    /// Arrival time range.
    pub arrival_range: (i64, i64),
    /// Arrival distribution.
    pub pattern: ArrivalPattern,
}

impl ProcessGenerator {
    /// Creates a generator with default ranges (burst 1..=20, priority
    /// 1..=10, arrival 0..=100, random arrivals).
    pub fn new() -> Self {
        Self {
            burst_range: (1, 20),
            priority_range: (1, 10),
            arrival_range: (0, 100),
            pattern: ArrivalPattern::Random,
        }
    }

    /// Sets the burst time range. Bounds are reordered if reversed.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.burst_range = ordered((min, max));
        self
    }

    /// Sets the priority range. Bounds are reordered if reversed.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority_range = ordered((min, max));
        self
    }

    /// Sets the arrival time range. Bounds are reordered if reversed.
    pub fn with_arrival_range(mut self, min: i64, max: i64) -> Self {
        self.arrival_range = ordered((min, max));
        self
    }

    /// Sets the arrival pattern.
    pub fn with_pattern(mut self, pattern: ArrivalPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Generates `count` processes with ids `1..=count`.
    pub fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Process> {
        let (min_burst, max_burst) = ordered(self.burst_range);
        let (min_priority, max_priority) = ordered(self.priority_range);

        let priorities: Vec<i32> = (0..count)
            .map(|_| rng.random_range(min_priority..=max_priority))
            .collect();
        let arrivals = self.arrivals(&priorities, rng);

        let processes: Vec<Process> = priorities
            .iter()
            .zip(arrivals)
            .enumerate()
            .map(|(i, (&priority, arrival))| {
                let burst = rng.random_range(min_burst..=max_burst);
                Process::new(i as ProcessId + 1, burst, priority, arrival)
            })
            .collect();

        log::debug!(
            "generated {} processes ({:?} arrivals)",
            processes.len(),
            self.pattern
        );
        processes
    }

    /// Generates `count` processes from a fixed seed. Same seed, same set.
    pub fn generate_seeded(&self, count: usize, seed: u64) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(count, &mut rng)
    }

    fn arrivals<R: Rng>(&self, priorities: &[i32], rng: &mut R) -> Vec<i64> {
        let (min, max) = ordered(self.arrival_range);
        let count = priorities.len();

        match self.pattern {
            ArrivalPattern::Random => (0..count).map(|_| rng.random_range(min..=max)).collect(),
            ArrivalPattern::Uniform => {
                if count <= 1 {
                    return vec![min; count];
                }
                let step = (max - min) as f64 / (count - 1) as f64;
                (0..count)
                    .map(|i| min + (i as f64 * step).floor() as i64)
                    .collect()
            }
            ArrivalPattern::Burst => {
                let mut points: Vec<i64> = (0..count / 3 + 1)
                    .map(|_| rng.random_range(min..=max))
                    .collect();
                points.sort_unstable();
                (0..count)
                    .map(|_| points[rng.random_range(0..points.len())])
                    .collect()
            }
            ArrivalPattern::Grouped => {
                // Bases are drawn lazily, in first-use order, only for
                // priorities that occur.
                let mut bases: BTreeMap<i32, i64> = BTreeMap::new();
                priorities
                    .iter()
                    .map(|&p| {
                        let base = *bases
                            .entry(p)
                            .or_insert_with(|| rng.random_range(min..=max));
                        let jitter = rng.random_range(-GROUP_WINDOW..=GROUP_WINDOW);
                        (base + jitter).clamp(min, max)
                    })
                    .collect()
            }
        }
    }
}

impl Default for ProcessGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_processes;
    use std::collections::HashMap;

    #[test]
    fn test_generate_within_ranges() {
        let generator = ProcessGenerator::new()
            .with_burst_range(2, 6)
            .with_priority_range(1, 3)
            .with_arrival_range(5, 15);
        let processes = generator.generate_seeded(50, 7);

        assert_eq!(processes.len(), 50);
        for (i, p) in processes.iter().enumerate() {
            assert_eq!(p.id, i as u32 + 1);
            assert!((2..=6).contains(&p.burst_time));
            assert!((1..=3).contains(&p.priority));
            assert!((5..=15).contains(&p.arrival_time));
        }
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let generator = ProcessGenerator::new().with_pattern(ArrivalPattern::Burst);
        assert_eq!(generator.generate_seeded(10, 99), generator.generate_seeded(10, 99));
    }

    #[test]
    fn test_uniform_spacing() {
        let processes = ProcessGenerator::new()
            .with_arrival_range(0, 10)
            .with_pattern(ArrivalPattern::Uniform)
            .generate_seeded(4, 1);
        let arrivals: Vec<i64> = processes.iter().map(|p| p.arrival_time).collect();
        // step = 10/3
        assert_eq!(arrivals, vec![0, 3, 6, 10]);
    }

    #[test]
    fn test_uniform_single() {
        let processes = ProcessGenerator::new()
            .with_arrival_range(4, 10)
            .with_pattern(ArrivalPattern::Uniform)
            .generate_seeded(1, 1);
        assert_eq!(processes[0].arrival_time, 4);
    }

    #[test]
    fn test_burst_clusters() {
        let processes = ProcessGenerator::new()
            .with_arrival_range(0, 1000)
            .with_pattern(ArrivalPattern::Burst)
            .generate_seeded(9, 3);
        let mut distinct: Vec<i64> = processes.iter().map(|p| p.arrival_time).collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() <= 9 / 3 + 1);
    }

    #[test]
    fn test_grouped_same_priority_close() {
        let processes = ProcessGenerator::new()
            .with_priority_range(1, 3)
            .with_arrival_range(0, 200)
            .with_pattern(ArrivalPattern::Grouped)
            .generate_seeded(40, 11);

        let mut by_priority: HashMap<i32, Vec<i64>> = HashMap::new();
        for p in &processes {
            by_priority.entry(p.priority).or_default().push(p.arrival_time);
        }
        for arrivals in by_priority.values() {
            let lo = arrivals.iter().min().unwrap();
            let hi = arrivals.iter().max().unwrap();
            assert!(hi - lo <= 2 * GROUP_WINDOW);
        }
    }

    #[test]
    fn test_grouped_wide_priority_range() {
        // Only the priorities actually drawn get a base arrival.
        let generator = ProcessGenerator::new()
            .with_priority_range(1, i32::MAX)
            .with_arrival_range(0, 50)
            .with_pattern(ArrivalPattern::Grouped);
        let processes = generator.generate_seeded(3, 1);

        assert_eq!(processes.len(), 3);
        assert!(processes.iter().all(|p| (0..=50).contains(&p.arrival_time)));
        assert_eq!(processes, generator.generate_seeded(3, 1));
    }

    #[test]
    fn test_reversed_fields_normalized_on_generate() {
        let json = r#"{
            "burst_range": [8, 2],
            "priority_range": [5, 1],
            "arrival_range": [30, 10],
            "pattern": "grouped"
        }"#;
        let generator: ProcessGenerator = serde_json::from_str(json).unwrap();
        assert_eq!(generator.burst_range, (8, 2));

        for p in generator.generate_seeded(20, 4) {
            assert!((2..=8).contains(&p.burst_time));
            assert!((1..=5).contains(&p.priority));
            assert!((10..=30).contains(&p.arrival_time));
        }
    }

    #[test]
    fn test_reversed_bounds_reordered() {
        let generator = ProcessGenerator::new().with_burst_range(9, 3);
        assert_eq!(generator.burst_range, (3, 9));
    }

    #[test]
    fn test_generate_zero() {
        assert!(ProcessGenerator::new().generate_seeded(0, 5).is_empty());
    }
}
