use std::collections::HashMap;

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scan::{LineEvent, LineScanner};

/// Measurements assembled from one benchmark run. Append-only during
/// assembly, never mutated afterwards.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Matrix dimensions in first-seen order, without duplicates.
    pub sizes: Vec<u32>,
    /// Sequential times in ms, positionally aligned with `sizes`. May be
    /// shorter than `sizes` on malformed input.
    pub sequential_times: Vec<f64>,
    /// threads -> size -> parallel time in ms.
    pub parallel_results: HashMap<u32, HashMap<u32, f64>>,
}

impl Dataset {
    pub fn sorted_thread_counts(&self) -> Vec<u32> {
        let mut threads: Vec<u32> = self.parallel_results.keys().copied().collect();
        threads.sort_unstable();
        threads
    }

    /// Sequential time for `size`; a size parsed without a recorded time
    /// reads as zero.
    pub fn sequential_time(&self, size: u32) -> f64 {
        self.sizes
            .iter()
            .position(|&s| s == size)
            .and_then(|i| self.sequential_times.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Parallel time for `(threads, size)`, zero when unmeasured.
    pub fn parallel_time(&self, threads: u32, size: u32) -> f64 {
        self.parallel_results
            .get(&threads)
            .and_then(|by_size| by_size.get(&size))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Scanning state folded over the classified line events.
#[derive(Debug, Default)]
pub struct Assembler {
    current_size: Option<u32>,
    dataset: Dataset,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LineEvent) {
        match event {
            LineEvent::SizeHeader(n) => {
                if !self.dataset.sizes.contains(&n) {
                    self.dataset.sizes.push(n);
                }
                self.current_size = Some(n);
            }
            LineEvent::SequentialTime(t) => self.dataset.sequential_times.push(t),
            LineEvent::ParallelRow { threads, time_ms } => match self.current_size {
                // Last write wins for repeated (threads, size) rows.
                Some(size) => {
                    self.dataset
                        .parallel_results
                        .entry(threads)
                        .or_default()
                        .insert(size, time_ms);
                }
                None => debug!("Discarding {threads}-thread row seen before any size header"),
            },
            LineEvent::Unclassified => {}
        }
    }

    pub fn finish(self) -> Dataset {
        self.dataset
    }
}

/// Folds the captured benchmark output into a [`Dataset`]. Content never
/// fails to parse; unrecognized lines are skipped.
pub fn parse_output(output: &str) -> Result<Dataset> {
    let scanner = LineScanner::new()?;
    let lines: Vec<&str> = output.lines().collect();
    let mut assembler = Assembler::new();
    for idx in 0..lines.len() {
        assembler.push(scanner.classify(&lines, idx));
    }
    Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
=============================================
  Jacobi Iterative Method - OpenMP Parallel
=============================================
Maximum available threads: 8

=====================================================
Matrix size: 100 x 100
=====================================================

Sequential:
  Iterations: 1000
  Time: 10.500000 ms
  Residual: 1.2e-05

Parallel (OpenMP):
-----------------------------------------------------
   Threads      Time (ms)     Speedup     Efficiency
-----------------------------------------------------
         2       6.100000        1.72         86.07%
         4       3.800000        2.76         69.08%
         8       3.100000        3.39         42.34%

=====================================================
Matrix size: 500 x 500
=====================================================

Sequential:
  Iterations: 1000
  Time: 260.000000 ms
  Residual: 3.4e-05

Parallel (OpenMP):
-----------------------------------------------------
   Threads      Time (ms)     Speedup     Efficiency
-----------------------------------------------------
         2     140.000000        1.86         92.86%
         4      75.000000        3.47         86.67%
         8      48.000000        5.42         67.71%
";

    #[test]
    fn assembles_full_transcript() {
        let ds = parse_output(TRANSCRIPT).unwrap();
        assert_eq!(ds.sizes, vec![100, 500]);
        assert_eq!(ds.sequential_times, vec![10.5, 260.0]);
        assert_eq!(ds.sorted_thread_counts(), vec![2, 4, 8]);
        assert_eq!(ds.parallel_time(2, 100), 6.1);
        assert_eq!(ds.parallel_time(8, 500), 48.0);
    }

    #[test]
    fn assembles_basic_measurements() {
        let out = "Matrix size: 4 x 4\nSequential:\n  Time: 10.0 ms\n  2   5.0   2.00   100.0%\n";
        let ds = parse_output(out).unwrap();
        assert_eq!(ds.sizes, vec![4]);
        assert_eq!(ds.sequential_times, vec![10.0]);
        assert_eq!(ds.parallel_time(2, 4), 5.0);
    }

    #[test]
    fn row_before_any_size_header_is_discarded() {
        let out = "  2   5.0   2.00   100.0%\nMatrix size: 4 x 4\n";
        let ds = parse_output(out).unwrap();
        assert_eq!(ds.sizes, vec![4]);
        assert!(ds.parallel_results.is_empty());
    }

    #[test]
    fn repeated_size_header_does_not_duplicate() {
        let out = "Matrix size: 4 x 4\nMatrix size: 4 x 4\n  2   5.0   2.00   100.0%\n";
        let ds = parse_output(out).unwrap();
        assert_eq!(ds.sizes, vec![4]);
        assert_eq!(ds.parallel_time(2, 4), 5.0);
    }

    #[test]
    fn later_row_overwrites_earlier_measurement() {
        let out = "Matrix size: 4 x 4\n  2   5.0   2.00   100.0%\n  2   6.0   1.67   83.3%\n";
        let ds = parse_output(out).unwrap();
        assert_eq!(ds.parallel_time(2, 4), 6.0);
    }

    #[test]
    fn sizes_keep_first_seen_order() {
        let out = "Matrix size: 500 x 500\nMatrix size: 100 x 100\n";
        let ds = parse_output(out).unwrap();
        assert_eq!(ds.sizes, vec![500, 100]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = parse_output(TRANSCRIPT).unwrap();
        let second = parse_output(TRANSCRIPT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unparseable_output_yields_empty_dataset() {
        let ds = parse_output("nothing of interest here\n").unwrap();
        assert!(ds.is_empty());
        assert!(ds.sequential_times.is_empty());
        assert!(ds.parallel_results.is_empty());
    }
}
