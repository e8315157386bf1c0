use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub size: u32,
    pub threads: u32,
    pub speedup: f64,
    pub efficiency_pct: f64,
}

/// Speedup and efficiency for one `(size, threads)` pair.
///
/// A missing or zero parallel time yields zero speedup rather than an
/// error or infinity, so gaps stay visible in reports instead of
/// aborting them.
pub fn derive(dataset: &Dataset, size: u32, threads: u32) -> DerivedMetric {
    let sequential = dataset.sequential_time(size);
    let parallel = dataset.parallel_time(threads, size);
    let speedup = if parallel > 0.0 {
        sequential / parallel
    } else {
        0.0
    };
    DerivedMetric {
        size,
        threads,
        speedup,
        efficiency_pct: speedup / threads as f64 * 100.0,
    }
}

/// The full `sizes x thread counts` table, thread counts ascending.
pub fn metrics_table(dataset: &Dataset) -> Vec<DerivedMetric> {
    let threads = dataset.sorted_thread_counts();
    iproduct!(dataset.sizes.iter().copied(), threads.iter().copied())
        .map(|(size, t)| derive(dataset, size, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_output;

    fn sample() -> Dataset {
        parse_output("Matrix size: 4 x 4\nSequential:\n  Time: 10.0 ms\n  2   5.0   2.00   100.0%\n")
            .unwrap()
    }

    #[test]
    fn derives_speedup_and_efficiency() {
        let m = derive(&sample(), 4, 2);
        assert_eq!(m.speedup, 2.0);
        assert_eq!(m.efficiency_pct, 100.0);
    }

    #[test]
    fn zero_parallel_time_gives_zero_speedup() {
        let ds = parse_output("Matrix size: 4 x 4\nSequential:\n  Time: 10.0 ms\n  2   0.0   0.00   0.0%\n")
            .unwrap();
        let m = derive(&ds, 4, 2);
        assert_eq!(m.speedup, 0.0);
        assert_eq!(m.efficiency_pct, 0.0);
    }

    #[test]
    fn absent_pair_gives_zero_metrics() {
        let ds = sample();
        let m = derive(&ds, 4, 16);
        assert_eq!(m.speedup, 0.0);
        assert_eq!(m.efficiency_pct, 0.0);

        let m = derive(&ds, 999, 2);
        assert_eq!(m.speedup, 0.0);
        assert_eq!(m.efficiency_pct, 0.0);
    }

    #[test]
    fn missing_sequential_time_gives_zero_speedup() {
        // Size header present but no sequential time recorded.
        let ds = parse_output("Matrix size: 4 x 4\n  2   5.0   2.00   100.0%\n").unwrap();
        let m = derive(&ds, 4, 2);
        assert_eq!(m.speedup, 0.0);
    }

    #[test]
    fn table_is_cross_product_with_sorted_threads() {
        let out = "Matrix size: 4 x 4\nSequential:\n  Time: 10.0 ms\n\
                   \x20 8   2.0   5.00   62.5%\n\x20 2   5.0   2.00   100.0%\n\
                   Matrix size: 8 x 8\nSequential:\n  Time: 40.0 ms\n\
                   \x20 2   25.0   1.60   80.0%\n";
        let ds = parse_output(out).unwrap();
        let table = metrics_table(&ds);
        let pairs: Vec<(u32, u32)> = table.iter().map(|m| (m.size, m.threads)).collect();
        assert_eq!(pairs, vec![(4, 2), (4, 8), (8, 2), (8, 8)]);
        // (8, 8) was never measured and reads as an explicit zero.
        assert_eq!(table[3].speedup, 0.0);
    }
}
