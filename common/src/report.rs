use serde::Serialize;

use crate::{dataset::Dataset, metrics};

const TABLE_WIDTH: usize = 80;
const CELL_WIDTH: usize = 15;

/// One labelled line or bar series handed to the plotting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// The four chart-ready matrices. Assembled views only; every number in
/// here comes from the metrics engine or the dataset itself.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub sizes: Vec<u32>,
    pub thread_counts: Vec<u32>,
    pub sequential_times: Vec<f64>,
    /// Execution-time bars over sizes: sequential first, then one series
    /// per thread count.
    pub time_bars: Vec<Series>,
    /// Speedup over thread counts: one series per size, then the ideal
    /// reference equal to the thread count itself.
    pub speedup_lines: Vec<Series>,
    /// Efficiency over thread counts: one series per size, then the
    /// constant 100% reference.
    pub efficiency_lines: Vec<Series>,
    /// Speedup indexed `[size row][thread column]`.
    pub speedup_matrix: Vec<Vec<f64>>,
}

fn center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text.to_owned();
    }
    let pad = width - text.len();
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Fixed-width summary: one row per size, one column per thread count,
/// cell `"<time> (<speedup>x)"` to two decimals.
pub fn summary_table(dataset: &Dataset) -> String {
    let threads = dataset.sorted_thread_counts();
    let mut out = String::new();

    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push_str("\nPERFORMANCE SUMMARY TABLE\n");
    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');

    out.push_str(&format!("{:<12}{:<15}", "Size", "Sequential"));
    for t in &threads {
        out.push_str(&center(&format!("{t} Thread(s)"), CELL_WIDTH));
    }
    out.push('\n');
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');

    for &size in &dataset.sizes {
        out.push_str(&format!("{:<12}", format!("{size}x{size}")));
        out.push_str(&format!("{:<15.2}", dataset.sequential_time(size)));
        for &t in &threads {
            let m = metrics::derive(dataset, size, t);
            let cell = format!("{:.2} ({:.2}x)", dataset.parallel_time(t, size), m.speedup);
            out.push_str(&center(&cell, CELL_WIDTH));
        }
        out.push('\n');
    }

    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');
    out
}

pub fn chart_data(dataset: &Dataset) -> ChartData {
    let thread_counts = dataset.sorted_thread_counts();
    let table = metrics::metrics_table(dataset);

    let mut time_bars = vec![Series {
        label: "Sequential".to_owned(),
        values: dataset
            .sizes
            .iter()
            .map(|&s| dataset.sequential_time(s))
            .collect(),
    }];
    for &t in &thread_counts {
        time_bars.push(Series {
            label: format!("{t} Thread(s)"),
            values: dataset
                .sizes
                .iter()
                .map(|&s| dataset.parallel_time(t, s))
                .collect(),
        });
    }

    let mut speedup_lines = Vec::new();
    let mut efficiency_lines = Vec::new();
    let mut speedup_matrix = Vec::new();
    if !thread_counts.is_empty() {
        // The table is size-major, one chunk per size row.
        for (&size, row) in dataset.sizes.iter().zip(table.chunks(thread_counts.len())) {
            speedup_lines.push(Series {
                label: format!("{size}x{size}"),
                values: row.iter().map(|m| m.speedup).collect(),
            });
            efficiency_lines.push(Series {
                label: format!("{size}x{size}"),
                values: row.iter().map(|m| m.efficiency_pct).collect(),
            });
            speedup_matrix.push(row.iter().map(|m| m.speedup).collect());
        }
    }
    speedup_lines.push(Series {
        label: "Ideal".to_owned(),
        values: thread_counts.iter().map(|&t| f64::from(t)).collect(),
    });
    efficiency_lines.push(Series {
        label: "Ideal (100%)".to_owned(),
        values: vec![100.0; thread_counts.len()],
    });

    ChartData {
        sizes: dataset.sizes.clone(),
        thread_counts,
        sequential_times: dataset.sequential_times.clone(),
        time_bars,
        speedup_lines,
        efficiency_lines,
        speedup_matrix,
    }
}
