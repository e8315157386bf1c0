use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    time::Duration,
};

use common::{dataset, error::PipelineError, plot, report, runner};
use console::style;
use eyre::Result;
use indicatif::ProgressBar;
use tokio::fs::read_to_string;
use tracing::debug;

pub async fn run_benchmark(
    source: &str,
    chart_file: &str,
    skip_plot: bool,
    no_progress: bool,
) -> Result<()> {
    banner();

    let source = PathBuf::from(source);
    let binary = binary_path(&source);

    let spinner = progress(no_progress, format!("Compiling {}", source.display()));
    runner::compile(&source, &binary).await?;
    spinner.finish_and_clear();

    let spinner = progress(no_progress, format!("Running {}", binary.display()));
    let output = runner::run(&binary).await?;
    spinner.finish_and_clear();

    report_output(&output, chart_file, skip_plot)
}

pub async fn report_from_file(file: &str, chart_file: &str, skip_plot: bool) -> Result<()> {
    banner();
    let output = read_to_string(file).await?;
    report_output(&output, chart_file, skip_plot)
}

fn report_output(output: &str, chart_file: &str, skip_plot: bool) -> Result<()> {
    let dataset = dataset::parse_output(output)?;
    if dataset.is_empty() {
        println!("Error: could not parse benchmark output");
        println!("Raw output:");
        println!("{output}");
        return Err(PipelineError::EmptyOrUnparseableOutput.into());
    }
    debug!(
        "Parsed {} sizes and {} thread counts",
        dataset.sizes.len(),
        dataset.sorted_thread_counts().len()
    );

    print!("{}", report::summary_table(&dataset));

    if skip_plot {
        return Ok(());
    }
    println!("\nGenerating visualizations...");
    plot::render_performance_chart(&report::chart_data(&dataset), Path::new(chart_file))?;
    println!("Chart saved to: {chart_file}");
    Ok(())
}

/// Sibling path of the source with the extension dropped, kept explicitly
/// relative so the run step never resolves through PATH.
fn binary_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_else(|| OsStr::new("benchmark"));
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(stem),
        _ => Path::new(".").join(stem),
    }
}

fn banner() {
    println!("{}", "=".repeat(60));
    println!("  {}", style("Jacobi Method Performance Report").bold());
    println!("{}", "=".repeat(60));
}

fn progress(no_progress: bool, msg: String) -> ProgressBar {
    if no_progress {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner().with_message(msg);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporting_aborts_when_nothing_was_parsed() {
        let err = report_output("no recognizable lines\n", "unused.png", true).unwrap_err();
        assert!(
            err.downcast_ref::<PipelineError>()
                .is_some_and(|e| matches!(e, PipelineError::EmptyOrUnparseableOutput))
        );
    }

    #[test]
    fn binary_path_stays_relative() {
        assert_eq!(
            binary_path(Path::new("jacobi_parallel.cpp")),
            PathBuf::from("./jacobi_parallel")
        );
        assert_eq!(
            binary_path(Path::new("demos/jacobi_parallel.cpp")),
            PathBuf::from("demos/jacobi_parallel")
        );
    }
}
