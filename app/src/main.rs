use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod run;

const DEFAULT_SOURCE: &str = "jacobi_parallel.cpp";

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(long, default_value_t = false)]
    no_progress: bool,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and run the Jacobi benchmark, then report
    Run {
        /// Benchmark source file
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,
        /// Chart output file
        #[arg(short, long, default_value = common::DEFAULT_CHART_FILE)]
        output: String,
        /// Do not generate the performance chart
        #[arg(long, default_value_t = false)]
        skip_plot: bool,
    },
    /// Report from a previously captured benchmark output
    Report {
        /// File holding the captured output
        #[arg(short, long)]
        file: String,
        /// Chart output file
        #[arg(short, long, default_value = common::DEFAULT_CHART_FILE)]
        output: String,
        /// Do not generate the performance chart
        #[arg(long, default_value_t = false)]
        skip_plot: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("jacobi_perf={log_level},common={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    // Argument-less invocation behaves as `run` with defaults.
    let command = args.command.unwrap_or(Commands::Run {
        source: DEFAULT_SOURCE.to_owned(),
        output: common::DEFAULT_CHART_FILE.to_owned(),
        skip_plot: false,
    });

    let result = match command {
        Commands::Run {
            source,
            output,
            skip_plot,
        } => run::run_benchmark(&source, &output, skip_plot, args.no_progress).await,
        Commands::Report {
            file,
            output,
            skip_plot,
        } => run::report_from_file(&file, &output, skip_plot).await,
    };
    if let Err(err) = result {
        error!("{err:#?}");
        return Err(err);
    }

    Ok(())
}
