use std::path::Path;

use eyre::Result;
use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;

/// Compiles the benchmark source with the system C++ compiler. A failed
/// compile surfaces the compiler's stderr verbatim.
pub async fn compile(source: &Path, binary: &Path) -> Result<()> {
    debug!("Compiling {}", source.display());
    let output = Command::new("c++")
        .args(["-O2", "-std=c++17", "-fopenmp"])
        .arg(source)
        .arg("-o")
        .arg(binary)
        .output()
        .await?;
    if !output.status.success() {
        return Err(
            PipelineError::ExternalProcess(String::from_utf8_lossy(&output.stderr).into_owned())
                .into(),
        );
    }
    Ok(())
}

/// Runs the benchmark binary and captures its stdout. Blocking, no retry,
/// no timeout; a failed run is surfaced as-is.
pub async fn run(binary: &Path) -> Result<String> {
    debug!("Running {}", binary.display());
    let output = Command::new(binary).output().await?;
    if !output.status.success() {
        return Err(
            PipelineError::ExternalProcess(String::from_utf8_lossy(&output.stderr).into_owned())
                .into(),
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
