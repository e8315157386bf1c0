use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The benchmark program failed to build or run. The message carries
    /// the collaborator's stderr verbatim.
    #[error("benchmark program failed: {0}")]
    ExternalProcess(String),
    /// No matrix size header was recognized anywhere in the captured output.
    #[error("could not parse benchmark output: no matrix sizes found")]
    EmptyOrUnparseableOutput,
}
