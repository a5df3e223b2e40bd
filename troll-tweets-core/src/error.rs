use thiserror::Error;

/// Errors that abort a pipeline run. Row-local conditions (non-text content,
/// an aggregation bucket with no matching records) are absorbed in-stage and
/// never surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("malformed input in {file} at line {line}: {reason}")]
    MalformedInput {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("followers-to-following ratio is undefined: following sum is zero")]
    DivisionByZero,

    #[error("cached artifact {path} is missing or unreadable: {reason}")]
    MissingCachedArtifact { path: String, reason: String },

    #[error("failed to persist artifact {path}: {reason}")]
    Persist { path: String, reason: String },
}
