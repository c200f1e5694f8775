use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DgaError {
    #[error("invalid gas reading: {0}")]
    InvalidReading(String),

    #[error("unknown classification mode '{0}' (expected 'scoring' or 'tree')")]
    UnknownMode(String),

    #[error("unknown fault category label '{0}'")]
    UnknownCategory(String),

    #[error("invalid invocation: {0}")]
    Usage(String),

    #[error("failed to load rule source {}: {reason}", path.display())]
    RuleSourceLoad { path: PathBuf, reason: String },

    #[error("clips not found. Install CLIPS and make sure 'clips' is on PATH")]
    ClipsNotFound,

    #[error("clips failed with exit code {code}: {stderr}")]
    ClipsFailed { code: i32, stderr: String },

    #[error("backend '{backend}' failed: {reason}")]
    Backend { backend: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
