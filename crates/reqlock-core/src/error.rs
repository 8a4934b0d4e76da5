//! Error type for lock file verification

use std::path::PathBuf;

/// Error that stops a verification run.
///
/// A stale or hashless output file is not an error; it is reported as an
/// unmatched [`VerificationResult`](crate::VerificationResult).
#[derive(Debug)]
pub enum VerifyError {
    /// Input specification file missing or unreadable.
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Output file exists but could not be read.
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Discovery glob could not be parsed.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// Worker threads for parallel verification could not be started.
    WorkerPool(rayon::ThreadPoolBuildError),
    EmptyDigest,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input { path, source } => {
                write!(f, "cannot read input {}: {source}", path.display())
            }
            Self::Output { path, source } => {
                write!(f, "cannot read output {}: {source}", path.display())
            }
            Self::Pattern { pattern, source } => {
                write!(f, "invalid pattern {pattern:?}: {source}")
            }
            Self::WorkerPool(e) => write!(f, "cannot start verification workers: {e}"),
            Self::EmptyDigest => f.write_str("hash comment digest is empty"),
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input { source, .. } | Self::Output { source, .. } => Some(source),
            Self::Pattern { source, .. } => Some(source),
            Self::WorkerPool(e) => Some(e),
            Self::EmptyDigest => None,
        }
    }
}

impl VerifyError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    /// Whether the error points at a broken setup rather than a bad artifact.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::Pattern { .. })
    }
}
