use std::path::PathBuf;

use thiserror::Error;

pub type TvResult<T> = Result<T, TvError>;

/// Substrings in collaborator stderr that indicate the host ran out of a
/// resource no retry on the next file could recover from.
const EXHAUSTION_MARKERS: [&str; 3] = ["out of memory", "cannot allocate", "cuda out of memory"];

#[derive(Debug, Error)]
pub enum TvError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("unsupported format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("no supported media files found in {0}")]
    NoInputFound(PathBuf),

    #[error("missing translation packages: {}; install them before running", packages.join(", "))]
    MissingLanguagePacks { packages: Vec<String> },

    #[error("missing command `{command}` on PATH")]
    CommandMissing { command: String },

    #[error("command failed: `{command}` (status: {status}){stderr_suffix}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr_suffix: String,
    },

    #[error("resource exhaustion reported by `{command}`: {detail}")]
    ResourceExhausted { command: String, detail: String },

    #[error("missing expected artifact at `{0}`")]
    MissingArtifact(PathBuf),
}

impl TvError {
    /// Map a non-zero subprocess exit to an error, folding trimmed stderr
    /// into the message. Stderr that reports memory exhaustion is promoted
    /// to [`TvError::ResourceExhausted`] so the batch driver can abort
    /// instead of grinding through every remaining file.
    #[must_use]
    pub fn from_command_failure(command: String, status: i32, stderr: String) -> Self {
        let trimmed = stderr.trim();

        let lowered = trimmed.to_lowercase();
        if EXHAUSTION_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            return Self::ResourceExhausted {
                command,
                detail: trimmed.to_owned(),
            };
        }

        let stderr_suffix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("; stderr: {trimmed}")
        };
        Self::CommandFailed {
            command,
            status,
            stderr_suffix,
        }
    }

    /// Errors that must terminate the whole batch. Everything else is
    /// confined to the file that raised it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound(_)
                | Self::UnsupportedFormat { .. }
                | Self::NoInputFound(_)
                | Self::MissingLanguagePacks { .. }
                | Self::ResourceExhausted { .. }
        )
    }
}
