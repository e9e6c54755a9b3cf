//! CLI error handling.

use charm_events::CharmError;
use charm_metadata::MetadataError;
use thiserror::Error;

use crate::Exit;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Charm(#[from] CharmError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Metadata(MetadataError::NotFound { .. } | MetadataError::Io { .. }) => "E002",
            Self::Metadata(_) => "E004",
            Self::Charm(_) => "E005",
            Self::Io(_) => "E002",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::Metadata(MetadataError::NotFound { .. } | MetadataError::Io { .. }) | Self::Io(_) => {
                Exit::IoError
            }
            Self::Charm(CharmError::Metadata(MetadataError::NotFound { .. } | MetadataError::Io { .. })) => {
                Exit::IoError
            }
            Self::Metadata(_) | Self::Charm(_) => Exit::ValidationError,
            Self::Other(_) => Exit::GeneralError,
        }
    }
}
