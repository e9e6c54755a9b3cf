//! Charm construction errors.

use charm_framework::FrameworkError;
use charm_metadata::MetadataError;
use thiserror::Error;

/// Errors that abort charm construction.
#[derive(Debug, Error)]
pub enum CharmError {
    /// Metadata could not be loaded or validated.
    #[error("invalid charm metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// An event key collided while building the taxonomy.
    #[error("cannot build event taxonomy: {0}")]
    Framework(#[from] FrameworkError),
}

impl CharmError {
    /// The colliding key, if this is a duplicate declaration.
    pub fn duplicate_key(&self) -> Option<&str> {
        match self {
            Self::Framework(FrameworkError::DuplicateDeclaration { key, .. }) => Some(key),
            _ => None,
        }
    }
}
