//! Metadata errors.

use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

use crate::RelationRole;

/// The kind of definition an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DefinitionKind {
    Relation,
    Storage,
    Resource,
    Payload,
}

/// Errors produced while building [`Metadata`](crate::Metadata).
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A required field is absent from a named definition.
    #[error("{kind} '{name}' is missing required field '{field}'")]
    MissingField {
        kind: DefinitionKind,
        name: String,
        field: &'static str,
    },

    /// A compact range token could not be parsed.
    #[error("storage '{name}' has invalid range '{value}': {reason}")]
    InvalidFormat {
        name: String,
        value: String,
        reason: String,
    },

    /// A definition entry has the wrong shape, e.g. a string where a number
    /// is expected.
    #[error("{kind} '{name}' is invalid: {message}")]
    InvalidDefinition {
        kind: DefinitionKind,
        name: String,
        message: String,
    },

    /// The same relation name appears under more than one role.
    #[error("relation '{name}' is declared under both '{first}' and '{second}'")]
    DuplicateRelation {
        name: String,
        first: RelationRole,
        second: RelationRole,
    },

    #[error("invalid metadata at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    Parse { line: Option<usize>, message: String },

    #[error("metadata file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read metadata: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MetadataError {
    pub(crate) fn missing(kind: DefinitionKind, name: &str, field: &'static str) -> Self {
        Self::MissingField {
            kind,
            name: name.to_string(),
            field,
        }
    }
}

impl From<serde_yaml::Error> for MetadataError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        }
    }
}
