//! Event declaration registry and observer dispatch.
//!
//! Two pieces:
//! - [`EventRegistry`]: the declarations owned by one object, keyed by a stable
//!   string and tagged with the payload kind they fire
//! - [`Framework`]: observers attached to declarations, and synchronous
//!   dispatch when a declaration is emitted
//!
//! Both are generic over the payload kind so the registry does not need to
//! know any particular event vocabulary.

pub mod framework;
pub mod registry;

pub use framework::{EventBase, Framework, ObserverId};
pub use registry::{DeclarationHandle, EventRegistry};

use std::fmt;

/// Result type for framework operations
pub type Result<T> = std::result::Result<T, FrameworkError>;

/// A payload kind a declaration can fire.
pub trait EventType: Copy + Eq + fmt::Debug + fmt::Display + 'static {}

/// Errors that can occur in the framework
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    /// A declaration with this key already exists
    #[error("event '{key}' is already declared on '{owner}'")]
    DuplicateDeclaration { owner: String, key: String },

    /// No declaration with this key exists
    #[error("event '{key}' is not declared on '{owner}'")]
    UnknownDeclaration { owner: String, key: String },
}
