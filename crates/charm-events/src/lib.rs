//! Per-charm event taxonomy.
//!
//! Every charm declares the same ten lifecycle events (`install`, `start`,
//! `config_changed`, ...). On top of those, each relation `N` in the charm's
//! metadata adds `N_relation_joined|changed|departed|broken`, and each storage
//! `S` adds `S_storage_attached|detaching`.
//!
//! ```
//! use charm_events::{CharmBase, EventKind};
//! use charm_framework::Framework;
//! use charm_metadata::Metadata;
//!
//! let metadata = Metadata::from_yaml_str(r#"
//! requires:
//!   db:
//!     interface: pgsql
//! "#).unwrap();
//!
//! let mut framework = Framework::new();
//! let charm = CharmBase::new(&framework, None, metadata).unwrap();
//!
//! let db = &charm.on().by_relation()["db"];
//! assert_eq!(db.joined.kind(), EventKind::RelationJoined);
//! assert_eq!(framework.emit(&db.changed), 0);
//! ```

pub mod charm;
pub mod error;
pub mod groups;
pub mod kind;
pub mod taxonomy;

pub use charm::{CharmBase, DEFAULT_CHARM_KEY};
pub use error::CharmError;
pub use groups::{Declaration, GroupKeys, RelationEvents, StorageEvents};
pub use kind::{split_generated_key, EventKind, LIFECYCLE_EVENTS, RELATION_EVENTS, STORAGE_EVENTS};
pub use taxonomy::{CharmEvents, LifecycleEvents};

/// Result type for charm construction
pub type Result<T> = std::result::Result<T, CharmError>;
