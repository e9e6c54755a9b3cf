//! Charm metadata model.
//!
//! Turns the raw, loosely typed contents of a charm's `metadata.yaml` into a
//! validated [`Metadata`] value:
//! - **Relations**: `requires`, `provides` and `peers`, merged into one map
//! - **Storage**: with the compact `multiple.range` syntax parsed into a [`StorageRange`]
//! - **Resources** and **Payloads**
//!
//! ```
//! use charm_metadata::Metadata;
//!
//! let meta = Metadata::from_yaml_str(r#"
//! name: my-charm
//! requires:
//!   db:
//!     interface: pgsql
//! "#).unwrap();
//!
//! assert_eq!(meta.relations["db"].interface_name, "pgsql");
//! ```

pub mod error;
pub mod loader;
pub mod metadata;
pub mod relation;
pub mod resource;
pub mod storage;

pub use error::{DefinitionKind, MetadataError};
pub use loader::MetadataLoader;
pub use metadata::{metadata_from_raw, Metadata};
pub use relation::{RelationMeta, RelationRole};
pub use resource::{PayloadMeta, ResourceMeta};
pub use storage::{StorageMeta, StorageRange};

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;
