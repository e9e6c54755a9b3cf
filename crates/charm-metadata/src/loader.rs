//! Loading `metadata.yaml` from a charm directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Metadata, MetadataError, Result};

/// Environment variable the platform sets to the charm's root directory.
pub const CHARM_DIR_ENV: &str = "JUJU_CHARM_DIR";

/// File name of the metadata document inside a charm directory.
pub const METADATA_FILE: &str = "metadata.yaml";

/// Metadata loader.
pub struct MetadataLoader {
    charm_dir: PathBuf,
}

impl MetadataLoader {
    /// Create a loader for the given charm directory.
    pub fn new(charm_dir: impl AsRef<Path>) -> Self {
        Self {
            charm_dir: charm_dir.as_ref().to_path_buf(),
        }
    }

    /// Create a loader for `$JUJU_CHARM_DIR`, or the current directory.
    pub fn from_env() -> Self {
        match std::env::var_os(CHARM_DIR_ENV) {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        }
    }

    pub fn charm_dir(&self) -> &Path {
        &self.charm_dir
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.charm_dir.join(METADATA_FILE)
    }

    /// Load and validate `<charm_dir>/metadata.yaml`.
    ///
    /// The file is parsed as written; `${...}` text is never substituted.
    pub fn load(&self) -> Result<Metadata> {
        let path = self.metadata_path();
        if !path.exists() {
            return Err(MetadataError::NotFound { path });
        }

        debug!(path = %path.display(), "loading charm metadata");
        let contents = std::fs::read_to_string(&path)?;
        Metadata::from_yaml_str(&contents)
    }
}

impl Default for MetadataLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
