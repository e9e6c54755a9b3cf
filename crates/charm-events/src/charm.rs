//! Charm instances.

use std::path::Path;

use tracing::debug;

use charm_framework::Framework;
use charm_metadata::{Metadata, MetadataLoader};

use crate::{CharmEvents, EventKind, Result};

/// Handle path used when a charm is constructed without a key.
pub const DEFAULT_CHARM_KEY: &str = "charm";

/// One charm instance: its metadata and the events generated from it.
#[derive(Debug, Clone)]
pub struct CharmBase {
    handle_path: String,
    metadata: Metadata,
    on: CharmEvents,
}

impl CharmBase {
    /// Build a charm, generating its event taxonomy from `metadata`.
    ///
    /// `metadata` is stored unchanged. Fails if any generated event key
    /// collides with another.
    pub fn new(framework: &Framework<EventKind>, key: Option<&str>, metadata: Metadata) -> Result<Self> {
        let handle_path = key.unwrap_or(DEFAULT_CHARM_KEY).to_string();
        let on = CharmEvents::new(framework.registry(handle_path.as_str()), &metadata)?;

        debug!(
            charm = %metadata.name,
            path = %handle_path,
            events = on.len(),
            "constructed charm"
        );
        Ok(Self {
            handle_path,
            metadata,
            on,
        })
    }

    /// Load `metadata.yaml` from `charm_dir` and build a charm from it.
    pub fn from_charm_dir(
        framework: &Framework<EventKind>,
        key: Option<&str>,
        charm_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let metadata = MetadataLoader::new(charm_dir).load()?;
        Self::new(framework, key, metadata)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The charm's event declarations.
    pub fn on(&self) -> &CharmEvents {
        &self.on
    }

    pub fn on_mut(&mut self) -> &mut CharmEvents {
        &mut self.on
    }

    pub fn handle_path(&self) -> &str {
        &self.handle_path
    }
}
