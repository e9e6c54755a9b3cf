//! The per-charm event taxonomy.

use std::collections::BTreeMap;

use tracing::debug;

use charm_framework::EventRegistry;
use charm_metadata::{Metadata, RelationRole};

use crate::groups::{group_relations, group_storage, Declaration, RelationEvents, StorageEvents};
use crate::kind::{EventKind, LIFECYCLE_EVENTS, RELATION_EVENTS, STORAGE_EVENTS};
use crate::Result;

/// Handles to the fixed lifecycle declarations.
#[derive(Debug, Clone)]
pub struct LifecycleEvents {
    pub install: Declaration,
    pub start: Declaration,
    pub stop: Declaration,
    pub config_changed: Declaration,
    pub update_status: Declaration,
    pub upgrade_charm: Declaration,
    pub pre_series_upgrade: Declaration,
    pub post_series_upgrade: Declaration,
    pub leader_elected: Declaration,
    pub leader_settings_changed: Declaration,
}

impl LifecycleEvents {
    fn define(registry: &mut EventRegistry<EventKind>) -> Result<Self> {
        let [
            install,
            start,
            stop,
            config_changed,
            update_status,
            upgrade_charm,
            pre_series_upgrade,
            post_series_upgrade,
            leader_elected,
            leader_settings_changed,
        ] = LIFECYCLE_EVENTS.map(|(key, kind)| registry.define(key, kind));

        Ok(Self {
            install: install?,
            start: start?,
            stop: stop?,
            config_changed: config_changed?,
            update_status: update_status?,
            upgrade_charm: upgrade_charm?,
            pre_series_upgrade: pre_series_upgrade?,
            post_series_upgrade: post_series_upgrade?,
            leader_elected: leader_elected?,
            leader_settings_changed: leader_settings_changed?,
        })
    }

    /// The handles in [`LIFECYCLE_EVENTS`] order.
    pub fn members(&self) -> [&Declaration; 10] {
        [
            &self.install,
            &self.start,
            &self.stop,
            &self.config_changed,
            &self.update_status,
            &self.upgrade_charm,
            &self.pre_series_upgrade,
            &self.post_series_upgrade,
            &self.leader_elected,
            &self.leader_settings_changed,
        ]
    }
}

/// All event declarations of one charm instance.
///
/// The fixed lifecycle events plus four declarations per relation and two per
/// storage, generated once at construction.
#[derive(Debug, Clone)]
pub struct CharmEvents {
    registry: EventRegistry<EventKind>,
    lifecycle: LifecycleEvents,
}

impl CharmEvents {
    /// Build the taxonomy for `metadata`.
    ///
    /// Relations are generated role by role, so a relation name present under
    /// two roles fails with a duplicate declaration even when the metadata
    /// was assembled by hand.
    pub fn new(registry: EventRegistry<EventKind>, metadata: &Metadata) -> Result<Self> {
        let relation_names = RelationRole::all()
            .flat_map(|role| metadata.relations_for(role).keys())
            .map(String::as_str);
        let storage_names = metadata.storage.keys().map(String::as_str);

        Self::from_names(registry, relation_names, storage_names)
    }

    /// Build the taxonomy from explicit relation and storage names.
    pub fn from_names<'a>(
        mut registry: EventRegistry<EventKind>,
        relation_names: impl IntoIterator<Item = &'a str>,
        storage_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let lifecycle = LifecycleEvents::define(&mut registry)?;

        let mut relations = 0;
        for name in relation_names {
            for (suffix, kind) in RELATION_EVENTS {
                registry.define(format!("{name}{suffix}"), kind)?;
            }
            relations += 1;
        }

        let mut storage = 0;
        for name in storage_names {
            for (suffix, kind) in STORAGE_EVENTS {
                registry.define(format!("{name}{suffix}"), kind)?;
            }
            storage += 1;
        }

        debug!(
            owner = registry.owner(),
            relations,
            storage,
            declarations = registry.len(),
            "built event taxonomy"
        );
        Ok(Self { registry, lifecycle })
    }

    /// Declare an additional event after construction.
    pub fn define_event(&mut self, key: impl Into<String>, kind: EventKind) -> Result<Declaration> {
        Ok(self.registry.define(key, kind)?)
    }

    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.registry.get(key)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&Declaration> {
        Ok(self.registry.require(key)?)
    }

    /// Every declaration, ordered by key.
    pub fn events(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.registry
            .declarations()
            .iter()
            .map(|(key, decl)| (key.as_str(), decl))
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn registry(&self) -> &EventRegistry<EventKind> {
        &self.registry
    }

    pub fn lifecycle(&self) -> &LifecycleEvents {
        &self.lifecycle
    }

    /// Relation bundles keyed by relation name, computed from the current
    /// declarations.
    pub fn by_relation(&self) -> BTreeMap<String, RelationEvents> {
        group_relations(self.registry.declarations().values())
    }

    /// Storage bundles keyed by storage name, computed from the current
    /// declarations.
    pub fn by_storage(&self) -> BTreeMap<String, StorageEvents> {
        group_storage(self.registry.declarations().values())
    }

    /// The bundle for one relation, if all four of its events are declared.
    pub fn relation(&self, name: &str) -> Option<RelationEvents> {
        let member = |kind: EventKind| {
            kind.generated_key(name)
                .and_then(|key| self.registry.get(&key).cloned())
        };
        Some(RelationEvents {
            name: name.to_string(),
            joined: member(EventKind::RelationJoined)?,
            changed: member(EventKind::RelationChanged)?,
            departed: member(EventKind::RelationDeparted)?,
            broken: member(EventKind::RelationBroken)?,
        })
    }

    /// The bundle for one storage, if both of its events are declared.
    pub fn storage(&self, name: &str) -> Option<StorageEvents> {
        let member = |kind: EventKind| {
            kind.generated_key(name)
                .and_then(|key| self.registry.get(&key).cloned())
        };
        Some(StorageEvents {
            name: name.to_string(),
            attached: member(EventKind::StorageAttached)?,
            detaching: member(EventKind::StorageDetaching)?,
        })
    }

    pub fn install(&self) -> &Declaration {
        &self.lifecycle.install
    }

    pub fn start(&self) -> &Declaration {
        &self.lifecycle.start
    }

    pub fn stop(&self) -> &Declaration {
        &self.lifecycle.stop
    }

    pub fn config_changed(&self) -> &Declaration {
        &self.lifecycle.config_changed
    }

    pub fn update_status(&self) -> &Declaration {
        &self.lifecycle.update_status
    }

    pub fn upgrade_charm(&self) -> &Declaration {
        &self.lifecycle.upgrade_charm
    }

    pub fn pre_series_upgrade(&self) -> &Declaration {
        &self.lifecycle.pre_series_upgrade
    }

    pub fn post_series_upgrade(&self) -> &Declaration {
        &self.lifecycle.post_series_upgrade
    }

    pub fn leader_elected(&self) -> &Declaration {
        &self.lifecycle.leader_elected
    }

    pub fn leader_settings_changed(&self) -> &Declaration {
        &self.lifecycle.leader_settings_changed
    }
}
