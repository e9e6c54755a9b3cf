//! Declaration registry.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{EventType, FrameworkError, Result};

/// A declared event slot.
///
/// Handles are only produced by [`EventRegistry::define`], so holding one
/// means the declaration exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationHandle<K> {
    path: String,
    key: String,
    kind: K,
}

impl<K: EventType> DeclarationHandle<K> {
    /// The declaration key, e.g. `db_relation_joined`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    /// `owner/key`, unique across every registry in a framework.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The declarations owned by one object.
#[derive(Debug, Clone)]
pub struct EventRegistry<K> {
    owner: String,
    declarations: BTreeMap<String, DeclarationHandle<K>>,
}

impl<K: EventType> EventRegistry<K> {
    /// Create an empty registry for the object at `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            declarations: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Declare `key` as firing `kind`.
    ///
    /// Fails if `key` is already declared; the existing declaration is left
    /// untouched.
    pub fn define(&mut self, key: impl Into<String>, kind: K) -> Result<DeclarationHandle<K>> {
        let key = key.into();
        if self.declarations.contains_key(&key) {
            return Err(FrameworkError::DuplicateDeclaration {
                owner: self.owner.clone(),
                key,
            });
        }

        let handle = DeclarationHandle {
            path: format!("{}/{}", self.owner, key),
            key: key.clone(),
            kind,
        };
        trace!(path = %handle.path, %kind, "declared event");
        self.declarations.insert(key, handle.clone());
        Ok(handle)
    }

    /// Every declaration, keyed by declaration key.
    pub fn declarations(&self) -> &BTreeMap<String, DeclarationHandle<K>> {
        &self.declarations
    }

    pub fn get(&self, key: &str) -> Option<&DeclarationHandle<K>> {
        self.declarations.get(key)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&DeclarationHandle<K>> {
        self.get(key).ok_or_else(|| FrameworkError::UnknownDeclaration {
            owner: self.owner.clone(),
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.declarations.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
