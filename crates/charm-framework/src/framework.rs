//! Observer registration and dispatch.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::{DeclarationHandle, EventRegistry, EventType};

/// The event value an observer receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBase<K> {
    pub path: String,
    pub key: String,
    pub kind: K,
}

/// Identifies one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

type Observer<K> = Box<dyn FnMut(&EventBase<K>)>;

/// Dispatches emitted declarations to their observers.
///
/// Observers run synchronously on the emitting thread, in the order they
/// were registered.
pub struct Framework<K> {
    observers: BTreeMap<String, Vec<(ObserverId, Observer<K>)>>,
    next_id: u64,
}

impl<K: EventType> Framework<K> {
    pub fn new() -> Self {
        Self {
            observers: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Create a declaration registry for the object at `owner`.
    pub fn registry(&self, owner: impl Into<String>) -> EventRegistry<K> {
        EventRegistry::new(owner)
    }

    /// Attach `observer` to `handle`.
    pub fn observe<F>(&mut self, handle: &DeclarationHandle<K>, observer: F) -> ObserverId
    where
        F: FnMut(&EventBase<K>) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;

        debug!(path = handle.path(), %id, "observing event");
        self.observers
            .entry(handle.path().to_string())
            .or_default()
            .push((id, Box::new(observer)));
        id
    }

    /// Detach an observer. Returns `false` if it was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let mut removed = false;
        self.observers.retain(|_, list| {
            let before = list.len();
            list.retain(|(observer_id, _)| *observer_id != id);
            removed |= list.len() != before;
            !list.is_empty()
        });
        removed
    }

    /// Fire `handle`, returning how many observers were notified.
    pub fn emit(&mut self, handle: &DeclarationHandle<K>) -> usize {
        let event = EventBase {
            path: handle.path().to_string(),
            key: handle.key().to_string(),
            kind: handle.kind(),
        };

        let Some(observers) = self.observers.get_mut(handle.path()) else {
            trace!(path = %event.path, "emitted event has no observers");
            return 0;
        };

        trace!(path = %event.path, observers = observers.len(), "emitting event");
        for (_, observer) in observers.iter_mut() {
            observer(&event);
        }
        observers.len()
    }

    /// Number of observers attached to `handle`.
    pub fn observer_count(&self, handle: &DeclarationHandle<K>) -> usize {
        self.observers.get(handle.path()).map_or(0, Vec::len)
    }
}

impl<K: EventType> Default for Framework<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Framework<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framework")
            .field("observed_paths", &self.observers.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}
