//! Event payload kinds.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use charm_framework::EventType;

/// Every kind of event a charm can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[derive(Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    // Lifecycle
    Install,
    Start,
    Stop,
    ConfigChanged,
    UpdateStatus,
    UpgradeCharm,
    PreSeriesUpgrade,
    PostSeriesUpgrade,
    LeaderElected,
    LeaderSettingsChanged,

    // Relations
    RelationJoined,
    RelationChanged,
    RelationDeparted,
    RelationBroken,

    // Storage
    StorageAttached,
    StorageDetaching,
}

impl EventType for EventKind {}

/// The fixed events every charm declares, by declaration key.
pub const LIFECYCLE_EVENTS: [(&str, EventKind); 10] = [
    ("install", EventKind::Install),
    ("start", EventKind::Start),
    ("stop", EventKind::Stop),
    ("config_changed", EventKind::ConfigChanged),
    ("update_status", EventKind::UpdateStatus),
    ("upgrade_charm", EventKind::UpgradeCharm),
    ("pre_series_upgrade", EventKind::PreSeriesUpgrade),
    ("post_series_upgrade", EventKind::PostSeriesUpgrade),
    ("leader_elected", EventKind::LeaderElected),
    ("leader_settings_changed", EventKind::LeaderSettingsChanged),
];

/// Key suffixes generated for every relation name.
pub const RELATION_EVENTS: [(&str, EventKind); 4] = [
    ("_relation_joined", EventKind::RelationJoined),
    ("_relation_changed", EventKind::RelationChanged),
    ("_relation_departed", EventKind::RelationDeparted),
    ("_relation_broken", EventKind::RelationBroken),
];

/// Key suffixes generated for every storage name.
pub const STORAGE_EVENTS: [(&str, EventKind); 2] = [
    ("_storage_attached", EventKind::StorageAttached),
    ("_storage_detaching", EventKind::StorageDetaching),
];

impl EventKind {
    pub fn all() -> impl Iterator<Item = Self> {
        use strum::IntoEnumIterator;
        Self::iter()
    }

    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::RelationJoined | Self::RelationChanged | Self::RelationDeparted | Self::RelationBroken
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageAttached | Self::StorageDetaching)
    }

    pub fn is_lifecycle(&self) -> bool {
        !self.is_relation() && !self.is_storage()
    }

    /// Declaration key for a generated event, e.g. `db_relation_joined`.
    ///
    /// Returns `None` for lifecycle kinds, which are not generated per name.
    pub fn generated_key(&self, name: &str) -> Option<String> {
        RELATION_EVENTS
            .iter()
            .chain(STORAGE_EVENTS.iter())
            .find(|(_, kind)| kind == self)
            .map(|(suffix, _)| format!("{name}{suffix}"))
    }
}

/// Split a generated key into its relation or storage name and event kind.
///
/// Matching is by suffix, so names that themselves contain `_relation_` or
/// `_storage_` split correctly. Keys outside the generated families, and
/// keys with an empty name, yield `None`.
pub fn split_generated_key(key: &str) -> Option<(&str, EventKind)> {
    RELATION_EVENTS
        .iter()
        .chain(STORAGE_EVENTS.iter())
        .find_map(|(suffix, kind)| {
            key.strip_suffix(suffix)
                .filter(|name| !name.is_empty())
                .map(|name| (name, *kind))
        })
}
