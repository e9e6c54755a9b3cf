//! Grouping views over generated relation and storage declarations.

use std::collections::BTreeMap;

use serde::Serialize;

use charm_framework::DeclarationHandle;

use crate::kind::{split_generated_key, EventKind};

pub type Declaration = DeclarationHandle<EventKind>;

/// The four declarations generated for one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEvents {
    pub name: String,
    pub joined: Declaration,
    pub changed: Declaration,
    pub departed: Declaration,
    pub broken: Declaration,
}

impl RelationEvents {
    pub fn members(&self) -> [&Declaration; 4] {
        [&self.joined, &self.changed, &self.departed, &self.broken]
    }

    pub fn get(&self, kind: EventKind) -> Option<&Declaration> {
        self.members().into_iter().find(|d| d.kind() == kind)
    }
}

/// The two declarations generated for one storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvents {
    pub name: String,
    pub attached: Declaration,
    pub detaching: Declaration,
}

impl StorageEvents {
    pub fn members(&self) -> [&Declaration; 2] {
        [&self.attached, &self.detaching]
    }

    pub fn get(&self, kind: EventKind) -> Option<&Declaration> {
        self.members().into_iter().find(|d| d.kind() == kind)
    }
}

/// Declaration keys of a bundle, used for listing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupKeys {
    pub name: String,
    pub keys: Vec<String>,
}

impl From<&RelationEvents> for GroupKeys {
    fn from(group: &RelationEvents) -> Self {
        Self {
            name: group.name.clone(),
            keys: group.members().iter().map(|d| d.key().to_string()).collect(),
        }
    }
}

impl From<&StorageEvents> for GroupKeys {
    fn from(group: &StorageEvents) -> Self {
        Self {
            name: group.name.clone(),
            keys: group.members().iter().map(|d| d.key().to_string()).collect(),
        }
    }
}

#[derive(Default)]
struct PartialRelation {
    joined: Option<Declaration>,
    changed: Option<Declaration>,
    departed: Option<Declaration>,
    broken: Option<Declaration>,
}

#[derive(Default)]
struct PartialStorage {
    attached: Option<Declaration>,
    detaching: Option<Declaration>,
}

/// Fold declarations into relation bundles keyed by relation name.
///
/// Only complete bundles are returned.
pub(crate) fn group_relations<'a>(
    declarations: impl IntoIterator<Item = &'a Declaration>,
) -> BTreeMap<String, RelationEvents> {
    let mut partial: BTreeMap<&str, PartialRelation> = BTreeMap::new();

    for decl in declarations {
        let Some((name, kind)) = split_generated_key(decl.key()) else {
            continue;
        };
        let slot = match kind {
            EventKind::RelationJoined => &mut partial.entry(name).or_default().joined,
            EventKind::RelationChanged => &mut partial.entry(name).or_default().changed,
            EventKind::RelationDeparted => &mut partial.entry(name).or_default().departed,
            EventKind::RelationBroken => &mut partial.entry(name).or_default().broken,
            _ => continue,
        };
        *slot = Some(decl.clone());
    }

    partial
        .into_iter()
        .filter_map(|(name, p)| {
            Some((
                name.to_string(),
                RelationEvents {
                    name: name.to_string(),
                    joined: p.joined?,
                    changed: p.changed?,
                    departed: p.departed?,
                    broken: p.broken?,
                },
            ))
        })
        .collect()
}

/// Fold declarations into storage bundles keyed by storage name.
///
/// Only complete bundles are returned.
pub(crate) fn group_storage<'a>(
    declarations: impl IntoIterator<Item = &'a Declaration>,
) -> BTreeMap<String, StorageEvents> {
    let mut partial: BTreeMap<&str, PartialStorage> = BTreeMap::new();

    for decl in declarations {
        let Some((name, kind)) = split_generated_key(decl.key()) else {
            continue;
        };
        let slot = match kind {
            EventKind::StorageAttached => &mut partial.entry(name).or_default().attached,
            EventKind::StorageDetaching => &mut partial.entry(name).or_default().detaching,
            _ => continue,
        };
        *slot = Some(decl.clone());
    }

    partial
        .into_iter()
        .filter_map(|(name, p)| {
            Some((
                name.to_string(),
                StorageEvents {
                    name: name.to_string(),
                    attached: p.attached?,
                    detaching: p.detaching?,
                },
            ))
        })
        .collect()
}
