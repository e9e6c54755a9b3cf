//! Relation definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{DefinitionKind, MetadataError, Result};

/// The role a relation is declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelationRole {
    Requires,
    Provides,
    Peers,
}

impl RelationRole {
    /// All roles, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        use strum::IntoEnumIterator;
        Self::iter()
    }

    pub fn is_peer(&self) -> bool {
        matches!(self, Self::Peers)
    }
}

/// A relation as declared in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationMeta {
    pub role: RelationRole,
    pub relation_name: String,
    pub interface_name: String,
    /// `global` or `container`; absent means the platform default.
    pub scope: Option<String>,
    /// Maximum number of related applications.
    pub limit: Option<u32>,
    pub optional: bool,
}

/// Relation entry exactly as it appears in the document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RawRelation {
    interface: Option<String>,
    scope: Option<String>,
    limit: Option<u32>,
    optional: Option<bool>,
}

impl RelationMeta {
    pub(crate) fn from_raw(role: RelationRole, name: &str, raw: Option<RawRelation>) -> Result<Self> {
        let raw = raw.unwrap_or_default();
        let interface_name = raw
            .interface
            .ok_or_else(|| MetadataError::missing(DefinitionKind::Relation, name, "interface"))?;

        Ok(Self {
            role,
            relation_name: name.to_string(),
            interface_name,
            scope: raw.scope,
            limit: raw.limit,
            optional: raw.optional.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_from_raw() {
        let raw: RawRelation = serde_yaml::from_str("interface: pgsql\nscope: container\nlimit: 1").unwrap();
        let rel = RelationMeta::from_raw(RelationRole::Requires, "db", Some(raw)).unwrap();

        assert_eq!(rel.role, RelationRole::Requires);
        assert_eq!(rel.relation_name, "db");
        assert_eq!(rel.interface_name, "pgsql");
        assert_eq!(rel.scope.as_deref(), Some("container"));
        assert_eq!(rel.limit, Some(1));
        assert!(!rel.optional);
    }

    #[test]
    fn test_relation_without_interface_fails() {
        let raw: RawRelation = serde_yaml::from_str("scope: global").unwrap();
        let err = RelationMeta::from_raw(RelationRole::Provides, "website", Some(raw)).unwrap_err();

        match err {
            MetadataError::MissingField { kind, name, field } => {
                assert_eq!(kind, DefinitionKind::Relation);
                assert_eq!(name, "website");
                assert_eq!(field, "interface");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_optional_defaults_to_false() {
        let raw: RawRelation = serde_yaml::from_str("interface: http\noptional:").unwrap();
        let rel = RelationMeta::from_raw(RelationRole::Requires, "web", Some(raw)).unwrap();
        assert!(!rel.optional);
    }

    #[test]
    fn test_empty_relation_entry_fails() {
        let err = RelationMeta::from_raw(RelationRole::Peers, "cluster", None).unwrap_err();
        assert!(matches!(err, MetadataError::MissingField { field: "interface", .. }));
    }

    #[test]
    fn test_role_order_and_display() {
        let roles: Vec<_> = RelationRole::all().collect();
        assert_eq!(
            roles,
            vec![RelationRole::Requires, RelationRole::Provides, RelationRole::Peers]
        );
        assert_eq!(RelationRole::Peers.to_string(), "peers");
        assert!(RelationRole::Peers.is_peer());
    }
}
