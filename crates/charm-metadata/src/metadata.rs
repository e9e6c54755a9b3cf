//! The validated metadata of a charm.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, trace, warn};

use crate::relation::RawRelation;
use crate::{
    DefinitionKind, MetadataError, PayloadMeta, RelationMeta, RelationRole, ResourceMeta, Result,
    StorageMeta,
};

/// Everything a charm declares about itself in `metadata.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub summary: String,
    pub description: String,
    /// `maintainer` first (if present), then each of `maintainers`.
    pub maintainers: Vec<String>,
    pub tags: Vec<String>,
    pub terms: Vec<String>,
    pub series: Vec<String>,
    pub extra_bindings: Vec<String>,
    pub subordinate: bool,
    /// Minimum platform version; `None` means unconstrained.
    pub min_platform_version: Option<String>,

    pub requires: BTreeMap<String, RelationMeta>,
    pub provides: BTreeMap<String, RelationMeta>,
    pub peers: BTreeMap<String, RelationMeta>,
    /// Union of `requires`, `provides` and `peers`.
    pub relations: BTreeMap<String, RelationMeta>,

    pub storage: BTreeMap<String, StorageMeta>,
    pub resources: BTreeMap<String, ResourceMeta>,
    pub payloads: BTreeMap<String, PayloadMeta>,
}

/// `extra-bindings` is usually a mapping with null values, but a plain list
/// of names is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBindings {
    List(Vec<String>),
    Map(Mapping),
}

/// Entries stay untyped until each is decoded on its own, so a type error
/// can name the definition it came from.
type RawSection = Option<BTreeMap<String, Value>>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawMetadata {
    name: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    maintainer: Option<String>,
    maintainers: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    terms: Option<Vec<String>>,
    series: Option<Vec<String>>,
    extra_bindings: Option<RawBindings>,
    subordinate: Option<bool>,
    #[serde(alias = "min-platform-version")]
    min_juju_version: Option<String>,
    requires: RawSection,
    provides: RawSection,
    peers: RawSection,
    storage: RawSection,
    resources: RawSection,
    payloads: RawSection,
}

/// Build [`Metadata`] from a raw decoded document.
///
/// Shorthand for [`Metadata::from_raw`].
pub fn metadata_from_raw(raw: Option<Value>) -> Result<Metadata> {
    Metadata::from_raw(raw)
}

impl Metadata {
    /// Build metadata from a raw decoded document.
    ///
    /// `None` and a YAML null are both treated as an empty description.
    /// Fails on the first definition that is missing a required field, on a
    /// malformed storage range, or when a relation name is declared under
    /// more than one role.
    pub fn from_raw(raw: Option<Value>) -> Result<Self> {
        let raw: RawMetadata = match raw {
            None | Some(Value::Null) => RawMetadata::default(),
            Some(value) => serde_yaml::from_value(value)?,
        };

        let mut maintainers: Vec<String> = raw.maintainer.into_iter().collect();
        maintainers.extend(raw.maintainers.unwrap_or_default());

        let requires = parse_relations(RelationRole::Requires, raw.requires)?;
        let provides = parse_relations(RelationRole::Provides, raw.provides)?;
        let peers = parse_relations(RelationRole::Peers, raw.peers)?;

        let mut relations: BTreeMap<String, RelationMeta> = BTreeMap::new();
        for rel in requires.values().chain(provides.values()).chain(peers.values()) {
            if let Some(existing) = relations.insert(rel.relation_name.clone(), rel.clone()) {
                return Err(MetadataError::DuplicateRelation {
                    name: rel.relation_name.clone(),
                    first: existing.role,
                    second: rel.role,
                });
            }
        }

        let storage = parse_section(DefinitionKind::Storage, raw.storage, StorageMeta::from_raw)?;
        let resources = parse_section(DefinitionKind::Resource, raw.resources, ResourceMeta::from_raw)?;
        let payloads = parse_section(DefinitionKind::Payload, raw.payloads, PayloadMeta::from_raw)?;

        let meta = Self {
            name: raw.name.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            maintainers,
            tags: raw.tags.unwrap_or_default(),
            terms: raw.terms.unwrap_or_default(),
            series: raw.series.unwrap_or_default(),
            extra_bindings: binding_names(raw.extra_bindings),
            subordinate: raw.subordinate.unwrap_or(false),
            min_platform_version: raw.min_juju_version,
            requires,
            provides,
            peers,
            relations,
            storage,
            resources,
            payloads,
        };

        debug!(
            charm = %meta.name,
            relations = meta.relations.len(),
            storage = meta.storage.len(),
            resources = meta.resources.len(),
            payloads = meta.payloads.len(),
            "parsed charm metadata"
        );
        Ok(meta)
    }

    /// Parse metadata from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Self::from_raw(None);
        }
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_raw(Some(value))
    }

    /// The relations declared under one role.
    pub fn relations_for(&self, role: RelationRole) -> &BTreeMap<String, RelationMeta> {
        match role {
            RelationRole::Requires => &self.requires,
            RelationRole::Provides => &self.provides,
            RelationRole::Peers => &self.peers,
        }
    }
}

fn parse_relations(role: RelationRole, section: RawSection) -> Result<BTreeMap<String, RelationMeta>> {
    parse_section(DefinitionKind::Relation, section, |name, raw: Option<RawRelation>| {
        RelationMeta::from_raw(role, name, raw)
    })
}

fn parse_section<R: DeserializeOwned, T>(
    kind: DefinitionKind,
    section: RawSection,
    build: impl Fn(&str, Option<R>) -> Result<T>,
) -> Result<BTreeMap<String, T>> {
    section
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            trace!(%kind, definition = %name, "parsing definition");
            let raw: Option<R> =
                serde_yaml::from_value(value).map_err(|e| MetadataError::InvalidDefinition {
                    kind,
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let def = build(&name, raw)?;
            Ok((name, def))
        })
        .collect()
}

fn binding_names(raw: Option<RawBindings>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(RawBindings::List(names)) => names,
        Some(RawBindings::Map(map)) => map
            .into_iter()
            .filter_map(|(key, _)| match key {
                Value::String(name) => Some(name),
                other => {
                    warn!(key = ?other, "ignoring non-string extra-binding");
                    None
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_description_is_empty() {
        let meta = Metadata::from_raw(None).unwrap();
        assert_eq!(meta, Metadata::default());

        let meta = Metadata::from_raw(Some(Value::Null)).unwrap();
        assert_eq!(meta, Metadata::default());
    }

    #[test]
    fn test_scalar_defaults() {
        let meta = Metadata::from_yaml_str("name: bare").unwrap();

        assert_eq!(meta.name, "bare");
        assert_eq!(meta.summary, "");
        assert_eq!(meta.description, "");
        assert!(meta.maintainers.is_empty());
        assert!(meta.tags.is_empty());
        assert!(meta.terms.is_empty());
        assert!(meta.series.is_empty());
        assert!(meta.extra_bindings.is_empty());
        assert!(!meta.subordinate);
        assert_eq!(meta.min_platform_version, None);
        assert!(meta.relations.is_empty());
        assert!(meta.storage.is_empty());
        assert!(meta.resources.is_empty());
        assert!(meta.payloads.is_empty());
    }

    #[test]
    fn test_maintainer_singular_first() {
        let yaml = r#"
maintainers:
  - Bob <bob@example.com>
  - Carol <carol@example.com>
maintainer: Alice <alice@example.com>
"#;
        let meta = Metadata::from_yaml_str(yaml).unwrap();
        assert_eq!(
            meta.maintainers,
            vec![
                "Alice <alice@example.com>",
                "Bob <bob@example.com>",
                "Carol <carol@example.com>",
            ]
        );
    }

    #[test]
    fn test_relation_roles_and_union() {
        let yaml = r#"
requires:
  db:
    interface: pgsql
provides:
  website:
    interface: http
peers:
  cluster:
    interface: my-cluster
"#;
        let meta = Metadata::from_yaml_str(yaml).unwrap();

        assert_eq!(meta.relations.len(), 3);
        assert_eq!(meta.relations["db"].role, RelationRole::Requires);
        assert_eq!(meta.relations["db"].interface_name, "pgsql");
        assert_eq!(meta.relations["website"].role, RelationRole::Provides);
        assert_eq!(meta.relations["cluster"].role, RelationRole::Peers);
        assert_eq!(meta.relations_for(RelationRole::Peers).len(), 1);
        assert!(meta.requires.contains_key("db"));
        assert!(!meta.provides.contains_key("db"));
    }

    #[test]
    fn test_cross_role_collision_is_rejected() {
        let yaml = r#"
requires:
  db:
    interface: pgsql
provides:
  db:
    interface: pgsql
"#;
        let err = Metadata::from_yaml_str(yaml).unwrap_err();
        match err {
            MetadataError::DuplicateRelation { name, first, second } => {
                assert_eq!(name, "db");
                assert_eq!(first, RelationRole::Requires);
                assert_eq!(second, RelationRole::Provides);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_bindings_map_and_list() {
        let meta = Metadata::from_yaml_str("extra-bindings:\n  public:\n  admin:\n").unwrap();
        assert_eq!(meta.extra_bindings, vec!["public", "admin"]);

        let meta = Metadata::from_yaml_str("extra-bindings: [public]").unwrap();
        assert_eq!(meta.extra_bindings, vec!["public"]);
    }

    #[test]
    fn test_min_version_aliases() {
        let meta = Metadata::from_yaml_str("min-juju-version: 2.7.0").unwrap();
        assert_eq!(meta.min_platform_version.as_deref(), Some("2.7.0"));

        let meta = Metadata::from_yaml_str("min-platform-version: \"3.1\"").unwrap();
        assert_eq!(meta.min_platform_version.as_deref(), Some("3.1"));
    }

    #[test]
    fn test_null_sections_are_empty() {
        let meta = Metadata::from_yaml_str("requires:\nstorage:\ntags:\n").unwrap();
        assert!(meta.requires.is_empty());
        assert!(meta.storage.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_first_failing_definition_aborts() {
        let yaml = r#"
storage:
  data:
    type: filesystem
  logs:
    location: /var/log
"#;
        let err = Metadata::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::MissingField { kind: DefinitionKind::Storage, ref name, field: "type" } if name == "logs"
        ));
    }

    #[test]
    fn test_mistyped_field_names_definition() {
        let err = Metadata::from_yaml_str("requires:\n  db:\n    interface: pgsql\n    limit: many\n").unwrap_err();
        match err {
            MetadataError::InvalidDefinition { kind, name, .. } => {
                assert_eq!(kind, DefinitionKind::Relation);
                assert_eq!(name, "db");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Metadata::from_yaml_str("resources:\n  app: [file]\n").unwrap_err();
        assert!(err.to_string().starts_with("resource 'app' is invalid"));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let err = Metadata::from_yaml_str("requires: [db, cache]").unwrap_err();
        assert!(matches!(err, MetadataError::Parse { .. }));
    }
}
