//! Storage definitions and the compact `multiple.range` syntax.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::warn;

use crate::{DefinitionKind, MetadataError, Result};

/// Allowed instance counts for a multiple storage: `min..=max`, or `min..` when
/// `max` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StorageRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl StorageRange {
    /// Parse a range token such as `"3"`, `"2-"` or `"1-5"`.
    ///
    /// `name` is the owning storage, used only for error reporting. An
    /// inverted range such as `"5-1"` is rejected along with non-numeric
    /// bounds.
    pub fn parse(name: &str, token: &str) -> Result<Self> {
        let invalid = |reason: &str| MetadataError::InvalidFormat {
            name: name.to_string(),
            value: token.to_string(),
            reason: reason.to_string(),
        };
        let number = |part: &str| part.trim().parse::<u32>().map_err(|e| invalid(&e.to_string()));

        let range = match token.split_once('-') {
            None => {
                let n = number(token)?;
                Self { min: n, max: Some(n) }
            }
            Some((lower, upper)) => {
                if lower.trim().is_empty() {
                    return Err(invalid("lower bound is required"));
                }
                let min = number(lower)?;
                let max = if upper.trim().is_empty() {
                    None
                } else {
                    Some(number(upper)?)
                };
                Self { min, max }
            }
        };

        if matches!(range.max, Some(max) if max < range.min) {
            return Err(invalid("upper bound is below lower bound"));
        }
        Ok(range)
    }

    pub fn as_tuple(&self) -> (u32, Option<u32>) {
        (self.min, self.max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// Whether `count` instances satisfy this range.
    pub fn contains(&self, count: u32) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for StorageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", self.min),
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}-", self.min),
        }
    }
}

/// A storage item as declared in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageMeta {
    pub storage_name: String,
    /// `filesystem` or `block`.
    pub storage_type: String,
    pub description: String,
    pub shared: bool,
    pub read_only: bool,
    pub minimum_size: Option<String>,
    pub location: Option<String>,
    pub multiple_range: Option<StorageRange>,
}

impl StorageMeta {
    pub fn is_multiple(&self) -> bool {
        self.multiple_range.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMultiple {
    /// A bare count or a range string; any other scalar is rejected.
    range: Option<Value>,
}

fn range_from_value(name: &str, value: &Value) -> Result<StorageRange> {
    let invalid = |value: String, reason: &str| MetadataError::InvalidFormat {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    };

    match value {
        Value::String(token) => StorageRange::parse(name, token),
        Value::Number(n) => match n.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(count) => Ok(StorageRange {
                min: count,
                max: Some(count),
            }),
            None => Err(invalid(n.to_string(), "count must be a non-negative integer")),
        },
        other => Err(invalid(format!("{other:?}"), "expected a count or a range such as 1-5")),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RawStorage {
    #[serde(rename = "type")]
    storage_type: Option<String>,
    description: Option<String>,
    shared: Option<bool>,
    read_only: Option<bool>,
    minimum_size: Option<String>,
    location: Option<String>,
    multiple: Option<RawMultiple>,
}

impl StorageMeta {
    pub(crate) fn from_raw(name: &str, raw: Option<RawStorage>) -> Result<Self> {
        let raw = raw.unwrap_or_default();
        let storage_type = raw
            .storage_type
            .ok_or_else(|| MetadataError::missing(DefinitionKind::Storage, name, "type"))?;

        let multiple_range = match raw.multiple {
            Some(RawMultiple { range: Some(value) }) => Some(range_from_value(name, &value)?),
            Some(RawMultiple { range: None }) => {
                warn!(storage = name, "multiple block without a range, treating as single");
                None
            }
            None => None,
        };

        Ok(Self {
            storage_name: name.to_string(),
            storage_type,
            description: raw.description.unwrap_or_default(),
            shared: raw.shared.unwrap_or(false),
            read_only: raw.read_only.unwrap_or(false),
            minimum_size: raw.minimum_size,
            location: raw.location,
            multiple_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("3", 3, Some(3) ; "single count")]
    #[test_case("2-", 2, None ; "open upper bound")]
    #[test_case("1-5", 1, Some(5) ; "closed range")]
    #[test_case(" 0 - 10 ", 0, Some(10) ; "surrounding whitespace")]
    fn test_parse_range(token: &str, min: u32, max: Option<u32>) {
        let range = StorageRange::parse("data", token).unwrap();
        assert_eq!(range.as_tuple(), (min, max));
    }

    #[test_case("many" ; "non numeric")]
    #[test_case("-5" ; "missing lower bound")]
    #[test_case("1-x" ; "non numeric upper")]
    #[test_case("1-5-7" ; "too many separators")]
    #[test_case("5-1" ; "inverted bounds")]
    #[test_case("" ; "empty")]
    fn test_parse_range_rejects(token: &str) {
        let err = StorageRange::parse("data", token).unwrap_err();
        match err {
            MetadataError::InvalidFormat { name, value, .. } => {
                assert_eq!(name, "data");
                assert_eq!(value, token);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_range_contains() {
        let open = StorageRange::parse("data", "2-").unwrap();
        assert!(!open.contains(1));
        assert!(open.contains(2));
        assert!(open.contains(1000));
        assert!(open.is_unbounded());

        let closed = StorageRange::parse("data", "1-3").unwrap();
        assert!(closed.contains(3));
        assert!(!closed.contains(4));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(StorageRange { min: 3, max: Some(3) }.to_string(), "3");
        assert_eq!(StorageRange { min: 2, max: None }.to_string(), "2-");
        assert_eq!(StorageRange { min: 1, max: Some(5) }.to_string(), "1-5");
    }

    #[test]
    fn test_storage_from_raw_defaults() {
        let raw: RawStorage = serde_yaml::from_str("type: filesystem").unwrap();
        let storage = StorageMeta::from_raw("logs", Some(raw)).unwrap();

        assert_eq!(storage.storage_name, "logs");
        assert_eq!(storage.storage_type, "filesystem");
        assert_eq!(storage.description, "");
        assert!(!storage.shared);
        assert!(!storage.read_only);
        assert_eq!(storage.minimum_size, None);
        assert_eq!(storage.location, None);
        assert!(!storage.is_multiple());
    }

    #[test]
    fn test_storage_from_raw_full() {
        let yaml = r#"
type: block
description: Scratch disks
read-only: true
minimum-size: 10G
location: /srv/scratch
multiple:
  range: 1-4
"#;
        let raw: RawStorage = serde_yaml::from_str(yaml).unwrap();
        let storage = StorageMeta::from_raw("scratch", Some(raw)).unwrap();

        assert_eq!(storage.storage_type, "block");
        assert_eq!(storage.description, "Scratch disks");
        assert!(storage.read_only);
        assert_eq!(storage.minimum_size.as_deref(), Some("10G"));
        assert_eq!(storage.location.as_deref(), Some("/srv/scratch"));
        assert!(storage.is_multiple());
        assert_eq!(storage.multiple_range.map(|r| r.as_tuple()), Some((1, Some(4))));
    }

    #[test]
    fn test_storage_integer_range() {
        let raw: RawStorage = serde_yaml::from_str("type: block\nmultiple:\n  range: 3").unwrap();
        let storage = StorageMeta::from_raw("disks", Some(raw)).unwrap();
        assert_eq!(storage.multiple_range, Some(StorageRange { min: 3, max: Some(3) }));
    }

    #[test_case("-1", "-1" ; "negative count")]
    #[test_case("2.5", "2.5" ; "fractional count")]
    #[test_case("4294967296", "4294967296" ; "count above u32")]
    fn test_storage_bad_numeric_range_names_storage(token: &str, shown: &str) {
        let yaml = format!("type: block\nmultiple:\n  range: {token}");
        let raw: RawStorage = serde_yaml::from_str(&yaml).unwrap();
        let err = StorageMeta::from_raw("disks", Some(raw)).unwrap_err();
        match err {
            MetadataError::InvalidFormat { name, value, .. } => {
                assert_eq!(name, "disks");
                assert_eq!(value, shown);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_storage_non_scalar_range_fails() {
        let raw: RawStorage = serde_yaml::from_str("type: block\nmultiple:\n  range: [1, 5]").unwrap();
        let err = StorageMeta::from_raw("disks", Some(raw)).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidFormat { ref name, .. } if name == "disks"));
    }

    #[test]
    fn test_storage_null_flags_default_to_false() {
        let raw: RawStorage = serde_yaml::from_str("type: filesystem\nshared:\nread-only: ~").unwrap();
        let storage = StorageMeta::from_raw("logs", Some(raw)).unwrap();
        assert!(!storage.shared);
        assert!(!storage.read_only);
    }

    #[test]
    fn test_storage_without_type_fails() {
        let raw: RawStorage = serde_yaml::from_str("description: no type").unwrap();
        let err = StorageMeta::from_raw("logs", Some(raw)).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::MissingField { kind: DefinitionKind::Storage, ref name, field: "type" } if name == "logs"
        ));
    }
}
