//! Resource and payload definitions.

use serde::{Deserialize, Serialize};

use crate::{DefinitionKind, MetadataError, Result};

/// A resource the charm expects to be supplied (a file, an OCI image, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceMeta {
    pub resource_name: String,
    pub resource_type: String,
    pub filename: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawResource {
    #[serde(rename = "type")]
    resource_type: Option<String>,
    filename: Option<String>,
    description: Option<String>,
}

impl ResourceMeta {
    pub(crate) fn from_raw(name: &str, raw: Option<RawResource>) -> Result<Self> {
        let raw = raw.unwrap_or_default();
        let resource_type = raw
            .resource_type
            .ok_or_else(|| MetadataError::missing(DefinitionKind::Resource, name, "type"))?;
        let filename = raw
            .filename
            .ok_or_else(|| MetadataError::missing(DefinitionKind::Resource, name, "filename"))?;

        Ok(Self {
            resource_name: name.to_string(),
            resource_type,
            filename,
            description: raw.description.unwrap_or_default(),
        })
    }
}

/// A payload class the charm tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadMeta {
    pub payload_name: String,
    pub payload_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPayload {
    #[serde(rename = "type")]
    payload_type: Option<String>,
}

impl PayloadMeta {
    pub(crate) fn from_raw(name: &str, raw: Option<RawPayload>) -> Result<Self> {
        let payload_type = raw
            .unwrap_or_default()
            .payload_type
            .ok_or_else(|| MetadataError::missing(DefinitionKind::Payload, name, "type"))?;

        Ok(Self {
            payload_name: name.to_string(),
            payload_type,
        })
    }
}
