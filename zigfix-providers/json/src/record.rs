//! Serialized shape of one catalog record.

use std::collections::BTreeMap;

use serde::Deserialize;
use zigfix_core::{Definition, Expose, Fingerprint, WhiteLabel};

#[derive(Debug, Deserialize)]
pub(crate) struct DefinitionRecord {
    pub(crate) model: String,
    pub(crate) vendor: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default, alias = "whiteLabel")]
    pub(crate) white_label: Vec<WhiteLabel>,
    #[serde(default)]
    pub(crate) fingerprint: Vec<Fingerprint>,
    #[serde(default)]
    pub(crate) exposes: Vec<Expose>,
    #[serde(default)]
    pub(crate) options: Vec<Expose>,
    /// Named endpoint ids; every device built from the record gets them.
    #[serde(default)]
    pub(crate) endpoints: Option<BTreeMap<String, u32>>,
    #[serde(default, alias = "ota", alias = "supportsOTA")]
    pub(crate) supports_ota: bool,
}

impl From<DefinitionRecord> for Definition {
    fn from(record: DefinitionRecord) -> Self {
        let mut definition = Self::new(&record.model, &record.vendor, &record.description)
            .with_exposes(record.exposes)
            .with_options(record.options)
            .with_ota(record.supports_ota);
        definition.white_label = record.white_label;
        definition.fingerprint = record.fingerprint;
        if let Some(endpoints) = record.endpoints {
            definition = definition.with_endpoints(move |_| endpoints.clone());
        }
        definition
    }
}
