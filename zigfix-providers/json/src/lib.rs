//! JSON-backed capability catalogs.
//!
//! A catalog document is a JSON array of definition records. Record order is
//! preserved, so equal documents and equal seeds give equal fixtures.

mod errors;
mod record;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{debug, instrument};
use zigfix_core::{Catalog, Definition};

pub use errors::JsonCatalogError;
use record::DefinitionRecord;

/// Immutable catalog loaded once from a JSON document.
///
/// # Examples
/// ```
/// use zigfix_core::Catalog;
/// use zigfix_providers_json::JsonCatalog;
///
/// let raw = r#"[{"model": "SW-1", "vendor": "Acme", "exposes": [
///     {"type": "binary", "name": "state", "value_on": "ON", "value_off": "OFF"}
/// ]}]"#;
/// let catalog = JsonCatalog::try_from_reader("demo", raw.as_bytes())?;
/// assert_eq!(catalog.definitions().len(), 1);
/// assert!(catalog.find_by_model("sw-1").is_some());
/// # Ok::<(), zigfix_providers_json::JsonCatalogError>(())
/// ```
#[derive(Debug)]
pub struct JsonCatalog {
    name: String,
    definitions: Vec<Definition>,
}

impl JsonCatalog {
    /// Parses a catalog document from `reader`.
    ///
    /// # Errors
    /// Returns [`JsonCatalogError::Io`] or [`JsonCatalogError::Parse`] when
    /// the document cannot be read or decoded,
    /// [`JsonCatalogError::EmptyCatalog`] when it holds no records and
    /// [`JsonCatalogError::MissingModel`] when a record has a blank model.
    #[instrument(name = "catalog.load", err, skip(name, reader), fields(catalog = name.as_ref()))]
    pub fn try_from_reader<R: Read>(
        name: impl AsRef<str>,
        reader: R,
    ) -> Result<Self, JsonCatalogError> {
        let name = name.as_ref().to_owned();
        let records: Vec<DefinitionRecord> = serde_json::from_reader(reader)?;
        if records.is_empty() {
            return Err(JsonCatalogError::EmptyCatalog { name });
        }
        if let Some(index) = records
            .iter()
            .position(|record| record.model.trim().is_empty())
        {
            return Err(JsonCatalogError::MissingModel { index });
        }
        let definitions: Vec<Definition> = records.into_iter().map(Definition::from).collect();
        debug!(definitions = definitions.len(), "catalog loaded");
        Ok(Self { name, definitions })
    }

    /// Loads a catalog file, naming the catalog after the file stem.
    ///
    /// # Errors
    /// As for [`Self::try_from_reader`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, JsonCatalogError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map_or_else(|| "catalog".to_owned(), |stem| stem.to_string_lossy().into_owned());
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }
}

impl Catalog for JsonCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn definitions(&self) -> &[Definition] {
        &self.definitions
    }
}
