use thiserror::Error;

/// Failure to load a [`crate::JsonCatalog`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JsonCatalogError {
    /// The document could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not a valid catalog.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document holds no definitions.
    #[error("catalog `{name}` holds no definitions")]
    EmptyCatalog {
        /// Catalog name.
        name: String,
    },
    /// A record has an empty model id.
    #[error("definition {index} has an empty model id")]
    MissingModel {
        /// Zero-based record index.
        index: usize,
    },
}

impl JsonCatalogError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "ZIGFIX_CATALOG_IO",
            Self::Parse(_) => "ZIGFIX_CATALOG_PARSE",
            Self::EmptyCatalog { .. } => "ZIGFIX_CATALOG_EMPTY",
            Self::MissingModel { .. } => "ZIGFIX_CATALOG_MISSING_MODEL",
        }
    }
}
