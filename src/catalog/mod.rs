//! The catalog of known variables, queried by name during scanning,
//! classification, and completion.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, info};

mod api;
mod definition;

// Re-export all public symbols
pub use definition::*;

static EMBEDDED: &str = include_str!("variables.json");

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Format(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(error) => write!(f, "unable to read catalog: {}", error),
            CatalogError::Json(error) => write!(f, "malformed catalog: {}", error),
            CatalogError::Format(problem) => write!(f, "unrecognized catalog: {}", problem),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(error) => Some(error),
            CatalogError::Json(error) => Some(error),
            CatalogError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(error: std::io::Error) -> Self {
        CatalogError::Io(error)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::Json(error)
    }
}

/// Read-only table of variable definitions. Built once and then shared by
/// reference with everything that needs to look variables up.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: BTreeMap<String, VariableDefinition>,
    aliases: BTreeMap<String, String>,
}

impl Catalog {
    pub fn from_definitions(definitions: Vec<VariableDefinition>) -> Catalog {
        let mut catalog = Catalog::default();

        for definition in definitions {
            for alias in &definition.aliases {
                catalog
                    .aliases
                    .insert(alias.clone(), definition.name.clone());
            }
            catalog
                .definitions
                .insert(definition.name.clone(), definition);
        }

        catalog
    }

    /// The catalog compiled into this program.
    pub fn embedded() -> Catalog {
        // the asset is checked by the tests below; an empty catalog only
        // disables variable specific checks.
        match Catalog::from_json(EMBEDDED) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::error!("Embedded catalog unusable: {}", error);
                Catalog::default()
            }
        }
    }

    /// Parse a catalog from JSON, either a list of definitions or a dump of
    /// the variables endpoint of the Firebot API.
    pub fn from_json(content: &str) -> Result<Catalog, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        if !value.is_array() {
            return Err(CatalogError::Format(
                "expected a list of variable definitions".to_string(),
            ));
        }

        let definitions = if api::is_api_dump(&value) {
            debug!("Reading catalog in API dump format");
            let entries = serde_json::from_value(value)?;
            api::convert(entries)
        } else {
            serde_json::from_value(value)?
        };

        Ok(Catalog::from_definitions(definitions))
    }

    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&content)?;

        info!(
            "Loaded {} variable{} from {}",
            catalog.len(),
            if catalog.len() == 1 { "" } else { "s" },
            path.display()
        );

        Ok(catalog)
    }

    /// Exact lookup by name or alias.
    pub fn lookup(&self, name: &str) -> Option<&VariableDefinition> {
        match self
            .definitions
            .get(name)
        {
            Some(definition) => Some(definition),
            None => self
                .aliases
                .get(name)
                .and_then(|target| {
                    self.definitions
                        .get(target)
                }),
        }
    }

    /// Look up a token as it appears in text. Besides exact names this
    /// understands the `$$name` and `$&name` shorthands for custom variables
    /// and effect outputs.
    pub fn resolve(&self, token: &str) -> Option<&VariableDefinition> {
        if let Some(definition) = self.lookup(token) {
            return Some(definition);
        }

        if token.len() > 2 && (token.starts_with("$$") || token.starts_with("$&")) {
            return self.lookup(&token[..2]);
        }

        None
    }

    pub fn definitions(&self) -> impl Iterator<Item = &VariableDefinition> {
        self.definitions
            .values()
    }

    pub fn len(&self) -> usize {
        self.definitions
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions
            .is_empty()
    }
}
