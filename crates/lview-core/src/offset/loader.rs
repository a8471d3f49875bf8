use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::table::OffsetTable;
use crate::error::{Error, Result};

/// Load an offset table from a JSON file
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<OffsetTable> {
    let content = fs::read_to_string(&path)?;
    let table: OffsetTable = serde_json::from_str(&content)?;

    if table.version.trim().is_empty() {
        return Err(Error::InvalidOffset(format!(
            "{} has no version",
            path.as_ref().display()
        )));
    }

    debug!("Loaded offsets for {} from {}", table.version, path.as_ref().display());
    Ok(table)
}

/// Save an offset table as pretty JSON
pub fn save_offsets<P: AsRef<Path>>(path: P, table: &OffsetTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(&path, content)?;
    info!("Saved offsets {} to {}", table.version, path.as_ref().display());
    Ok(())
}

/// Known offset tables, one per supported build
#[derive(Debug, Clone)]
pub struct OffsetCatalog {
    tables: Vec<OffsetTable>,
}

impl OffsetCatalog {
    /// Catalog containing only the compiled-in tables
    pub fn builtin() -> Self {
        Self {
            tables: vec![OffsetTable::builtin()],
        }
    }

    /// Add a table. A table with the same version replaces the old one whole.
    pub fn insert(&mut self, table: OffsetTable) {
        self.tables.retain(|t| !t.matches_version(&table.version));
        self.tables.push(table);
    }

    /// Add the table stored in `path`
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&OffsetTable> {
        let table = load_offsets(path)?;
        let version = table.version.clone();
        self.insert(table);
        self.select(&version)
    }

    /// Pick the table for `version`
    pub fn select(&self, version: &str) -> Result<&OffsetTable> {
        self.tables
            .iter()
            .find(|t| t.matches_version(version))
            .ok_or_else(|| Error::OffsetVersionMismatch {
                expected: self.versions().join(", "),
                actual: version.to_string(),
            })
    }

    pub fn versions(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.version.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for OffsetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
