//! Offset table command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use lview_core::{Config, OffsetCatalog, OffsetTable, save_offsets};
use owo_colors::OwoColorize;
use tracing::info;

/// Build the catalog: compiled-in tables plus the configured offsets file
pub fn load_catalog(config: &Config) -> Result<(OffsetCatalog, Option<String>)> {
    let mut catalog = OffsetCatalog::builtin();

    let file_version = match &config.offsets_file {
        Some(path) => {
            let table = catalog
                .load_file(path)
                .with_context(|| format!("Failed to load offsets from {}", path.display()))?;
            info!("Loaded offsets {} from {}", table.version, path.display());
            Some(table.version.clone())
        }
        None => None,
    };

    Ok((catalog, file_version))
}

/// Select the table for `version`, else the configured file's, else the builtin
pub fn select_table(config: &Config, version: Option<&str>) -> Result<OffsetTable> {
    let (catalog, file_version) = load_catalog(config)?;
    let version = version
        .map(str::to_string)
        .or(file_version)
        .unwrap_or_else(|| lview_core::BUILTIN_VERSION.to_string());

    let table = catalog.select(&version)?.clone();
    if !table.is_valid() {
        bail!("Offset table {} is incomplete", table.version);
    }
    Ok(table)
}

pub fn run(config: &Config, output: Option<&Path>, version: Option<&str>) -> Result<()> {
    let table = select_table(config, version)?;

    match output {
        Some(path) => {
            save_offsets(path, &table)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Offsets {} written to {}",
                table.version.green(),
                path.display().bold()
            );
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lview_core::{BUILTIN_VERSION, builtin_offsets, load_offsets};
    use tempfile::tempdir;

    #[test]
    fn test_defaults_to_builtin() {
        let table = select_table(&Config::default(), None).unwrap();
        assert_eq!(table.version, BUILTIN_VERSION);
    }

    #[test]
    fn test_unknown_version_fails() {
        assert!(select_table(&Config::default(), Some("9.9")).is_err());
    }

    #[test]
    fn test_configured_file_is_preferred() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offsets.json");
        let mut table = builtin_offsets();
        table.version = "11.3".to_string();
        table.object.health = 0xDA0;
        save_offsets(&path, &table).unwrap();

        let config = Config {
            offsets_file: Some(path),
            ..Config::default()
        };
        let selected = select_table(&config, None).unwrap();
        assert_eq!(selected, table);

        let builtin = select_table(&config, Some(BUILTIN_VERSION)).unwrap();
        assert_eq!(builtin.version, BUILTIN_VERSION);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        run(&Config::default(), Some(&path), None).unwrap();

        assert_eq!(load_offsets(&path).unwrap(), builtin_offsets());
    }
}
