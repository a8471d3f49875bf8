//! Overlay configuration.
//!
//! A single TOML file holds the overlay's own settings at the top level and
//! one table per view:
//!
//! ```toml
//! data_folder = "data"
//! process_name = "League of Legends.exe"
//! frame_interval_ms = 33
//!
//! [last_hit_assist]
//! showSmiteLastHit = false
//! showMinionLastHit = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::memory::DEFAULT_PROCESS_NAME;
use crate::memory::layout::timing::FRAME_INTERVAL_MS;

pub const DEFAULT_CONFIG_FILE: &str = "lview.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder with the unit/spell data files and icon folders
    pub data_folder: PathBuf,
    /// Offset table JSON to use instead of the compiled-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsets_file: Option<PathBuf>,
    pub process_name: String,
    pub frame_interval_ms: u64,
    /// Per-view settings tables
    #[serde(flatten)]
    pub views: ConfigSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            offsets_file: None,
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            frame_interval_ms: FRAME_INTERVAL_MS,
            views: ConfigSet::default(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("serialize failed: {}", e)))?;
        fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }
}

/// Typed key/value access for one view's settings
pub trait ConfigStore {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn set_bool(&mut self, key: &str, value: bool);
    fn get_f32(&self, key: &str, default: f32) -> f32;
    fn set_f32(&mut self, key: &str, value: f32);
}

/// Settings tables keyed by view name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSet {
    tables: toml::Table,
}

impl ConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings of view `name`, created empty if absent
    pub fn section(&mut self, name: &str) -> ConfigSection<'_> {
        let value = self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));

        // A scalar under a view name is replaced by an empty table.
        if !value.is_table() {
            warn!("Config key {} is not a table, resetting it", name);
            *value = toml::Value::Table(toml::Table::new());
        }

        ConfigSection { value }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.get(name).is_some_and(toml::Value::is_table)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// One view's table inside a [`ConfigSet`]
#[derive(Debug)]
pub struct ConfigSection<'a> {
    value: &'a mut toml::Value,
}

impl ConfigSection<'_> {
    fn insert(&mut self, key: &str, value: toml::Value) {
        if let Some(table) = self.value.as_table_mut() {
            table.insert(key.to_string(), value);
        }
    }
}

impl ConfigStore for ConfigSection<'_> {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.insert(key, toml::Value::Boolean(value));
    }

    fn get_f32(&self, key: &str, default: f32) -> f32 {
        match self.value.get(key) {
            Some(toml::Value::Float(v)) => *v as f32,
            Some(toml::Value::Integer(v)) => *v as f32,
            _ => default,
        }
    }

    fn set_f32(&mut self, key: &str, value: f32) {
        self.insert(key, toml::Value::Float(f64::from(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.process_name, DEFAULT_PROCESS_NAME);
        assert_eq!(config.frame_interval_ms, FRAME_INTERVAL_MS);
    }

    #[test]
    fn test_parse_views_and_globals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lview.toml");
        fs::write(
            &path,
            r#"
data_folder = "D:/lview/data"
frame_interval_ms = 16

[last_hit_assist]
showSmiteLastHit = true
"#,
        )
        .unwrap();

        let mut config = Config::load(&path).unwrap();
        assert_eq!(config.data_folder, PathBuf::from("D:/lview/data"));
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.process_name, DEFAULT_PROCESS_NAME);
        assert!(config.offsets_file.is_none());

        let section = config.views.section("last_hit_assist");
        assert!(section.get_bool("showSmiteLastHit", false));
        assert!(section.get_bool("showMinionLastHit", true));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("lview.toml");

        let mut config = Config {
            offsets_file: Some(PathBuf::from("offsets-11.3.json")),
            ..Config::default()
        };
        {
            let mut section = config.views.section("last_hit_assist");
            section.set_bool("showMinionLastHit", false);
            section.set_f32("radius", 65.5);
        }
        config.save(&path).unwrap();

        let mut loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        let section = loaded.views.section("last_hit_assist");
        assert!(!section.get_bool("showMinionLastHit", true));
        assert_eq!(section.get_f32("radius", 0.0), 65.5);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lview.toml");
        fs::write(&path, "frame_interval_ms = \"fast\"").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_section_replaces_scalar() {
        let mut set = ConfigSet::new();
        set.tables
            .insert("last_hit_assist".to_string(), toml::Value::Integer(3));

        let mut section = set.section("last_hit_assist");
        section.set_bool("showSmiteLastHit", true);

        assert!(set.contains("last_hit_assist"));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["last_hit_assist"]);
    }
}
