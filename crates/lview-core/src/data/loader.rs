use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::exceptions::{ExceptionReport, SPELL_EXCEPTIONS, apply_spell_exceptions};
use super::icons::{TextureHandle, TextureLoader, load_icons};
use super::spell::{SpellFlags, SpellInfo, UNKNOWN_SPELL};
use super::unit::{UNKNOWN_UNIT, UnitInfo, UnitTag, UnitTags};
use crate::error::{Error, Result};

pub const UNIT_DATA_FILE: &str = "UnitData.json";
pub const SPELL_DATA_FILE: &str = "SpellData.json";
pub const SPELL_DATA_CUSTOM_FILE: &str = "SpellDataCustom.json";
pub const SPELL_ICONS_DIR: &str = "icons_spells";
pub const CHAMPION_ICONS_DIR: &str = "icons_champs";

/// Unit record as stored in `UnitData.json`.
///
/// Numeric fields are required; a unit without `tags` has no tags.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitRecord {
    name: String,
    acquisition_range: f32,
    attack_speed_ratio: f32,
    attack_range: f32,
    attack_speed: f32,
    base_move_speed: f32,
    basic_atk_missile_speed: f32,
    basic_atk_windup: f32,
    gameplay_radius: f32,
    health_bar_height: f32,
    pathing_radius: f32,
    selection_radius: f32,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<UnitRecord> for UnitInfo {
    fn from(record: UnitRecord) -> Self {
        let tags = record
            .tags
            .iter()
            .filter_map(|tag| match UnitTag::from_str(tag) {
                Ok(tag) => Some(tag),
                Err(_) => {
                    debug!("Ignoring unknown unit tag {} on {}", tag, record.name);
                    None
                }
            })
            .collect::<UnitTags>();

        Self {
            name: record.name.to_lowercase(),
            acquisition_range: record.acquisition_range,
            attack_speed_ratio: record.attack_speed_ratio,
            base_attack_range: record.attack_range,
            base_attack_speed: record.attack_speed,
            base_movement_speed: record.base_move_speed,
            basic_attack_missile_speed: record.basic_atk_missile_speed,
            basic_attack_windup: record.basic_atk_windup,
            gameplay_radius: record.gameplay_radius,
            health_bar_height: record.health_bar_height,
            path_radius: record.pathing_radius,
            selection_radius: record.selection_radius,
            tags,
        }
    }
}

/// Spell record as stored in `SpellData.json` / `SpellDataCustom.json`.
///
/// Numeric fields are required; `icon` and `targeted` default to empty/false.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpellRecord {
    name: String,
    #[serde(default)]
    icon: String,
    affects_types_flags: i32,
    delay: f32,
    height: f32,
    radius: f32,
    range: f32,
    speed: f32,
    #[serde(default)]
    targeted: bool,
}

impl From<SpellRecord> for SpellInfo {
    fn from(record: SpellRecord) -> Self {
        // The data stores the flags as a signed 32-bit integer. The top bits
        // belong to TARGETED and FIXED_DESTINATION, which the data never sets.
        let reserved = (SpellFlags::TARGETED | SpellFlags::FIXED_DESTINATION).bits();
        let mut flags =
            SpellFlags::from_bits_retain(record.affects_types_flags as u32 & !reserved);
        if record.targeted {
            flags |= SpellFlags::TARGETED;
        }

        Self {
            name: record.name.to_lowercase(),
            icon: record.icon.to_lowercase(),
            flags,
            delay: record.delay,
            height: record.height,
            radius: record.radius,
            range: record.range,
            speed: record.speed,
        }
    }
}

/// Counters collected while loading the knowledge base
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub units: usize,
    pub spells: usize,
    pub images: usize,
    pub skipped_units: usize,
    pub skipped_spells: usize,
    pub failed_images: usize,
    pub exceptions: ExceptionReport,
}

impl LoadReport {
    pub fn skipped_records(&self) -> usize {
        self.skipped_units + self.skipped_spells
    }
}

/// Static knowledge base: unit stats, spell stats and icons.
///
/// Built once by [`GameData::load`] and read-only afterwards; share it by
/// reference with everything that interprets live game state.
#[derive(Debug, Default)]
pub struct GameData {
    units: HashMap<String, UnitInfo>,
    spells: HashMap<String, SpellInfo>,
    images: HashMap<String, TextureHandle>,
    report: LoadReport,
}

impl GameData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load everything under `data_folder` and apply the spell exceptions.
    pub fn load<P, L>(data_folder: P, texture_loader: &mut L) -> Result<Self>
    where
        P: AsRef<Path>,
        L: TextureLoader + ?Sized,
    {
        let folder = data_folder.as_ref();
        let mut data = Self::new();

        info!("Loading unit data");
        data.load_unit_data(folder.join(UNIT_DATA_FILE))?;

        info!("Loading spell data");
        data.load_spell_data(folder.join(SPELL_DATA_FILE))?;
        data.load_spell_data(folder.join(SPELL_DATA_CUSTOM_FILE))?;

        info!("Loading images");
        data.load_icons(folder.join(SPELL_ICONS_DIR), texture_loader);
        data.load_icons(folder.join(CHAMPION_ICONS_DIR), texture_loader);

        data.set_spell_exceptions();

        let report = &data.report;
        info!(
            "Loading complete: {} units, {} spells, {} images",
            report.units, report.spells, report.images
        );
        if report.skipped_records() > 0 {
            warn!(
                "Skipped {} malformed records ({} units, {} spells)",
                report.skipped_records(),
                report.skipped_units,
                report.skipped_spells
            );
        }

        Ok(data)
    }

    /// Load a unit data file. Returns the number of records skipped.
    pub fn load_unit_data<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let (records, skipped) = read_records::<UnitRecord>(path)?;

        for record in records {
            let unit = UnitInfo::from(record);
            self.units.insert(unit.name.clone(), unit);
        }

        self.report.units = self.units.len();
        self.report.skipped_units += skipped;
        Ok(skipped)
    }

    /// Load a spell data file. Later files override earlier entries of the same name.
    pub fn load_spell_data<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let (records, skipped) = read_records::<SpellRecord>(path)?;

        for record in records {
            let spell = SpellInfo::from(record);
            self.spells.insert(spell.name.clone(), spell);
        }

        self.report.spells = self.spells.len();
        self.report.skipped_spells += skipped;
        Ok(skipped)
    }

    /// Load an icon directory. Individual failures are logged and skipped.
    pub fn load_icons<P, L>(&mut self, folder: P, loader: &mut L)
    where
        P: AsRef<Path>,
        L: TextureLoader + ?Sized,
    {
        let failed = load_icons(folder.as_ref(), loader, &mut self.images);
        self.report.images = self.images.len();
        self.report.failed_images += failed;
    }

    /// Apply the hardcoded spell corrections
    pub fn set_spell_exceptions(&mut self) -> &ExceptionReport {
        self.report.exceptions = apply_spell_exceptions(&mut self.spells, SPELL_EXCEPTIONS);
        &self.report.exceptions
    }

    /// Add or replace a unit definition; the key is its lowercased name
    pub fn insert_unit(&mut self, mut unit: UnitInfo) {
        unit.name = unit.name.to_lowercase();
        self.units.insert(unit.name.clone(), unit);
        self.report.units = self.units.len();
    }

    /// Add or replace a spell definition; the key is its lowercased name
    pub fn insert_spell(&mut self, mut spell: SpellInfo) {
        spell.name = spell.name.to_lowercase();
        self.spells.insert(spell.name.clone(), spell);
        self.report.spells = self.spells.len();
    }

    pub fn get_unit_info_by_name(&self, name: &str) -> &UnitInfo {
        self.units
            .get(name.to_lowercase().as_str())
            .unwrap_or(&UNKNOWN_UNIT)
    }

    pub fn get_spell_info_by_name(&self, name: &str) -> &SpellInfo {
        self.spells
            .get(name.to_lowercase().as_str())
            .unwrap_or(&UNKNOWN_SPELL)
    }

    pub fn get_image(&self, name: &str) -> Option<&TextureHandle> {
        self.images.get(name.to_lowercase().as_str())
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitInfo> {
        self.units.values()
    }

    pub fn spells(&self) -> impl Iterator<Item = &SpellInfo> {
        self.spells.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

/// Read a JSON array of records, skipping (and logging) the malformed ones.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, usize)> {
    let content = fs::read_to_string(path).map_err(|source| Error::DataFileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_json::from_str(&content).map_err(|e| invalid(path, e.to_string()))?;
    let Value::Array(items) = document else {
        return Err(invalid(path, "expected an array of records".to_string()));
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping record {} in {}: {}", index, path.display(), e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Read {} records from {} ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );
    Ok((records, skipped))
}

fn invalid(path: &Path, reason: String) -> Error {
    Error::InvalidDataFile {
        path: PathBuf::from(path),
        reason,
    }
}
