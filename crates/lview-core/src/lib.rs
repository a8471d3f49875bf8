//! # lview-core
//!
//! Core library for the LView overlay.
//!
//! This crate provides:
//! - The static knowledge base of unit and spell stats, with icon loading
//! - Versioned offset tables for the game client's memory layout
//! - Windows process memory reading and per-frame game snapshots
//! - Last-hit assist logic drawing into an external overlay surface

pub mod assist;
pub mod config;
pub mod data;
pub mod error;
pub mod game;
pub mod memory;
pub mod offset;
pub mod render;

pub use assist::{LastHitAssist, Marker, MarkerKind, OverlayView, is_minion_lethal, is_smite_lethal};
pub use config::{Config, ConfigSection, ConfigSet, ConfigStore};
pub use data::{
    ExceptionReport, GameData, LoadReport, PngTextureLoader, SpellFlags, SpellInfo, TextureHandle,
    TextureLoader, UnitInfo, UnitTag, UnitTags,
};
pub use error::{Error, Result};
pub use game::{
    GameObject, Matrix4, MemSnapshot, Missile, SnapshotReader, Spell, SummonerSpellType, Vector2,
    Vector3, effective_hp,
};
pub use memory::{DEFAULT_PROCESS_NAME, MemoryReader, ProcessHandle, ReadMemory};
pub use offset::{
    BUILTIN_VERSION, OffsetCatalog, OffsetTable, builtin_offsets, load_offsets, save_offsets,
};
pub use render::{Color, DrawCommand, OverlaySurface, RecordingSurface, Renderer};
