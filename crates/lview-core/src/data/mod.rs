//! Static knowledge base.
//!
//! Unit and spell stats are read from the JSON data files shipped with the
//! overlay, icons from the icon folders next to them:
//!
//! ```text
//! data/
//! ├── UnitData.json
//! ├── SpellData.json
//! ├── SpellDataCustom.json
//! ├── icons_spells/*.png
//! └── icons_champs/*.png
//! ```
//!
//! All names are lowercased on ingestion, lookups lowercase their argument.
//! Lookups of unknown names return a zeroed sentinel instead of failing.

mod exceptions;
mod icons;
mod loader;
mod spell;
mod unit;

pub use exceptions::{ExceptionReport, SPELL_EXCEPTIONS, SpellException, apply_spell_exceptions};
pub use icons::{PngTextureLoader, TextureHandle, TextureLoader, load_icons, parse_png_dimensions};
pub use loader::*;
pub use spell::{SpellFlags, SpellInfo};
pub use unit::{UnitInfo, UnitTag, UnitTags};
