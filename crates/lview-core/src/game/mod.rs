//! Live game state read from process memory.

pub mod math;
mod missile;
mod object;
mod snapshot;
mod spell;

pub use math::{Matrix4, Vector2, Vector3, effective_hp};
pub use missile::Missile;
pub use object::{GameObject, ObjectKind, team};
pub use snapshot::{MemSnapshot, SnapshotReader, TreeWalk};
pub use spell::{Spell, SummonerSpellType};
