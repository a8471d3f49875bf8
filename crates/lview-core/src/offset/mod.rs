//! Versioned memory layout of the game client.
//!
//! Each [`OffsetTable`] describes where fields live inside the client's
//! structures for exactly one build. Tables are selected once at startup
//! through an [`OffsetCatalog`] and never mixed.

mod builtin;
mod loader;
mod table;

pub use builtin::*;
pub use loader::*;
pub use table::*;
