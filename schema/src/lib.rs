// Tallgrass Schema - Shared type definitions
// This crate contains the core data definitions shared between the engine
// crate and its data files: element types, weather, species templates, moves,
// and map tile kinds. Everything here is plain data with serde derives.

// Re-export the main types
pub use element::*;
pub use species::*;
pub use tiles::*;

// Re-exported so downstream crates can iterate the enums derived with
// strum::EnumIter without depending on strum themselves.
pub use strum::IntoEnumIterator;

pub mod element;
pub mod species;
pub mod tiles;
