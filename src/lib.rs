// In: src/lib.rs

//! Tallgrass Encounter Engine
//!
//! A turn-based creature-collection engine: tile-map exploration, random
//! wild encounters, a guarded battle loop (attack/capture/flee/switch) with
//! weather modifiers, and experience-driven level progression. The engine is
//! presentation-free: every operation returns the ordered events and pacing
//! pauses it produced, and the caller drives the wall clock.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod catalog;
pub mod config;
pub mod creature;
pub mod encounter;
pub mod errors;
pub mod map;
pub mod party;
pub mod progression;
pub mod session;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `tallgrass` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all core data definitions.
pub use schema::{ElementType, MoveDef, SpeciesCatalog, SpeciesTemplate, TileKind, Weather};

// --- From this crate's modules (`src/`) ---

// Core battle engine types and the random source.
pub use battle::ai::{RandomWild, WildBehavior};
pub use battle::commands::{ActionResult, BattleCommand, TurnStep};
pub use battle::state::{BattleEvent, BattleOutcome, GamePhase, LogCategory, Side, TurnRng};

// Core runtime types for a playthrough.
pub use creature::{CreatureInst, InstanceId};
pub use party::Party;
pub use session::{BattleLog, GameSession, LogEntry};

// Map and configuration.
pub use config::{EngineConfig, Tuning};
pub use map::{Pos, TileMap};

// Primary data access functions.
pub use catalog::{get_species_template, initialize_species_catalog, species_catalog};

// Crate-specific error and result types.
pub use errors::{
    CatalogError, CatalogResult, EngineError, EngineResult, MapError, MapResult, SessionError,
};
