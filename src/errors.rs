use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tallgrass engine.
///
/// Gameplay "failures" (a missed attack, a broken capture, a blocked escape)
/// are not errors; they are ordinary battle events. These types cover data
/// loading and genuinely invalid state only.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("map error: {0}")]
    Map(#[from] MapError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Errors related to the static species catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("species catalog not initialized; call initialize_species_catalog first")]
    NotInitialized,
    #[error("catalog file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog data: {0}")]
    MalformedData(#[from] ron::error::SpannedError),
    #[error("catalog pool `{0}` is empty")]
    EmptyPool(&'static str),
    #[error("species not found: #{0}")]
    SpeciesNotFound(u16),
}

/// Errors related to map data.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map data: {0}")]
    MalformedData(#[from] ron::error::SpannedError),
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTileCode { code: u8, x: usize, y: usize },
    #[error("map grid is empty or ragged")]
    InvalidGrid,
}

/// Errors related to invalid session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("party slot {0} is out of bounds")]
    InvalidPartyIndex(usize),
}

/// Type alias for Results using EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using MapError.
pub type MapResult<T> = Result<T, MapError>;
