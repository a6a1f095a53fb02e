//! Static species catalog, loaded once at startup from `data/species.ron`.

use crate::errors::{CatalogError, CatalogResult};
use schema::{SpeciesCatalog, SpeciesTemplate};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static CATALOG: OnceLock<SpeciesCatalog> = OnceLock::new();

/// Load the species catalog from `<data_path>/species.ron` into the global
/// table. Idempotent: a second call is a no-op.
pub fn initialize_species_catalog(data_path: &Path) -> CatalogResult<()> {
    if CATALOG.get().is_some() {
        return Ok(());
    }

    let file = data_path.join("species.ron");
    if !file.exists() {
        return Err(CatalogError::FileNotFound(file));
    }

    let content = fs::read_to_string(&file)?;
    let catalog: SpeciesCatalog = ron::from_str(&content)?;

    for (name, pool) in [
        ("starters", &catalog.starters),
        ("common", &catalog.common),
        ("rare", &catalog.rare),
    ] {
        if pool.is_empty() {
            return Err(CatalogError::EmptyPool(name));
        }
    }

    log::debug!(
        "species catalog loaded: {} starters, {} common, {} rare",
        catalog.starters.len(),
        catalog.common.len(),
        catalog.rare.len()
    );

    // A racing initializer may have won; that copy is identical.
    let _ = CATALOG.set(catalog);
    Ok(())
}

/// Access the loaded catalog.
pub fn species_catalog() -> CatalogResult<&'static SpeciesCatalog> {
    CATALOG.get().ok_or(CatalogError::NotInitialized)
}

/// Look up a species template by catalog id across all pools.
pub fn get_species_template(id: u16) -> CatalogResult<&'static SpeciesTemplate> {
    species_catalog()?
        .find(id)
        .ok_or(CatalogError::SpeciesNotFound(id))
}

#[cfg(test)]
pub(crate) fn initialize_for_tests() {
    let data_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    initialize_species_catalog(&data_path).expect("test catalog should load");
}
