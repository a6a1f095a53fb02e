use crate::element::ElementType;
use serde::{Deserialize, Serialize};

/// A single move a species can use. Immutable and shared by every instance
/// of that species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDef {
    pub name: String,
    /// Base power before weather adjustment. Zero-power moves are legal.
    pub power: u16,
    pub element: ElementType,
}

/// An immutable species definition loaded from the catalog at startup.
/// Battle instances are derived from templates and never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub id: u16,
    pub name: String,
    pub element: ElementType,
    pub base_max_hp: u16,
    pub base_attack: u16,
    /// Presentation-layer sprite reference. Carried through verbatim.
    pub sprite: String,
    /// Fixed moveset, at most four entries.
    pub moves: Vec<MoveDef>,
    /// Rare species use the lower level cap and receive the power multiplier.
    #[serde(default)]
    pub rare: bool,
}

/// The full static catalog: the three pools the encounter generator and
/// starter selection draw from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub starters: Vec<SpeciesTemplate>,
    pub common: Vec<SpeciesTemplate>,
    pub rare: Vec<SpeciesTemplate>,
}

impl SpeciesCatalog {
    /// Look up a template by catalog id, searching all three pools.
    pub fn find(&self, id: u16) -> Option<&SpeciesTemplate> {
        self.starters
            .iter()
            .chain(self.common.iter())
            .chain(self.rare.iter())
            .find(|t| t.id == id)
    }
}
