//! Wild-encounter generation: trigger rolls, rarity, species and level
//! selection, and the per-encounter weather draw.

use crate::battle::state::TurnRng;
use crate::catalog::species_catalog;
use crate::config::{EngineConfig, Tuning};
use crate::creature::CreatureInst;
use crate::errors::CatalogResult;
use crate::party::Party;
use schema::{IntoEnumIterator, TileKind, Weather};

/// A fully generated encounter, ready to hand to the battle phase.
#[derive(Debug, Clone)]
pub struct EncounterPlan {
    pub opponent: CreatureInst,
    pub weather: Weather,
}

/// Roll whether entering `tile` starts an encounter. Only tall grass can
/// trigger; the base chance is independent of all other state.
pub fn should_trigger(tile: TileKind, tuning: &Tuning, rng: &mut TurnRng) -> bool {
    if tile != TileKind::Grass {
        return false;
    }
    rng.chance(tuning.encounter_chance, "encounter trigger")
}

/// Generate an opponent and ambient weather for a triggered encounter.
///
/// Weather is drawn uniformly. The rare roll uses the remote-configured
/// spawn rate; rare opponents spawn above the party's best level (clamped to
/// the rare cap), common ones near the party average with a little jitter.
pub fn generate(
    party: &Party,
    config: &EngineConfig,
    tuning: &Tuning,
    rng: &mut TurnRng,
) -> CatalogResult<EncounterPlan> {
    let catalog = species_catalog()?;

    let weather_pool: Vec<Weather> = Weather::iter().collect();
    let weather = weather_pool[rng.pick_index(weather_pool.len(), "weather draw")];

    let rare = rng.chance(config.spawn_rate, "rare encounter roll");

    let (template, level) = if rare {
        let template = &catalog.rare[rng.pick_index(catalog.rare.len(), "rare species pick")];
        let level = (party.highest_level().saturating_add(tuning.rare_level_bonus))
            .min(tuning.rare_level_cap);
        (template, level)
    } else {
        let template = &catalog.common[rng.pick_index(catalog.common.len(), "common species pick")];
        let jitter = rng.spread(tuning.wild_level_jitter, "level jitter");
        let level = (party.average_level() as i32 + jitter).clamp(1, tuning.level_cap as i32) as u8;
        (template, level)
    };

    let opponent = CreatureInst::from_template(template, level, false, config, tuning);
    log::debug!(
        "encounter generated: {} Lv{} (rare: {}), weather {}",
        opponent.name,
        opponent.level,
        opponent.rare,
        weather
    );

    Ok(EncounterPlan { opponent, weather })
}
