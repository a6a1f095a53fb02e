use crate::config::{EngineConfig, Tuning};
use schema::{ElementType, MoveDef, SpeciesTemplate};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity for a battle instance. Two instances of the same
/// species are distinct party members; this is what tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(u64);

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

impl InstanceId {
    pub fn next() -> InstanceId {
        InstanceId(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A battle-ready creature derived from a species template.
///
/// Created when a creature is obtained (starter pick, capture) or when a
/// wild opponent is generated. The battle engine mutates health, experience
/// and level; the template itself is never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInst {
    pub species_id: u16,
    pub name: String,
    pub element: ElementType,
    pub sprite: String,
    pub rare: bool,
    pub level: u8,
    pub max_hp: u16,
    pub current_hp: u16,
    pub base_attack: u16,
    pub exp: u32,
    pub uid: InstanceId,
    pub moves: Vec<MoveDef>,
}

impl CreatureInst {
    /// Build an instance from a template at the requested level.
    ///
    /// Rare templates are clamped to the rare level cap and, unless
    /// suppressed, have the configured power multiplier applied to both
    /// derived stats. The derived stats are deterministic for identical
    /// inputs; only the instance id differs between calls.
    pub fn from_template(
        template: &SpeciesTemplate,
        level: u8,
        suppress_rare_bonus: bool,
        config: &EngineConfig,
        tuning: &Tuning,
    ) -> CreatureInst {
        let level = if template.rare {
            level.clamp(1, tuning.rare_level_cap)
        } else {
            level.max(1)
        };

        let stats = &tuning.stats;
        let mut max_hp = (template.base_max_hp as f32 * (1.0 + level as f32 / stats.hp_level_divisor)
            + level as f32 * stats.hp_flat_per_level)
            .floor();
        let mut attack = (template.base_attack as f32
            * (1.0 + level as f32 / stats.attack_level_divisor))
            .floor();

        if template.rare && !suppress_rare_bonus {
            let multiplier = config.power_multiplier.max(1.0);
            max_hp = (max_hp * multiplier).floor();
            attack = (attack * multiplier).floor();
        }

        let max_hp = max_hp as u16;
        CreatureInst {
            species_id: template.id,
            name: template.name.clone(),
            element: template.element,
            sprite: template.sprite.clone(),
            rare: template.rare,
            level,
            max_hp,
            current_hp: max_hp,
            base_attack: attack as u16,
            exp: 0,
            uid: InstanceId::next(),
            moves: template.moves.clone(),
        }
    }

    /// Subtract damage, flooring health at zero.
    pub fn take_damage(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restore health to the current maximum.
    pub fn heal_full(&mut self) {
        self.current_hp = self.max_hp;
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Remaining health as a fraction of the maximum, in [0, 1].
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.max_hp as f32
    }
}
