//! Experience accumulation and the level-up cascade.

use crate::battle::state::BattleEvent;
use crate::config::{ExpTuning, Tuning};
use crate::creature::CreatureInst;

/// The level ceiling for a creature's class.
pub fn level_cap(rare: bool, tuning: &Tuning) -> u8 {
    if rare {
        tuning.rare_level_cap
    } else {
        tuning.level_cap
    }
}

/// Experience required to advance past `level`.
pub fn exp_to_next(level: u8, tuning: &ExpTuning) -> u32 {
    tuning.threshold(level)
}

/// Credit experience to a creature and resolve every level-up it affords.
///
/// Each level consumes the threshold for the level being left, raises max
/// health and attack by the configured increments and fully heals. Creatures
/// at their class cap accumulate nothing; the cascade stops at the cap even
/// with experience left over.
pub fn apply_experience(
    creature: &mut CreatureInst,
    amount: u32,
    tuning: &Tuning,
) -> Vec<BattleEvent> {
    let cap = level_cap(creature.rare, tuning);
    if creature.level >= cap {
        return Vec::new();
    }

    let mut events = Vec::new();
    creature.exp += amount;

    while creature.level < cap && creature.exp >= exp_to_next(creature.level, &tuning.exp) {
        creature.exp -= exp_to_next(creature.level, &tuning.exp);
        creature.level += 1;
        creature.max_hp += tuning.exp.level_hp_gain;
        creature.base_attack += tuning.exp.level_attack_gain;
        creature.heal_full();

        events.push(BattleEvent::LevelledUp {
            name: creature.name.clone(),
            level: creature.level,
        });

        if creature.level >= cap {
            // Nothing further can be banked past the cap.
            creature.exp = 0;
            break;
        }
    }

    events
}
