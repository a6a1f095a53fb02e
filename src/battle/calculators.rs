//! Pure probability and damage math. Everything here is a function of its
//! inputs plus the rolls it consumes; no session state is touched.

use crate::battle::state::TurnRng;
use crate::config::{CaptureTuning, DamageTuning, ExpTuning, FleeTuning};
use crate::creature::CreatureInst;
use schema::{MoveDef, Weather};

/// Compute the damage of a landed hit.
///
/// The move's power is first adjusted for weather-element interaction, then
/// `base = power / C1 * level / C2 + attack / C3`, a flat bonus for the
/// player's own attacks, a uniform variance factor, and the minimum-damage
/// floor.
pub fn attack_damage(
    move_def: &MoveDef,
    attacker: &CreatureInst,
    for_player: bool,
    weather: Weather,
    rng: &mut TurnRng,
    tuning: &DamageTuning,
) -> u16 {
    let power =
        move_def.power as f32 * tuning.weather_power_factor(move_def.element, weather);

    let base = ((power / tuning.power_divisor) * (attacker.level as f32 / tuning.level_divisor)
        + attacker.base_attack as f32 / tuning.attack_divisor)
        .floor();
    let base = if for_player {
        base + tuning.player_flat_bonus
    } else {
        base
    };

    let variance = tuning.variance_min
        + rng.fraction("damage variance") * (tuning.variance_max - tuning.variance_min);

    let damage = (base * variance).floor() as u16;
    damage.max(tuning.minimum_damage)
}

/// Roll whether an attack misses under the current weather. Player and enemy
/// attacks use different miss tables.
pub fn roll_miss(weather: Weather, for_player: bool, rng: &mut TurnRng, tuning: &DamageTuning) -> bool {
    let percent = tuning.miss_percent(weather, for_player);
    if percent <= 0.0 {
        return false;
    }
    rng.chance(percent / 100.0, "miss check")
}

/// Capture probability from remaining-health fraction and rarity class.
/// Lower health raises the chance; the result is clamped to the class band.
pub fn capture_chance(target: &CreatureInst, tuning: &CaptureTuning) -> f32 {
    let band = if target.rare {
        tuning.rare
    } else {
        tuning.common
    };
    let chance = band.base + (1.0 - target.hp_fraction()) * band.scale;
    chance.clamp(band.min, band.max)
}

/// Escape probability by rarity class. Common opponents are far easier to
/// run from.
pub fn escape_chance(target_rare: bool, tuning: &FleeTuning) -> f32 {
    if target_rare {
        tuning.rare_chance
    } else {
        tuning.common_chance
    }
}

/// Experience awarded for defeating an opponent: proportional to the level
/// advantage when the opponent was stronger, a flat floor otherwise.
pub fn experience_reward(opponent_level: u8, own_level: u8, tuning: &ExpTuning) -> u32 {
    if opponent_level > own_level {
        (opponent_level - own_level) as u32 * tuning.per_level_advantage
    } else {
        tuning.flat_award
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, Tuning};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{ElementType, SpeciesTemplate};

    fn creature(level: u8, rare: bool) -> CreatureInst {
        let template = SpeciesTemplate {
            id: 19,
            name: "Rattata".to_string(),
            element: ElementType::Normal,
            base_max_hp: 30,
            base_attack: 56,
            sprite: String::new(),
            moves: vec![MoveDef {
                name: "Tackle".to_string(),
                power: 40,
                element: ElementType::Normal,
            }],
            rare,
        };
        CreatureInst::from_template(
            &template,
            level,
            true,
            &EngineConfig::default(),
            &Tuning::default(),
        )
    }

    fn move_def(power: u16, element: ElementType) -> MoveDef {
        MoveDef {
            name: "Test Move".to_string(),
            power,
            element,
        }
    }

    #[test]
    fn damage_never_drops_below_the_floor() {
        let tuning = Tuning::default().damage;
        let weakling = creature(1, false);
        let splash = move_def(0, ElementType::Water);

        // Lowest possible variance roll.
        let mut rng = TurnRng::new_for_test(vec![1]);
        let damage = attack_damage(&splash, &weakling, false, Weather::Clear, &mut rng, &tuning);
        assert!(damage >= tuning.minimum_damage);
    }

    #[test]
    fn player_flat_bonus_applies_only_to_player_attacks() {
        let tuning = Tuning::default().damage;
        let attacker = creature(10, false);
        let tackle = move_def(40, ElementType::Normal);

        // Same mid variance roll for both sides.
        let mut player_rng = TurnRng::new_for_test(vec![50]);
        let mut enemy_rng = TurnRng::new_for_test(vec![50]);

        let player_damage =
            attack_damage(&tackle, &attacker, true, Weather::Clear, &mut player_rng, &tuning);
        let enemy_damage =
            attack_damage(&tackle, &attacker, false, Weather::Clear, &mut enemy_rng, &tuning);

        assert!(player_damage > enemy_damage);
    }

    #[rstest]
    #[case(ElementType::Water, Weather::Rain, true)]
    #[case(ElementType::Fire, Weather::Rain, false)]
    #[case(ElementType::Ice, Weather::Snow, true)]
    #[case(ElementType::Fire, Weather::Clear, true)]
    fn weather_shifts_damage_in_the_documented_direction(
        #[case] element: ElementType,
        #[case] weather: Weather,
        #[case] boosted: bool,
    ) {
        let tuning = Tuning::default().damage;
        let attacker = creature(20, false);
        let attack = move_def(80, element);
        let neutral_weather = match weather {
            // Fire is boosted in Clear, so compare against Fog instead.
            Weather::Clear => Weather::Fog,
            _ => Weather::Clear,
        };

        let mut rng_a = TurnRng::new_for_test(vec![50]);
        let mut rng_b = TurnRng::new_for_test(vec![50]);
        let adjusted = attack_damage(&attack, &attacker, true, weather, &mut rng_a, &tuning);
        let neutral =
            attack_damage(&attack, &attacker, true, neutral_weather, &mut rng_b, &tuning);

        if boosted {
            assert!(adjusted > neutral, "{element:?} in {weather:?} should hit harder");
        } else {
            assert!(adjusted < neutral, "{element:?} in {weather:?} should hit softer");
        }
    }

    #[test]
    fn variance_band_brackets_the_damage() {
        let tuning = Tuning::default().damage;
        let attacker = creature(15, false);
        let attack = move_def(60, ElementType::Normal);

        let mut low_rng = TurnRng::new_for_test(vec![1]);
        let mut high_rng = TurnRng::new_for_test(vec![100]);
        let low = attack_damage(&attack, &attacker, true, Weather::Clear, &mut low_rng, &tuning);
        let high = attack_damage(&attack, &attacker, true, Weather::Clear, &mut high_rng, &tuning);

        assert!(low < high);
        // 0.85 .. 1.05 of the same base.
        let ratio = high as f32 / low as f32;
        assert!(ratio > 1.1 && ratio < 1.35, "unexpected band ratio {ratio}");
    }

    #[test]
    fn clear_and_rain_never_miss() {
        let tuning = Tuning::default().damage;
        // No rolls scripted: a consumed roll would panic the TurnRng.
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(!roll_miss(Weather::Clear, true, &mut rng, &tuning));
        assert!(!roll_miss(Weather::Rain, false, &mut rng, &tuning));
    }

    #[test]
    fn fog_misses_more_for_the_enemy() {
        let tuning = Tuning::default().damage;

        // Roll of 15: below the enemy's 22% but above the player's 10%.
        let mut enemy_rng = TurnRng::new_for_test(vec![15]);
        let mut player_rng = TurnRng::new_for_test(vec![15]);
        assert!(roll_miss(Weather::Fog, false, &mut enemy_rng, &tuning));
        assert!(!roll_miss(Weather::Fog, true, &mut player_rng, &tuning));
    }

    #[test]
    fn capture_baseline_at_full_health() {
        let tuning = Tuning::default().capture;
        let healthy = creature(10, false);
        assert!((capture_chance(&healthy, &tuning) - tuning.common.base).abs() < 1e-6);
    }

    #[test]
    fn capture_chance_rises_as_health_falls() {
        let tuning = Tuning::default().capture;
        let mut target = creature(10, false);

        let mut previous = capture_chance(&target, &tuning);
        while target.current_hp > 0 {
            target.take_damage(5);
            let chance = capture_chance(&target, &tuning);
            assert!(chance >= previous, "chance must be monotone in damage");
            previous = chance;
        }
        assert!(previous <= tuning.common.max);
    }

    #[test]
    fn rare_capture_band_sits_below_common() {
        let tuning = Tuning::default().capture;
        let mut rare = creature(10, true);
        let mut common = creature(10, false);

        assert!(capture_chance(&rare, &tuning) < capture_chance(&common, &tuning));

        // Even at 1 HP the rare ceiling stays under the common floor band.
        rare.take_damage(rare.current_hp - 1);
        common.take_damage(common.current_hp - 1);
        assert!(capture_chance(&rare, &tuning) <= tuning.rare.max);
        assert!(capture_chance(&common, &tuning) <= tuning.common.max);
        assert!(capture_chance(&rare, &tuning) < capture_chance(&common, &tuning));
    }

    #[test]
    fn escape_odds_favor_common_opponents() {
        let tuning = Tuning::default().flee;
        assert!(escape_chance(false, &tuning) > escape_chance(true, &tuning));
    }

    #[rstest]
    #[case(10, 5, 200)]
    #[case(6, 5, 40)]
    #[case(5, 5, 25)]
    #[case(3, 9, 25)]
    fn experience_scales_with_level_advantage(
        #[case] opponent_level: u8,
        #[case] own_level: u8,
        #[case] expected: u32,
    ) {
        let tuning = Tuning::default().exp;
        assert_eq!(
            experience_reward(opponent_level, own_level, &tuning),
            expected
        );
    }
}
