use schema::{ElementType, Weather};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remotely synchronized gameplay knobs. Everything else in [`Tuning`] is a
/// local constant table; these two values may be adjusted server-side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Probability that a triggered encounter is a rare species.
    pub spawn_rate: f32,
    /// Stat multiplier applied to rare instances (>= 1.0).
    pub power_multiplier: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // Offline fallbacks. Used whenever the config endpoint is unreachable.
        Self {
            spawn_rate: 0.04,
            power_multiplier: 1.8,
        }
    }
}

/// Wire format of the remote config endpoint:
/// `{"spawnRate": f, "multipliers": {"hp": f, "atk": f}, "status": s}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemotePayload {
    spawn_rate: f32,
    multipliers: RemoteMultipliers,
}

#[derive(Debug, Deserialize)]
struct RemoteMultipliers {
    hp: f32,
    #[allow(dead_code)]
    atk: f32,
}

impl EngineConfig {
    /// Fetch the remote configuration, substituting defaults on any failure.
    ///
    /// Unavailability is expected (offline play); there is no retry and the
    /// failure never propagates.
    pub async fn sync(url: &str) -> EngineConfig {
        match Self::fetch(url).await {
            Ok(config) => config,
            Err(err) => {
                log::debug!("config endpoint unavailable ({err}); using defaults");
                EngineConfig::default()
            }
        }
    }

    async fn fetch(url: &str) -> Result<EngineConfig, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(4))
            .build()?;
        let payload: RemotePayload = client.get(url).send().await?.json().await?;
        Ok(EngineConfig {
            spawn_rate: payload.spawn_rate,
            power_multiplier: payload.multipliers.hp.max(1.0),
        })
    }
}

/// The engine constant table. The shapes of the formulas are fixed by the
/// engine; the numbers all live here so a deployment can retune them without
/// touching battle code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Chance of an encounter when entering a tall-grass tile.
    pub encounter_chance: f32,
    pub level_cap: u8,
    pub rare_level_cap: u8,
    pub starter_level: u8,
    /// Wild level = party max + this bonus for rare encounters.
    pub rare_level_bonus: u8,
    /// Wild level = party average +/- this jitter for common encounters.
    pub wild_level_jitter: i32,
    pub log_capacity: usize,

    pub stats: StatTuning,
    pub damage: DamageTuning,
    pub capture: CaptureTuning,
    pub flee: FleeTuning,
    pub exp: ExpTuning,
    pub pacing: PacingTuning,
}

/// Level scaling applied when an instance is derived from its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatTuning {
    /// Health grows by level / this divisor (fractional growth per level).
    pub hp_level_divisor: f32,
    /// Flat health added per level on top of the fractional growth.
    pub hp_flat_per_level: f32,
    pub attack_level_divisor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageTuning {
    pub power_divisor: f32,
    pub level_divisor: f32,
    pub attack_divisor: f32,
    /// Flat bonus added to the player's attacks only.
    pub player_flat_bonus: f32,
    /// Every landed hit deals at least this much.
    pub minimum_damage: u16,
    pub variance_min: f32,
    pub variance_max: f32,

    pub rain_water_boost: f32,
    pub rain_fire_penalty: f32,
    pub snow_ice_boost: f32,
    pub clear_fire_boost: f32,

    /// Miss chances in percent, per weather, for the player's own moves.
    pub player_snow_miss: f32,
    pub player_fog_miss: f32,
    /// Wild opponents misjudge worse in bad weather.
    pub enemy_snow_miss: f32,
    pub enemy_fog_miss: f32,
}

impl DamageTuning {
    /// Weather-element interaction applied to a move's base power before the
    /// damage formula.
    pub fn weather_power_factor(&self, element: ElementType, weather: Weather) -> f32 {
        match (weather, element) {
            (Weather::Rain, ElementType::Water) => self.rain_water_boost,
            (Weather::Rain, ElementType::Fire) => self.rain_fire_penalty,
            (Weather::Snow, ElementType::Ice) => self.snow_ice_boost,
            (Weather::Clear, ElementType::Fire) => self.clear_fire_boost,
            _ => 1.0,
        }
    }

    /// Miss chance in percent for one side's moves under the given weather.
    pub fn miss_percent(&self, weather: Weather, for_player: bool) -> f32 {
        match weather {
            Weather::Snow if for_player => self.player_snow_miss,
            Weather::Fog if for_player => self.player_fog_miss,
            Weather::Snow => self.enemy_snow_miss,
            Weather::Fog => self.enemy_fog_miss,
            _ => 0.0,
        }
    }
}

/// Capture probability band for one rarity class:
/// clamp(base + (1 - health_fraction) * scale, min, max).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureBand {
    pub base: f32,
    pub scale: f32,
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureTuning {
    pub common: CaptureBand,
    pub rare: CaptureBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleeTuning {
    pub common_chance: f32,
    pub rare_chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpTuning {
    /// Experience per level the opponent had over the victor.
    pub per_level_advantage: u32,
    /// Flat award when the opponent was not higher-leveled.
    pub flat_award: u32,
    /// threshold(level) = base_threshold + (level - 1) * threshold_step.
    pub base_threshold: u32,
    pub threshold_step: u32,
    pub level_hp_gain: u16,
    pub level_attack_gain: u16,
}

impl ExpTuning {
    /// Experience needed to advance past the given level.
    pub fn threshold(&self, level: u8) -> u32 {
        self.base_threshold + (level.saturating_sub(1) as u32) * self.threshold_step
    }
}

/// Presentation pacing, in milliseconds. Emitted as `Pause` steps; the
/// engine itself never sleeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingTuning {
    pub auto_move_ms: u64,
    pub battle_start_ms: u64,
    pub hit_ms: u64,
    pub ball_throw_ms: u64,
    pub ball_shake_ms: u64,
    pub capture_toast_ms: u64,
    pub victory_ms: u64,
    pub defeat_ms: u64,
    pub flee_ms: u64,
    pub flee_exit_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            encounter_chance: 0.15,
            level_cap: 100,
            rare_level_cap: 35,
            starter_level: 5,
            rare_level_bonus: 8,
            wild_level_jitter: 2,
            log_capacity: 40,
            stats: StatTuning {
                hp_level_divisor: 18.0,
                hp_flat_per_level: 2.5,
                attack_level_divisor: 45.0,
            },
            damage: DamageTuning {
                power_divisor: 6.0,
                level_divisor: 5.0,
                attack_divisor: 16.0,
                player_flat_bonus: 8.0,
                minimum_damage: 2,
                variance_min: 0.85,
                variance_max: 1.05,
                rain_water_boost: 1.3,
                rain_fire_penalty: 0.7,
                snow_ice_boost: 1.3,
                clear_fire_boost: 1.2,
                player_snow_miss: 5.0,
                player_fog_miss: 10.0,
                enemy_snow_miss: 12.0,
                enemy_fog_miss: 22.0,
            },
            capture: CaptureTuning {
                common: CaptureBand {
                    base: 0.65,
                    scale: 0.30,
                    min: 0.15,
                    max: 0.98,
                },
                rare: CaptureBand {
                    base: 0.04,
                    scale: 0.30,
                    min: 0.04,
                    max: 0.55,
                },
            },
            flee: FleeTuning {
                common_chance: 0.88,
                rare_chance: 0.35,
            },
            exp: ExpTuning {
                per_level_advantage: 40,
                flat_award: 25,
                base_threshold: 50,
                threshold_step: 15,
                level_hp_gain: 12,
                level_attack_gain: 3,
            },
            pacing: PacingTuning {
                auto_move_ms: 180,
                battle_start_ms: 2200,
                hit_ms: 650,
                ball_throw_ms: 850,
                ball_shake_ms: 800,
                capture_toast_ms: 1500,
                victory_ms: 1200,
                defeat_ms: 1300,
                flee_ms: 600,
                flee_exit_ms: 500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_matches_offline_fallbacks() {
        let config = EngineConfig::default();
        assert_eq!(config.spawn_rate, 0.04);
        assert_eq!(config.power_multiplier, 1.8);
    }

    #[test]
    fn remote_payload_parses_wire_format() {
        let raw = r#"{"spawnRate": 0.15, "multipliers": {"hp": 3.5, "atk": 3.5}, "status": "active"}"#;
        let payload: RemotePayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.spawn_rate, 0.15);
        assert_eq!(payload.multipliers.hp, 3.5);
    }

    #[test]
    fn exp_threshold_is_linear_in_level() {
        let exp = Tuning::default().exp;
        assert_eq!(exp.threshold(1), 50);
        assert_eq!(exp.threshold(2), 65);
        assert_eq!(exp.threshold(10), 50 + 9 * 15);
    }

    #[test]
    fn weather_factor_only_touches_matching_elements() {
        let damage = Tuning::default().damage;
        assert_eq!(
            damage.weather_power_factor(ElementType::Water, Weather::Rain),
            1.3
        );
        assert_eq!(
            damage.weather_power_factor(ElementType::Fire, Weather::Rain),
            0.7
        );
        assert_eq!(
            damage.weather_power_factor(ElementType::Ice, Weather::Snow),
            1.3
        );
        assert_eq!(
            damage.weather_power_factor(ElementType::Fire, Weather::Clear),
            1.2
        );
        assert_eq!(
            damage.weather_power_factor(ElementType::Normal, Weather::Fog),
            1.0
        );
    }

    #[test]
    fn miss_percent_is_zero_in_clear_and_rain() {
        let damage = Tuning::default().damage;
        for for_player in [true, false] {
            assert_eq!(damage.miss_percent(Weather::Clear, for_player), 0.0);
            assert_eq!(damage.miss_percent(Weather::Rain, for_player), 0.0);
        }
        assert!(damage.miss_percent(Weather::Fog, false) > damage.miss_percent(Weather::Fog, true));
    }
}
