use schema::Weather;
use serde::{Deserialize, Serialize};

/// Top-level game phase. Encounters flow
/// `Exploring -> EncounterIntro -> InBattle -> Exploring`; `Starting` exists
/// only until a starter has been picked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GamePhase {
    Starting,
    Exploring,
    EncounterIntro,
    InBattle,
}

/// How a battle ended. `Defeat` is the only outcome that repositions the
/// player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattleOutcome {
    Victory,
    Captured,
    Escaped,
    Defeat,
}

/// Which combatant an event refers to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum Side {
    Player,
    Enemy,
}

/// Category tag carried by every battle-log line, used by the presentation
/// layer for display styling only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum LogCategory {
    Player,
    Enemy,
    System,
    Normal,
}

/// Everything observable that happens during encounter resolution.
///
/// Events double as the battle log source: `format` renders the user-facing
/// line (or `None` for silent events) and `category` supplies the log tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    StarterChosen {
        name: String,
    },
    EncounterStarted {
        name: String,
        level: u8,
        rare: bool,
    },
    WeatherShift {
        weather: Weather,
    },
    MoveUsed {
        side: Side,
        user: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        user: String,
    },
    /// Damage landing on `target`. Silent; the health bar tells the story.
    DamageDealt {
        target: Side,
        amount: u16,
        remaining_hp: u16,
    },
    CreatureFainted {
        side: Side,
        name: String,
    },
    ExperienceGained {
        name: String,
        amount: u32,
    },
    LevelledUp {
        name: String,
        level: u8,
    },
    CaptureAttempted {
        name: String,
    },
    CaptureSucceeded {
        name: String,
    },
    CaptureFailed {
        name: String,
    },
    PartyFull {
        name: String,
    },
    FleeAttempted,
    FleeSucceeded,
    FleeFailed,
    SwitchedIn {
        name: String,
    },
    PartyWiped,
    PartyHealed,
    LeaderChanged {
        name: String,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Render the user-facing log line for this event. Silent events (pure
    /// state markers) return `None`.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::StarterChosen { name } => {
                Some(format!("You chose {}! A promising start.", name))
            }
            BattleEvent::EncounterStarted { name, level, rare } => {
                if *rare {
                    Some(format!("High energy reading: a {} (Lv{}) appeared!", name, level))
                } else {
                    Some(format!("A wild {} (Lv{}) appeared!", name, level))
                }
            }
            BattleEvent::WeatherShift { weather } => match weather {
                Weather::Rain => Some("Heavy rain soaks the battlefield...".to_string()),
                Weather::Snow => Some("A snowstorm cuts down visibility!".to_string()),
                Weather::Fog => Some("Thick fog shrouds everything...".to_string()),
                Weather::Clear => None,
            },
            BattleEvent::MoveUsed { user, move_name, .. } => {
                Some(format!("{} used {}!", user, move_name))
            }
            BattleEvent::MoveMissed { side, user } => match side {
                Side::Player => Some(format!("{}'s attack missed!", user)),
                Side::Enemy => Some("The attack went wide!".to_string()),
            },
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::CreatureFainted { side, name } => match side {
                Side::Player => Some(format!("{} is unable to battle!", name)),
                Side::Enemy => Some(format!("{} was defeated!", name)),
            },
            BattleEvent::ExperienceGained { amount, .. } => {
                Some(format!("Gained {} EXP!", amount))
            }
            BattleEvent::LevelledUp { name, level } => {
                Some(format!("{} grew to level {}!", name, level))
            }
            BattleEvent::CaptureAttempted { .. } => {
                Some("You threw a capture orb!".to_string())
            }
            BattleEvent::CaptureSucceeded { name } => {
                Some(format!("Gotcha! {} joined the party.", name))
            }
            BattleEvent::CaptureFailed { name } => {
                Some(format!("Oh no! {} broke free!", name))
            }
            BattleEvent::PartyFull { name } => {
                Some(format!("The party is full! {} was released.", name))
            }
            BattleEvent::FleeAttempted => Some("You scramble for an exit...".to_string()),
            BattleEvent::FleeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed => Some("Couldn't escape!".to_string()),
            BattleEvent::SwitchedIn { name } => Some(format!("Go, {}!", name)),
            BattleEvent::PartyWiped => {
                Some("The party is out of fighting strength. Retreating to safety...".to_string())
            }
            BattleEvent::PartyHealed => Some("The party was fully restored!".to_string()),
            BattleEvent::LeaderChanged { name } => {
                Some(format!("{} now leads the party.", name))
            }
            BattleEvent::BattleEnded { .. } => None,
        }
    }

    /// The log tag the rendered line carries.
    pub fn category(&self) -> LogCategory {
        match self {
            BattleEvent::MoveUsed { side, .. } => match side {
                Side::Player => LogCategory::Player,
                Side::Enemy => LogCategory::Enemy,
            },
            BattleEvent::SwitchedIn { .. } => LogCategory::Player,
            BattleEvent::StarterChosen { .. }
            | BattleEvent::EncounterStarted { .. }
            | BattleEvent::ExperienceGained { .. } => LogCategory::Normal,
            _ => LogCategory::System,
        }
    }
}

/// The single random source behind every chance roll in the engine.
///
/// Rolls are percentile outcomes (1..=100) pre-drawn into a buffer;
/// `new_for_test` scripts them exactly, which is how the battle tests pin
/// down miss/capture/escape branches.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // More than any single action can consume.
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    /// Draw the next percentile roll. The reason string names what the roll
    /// decides, which makes scripted tests and exhaustion panics readable.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }

    /// One roll against a probability in [0, 1].
    pub fn chance(&mut self, probability: f32, reason: &str) -> bool {
        let roll = self.next_outcome(reason);
        (roll as f32) <= probability * 100.0
    }

    /// Uniform-ish index into a pool of `len` entries.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty pool");
        (self.next_outcome(reason) as usize).saturating_sub(1) % len
    }

    /// Integer in [-bound, bound].
    pub fn spread(&mut self, bound: i32, reason: &str) -> i32 {
        let span = bound * 2 + 1;
        (self.next_outcome(reason).max(1) as i32 - 1) % span - bound
    }

    /// Uniform-ish fraction in [0, 1], for interpolating variance bands.
    pub fn fraction(&mut self, reason: &str) -> f32 {
        ((self.next_outcome(reason).max(1) as f32) - 1.0) / 99.0
    }
}
