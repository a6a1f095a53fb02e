use crate::config::{EngineConfig, Tuning};
use crate::creature::CreatureInst;
use crate::map::{Pos, TileMap};
use crate::session::GameSession;
use schema::{ElementType, MoveDef, SpeciesTemplate, Weather};

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```rust,ignore
/// let wild = TestCreatureBuilder::new("Rattata", 5)
///     .with_bases(30, 56)
///     .with_hp(1)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    level: u8,
    rare: bool,
    base_max_hp: u16,
    base_attack: u16,
    move_power: u16,
    move_element: ElementType,
    current_hp: Option<u16>,
}

impl TestCreatureBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            rare: false,
            base_max_hp: 40,
            base_attack: 45,
            move_power: 40,
            move_element: ElementType::Normal,
            current_hp: None,
        }
    }

    pub fn rare(mut self) -> Self {
        self.rare = true;
        self
    }

    pub fn with_bases(mut self, base_max_hp: u16, base_attack: u16) -> Self {
        self.base_max_hp = base_max_hp;
        self.base_attack = base_attack;
        self
    }

    /// Overrides current HP after stat derivation, clamped to the maximum.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> CreatureInst {
        let template = SpeciesTemplate {
            id: 999,
            name: self.name,
            element: self.move_element,
            base_max_hp: self.base_max_hp,
            base_attack: self.base_attack,
            sprite: String::new(),
            moves: vec![MoveDef {
                name: "Strike".to_string(),
                power: self.move_power,
                element: self.move_element,
            }],
            rare: self.rare,
        };

        // The rare bonus is suppressed so derived stats stay predictable;
        // rarity still drives capture and flee odds.
        let mut creature = CreatureInst::from_template(
            &template,
            self.level,
            true,
            &EngineConfig::default(),
            &Tuning::default(),
        );
        if let Some(hp) = self.current_hp {
            creature.current_hp = hp.min(creature.max_hp);
        }
        creature
    }
}

/// A tiny arena: one path loop, a grass tile and a heal tile.
pub fn test_map() -> TileMap {
    TileMap::from_codes(&[
        vec![2, 2, 2, 2, 2],
        vec![2, 0, 1, 3, 2],
        vec![2, 0, 0, 0, 2],
        vec![2, 2, 2, 2, 2],
    ])
    .unwrap()
}

/// An exploring session at (1, 1) with the given party.
pub fn exploring_session(members: Vec<CreatureInst>) -> GameSession {
    let mut session = GameSession::new(
        test_map(),
        Pos::new(1, 1),
        EngineConfig::default(),
        Tuning::default(),
    );
    for member in members {
        session
            .party
            .push(member)
            .expect("test parties fit the cap");
    }
    session.phase = crate::battle::state::GamePhase::Exploring;
    session
}

/// A session already locked in battle against `opponent`.
pub fn battle_session(
    members: Vec<CreatureInst>,
    opponent: CreatureInst,
    weather: Weather,
) -> GameSession {
    let mut session = exploring_session(members);
    session.force_encounter(opponent, weather);
    session
}
