//! The explicit engine context: game phase, party, map position, the live
//! encounter, and the bounded battle log. Every operation the presentation
//! layer can request enters through here, gets guarded, and returns the
//! ordered steps it produced.

use crate::battle::ai::RandomWild;
use crate::battle::commands::{execute_commands, ActionResult, TurnStep};
use crate::battle::engine;
use crate::battle::state::{BattleEvent, GamePhase, LogCategory, TurnRng};
use crate::config::{EngineConfig, Tuning};
use crate::creature::CreatureInst;
use crate::encounter;
use crate::errors::SessionError;
use crate::map::{Pos, TileMap};
use crate::party::Party;
use schema::{SpeciesTemplate, TileKind, Weather};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One line of the in-game battle log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub category: LogCategory,
    pub text: String,
}

/// Bounded log with ring-buffer semantics: once the capacity is reached the
/// oldest entries drop silently. Ids only ever increase, so the presentation
/// can key on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl BattleLog {
    pub fn new(capacity: usize) -> BattleLog {
        BattleLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn push(&mut self, category: LogCategory, text: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id: self.next_id,
            category,
            text,
        });
        self.next_id += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The complete engine state for one playthrough.
///
/// Actions are mutually exclusive: each entry point resolves fully (the wild
/// opponent's counter-turn included) before returning, and the busy flag is
/// held for the duration. `Pause` steps in the returned [`ActionResult`] are
/// the only pacing the engine prescribes; it never sleeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) phase: GamePhase,
    pub(crate) party: Party,
    pub(crate) active_index: usize,
    pub(crate) opponent: Option<CreatureInst>,
    pub(crate) weather: Weather,
    pub(crate) position: Pos,
    pub(crate) map: TileMap,
    pub(crate) route: VecDeque<Pos>,
    pub(crate) busy: bool,
    pub(crate) must_switch: bool,
    pub(crate) log: BattleLog,
    pub(crate) config: EngineConfig,
    pub(crate) tuning: Tuning,
}

impl GameSession {
    pub fn new(map: TileMap, spawn: Pos, config: EngineConfig, tuning: Tuning) -> GameSession {
        let log = BattleLog::new(tuning.log_capacity);
        GameSession {
            phase: GamePhase::Starting,
            party: Party::new(),
            active_index: 0,
            opponent: None,
            weather: Weather::Clear,
            position: spawn,
            map,
            route: VecDeque::new(),
            busy: false,
            must_switch: false,
            log,
            config,
            tuning,
        }
    }

    // === Read accessors for the presentation layer ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_creature(&self) -> Option<&CreatureInst> {
        self.party.get(self.active_index)
    }

    pub fn opponent(&self) -> Option<&CreatureInst> {
        self.opponent.as_ref()
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn must_switch(&self) -> bool {
        self.must_switch
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.entries()
    }

    // === Setup ===

    /// Pick the starter and begin exploring. Only valid once, from the
    /// pre-game state.
    pub fn pick_starter(
        &mut self,
        template: &SpeciesTemplate,
    ) -> Result<ActionResult, SessionError> {
        if self.phase != GamePhase::Starting {
            return Err(SessionError::AlreadyStarted);
        }

        let starter = CreatureInst::from_template(
            template,
            self.tuning.starter_level,
            false,
            &self.config,
            &self.tuning,
        );
        debug_assert!(self.party.is_empty());
        let _ = self.party.push(starter);
        self.phase = GamePhase::Exploring;

        let mut steps = Vec::new();
        self.emit(
            BattleEvent::StarterChosen {
                name: template.name.clone(),
            },
            &mut steps,
        );
        Ok(ActionResult {
            steps,
            phase: self.phase,
            outcome: None,
        })
    }

    // === Exploration ===

    /// One keyboard-style step. Blocked walls, wrong phase, a pending route
    /// or a busy engine are all silent no-ops.
    pub fn step(&mut self, dx: i64, dy: i64, rng: &mut TurnRng) -> ActionResult {
        if self.phase != GamePhase::Exploring || self.busy || self.has_route() {
            return ActionResult::noop(self.phase);
        }

        let nx = self.position.x as i64 + dx;
        let ny = self.position.y as i64 + dy;
        if !self.map.is_walkable(nx, ny) {
            return ActionResult::noop(self.phase);
        }

        self.position = Pos::new(nx as usize, ny as usize);
        self.enter_tile(rng)
    }

    /// Plan a route to the clicked tile. Returns false when there is nothing
    /// to do: wrong phase, busy, already there, or no path.
    pub fn route_to(&mut self, x: usize, y: usize) -> bool {
        if self.phase != GamePhase::Exploring || self.busy || self.has_route() {
            return false;
        }
        let goal = Pos::new(x, y);
        match self.map.find_path(self.position, goal) {
            Some(path) => {
                self.route = path.into();
                true
            }
            None => false,
        }
    }

    /// Consume one step of the pending route. An encounter abandons the
    /// remaining steps; otherwise a pacing pause separates the steps.
    pub fn advance_route(&mut self, rng: &mut TurnRng) -> ActionResult {
        if self.phase != GamePhase::Exploring || self.busy {
            self.route.clear();
            return ActionResult::noop(self.phase);
        }
        let Some(next) = self.route.pop_front() else {
            return ActionResult::noop(self.phase);
        };

        self.position = next;
        let mut result = self.enter_tile(rng);

        if self.phase == GamePhase::Exploring && self.has_route() {
            result.steps.push(TurnStep::Pause {
                ms: self.tuning.pacing.auto_move_ms,
            });
        }
        result
    }

    /// Shared tile-entry handling for manual and routed movement.
    fn enter_tile(&mut self, rng: &mut TurnRng) -> ActionResult {
        let mut steps = Vec::new();

        match self.map.tile_at(self.position) {
            Some(TileKind::Heal) => {
                self.party.heal_all();
                self.emit(BattleEvent::PartyHealed, &mut steps);
            }
            Some(tile) => {
                if encounter::should_trigger(tile, &self.tuning, rng) {
                    steps.extend(self.begin_encounter(rng));
                }
            }
            None => {}
        }

        ActionResult {
            steps,
            phase: self.phase,
            outcome: None,
        }
    }

    /// Generate the opponent and weather and move into the encounter intro.
    /// The intro pause is the presentation's cue for its transition screen.
    fn begin_encounter(&mut self, rng: &mut TurnRng) -> Vec<TurnStep> {
        let plan = match encounter::generate(&self.party, &self.config, &self.tuning, rng) {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("encounter generation failed: {err}");
                return Vec::new();
            }
        };

        self.log.clear();
        self.opponent = Some(plan.opponent);
        self.weather = plan.weather;
        self.route.clear();
        self.must_switch = false;
        self.phase = GamePhase::EncounterIntro;

        vec![TurnStep::Pause {
            ms: self.tuning.pacing.battle_start_ms,
        }]
    }

    /// Move from the intro into the battle proper, selecting the first
    /// living party member as the active battler.
    pub fn enter_battle(&mut self) -> ActionResult {
        if self.phase != GamePhase::EncounterIntro {
            return ActionResult::noop(self.phase);
        }

        self.phase = GamePhase::InBattle;
        self.active_index = self.party.first_living().unwrap_or(0);

        let mut steps = Vec::new();
        if let Some(opponent) = self.opponent.clone() {
            self.emit(
                BattleEvent::EncounterStarted {
                    name: opponent.name,
                    level: opponent.level,
                    rare: opponent.rare,
                },
                &mut steps,
            );
        }
        let weather = self.weather;
        self.emit(BattleEvent::WeatherShift { weather }, &mut steps);

        ActionResult {
            steps,
            phase: self.phase,
            outcome: None,
        }
    }

    // === Battle actions ===

    /// Attack with the given move slot of the active battler.
    pub fn attack(&mut self, move_index: usize, rng: &mut TurnRng) -> ActionResult {
        if !self.can_fight() {
            return ActionResult::noop(self.phase);
        }
        self.busy = true;
        let commands = engine::attack_script(self, move_index, &RandomWild, rng);
        let result = execute_commands(self, commands);
        self.busy = false;
        result
    }

    /// Attempt to capture the wild opponent.
    pub fn capture(&mut self, rng: &mut TurnRng) -> ActionResult {
        if !self.can_fight() {
            return ActionResult::noop(self.phase);
        }
        self.busy = true;
        let commands = engine::capture_script(self, &RandomWild, rng);
        let result = execute_commands(self, commands);
        self.busy = false;
        result
    }

    /// Attempt to flee the encounter.
    pub fn flee(&mut self, rng: &mut TurnRng) -> ActionResult {
        if !self.can_fight() {
            return ActionResult::noop(self.phase);
        }
        self.busy = true;
        let commands = engine::flee_script(self, &RandomWild, rng);
        let result = execute_commands(self, commands);
        self.busy = false;
        result
    }

    /// Switch the active battler, voluntarily or to satisfy a mandatory
    /// switch. Costs no turn.
    pub fn switch_active(&mut self, index: usize) -> ActionResult {
        if self.phase != GamePhase::InBattle || self.busy {
            return ActionResult::noop(self.phase);
        }
        let commands = engine::switch_script(self, index);
        execute_commands(self, commands)
    }

    /// Move a party member into the leader slot. Only outside of battle.
    pub fn promote_leader(&mut self, index: usize) -> ActionResult {
        if self.phase != GamePhase::Exploring || self.busy {
            return ActionResult::noop(self.phase);
        }

        let mut steps = Vec::new();
        if self.party.promote_leader(index) {
            let name = self
                .party
                .get(0)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            self.emit(BattleEvent::LeaderChanged { name }, &mut steps);
        }

        ActionResult {
            steps,
            phase: self.phase,
            outcome: None,
        }
    }

    // === Internals ===

    /// Attack, capture and flee share the same guard set: a live battle, a
    /// free engine, no pending mandatory switch.
    fn can_fight(&self) -> bool {
        self.phase == GamePhase::InBattle
            && !self.busy
            && !self.must_switch
            && self.opponent.is_some()
    }

    /// Append an event's log line (if any) to the battle log.
    pub(crate) fn record_event(&mut self, event: &BattleEvent) {
        if let Some(text) = event.format() {
            self.log.push(event.category(), text);
        }
    }

    fn emit(&mut self, event: BattleEvent, steps: &mut Vec<TurnStep>) {
        self.record_event(&event);
        steps.push(TurnStep::Event(event));
    }

    /// Drop a session straight into a battle against `opponent`. Test-only:
    /// lets battle tests script exact opponents instead of rolling the
    /// encounter generator.
    #[cfg(test)]
    pub(crate) fn force_encounter(&mut self, opponent: CreatureInst, weather: Weather) {
        self.log.clear();
        self.opponent = Some(opponent);
        self.weather = weather;
        self.route.clear();
        self.must_switch = false;
        self.phase = GamePhase::InBattle;
        self.active_index = self.party.first_living().unwrap_or(0);
    }
}
