use crate::battle::state::{BattleEvent, BattleOutcome, GamePhase};
use crate::creature::InstanceId;
use crate::map::Pos;
use crate::progression;
use crate::session::GameSession;
use schema::Weather;
use serde::{Deserialize, Serialize};

/// Atomic commands representing final state changes.
///
/// Battle actions are resolved into an ordered command script up front; the
/// executor then applies the script in one pass. `Pause` carries no state
/// change at all - it is the named pacing token the presentation layer turns
/// into wall-clock delay.
#[derive(Debug, Clone)]
pub enum BattleCommand {
    EmitEvent(BattleEvent),
    Pause { ms: u64 },

    // Combatant modifications
    DamageOpponent { amount: u16 },
    DamageActive { amount: u16 },
    AwardExperience { amount: u32 },

    // Battle flow
    SetActive { index: usize },
    SetMustSwitch(bool),
    CaptureOpponent,
    HealParty,
    Reposition { pos: Pos },
    FinalizeBattle { outcome: BattleOutcome },
}

/// One observable step of a resolved action: either an event or a pacing
/// pause. The presentation layer replays these in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnStep {
    Event(BattleEvent),
    Pause { ms: u64 },
}

/// The outcome of one session operation: the ordered steps it produced, the
/// phase the session ended in, and the battle outcome if one was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub steps: Vec<TurnStep>,
    pub phase: GamePhase,
    pub outcome: Option<BattleOutcome>,
}

impl ActionResult {
    /// An empty result for guarded no-op requests.
    pub fn noop(phase: GamePhase) -> ActionResult {
        ActionResult {
            steps: Vec::new(),
            phase,
            outcome: None,
        }
    }

    /// Just the events, without the pacing pauses.
    pub fn events(&self) -> impl Iterator<Item = &BattleEvent> {
        self.steps.iter().filter_map(|step| match step {
            TurnStep::Event(event) => Some(event),
            TurnStep::Pause { .. } => None,
        })
    }
}

/// Apply a command script to the session, collecting the observable steps.
/// Emitted events are also appended to the session's battle log.
pub(crate) fn execute_commands(
    session: &mut GameSession,
    commands: Vec<BattleCommand>,
) -> ActionResult {
    let mut steps = Vec::new();
    let mut outcome = None;

    for command in commands {
        match command {
            BattleCommand::EmitEvent(event) => {
                session.record_event(&event);
                steps.push(TurnStep::Event(event));
            }
            BattleCommand::Pause { ms } => {
                steps.push(TurnStep::Pause { ms });
            }
            BattleCommand::DamageOpponent { amount } => {
                if let Some(opponent) = session.opponent.as_mut() {
                    opponent.take_damage(amount);
                }
            }
            BattleCommand::DamageActive { amount } => {
                let index = session.active_index;
                if let Some(active) = session.party.get_mut(index) {
                    active.take_damage(amount);
                }
            }
            BattleCommand::AwardExperience { amount } => {
                let tuning = session.tuning.clone();
                let index = session.active_index;
                let events = match session.party.get_mut(index) {
                    Some(active) => progression::apply_experience(active, amount, &tuning),
                    None => Vec::new(),
                };
                for event in events {
                    session.record_event(&event);
                    steps.push(TurnStep::Event(event));
                }
            }
            BattleCommand::SetActive { index } => {
                if index < session.party.len() {
                    session.active_index = index;
                }
            }
            BattleCommand::SetMustSwitch(value) => {
                session.must_switch = value;
            }
            BattleCommand::CaptureOpponent => {
                if let Some(mut caught) = session.opponent.take() {
                    caught.heal_full();
                    caught.uid = InstanceId::next();
                    let name = caught.name.clone();
                    let event = match session.party.push(caught) {
                        Ok(()) => BattleEvent::CaptureSucceeded { name },
                        Err(_) => BattleEvent::PartyFull { name },
                    };
                    session.record_event(&event);
                    steps.push(TurnStep::Event(event));
                }
            }
            BattleCommand::HealParty => {
                session.party.heal_all();
            }
            BattleCommand::Reposition { pos } => {
                session.position = pos;
            }
            BattleCommand::FinalizeBattle { outcome: battle_outcome } => {
                session.opponent = None;
                session.weather = Weather::Clear;
                session.busy = false;
                session.must_switch = false;
                session.route.clear();
                session.phase = GamePhase::Exploring;
                outcome = Some(battle_outcome);
            }
        }
    }

    ActionResult {
        steps,
        phase: session.phase,
        outcome,
    }
}
