//! Turn orchestration: resolves each player intent (and the wild opponent's
//! counter-turn) into an ordered command script.
//!
//! Every function here is read-only over the session; the scripts it returns
//! are applied by the command executor. Damage and faint decisions are
//! pre-computed against the snapshot, so a script is internally consistent:
//! a command never depends on state an earlier command has not yet created.

use crate::battle::ai::WildBehavior;
use crate::battle::calculators::{
    attack_damage, capture_chance, escape_chance, experience_reward, roll_miss,
};
use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleOutcome, Side, TurnRng};
use crate::session::GameSession;

/// Resolve the player attacking with the given move slot. Returns an empty
/// script for an invalid slot (guarded no-op).
pub fn attack_script(
    session: &GameSession,
    move_index: usize,
    behavior: &dyn WildBehavior,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let (Some(active), Some(opponent)) = (session.active_creature(), session.opponent.as_ref())
    else {
        return Vec::new();
    };
    let Some(move_def) = active.moves.get(move_index) else {
        return Vec::new();
    };

    let pacing = &session.tuning.pacing;
    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        side: Side::Player,
        user: active.name.clone(),
        move_name: move_def.name.clone(),
    })];

    if roll_miss(session.weather, true, rng, &session.tuning.damage) {
        commands.push(BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            side: Side::Player,
            user: active.name.clone(),
        }));
        commands.push(BattleCommand::Pause { ms: pacing.hit_ms });
        commands.extend(enemy_turn_script(session, behavior, rng));
        return commands;
    }

    let damage = attack_damage(
        move_def,
        active,
        true,
        session.weather,
        rng,
        &session.tuning.damage,
    );
    let remaining = opponent.current_hp.saturating_sub(damage);

    commands.push(BattleCommand::DamageOpponent { amount: damage });
    commands.push(BattleCommand::EmitEvent(BattleEvent::DamageDealt {
        target: Side::Enemy,
        amount: damage,
        remaining_hp: remaining,
    }));
    commands.push(BattleCommand::Pause { ms: pacing.hit_ms });

    if remaining == 0 {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CreatureFainted {
            side: Side::Enemy,
            name: opponent.name.clone(),
        }));

        let reward = experience_reward(opponent.level, active.level, &session.tuning.exp);
        commands.push(BattleCommand::EmitEvent(BattleEvent::ExperienceGained {
            name: active.name.clone(),
            amount: reward,
        }));
        commands.push(BattleCommand::AwardExperience { amount: reward });
        commands.push(BattleCommand::Pause {
            ms: pacing.victory_ms,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        }));
        commands.push(BattleCommand::FinalizeBattle {
            outcome: BattleOutcome::Victory,
        });
    } else {
        // The opponent survived and strikes back before control returns.
        commands.extend(enemy_turn_script(session, behavior, rng));
    }

    commands
}

/// Resolve a capture attempt: the throw-and-shake pause sequence, one roll,
/// then either recruitment or the opponent's counter-turn.
pub fn capture_script(
    session: &GameSession,
    behavior: &dyn WildBehavior,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let Some(opponent) = session.opponent.as_ref() else {
        return Vec::new();
    };

    let pacing = &session.tuning.pacing;
    let mut commands = vec![
        BattleCommand::EmitEvent(BattleEvent::CaptureAttempted {
            name: opponent.name.clone(),
        }),
        BattleCommand::Pause {
            ms: pacing.ball_throw_ms,
        },
    ];
    for _ in 0..3 {
        commands.push(BattleCommand::Pause {
            ms: pacing.ball_shake_ms,
        });
    }

    let chance = capture_chance(opponent, &session.tuning.capture);
    if rng.chance(chance, "capture roll") {
        commands.push(BattleCommand::CaptureOpponent);
        commands.push(BattleCommand::Pause {
            ms: pacing.capture_toast_ms,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Captured,
        }));
        commands.push(BattleCommand::FinalizeBattle {
            outcome: BattleOutcome::Captured,
        });
    } else {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CaptureFailed {
            name: opponent.name.clone(),
        }));
        commands.extend(enemy_turn_script(session, behavior, rng));
    }

    commands
}

/// Resolve a flee attempt. Success ends the battle as an escape; failure
/// hands the turn to the opponent.
pub fn flee_script(
    session: &GameSession,
    behavior: &dyn WildBehavior,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let Some(opponent) = session.opponent.as_ref() else {
        return Vec::new();
    };

    let pacing = &session.tuning.pacing;
    let mut commands = vec![
        BattleCommand::EmitEvent(BattleEvent::FleeAttempted),
        BattleCommand::Pause { ms: pacing.flee_ms },
    ];

    let chance = escape_chance(opponent.rare, &session.tuning.flee);
    if rng.chance(chance, "escape roll") {
        commands.push(BattleCommand::EmitEvent(BattleEvent::FleeSucceeded));
        commands.push(BattleCommand::Pause {
            ms: pacing.flee_exit_ms,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Escaped,
        }));
        commands.push(BattleCommand::FinalizeBattle {
            outcome: BattleOutcome::Escaped,
        });
    } else {
        commands.push(BattleCommand::EmitEvent(BattleEvent::FleeFailed));
        commands.extend(enemy_turn_script(session, behavior, rng));
    }

    commands
}

/// Resolve switching the active battler. The target must be a different,
/// living party member; anything else is a guarded no-op. Switching clears a
/// pending mandatory switch and costs no turn.
pub fn switch_script(session: &GameSession, index: usize) -> Vec<BattleCommand> {
    let Some(target) = session.party.get(index) else {
        return Vec::new();
    };
    if index == session.active_index || target.is_fainted() {
        return Vec::new();
    }

    vec![
        BattleCommand::SetActive { index },
        BattleCommand::SetMustSwitch(false),
        BattleCommand::EmitEvent(BattleEvent::SwitchedIn {
            name: target.name.clone(),
        }),
    ]
}

/// The wild opponent's turn: random move, weather miss check, damage to the
/// active battler, and faint/defeat handling.
fn enemy_turn_script(
    session: &GameSession,
    behavior: &dyn WildBehavior,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let (Some(active), Some(opponent)) = (session.active_creature(), session.opponent.as_ref())
    else {
        return Vec::new();
    };

    let pacing = &session.tuning.pacing;
    let move_def = &opponent.moves[behavior.choose_move(opponent, rng)];

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        side: Side::Enemy,
        user: opponent.name.clone(),
        move_name: move_def.name.clone(),
    })];

    if roll_miss(session.weather, false, rng, &session.tuning.damage) {
        commands.push(BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            side: Side::Enemy,
            user: opponent.name.clone(),
        }));
        return commands;
    }

    let damage = attack_damage(
        move_def,
        opponent,
        false,
        session.weather,
        rng,
        &session.tuning.damage,
    );
    let remaining = active.current_hp.saturating_sub(damage);

    commands.push(BattleCommand::Pause { ms: pacing.hit_ms });
    commands.push(BattleCommand::DamageActive { amount: damage });
    commands.push(BattleCommand::EmitEvent(BattleEvent::DamageDealt {
        target: Side::Player,
        amount: damage,
        remaining_hp: remaining,
    }));

    if remaining == 0 {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CreatureFainted {
            side: Side::Player,
            name: active.name.clone(),
        }));
        commands.push(BattleCommand::SetMustSwitch(true));

        if !session.party.any_living_except(session.active_index) {
            commands.push(BattleCommand::EmitEvent(BattleEvent::PartyWiped));
            commands.push(BattleCommand::Pause {
                ms: pacing.defeat_ms,
            });
            commands.push(BattleCommand::HealParty);

            let heal_tiles = session.map.heal_tiles();
            if !heal_tiles.is_empty() {
                let pos = heal_tiles[rng.pick_index(heal_tiles.len(), "respawn tile")];
                commands.push(BattleCommand::Reposition { pos });
            }

            commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
                outcome: BattleOutcome::Defeat,
            }));
            commands.push(BattleCommand::FinalizeBattle {
                outcome: BattleOutcome::Defeat,
            });
        }
    }

    commands
}
