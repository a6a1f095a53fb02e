//! Behavior of wild opponents during their turn.

use crate::battle::state::TurnRng;
use crate::creature::CreatureInst;

/// A trait for any system that can choose a wild opponent's move. This keeps
/// the seam open for smarter opponents without touching the turn logic.
pub trait WildBehavior {
    /// Pick the index of the move the opponent will use this turn.
    fn choose_move(&self, opponent: &CreatureInst, rng: &mut TurnRng) -> usize;
}

/// The default wild behavior: a uniformly random pick from the fixed
/// moveset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWild;

impl WildBehavior for RandomWild {
    fn choose_move(&self, opponent: &CreatureInst, rng: &mut TurnRng) -> usize {
        rng.pick_index(opponent.moves.len(), "enemy move choice")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, Tuning};
    use schema::{ElementType, MoveDef, SpeciesTemplate};

    fn opponent_with_moves(count: usize) -> CreatureInst {
        let moves = (0..count)
            .map(|i| MoveDef {
                name: format!("Move {}", i),
                power: 40,
                element: ElementType::Normal,
            })
            .collect();
        let template = SpeciesTemplate {
            id: 16,
            name: "Pidgey".to_string(),
            element: ElementType::Flying,
            base_max_hp: 40,
            base_attack: 45,
            sprite: String::new(),
            moves,
            rare: false,
        };
        CreatureInst::from_template(
            &template,
            7,
            false,
            &EngineConfig::default(),
            &Tuning::default(),
        )
    }

    #[test]
    fn random_wild_reaches_every_move_slot() {
        let opponent = opponent_with_moves(4);
        let mut rng = TurnRng::new_for_test(vec![1, 2, 3, 4]);

        let picks: Vec<usize> = (0..4)
            .map(|_| RandomWild.choose_move(&opponent, &mut rng))
            .collect();
        assert_eq!(picks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_move_opponents_always_pick_it() {
        let opponent = opponent_with_moves(1);
        let mut rng = TurnRng::new_for_test(vec![73]);
        assert_eq!(RandomWild.choose_move(&opponent, &mut rng), 0);
    }
}
