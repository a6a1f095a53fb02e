#[cfg(test)]
mod tests {
    use crate::battle::commands::TurnStep;
    use crate::battle::state::{BattleEvent, GamePhase, TurnRng};
    use crate::battle::tests::common::{exploring_session, TestCreatureBuilder};
    use crate::catalog::initialize_for_tests;
    use crate::map::Pos;
    use pretty_assertions::assert_eq;

    // Test map layout (see common::test_map):
    //   (1,1) path  (2,1) grass  (3,1) heal
    //   (1,2) path  (2,2) path   (3,2) path

    #[test]
    fn walls_block_movement_silently() {
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);
        let mut rng = TurnRng::new_for_test(vec![]);

        let result = session.step(0, -1, &mut rng);
        assert!(result.steps.is_empty());
        assert_eq!(session.position(), Pos::new(1, 1));
    }

    #[test]
    fn heal_tiles_restore_the_whole_party_every_visit() {
        let mut wounded = TestCreatureBuilder::new("Squirtle", 5).build();
        wounded.take_damage(10);
        let mut fainted = TestCreatureBuilder::new("Pidgey", 5).build();
        fainted.take_damage(u16::MAX);

        let mut session = exploring_session(vec![wounded, fainted]);
        session.position = Pos::new(3, 2);

        let mut rng = TurnRng::new_for_test(vec![]);
        let result = session.step(0, -1, &mut rng); // onto the heal tile

        assert!(result
            .events()
            .any(|e| matches!(e, BattleEvent::PartyHealed)));
        assert!(session
            .party()
            .members()
            .iter()
            .all(|c| c.current_hp == c.max_hp));

        // Stepping off and back on heals again, no cost, no randomness.
        session.step(0, 1, &mut rng);
        session.party.get_mut(0).unwrap().take_damage(5);
        let result = session.step(0, -1, &mut rng);
        assert!(result
            .events()
            .any(|e| matches!(e, BattleEvent::PartyHealed)));
    }

    #[test]
    fn grass_can_trigger_an_encounter_intro() {
        initialize_for_tests();
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);

        // Trigger roll 15 (<= 15%), then the generator consumes: weather,
        // rare roll (fails), species pick, level jitter.
        let mut rng = TurnRng::new_for_test(vec![15, 1, 100, 7, 3]);
        let result = session.step(1, 0, &mut rng); // onto the grass tile

        assert_eq!(session.phase(), GamePhase::EncounterIntro);
        assert!(session.opponent().is_some());
        assert!(matches!(
            result.steps.last(),
            Some(TurnStep::Pause { .. })
        ));

        // The intro pause leads into the battle proper.
        let result = session.enter_battle();
        assert_eq!(session.phase(), GamePhase::InBattle);
        assert!(result
            .events()
            .any(|e| matches!(e, BattleEvent::EncounterStarted { .. })));
    }

    #[test]
    fn grass_without_a_trigger_roll_stays_quiet() {
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);

        let mut rng = TurnRng::new_for_test(vec![16]);
        let result = session.step(1, 0, &mut rng);

        assert_eq!(session.phase(), GamePhase::Exploring);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn routed_travel_steps_with_pacing_and_stops_at_the_goal() {
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);

        assert!(session.route_to(3, 2));
        assert!(session.has_route());

        // Route (1,1) -> (3,2) avoids the grass only if BFS found it that
        // way; either way each advance consumes exactly one tile.
        let mut tiles_moved = 0;
        while session.has_route() && session.phase() == GamePhase::Exploring {
            // A grass hop may roll a trigger; 100 never triggers.
            let mut rng = TurnRng::new_for_test(vec![100]);
            let result = session.advance_route(&mut rng);
            tiles_moved += 1;

            if session.has_route() {
                assert!(result
                    .steps
                    .iter()
                    .any(|s| matches!(s, TurnStep::Pause { .. })));
            }
        }

        assert_eq!(session.position(), Pos::new(3, 2));
        assert_eq!(tiles_moved, 3);
    }

    #[test]
    fn an_encounter_abandons_the_rest_of_the_route() {
        initialize_for_tests();
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);

        // Route passes the grass tile at (2,1).
        assert!(session.route_to(3, 1));

        // First advance lands on grass and triggers.
        let mut rng = TurnRng::new_for_test(vec![15, 1, 100, 7, 3]);
        session.advance_route(&mut rng);

        assert_eq!(session.phase(), GamePhase::EncounterIntro);
        assert!(!session.has_route(), "remaining steps are abandoned");
    }

    #[test]
    fn route_requests_to_unreachable_or_current_tiles_are_refused() {
        let mut session = exploring_session(vec![TestCreatureBuilder::new("Squirtle", 5).build()]);

        assert!(!session.route_to(1, 1), "start == goal");
        assert!(!session.route_to(0, 0), "wall");
        assert!(!session.route_to(4, 3), "out of reach");
    }

    #[test]
    fn leader_promotion_only_works_while_exploring() {
        let first = TestCreatureBuilder::new("Squirtle", 5).build();
        let second = TestCreatureBuilder::new("Eevee", 5).build();
        let mut session = exploring_session(vec![first, second]);

        let result = session.promote_leader(1);
        assert!(result
            .events()
            .any(|e| matches!(e, BattleEvent::LeaderChanged { name } if name == "Eevee")));
        assert_eq!(session.party().get(0).unwrap().name, "Eevee");

        let wild = TestCreatureBuilder::new("Zubat", 5).build();
        session.force_encounter(wild, schema::Weather::Clear);
        let result = session.promote_leader(1);
        assert!(result.steps.is_empty(), "no reordering mid-battle");
    }
}
