use std::path::Path;
use tallgrass::{
    initialize_species_catalog, species_catalog, EngineConfig, GamePhase, GameSession, Pos,
    TileMap, Tuning, TurnRng,
};

const CONFIG_URL: &str = "http://localhost:3000/api/engine";

#[tokio::main]
async fn main() {
    env_logger::init();

    let data_path = Path::new("data");

    if let Err(e) = initialize_species_catalog(data_path) {
        println!("Error initializing species catalog: {}", e);
        return;
    }

    let map = match TileMap::load(data_path) {
        Ok(map) => map,
        Err(e) => {
            println!("Error loading map: {}", e);
            return;
        }
    };

    // Remote knobs, or the offline defaults when the endpoint is down.
    let config = EngineConfig::sync(CONFIG_URL).await;
    println!(
        "Engine config: spawn rate {:.0}%, rare multiplier x{:.1}",
        config.spawn_rate * 100.0,
        config.power_multiplier
    );
    println!();

    run_demo_playthrough(map, config);
}

/// Scripted solo playthrough: pick a starter, wander the grass until a wild
/// creature shows up, then attack until the battle resolves.
fn run_demo_playthrough(map: TileMap, config: EngineConfig) {
    let catalog = species_catalog().expect("catalog was initialized above");
    let mut session = GameSession::new(map, Pos::new(3, 4), config, Tuning::default());

    let starter = &catalog.starters[0];
    session
        .pick_starter(starter)
        .expect("fresh session accepts a starter");
    println!(
        "=== {} joins the team (Lv{}) ===",
        starter.name,
        session.party().get(0).map(|c| c.level).unwrap_or(0)
    );

    // Pace back and forth over the grass row until something jumps out.
    let patrol = [(1i64, 0i64), (-1, 0)];
    let mut encounters = 0;
    let mut steps_taken = 0;
    let mut log_cursor = 0u64;

    'outer: for lap in 0..200 {
        let (dx, dy) = patrol[lap % patrol.len()];
        let mut rng = TurnRng::new_random();
        session.step(dx, dy, &mut rng);
        steps_taken += 1;

        if session.phase() == GamePhase::EncounterIntro {
            encounters += 1;
            session.enter_battle();
            print_latest_log(&session, &mut log_cursor);

            let mut turns = 0;
            while session.phase() == GamePhase::InBattle {
                let mut rng = TurnRng::new_random();

                if session.must_switch() {
                    // Any living member will do; the demo party has one.
                    let fallback = session.party().first_living();
                    match fallback {
                        Some(index) => {
                            session.switch_active(index);
                        }
                        None => break,
                    }
                } else {
                    session.attack(0, &mut rng);
                }

                print_latest_log(&session, &mut log_cursor);
                turns += 1;
                if turns > 60 {
                    println!("Battle reached turn limit - ending demo");
                    break 'outer;
                }
            }

            let active = session.active_index();
            if let Some(fighter) = session.party().get(active) {
                println!(
                    "--- battle over: {} Lv{} at {}/{} HP, {} EXP banked ---",
                    fighter.name, fighter.level, fighter.current_hp, fighter.max_hp, fighter.exp
                );
            }
            println!();

            if encounters >= 3 {
                break;
            }
        }
    }

    println!(
        "Demo finished after {} steps and {} encounter(s).",
        steps_taken, encounters
    );
}

/// Print log lines the cursor has not seen yet.
fn print_latest_log(session: &GameSession, cursor: &mut u64) {
    for entry in session.log_entries() {
        if entry.id >= *cursor {
            println!("  [{:?}] {}", entry.category, entry.text);
            *cursor = entry.id + 1;
        }
    }
}
