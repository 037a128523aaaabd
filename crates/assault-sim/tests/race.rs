//! End-to-end races driven only through the public engine API.

use assault_sim::core::commands::PlayerCommand;
use assault_sim::core::enums::{DriveKey, InputSource, RacePhase, Storyline};
use assault_sim::core::events::GameEvent;
use assault_sim::core::map::MapData;
use assault_sim::persistence;
use assault_sim::{SimConfig, SimulationEngine};

const ARENA: &str = r#"{
    "name": "Arena",
    "primitives": [
        { "type": "ground", "name": "floor", "size": { "width": 200, "height": 200 } },
        { "type": "cone", "name": "unsupported" }
    ],
    "pylons": [ { "position": { "x": 0, "y": 15, "z": 20 }, "interval": 1000 } ],
    "checkpoints": [ { "id": "gate", "name": "Gate", "position": { "x": 0, "y": 0.5, "z": 60 } } ],
    "timeLimit": 30
}"#;

fn key(key: DriveKey, down: bool) -> PlayerCommand {
    let source = InputSource::Keyboard;
    if down {
        PlayerCommand::KeyDown { source, key }
    } else {
        PlayerCommand::KeyUp { source, key }
    }
}

#[test]
fn every_storyline_runs_ten_seconds() {
    for storyline in Storyline::ALL {
        let mut engine = SimulationEngine::new(SimConfig {
            storyline,
            ..Default::default()
        });
        engine.queue_command(PlayerCommand::StartRace);
        for _ in 0..600 {
            engine.tick();
        }
        assert_eq!(engine.storyline(), storyline);
        assert_eq!(engine.load_report().skipped, 0);
        assert_ne!(engine.phase(), RacePhase::MainMenu);
    }
}

#[test]
fn driving_through_the_gate_finishes_the_race() {
    let map = MapData::from_json(ARENA).unwrap();
    let mut engine = SimulationEngine::new(SimConfig {
        chassis_load_ticks: 0,
        ..Default::default()
    });
    engine.start_race_with_map(map);
    assert_eq!(engine.load_report().skipped, 1);

    engine.queue_command(key(DriveKey::Forward, true));
    let mut ended = None;
    for _ in 0..600 {
        let snap = engine.tick();
        for event in snap.events {
            if let GameEvent::RaceEnded { phase } = event {
                ended = Some(phase);
            }
        }
        if ended.is_some() {
            break;
        }
    }
    assert_eq!(ended, Some(RacePhase::Finished));
    assert!(engine.time_left().unwrap() > 0.0);
}

#[test]
fn saved_session_survives_a_restart() {
    let map = MapData::from_json(ARENA).unwrap();
    let mut engine = SimulationEngine::new(SimConfig {
        chassis_load_ticks: 0,
        ..Default::default()
    });
    engine.start_race_with_map(map);

    engine.queue_command(key(DriveKey::Forward, true));
    for _ in 0..30 {
        engine.tick();
    }
    engine.queue_command(key(DriveKey::Forward, false));
    engine.tick();

    let saved = engine.session_state().unwrap();
    let dir = tempfile::tempdir().unwrap();
    persistence::save_session(dir.path(), &saved).unwrap();

    engine.queue_command(PlayerCommand::RestartRace);
    engine.tick();
    assert_ne!(engine.time_left(), saved.time_left);

    let loaded = persistence::load_session(dir.path()).unwrap();
    engine.restore_session(&loaded).unwrap();
    let restored = engine.session_state().unwrap();
    assert_eq!(restored.time_left, saved.time_left);
    assert_eq!(restored.player_hp, saved.player_hp);
    assert_eq!(restored.car, saved.car);
}
