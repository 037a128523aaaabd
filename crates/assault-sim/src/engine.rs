//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use assault_core::commands::PlayerCommand;
use assault_core::components::*;
use assault_core::constants::CHASSIS_LOAD_TICKS;
use assault_core::enums::{RacePhase, Storyline};
use assault_core::events::GameEvent;
use assault_core::input::{DriveInput, InputMerger};
use assault_core::map::MapData;
use assault_core::session::{CarState, CheckpointState, SessionState};
use assault_core::state::GameStateSnapshot;
use assault_core::types::{forward_of, SimTime};

use assault_pylon_ai::scheduler::StrikeScheduler;
use assault_vehicle::{VehicleController, VehicleState, VehicleTuning};

use crate::maps;
use crate::persistence::PersistenceError;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup::{self, LoadReport};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Storyline loaded by `StartRace` until another is selected.
    pub storyline: Storyline,
    pub tuning: VehicleTuning,
    /// Ticks the chassis spends loading after a race starts.
    pub chassis_load_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            storyline: Storyline::default(),
            tuning: VehicleTuning::default(),
            chassis_load_ticks: CHASSIS_LOAD_TICKS,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: RacePhase,
    storyline: Storyline,
    time_scale: f64,
    chassis_load_ticks: u64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,

    map: Option<MapData>,
    report: LoadReport,
    player: Option<Entity>,
    pylons: HashMap<u32, Entity>,
    scheduler: StrikeScheduler,
    controller: VehicleController,
    input: InputMerger,
    current_input: DriveInput,
    fire_requested: bool,
    fire_cooldown: f64,
    time_left: Option<f64>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: RacePhase::default(),
            storyline: config.storyline,
            time_scale: config.time_scale,
            chassis_load_ticks: config.chassis_load_ticks,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            map: None,
            report: LoadReport::default(),
            player: None,
            pylons: HashMap::new(),
            scheduler: StrikeScheduler::new(),
            controller: VehicleController::new(config.tuning),
            input: InputMerger::new(),
            current_input: DriveInput::NONE,
            fire_requested: false,
            fire_cooldown: 0.0,
            time_left: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == RacePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let ctx = SnapshotContext {
            time: self.time,
            phase: self.phase,
            storyline: self.storyline,
            map_name: self.map.as_ref().map_or("", |m| m.name.as_str()),
            vehicle: self.controller.state(),
            input: self.current_input,
            time_left: self.time_left,
        };
        systems::snapshot::build_snapshot(&self.world, ctx, events)
    }

    /// Load `map` into a fresh world and start racing on it.
    pub fn start_race_with_map(&mut self, map: MapData) {
        self.world.clear();
        self.scheduler.clear();
        self.controller.reset();
        self.input.clear();
        self.current_input = DriveInput::NONE;
        self.fire_requested = false;
        self.fire_cooldown = 0.0;
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        self.time_left = map.time_limit;

        let loaded = world_setup::setup_race(
            &mut self.world,
            &map,
            self.time.tick + self.chassis_load_ticks,
        );
        self.report = loaded.report;
        self.player = Some(loaded.player);
        self.pylons = loaded.pylons;
        self.map = Some(map);
        self.phase = RacePhase::Active;
    }

    /// The persistable view of the running race. `None` outside a race.
    pub fn session_state(&self) -> Option<SessionState> {
        if self.phase == RacePhase::MainMenu {
            return None;
        }
        let map = self.map.as_ref()?;
        let player = self.player?;

        let car = match self.world.get::<&Transform>(player) {
            Ok(transform) => {
                let velocity = self
                    .world
                    .get::<&BodyVelocity>(player)
                    .map(|b| b.linear)
                    .unwrap_or(DVec3::ZERO);
                CarState {
                    position: transform.position.into(),
                    rotation: transform.rotation.into(),
                    velocity: velocity.into(),
                }
            }
            Err(_) => {
                let loading = self.world.get::<&ChassisLoading>(player).ok()?;
                CarState {
                    position: loading.spawn.position.into(),
                    rotation: loading.spawn.rotation.into(),
                    velocity: DVec3::ZERO.into(),
                }
            }
        };

        let player_hp = self.world.get::<&Hitpoints>(player).ok()?.current;

        let mut visited: HashMap<String, bool> = HashMap::new();
        let mut secret_visited = false;
        for (_entity, (objective, secret)) in self
            .world
            .query::<(&Objective, Option<&SecretCrate>)>()
            .iter()
        {
            if secret.is_some() {
                secret_visited = objective.visited;
            } else {
                visited.insert(objective.id.clone(), objective.visited);
            }
        }
        let checkpoints = map
            .checkpoints
            .iter()
            .map(|def| CheckpointState {
                id: def.id.clone(),
                visited: visited.get(&def.id).copied().unwrap_or(false),
            })
            .collect();

        Some(SessionState {
            time_left: self.time_left,
            car,
            player_hp,
            checkpoints,
            secret_visited,
        })
    }

    /// Apply a saved session to the loaded race. Checkpoint ids not on the
    /// current map are ignored.
    pub fn restore_session(&mut self, session: &SessionState) -> Result<(), PersistenceError> {
        if self.phase == RacePhase::MainMenu {
            return Err(PersistenceError::NoActiveRace);
        }
        let player = self.player.ok_or(PersistenceError::NoActiveRace)?;

        let transform = Transform {
            position: session.car.position.into(),
            rotation: session.car.rotation.into(),
        };
        let velocity: DVec3 = session.car.velocity.into();

        if let Ok(mut hp) = self.world.get::<&mut Hitpoints>(player) {
            let max = hp.max;
            hp.current = session.player_hp.clamp(0, max);
        }
        if let Ok(mut current) = self.world.get::<&mut Transform>(player) {
            *current = transform;
        }
        if let Ok(mut body) = self.world.get::<&mut BodyVelocity>(player) {
            body.linear = velocity;
            body.angular = DVec3::ZERO;
        }
        if let Ok(mut loading) = self.world.get::<&mut ChassisLoading>(player) {
            loading.spawn = transform;
        }

        for (_entity, (objective, secret)) in self
            .world
            .query_mut::<(&mut Objective, Option<&SecretCrate>)>()
        {
            if secret.is_some() {
                objective.visited = session.secret_visited;
            } else if let Some(saved) = session.checkpoints.iter().find(|c| c.id == objective.id)
            {
                objective.visited = saved.visited;
            }
        }

        self.time_left = session.time_left;
        self.controller.restore(VehicleState {
            speed: velocity.dot(forward_of(transform.rotation)),
            steering_angle: 0.0,
        });
        if self.phase.is_over() {
            self.phase = RacePhase::Active;
        }

        info!(hp = session.player_hp, time_left = ?session.time_left, "session restored");
        Ok(())
    }

    /// Get the current race phase.
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn storyline(&self) -> Storyline {
        self.storyline
    }

    pub fn time_left(&self) -> Option<f64> {
        self.time_left
    }

    pub fn vehicle_state(&self) -> VehicleState {
        self.controller.state()
    }

    /// What the last map load produced.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get a read-only reference to the strike scheduler.
    #[cfg(test)]
    pub fn scheduler(&self) -> &StrikeScheduler {
        &self.scheduler
    }

    /// Entity for a pylon id, while the pylon exists.
    #[cfg(test)]
    pub fn pylon_entity(&self, id: u32) -> Option<Entity> {
        self.pylons.get(&id).copied()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { source, key } => self.input.press(source, key),
            PlayerCommand::KeyUp { source, key } => self.input.release(source, key),
            PlayerCommand::Fire => {
                if self.phase == RacePhase::Active {
                    self.fire_requested = true;
                }
            }
            PlayerCommand::SelectStoryline { storyline } => {
                if self.phase == RacePhase::MainMenu || self.phase.is_over() {
                    self.storyline = storyline;
                }
            }
            PlayerCommand::StartRace => {
                if self.phase == RacePhase::MainMenu || self.phase.is_over() {
                    match maps::load_storyline(self.storyline) {
                        Ok(map) => self.start_race_with_map(map),
                        Err(error) => {
                            warn!(storyline = self.storyline.slug(), %error, "map failed to load")
                        }
                    }
                }
            }
            PlayerCommand::RestartRace => {
                if self.phase != RacePhase::MainMenu {
                    if let Some(map) = self.map.take() {
                        info!(map = %map.name, "restarting race");
                        self.start_race_with_map(map);
                    }
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.world.clear();
                self.scheduler.clear();
                self.controller.reset();
                self.input.clear();
                self.current_input = DriveInput::NONE;
                self.pylons.clear();
                self.player = None;
                self.map = None;
                self.time_left = None;
                self.time = SimTime::default();
                self.phase = RacePhase::MainMenu;
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::Pause => {
                if self.phase == RacePhase::Active {
                    self.phase = RacePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == RacePhase::Paused {
                    self.phase = RacePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        let now_ms = self.time.elapsed_ms();

        // 1. Chassis loading
        systems::vehicle::finish_loading(&mut self.world, self.time.tick);
        // 2. Input merge, once per frame
        self.current_input = self.input.resolve();
        // 3. Vehicle controller -> chassis velocity
        systems::vehicle::run(
            &mut self.world,
            &mut self.controller,
            &self.current_input,
            dt,
        );
        // 4. Firing
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if std::mem::take(&mut self.fire_requested) {
            systems::projectiles::try_fire(
                &mut self.world,
                &mut self.fire_cooldown,
                &mut self.events,
            );
        }
        // 5. Pylon strikes, against last frame's integrated position
        systems::pylon_ai::run(
            &mut self.world,
            &self.pylons,
            &mut self.scheduler,
            &mut self.rng,
            &mut self.events,
            now_ms,
        );
        // 6. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 7. Projectile lifetime + pylon hits
        systems::projectiles::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.events,
            &mut self.despawn_buffer,
            dt,
        );
        // 8. Objectives, countdown, race end
        if let Some(ended) =
            systems::objectives::run(&mut self.world, &mut self.time_left, &mut self.events, dt)
        {
            self.phase = ended;
        }
        // 9. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, now_ms);
        let world = &self.world;
        self.pylons.retain(|_, entity| world.contains(*entity));
    }
}
