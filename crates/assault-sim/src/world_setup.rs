//! Map loader: turns a `MapData` document into ECS entities.
//!
//! Bad primitives and pylons without a position are skipped with a warning
//! and loading continues. Pylon ids are their index in the map's `pylons`
//! array, so a skipped entry leaves a gap.

use std::collections::HashMap;

use glam::{DQuat, DVec3, EulerRot};
use hecs::{Entity, World};
use tracing::{debug, info, warn};

use assault_core::components::*;
use assault_core::constants::*;
use assault_core::enums::{BodyKind, MaterialId, PylonPhase};
use assault_core::map::{MapData, MapPrimitive, ObjectiveDef, PrimitiveError, PylonDef};

use assault_pylon_ai::profiles::get_profile;

/// What a map load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub primitives: usize,
    pub skipped: usize,
    pub skipped_pylons: usize,
    pub colliders: usize,
    pub pylons: usize,
    pub checkpoints: usize,
    pub secret_crate: bool,
}

/// Handles the engine keeps after a load.
#[derive(Debug)]
pub struct LoadedRace {
    pub report: LoadReport,
    pub player: Entity,
    pub pylons: HashMap<u32, Entity>,
}

/// Populate an empty world from a map. The chassis body becomes ready at
/// `chassis_ready_at_tick`.
pub fn setup_race(world: &mut World, map: &MapData, chassis_ready_at_tick: u64) -> LoadedRace {
    let mut report = LoadReport::default();

    for primitive in &map.primitives {
        match spawn_primitive(world, primitive) {
            Ok((_, has_collider)) => {
                report.primitives += 1;
                if has_collider {
                    report.colliders += 1;
                }
            }
            Err(error) => {
                warn!(primitive = %primitive.name, %error, "skipping map primitive");
                report.skipped += 1;
            }
        }
    }

    let mut pylons = HashMap::with_capacity(map.pylons.len());
    for (index, def) in map.pylons.iter().enumerate() {
        let id = index as u32;
        match spawn_pylon(world, id, def) {
            Some(entity) => {
                pylons.insert(id, entity);
            }
            None => {
                warn!(pylon = id, "skipping pylon without a position");
                report.skipped_pylons += 1;
            }
        }
    }
    report.pylons = pylons.len();

    for def in &map.checkpoints {
        spawn_objective(world, def, false);
    }
    report.checkpoints = map.checkpoints.len();

    if let Some(def) = &map.secret_crate {
        spawn_objective(world, def, true);
        report.secret_crate = true;
    }

    let player = spawn_player(world, spawn_transform(map), chassis_ready_at_tick);

    info!(
        map = %map.name,
        primitives = report.primitives,
        skipped = report.skipped,
        skipped_pylons = report.skipped_pylons,
        pylons = report.pylons,
        checkpoints = report.checkpoints,
        "map loaded"
    );

    LoadedRace {
        report,
        player,
        pylons,
    }
}

/// Chassis spawn transform: the map's spawn point facing +Z.
pub fn spawn_transform(map: &MapData) -> Transform {
    let position = map
        .spawn_position
        .map(|p| p.to_vec())
        .unwrap_or_else(|| DVec3::from_array(DEFAULT_SPAWN));
    Transform {
        position,
        rotation: DQuat::IDENTITY,
    }
}

/// Instantiate one primitive. Returns the entity and whether it got a collider.
pub fn spawn_primitive(
    world: &mut World,
    item: &MapPrimitive,
) -> Result<(Entity, bool), PrimitiveError> {
    let dims = item.resolve_dims()?;

    let material = item.material.as_deref().and_then(|name| {
        let id = MaterialId::parse(name);
        if id.is_none() {
            debug!(primitive = %item.name, material = name, "unknown material, leaving default");
        }
        id
    });

    let collider = item.wants_collider().then(|| {
        let mass = item.mass();
        Collider {
            shape: dims.kind().collider_shape(),
            body: if mass > 0.0 {
                BodyKind::Dynamic
            } else {
                BodyKind::Static
            },
            mass,
        }
    });
    let has_collider = collider.is_some();

    let rotation = item.rotation.map(|r| r.to_vec()).unwrap_or(DVec3::ZERO);
    let transform = Transform {
        position: item.position.map(|p| p.to_vec()).unwrap_or(DVec3::ZERO),
        rotation: DQuat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z),
    };

    let geometry = StaticGeometry {
        name: item.name.clone(),
        dims,
        rotation,
        material,
        collider,
        metadata: item.metadata.clone(),
    };

    debug!(primitive = %item.name, kind = ?dims.kind(), "created primitive");
    Ok((world.spawn((geometry, transform)), has_collider))
}

/// Spawn a pylon in the `Idle` phase. The pylon system arms its first strike.
/// Returns `None` when the definition has no usable position.
pub fn spawn_pylon(world: &mut World, id: u32, def: &PylonDef) -> Option<Entity> {
    let position = def.position?.to_vec();
    let profile = get_profile(def.variant);
    Some(world.spawn((PylonState {
        id,
        variant: def.variant,
        phase: PylonPhase::Idle,
        position,
        interval_ms: def
            .interval
            .filter(|&ms| ms > 0)
            .unwrap_or(PYLON_DEFAULT_INTERVAL_MS),
        strength: profile.strength,
        hitpoints: profile.hitpoints,
    },)))
}

pub fn spawn_objective(world: &mut World, def: &ObjectiveDef, secret: bool) -> Entity {
    let objective = Objective {
        id: def.id.clone(),
        name: def.name.clone(),
        description: def.description.clone(),
        position: def.position.to_vec(),
        visited: false,
    };
    if secret {
        world.spawn((objective, SecretCrate))
    } else {
        world.spawn((objective, Checkpoint))
    }
}

/// Spawn the player with full hitpoints and a chassis that is still loading.
pub fn spawn_player(world: &mut World, spawn: Transform, ready_at_tick: u64) -> Entity {
    world.spawn((
        Player,
        Hitpoints {
            current: PLAYER_HITPOINTS,
            max: PLAYER_HITPOINTS,
        },
        ChassisLoading {
            ready_at_tick,
            spawn,
        },
    ))
}
