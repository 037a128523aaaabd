//! Vehicle system: finishes chassis loading and drives the player body.

use hecs::World;

use assault_core::components::*;
use assault_core::input::DriveInput;

use assault_vehicle::controller::VehicleController;
use assault_vehicle::wheels;

/// Promote loading chassis whose model is ready to a full physics body.
pub fn finish_loading(world: &mut World, current_tick: u64) {
    let ready: Vec<(hecs::Entity, Transform)> = world
        .query_mut::<&ChassisLoading>()
        .into_iter()
        .filter(|(_, loading)| current_tick >= loading.ready_at_tick)
        .map(|(entity, loading)| (entity, loading.spawn))
        .collect();

    for (entity, transform) in ready {
        let _ = world.remove_one::<ChassisLoading>(entity);
        let _ = world.insert(
            entity,
            (
                transform,
                BodyVelocity::default(),
                Chassis,
                wheels::default_rig(),
            ),
        );
        tracing::debug!(?entity, "chassis ready");
    }
}

/// Run the controller for the player and write the velocity command.
/// With no ready chassis the controller is not advanced.
pub fn run(world: &mut World, controller: &mut VehicleController, input: &DriveInput, dt: f64) {
    let rotation = world
        .query_mut::<(&Player, &Chassis, &Transform)>()
        .into_iter()
        .next()
        .map(|(_, (_, _, transform))| transform.rotation);

    let Some(command) = controller.update(input, dt, rotation) else {
        return;
    };
    let state = controller.state();
    let radius = controller.tuning().wheel_radius;

    for (_entity, (_player, body, rig)) in
        world.query_mut::<(&Player, &mut BodyVelocity, &mut WheelRig)>()
    {
        body.linear = command.linear_velocity;
        body.angular = command.angular_velocity;
        wheels::animate(rig, &state, dt, radius);
    }
}
