//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick. Used for both controller integration and body integration.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Half extent of the ground plane (ground is 400 x 400).
pub const WORLD_HALF_EXTENT: f64 = 200.0;

/// Default chassis spawn point when a map does not declare one.
pub const DEFAULT_SPAWN: [f64; 3] = [0.0, 0.5, 0.0];

// --- Vehicle ---

/// Steering rate (radians per second while a steer key is held).
pub const STEER_RATE: f64 = 1.5;

/// Steering limit (30 degrees).
pub const STEER_MAX: f64 = std::f64::consts::PI / 6.0;

/// Per-tick steering decay when no steer key is held.
pub const STEER_DAMPING: f64 = 0.9;

/// Acceleration (units per second squared).
pub const ACCEL: f64 = 20.0;

/// Top forward speed (units per second).
pub const FORWARD_MAX: f64 = 30.0;

/// Top reverse speed (negative, half of forward).
pub const REVERSE_MAX: f64 = -15.0;

/// Per-tick speed decay when neither throttle key is held.
pub const SPEED_DAMPING: f64 = 0.98;

/// Yaw rate = steering angle * speed * this.
pub const TURN_COUPLING: f64 = 0.05;

/// Decaying values below this magnitude snap to zero.
pub const SETTLE_EPSILON: f64 = 1e-3;

/// Wheel radius used for cosmetic spin.
pub const WHEEL_RADIUS: f64 = 0.4;

/// Player starting hitpoints.
pub const PLAYER_HITPOINTS: i32 = 100;

/// Ticks between race start and the chassis body becoming available.
pub const CHASSIS_LOAD_TICKS: u64 = 30;

// --- Pylons ---

/// Range inside which a strike locks onto the player.
pub const PYLON_MAX_RANGE: f64 = 50.0;

/// Pylon starting hitpoints.
pub const PYLON_HITPOINTS: i32 = 100;

/// Mean strike interval when the map omits one (ms).
pub const PYLON_DEFAULT_INTERVAL_MS: u64 = 2000;

/// Strike delay jitter as a fraction of the interval (+/-).
pub const STRIKE_JITTER: f64 = 0.5;

/// Radius of the random miss target around the pylon.
pub const PYLON_MISS_RADIUS: f64 = 10.0;

/// Number of segments in a strike bolt.
pub const BOLT_SEGMENTS: usize = 12;

/// Amplitude of the per-axis bolt perturbation.
pub const BOLT_VARIANCE: f64 = 0.3;

/// How long a bolt stays visible (ms).
pub const BOLT_LIFETIME_MS: u64 = 100;

/// Pylon collider diameter.
pub const PYLON_DIAMETER: f64 = 10.0;

/// Pylon collider height.
pub const PYLON_HEIGHT: f64 = 30.0;

// --- Projectiles ---

/// Projectile speed (units per second).
pub const PROJECTILE_SPEED: f64 = 12.0;

/// Projectile time-to-live (seconds).
pub const PROJECTILE_TTL_SECS: f64 = 3.0;

/// Damage carried by a player projectile.
pub const PROJECTILE_DAMAGE: i32 = 10;

/// Projectile collision radius.
pub const PROJECTILE_RADIUS: f64 = 0.25;

/// Minimum time between player shots (seconds).
pub const FIRE_COOLDOWN_SECS: f64 = 1.0;

/// Muzzle offset ahead of the chassis origin.
pub const MUZZLE_FORWARD: f64 = 1.0;

/// Muzzle offset above the chassis origin.
pub const MUZZLE_UP: f64 = 0.5;

// --- Objectives ---

/// Trigger radius for checkpoints and the secret crate.
pub const OBJECTIVE_RADIUS: f64 = 5.0;

// --- Persistence ---

/// Fixed key naming the single save slot.
pub const STORAGE_KEY: &str = "vehicular-assault-save";
