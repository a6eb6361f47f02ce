//! Simulation constants and tuning parameters.

/// Nominal display refresh rate (Hz). Mission time is derived from tick counts at this rate.
pub const TICK_RATE: u32 = 60;

/// Upper bound on elapsed seconds integrated in a single tick.
pub const MAX_FRAME_DT: f32 = 0.1;

// --- Arena ---

/// Arena side length. The world spans [0, ARENA_SIZE] on both axes.
pub const ARENA_SIZE: f32 = 800.0;

/// Inset from the arena edge the player may not cross.
pub const PLAYER_BOUNDS_MARGIN: f32 = 20.0;

/// Health assigned to destructible walls.
pub const DESTRUCTIBLE_WALL_HEALTH: i32 = 100;

// --- Player ---

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Spawn point before any mission has started.
pub const PLAYER_IDLE_SPAWN: (f32, f32) = (400.0, 600.0);

/// Spawn point at the start of each mission.
pub const PLAYER_MISSION_SPAWN: (f32, f32) = (400.0, 700.0);

/// Speed per held direction key. Diagonals are not normalized.
pub const PLAYER_SPEED: f32 = 200.0;

pub const PLAYER_PROJECTILE_SPEED: f32 = 700.0;

/// Ticks between shots while the trigger is held.
pub const PLAYER_FIRE_INTERVAL_TICKS: u64 = 10;

/// Radius within which a hostile projectile strikes the player.
pub const PLAYER_HIT_RADIUS: f32 = 18.0;

// --- Actors ---

/// Radius within which a projectile strikes a non-player actor.
pub const ACTOR_HIT_RADIUS: f32 = 20.0;

/// Distance ahead of the shooter's center at which projectiles appear.
pub const MUZZLE_OFFSET: f32 = 25.0;

pub const PROJECTILE_DAMAGE: i32 = 12;

// --- Civilians ---

pub const CIVILIAN_COUNT: u32 = 12;
pub const CIVILIAN_MAX_HEALTH: i32 = 40;

/// Spawn band (x range, y range).
pub const CIVILIAN_SPAWN_X: (f32, f32) = (100.0, 700.0);
pub const CIVILIAN_SPAWN_Y: (f32, f32) = (200.0, 600.0);

/// Initial drift speed bound, per axis.
pub const CIVILIAN_INITIAL_DRIFT: f32 = 40.0;

pub const CIVILIAN_WANDER_SPEED: f32 = 30.0;

/// Ticks between wander heading re-rolls (~3 s at 60 Hz).
pub const CIVILIAN_WANDER_INTERVAL_TICKS: u64 = 180;

pub const CIVILIAN_PANIC_SPEED: f32 = 160.0;

/// Total width of the random flee-heading jitter (radians), centred on zero.
pub const CIVILIAN_PANIC_JITTER: f32 = 1.0;

// --- Enforcers ---

/// Enforcer count used when the mission payload carries no usable density.
pub const DEFAULT_ENFORCER_COUNT: u32 = 6;

/// Hard ceiling on enforcers per mission regardless of payload density.
pub const MAX_ENFORCER_COUNT: u32 = 24;

pub const ENFORCER_MAX_HEALTH: i32 = 80;

pub const ENFORCER_SPAWN_X: (f32, f32) = (100.0, 700.0);
pub const ENFORCER_SPAWN_Y: (f32, f32) = (50.0, 200.0);

/// Distance at which an enforcer notices the player.
pub const ENFORCER_PERCEPTION_RADIUS: f32 = 450.0;

/// Enforcers close in while farther than this, and hold inside it.
pub const ENFORCER_ENGAGE_RANGE: f32 = 180.0;

pub const ENFORCER_ADVANCE_SPEED: f32 = 90.0;

/// Per-tick chance an enforcer in combat fires.
pub const ENFORCER_FIRE_CHANCE: f64 = 0.04;

pub const ENFORCER_PROJECTILE_SPEED: f32 = 450.0;

// --- Mission scoring ---

pub const STEALTH_RATING_ALARMED: u32 = 20;
pub const STEALTH_RATING_QUIET: u32 = 90;

// --- Dialogue ---

/// Per-tick chance of requesting a dialogue line while enforcers are in combat.
pub const DIALOGUE_CHANCE: f64 = 0.005;

/// Ticks of silence after a dialogue line arrives.
pub const DIALOGUE_COOLDOWN_TICKS: u32 = 500;

/// Outcomes sent with a mission request.
pub const MISSION_HISTORY_WINDOW: usize = 3;

/// Outcomes sent with a dialogue request.
pub const DIALOGUE_HISTORY_WINDOW: usize = 5;

pub const DEFAULT_DIALOGUE: &str = "Operator online. Stand by for neural link...";

pub const COMBAT_DIALOGUE_TRIGGER: &str = "witnessed high-intensity tactical combat";
