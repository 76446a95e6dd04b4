//! Simulation constants and tuning parameters.
//!
//! Per-archetype stats live in `profiles`; everything here is shared.

// --- World ---

/// Default playable area width (world units).
pub const WORLD_WIDTH: f64 = 800.0;

/// Default playable area height (world units).
pub const WORLD_HEIGHT: f64 = 600.0;

/// Projectiles may leave the visible area by this much before they are culled.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 50.0;

/// Largest frame delta the simulation accepts in one tick (ms).
/// Longer frames (tab switches, debugger pauses) are clamped.
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

// --- Economy ---

/// Starting money at Normal difficulty.
pub const STARTING_MONEY: u32 = 200;

/// Starting defender health at Normal difficulty.
pub const STARTING_LIVES: u32 = 20;

/// Percentage of the invested cost returned when a tower is sold.
pub const SELL_REFUND_PERCENT: u32 = 70;

/// Score awarded per unit of kill reward.
pub const SCORE_PER_REWARD: u64 = 10;

/// Wave completion bonus: `floor((BASE + wave * INCREMENT) * special * difficulty)`.
pub const WAVE_BONUS_BASE: f64 = 25.0;
pub const WAVE_BONUS_INCREMENT: f64 = 5.0;

// --- Waves ---

/// Number of waves in a full game; advancing past it is a victory.
pub const FINAL_WAVE: u32 = 25;

/// Enemies in wave 1 of the generic composition.
pub const WAVE_BASE_ENEMY_COUNT: u32 = 8;

/// Additional enemies per wave.
pub const WAVE_ENEMY_INCREASE: u32 = 3;

/// Hard cap on generic wave size.
pub const WAVE_ENEMY_HARD_CAP: u32 = 60;

/// Delay between spawns in wave 1 (ms).
pub const WAVE_BASE_SPAWN_DELAY_MS: f64 = 1200.0;

/// Spawn delay reduction per wave (ms).
pub const WAVE_SPAWN_DELAY_STEP_MS: f64 = 40.0;

/// Floor for the spawn delay (ms).
pub const WAVE_MIN_SPAWN_DELAY_MS: f64 = 300.0;

/// Time between a wave start request and its first spawn (ms).
pub const WAVE_PREP_DELAY_MS: f64 = 1500.0;

/// Maximum perpendicular jitter applied to spawn positions (world units).
pub const SPAWN_JITTER: f64 = 12.0;

// --- Enemy scaling ---

/// Speed multiplier cap applied by wave scaling.
pub const SPEED_MULTIPLIER_CAP: f64 = 8.0;

/// Absolute minimum scaled enemy speed (units/s).
pub const MIN_ENEMY_SPEED: f64 = 10.0;

/// Health gained per wave, as a fraction of base health.
pub const HEALTH_SCALING_PER_WAVE: f64 = 0.15;

// --- Status effects ---

/// Fraction of speed removed per unit of slow effect.
pub const SLOW_SPEED_FACTOR: f64 = 0.7;

/// Freeze duration applied by high-level ice towers (ms).
pub const ICE_FREEZE_DURATION_MS: f64 = 800.0;

/// Ice tower level at which hits also freeze.
pub const ICE_FREEZE_MIN_LEVEL: u32 = 3;

// --- Targeting & damage ---

/// Distance credited per unit of path progress when ranking targets.
pub const TARGET_PROGRESS_WEIGHT: f64 = 10.0;

/// Fraction of a projectile's damage dealt by its splash at the epicentre.
pub const SPLASH_DAMAGE_RATIO: f64 = 0.7;

/// Downward acceleration for gravity-affected projectiles (units/s²).
pub const PROJECTILE_GRAVITY: f64 = 400.0;

// --- Placement ---

/// Footprint radius of a tower (world units).
pub const TOWER_RADIUS: f64 = 15.0;

/// Half-width of the enemy path corridor (world units).
pub const PATH_HALF_WIDTH: f64 = 20.0;

/// Minimum distance from a tower centre to any path segment.
pub const PATH_CLEARANCE: f64 = PATH_HALF_WIDTH + TOWER_RADIUS;

// --- Particles ---

/// Lifetime of decorative particles (ms).
pub const PARTICLE_LIFETIME_MS: f64 = 600.0;

/// Debris pieces emitted when an enemy dies.
pub const DEATH_PARTICLE_COUNT: usize = 6;

/// Scatter speed of decorative particles (units/s).
pub const PARTICLE_SPEED: f64 = 60.0;

// --- High scores ---

/// Number of entries kept in the high-score table.
pub const HIGH_SCORE_CAPACITY: usize = 10;
