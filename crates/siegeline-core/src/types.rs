//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position in world space (world units).
/// x = right, y = down the screen, z = height above the ground (visual arc only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Velocity in world space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. The clock is driven by measured frame deltas,
/// so ticks are not evenly spaced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Elapsed virtual time in milliseconds.
    pub elapsed_ms: f64,
}

/// Rectangular playable area, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Ground-level position.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar distance to another position. Height is ignored: collisions
    /// and ranges are resolved on the ground plane.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit vector toward another position, zero when coincident.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.xy() - self.xy()).normalize_or_zero()
    }

    pub fn xy(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_xy(v: DVec2) -> Self {
        Self::planar(v.x, v.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar velocity of `speed` along `direction`.
    pub fn along(direction: DVec2, speed: f64) -> Self {
        let v = direction * speed;
        Self::new(v.x, v.y, 0.0)
    }

    /// Planar speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn xy(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl SimTime {
    /// Advance by one frame of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a point lies inside the area, widened by `margin` on every side.
    pub fn contains(&self, pos: &Position, margin: f64) -> bool {
        pos.x >= -margin
            && pos.y >= -margin
            && pos.x <= self.width + margin
            && pos.y <= self.height + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: crate::constants::WORLD_WIDTH,
            height: crate::constants::WORLD_HEIGHT,
        }
    }
}
