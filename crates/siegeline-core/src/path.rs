//! The route enemies walk, from the spawn edge to the defended exit.
//!
//! Supplied by level geometry and consumed read-only by the movement system.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Position;

/// Rejected path definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("a path needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("path waypoint {0} is not a finite coordinate")]
    NonFinite(usize),
}

/// Ordered polyline of waypoints with cached segment lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct EnemyPath {
    waypoints: Vec<Position>,
    lengths: Vec<f64>,
}

/// Result of moving a path follower forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathAdvance {
    pub segment: usize,
    pub progress: f64,
    /// The follower walked off the last waypoint.
    pub finished: bool,
}

impl EnemyPath {
    pub fn new(waypoints: Vec<Position>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints(waypoints.len()));
        }
        if let Some(idx) = waypoints
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(PathError::NonFinite(idx));
        }

        let lengths = waypoints
            .windows(2)
            .map(|pair| pair[0].range_to(&pair[1]))
            .collect();
        Ok(Self { waypoints, lengths })
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn total_length(&self) -> f64 {
        self.lengths.iter().sum()
    }

    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    pub fn end(&self) -> Position {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Unit direction of travel along a segment. Indices past the end
    /// report the last segment's direction.
    pub fn direction(&self, segment: usize) -> DVec2 {
        let seg = segment.min(self.segment_count() - 1);
        self.waypoints[seg].direction_to(&self.waypoints[seg + 1])
    }

    /// World position of a follower, shifted sideways by `lane_offset`.
    pub fn point_at(&self, segment: usize, progress: f64, lane_offset: f64) -> Position {
        if segment >= self.segment_count() {
            let end = self.end().xy() + perpendicular(self.direction(segment)) * lane_offset;
            return Position::from_xy(end);
        }
        let a = self.waypoints[segment].xy();
        let b = self.waypoints[segment + 1].xy();
        let along = a.lerp(b, progress.clamp(0.0, 1.0));
        Position::from_xy(along + perpendicular(self.direction(segment)) * lane_offset)
    }

    /// Walk `distance` units forward from `(segment, progress)`.
    pub fn advance(&self, segment: usize, progress: f64, distance: f64) -> PathAdvance {
        let mut seg = segment;
        let mut prog = progress;
        let mut remaining = distance.max(0.0);

        while seg < self.segment_count() {
            let len = self.lengths[seg];
            let left = (1.0 - prog) * len;
            if remaining < left {
                return PathAdvance {
                    segment: seg,
                    progress: prog + remaining / len,
                    finished: false,
                };
            }
            remaining -= left;
            seg += 1;
            prog = 0.0;
        }

        PathAdvance {
            segment: self.segment_count(),
            progress: 0.0,
            finished: true,
        }
    }

    /// Shortest planar distance from a point to the path polyline.
    pub fn distance_to(&self, point: &Position) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| segment_distance(point.xy(), pair[0].xy(), pair[1].xy()))
            .fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<Vec<Position>> for EnemyPath {
    type Error = PathError;

    fn try_from(waypoints: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<EnemyPath> for Vec<Position> {
    fn from(path: EnemyPath) -> Self {
        path.waypoints
    }
}

impl Default for EnemyPath {
    fn default() -> Self {
        default_path()
    }
}

/// The built-in level: enters on the left edge and snakes to the right edge
/// of the default 800x600 world.
pub fn default_path() -> EnemyPath {
    let waypoints = vec![
        Position::planar(0.0, 100.0),
        Position::planar(200.0, 100.0),
        Position::planar(200.0, 300.0),
        Position::planar(500.0, 300.0),
        Position::planar(500.0, 500.0),
        Position::planar(700.0, 500.0),
        Position::planar(700.0, 200.0),
        Position::planar(800.0, 200.0),
    ];
    EnemyPath {
        lengths: waypoints
            .windows(2)
            .map(|pair| pair[0].range_to(&pair[1]))
            .collect(),
        waypoints,
    }
}

/// Left-hand normal of a direction vector.
pub fn perpendicular(direction: DVec2) -> DVec2 {
    DVec2::new(-direction.y, direction.x)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
