//! Non-owning obstacle index answering ground-sensing queries

use crate::physics::obstacles::Obstacle;
use crate::physics::types::{GroundDirection, MovementMode, ObstacleLayer};
use bevy::prelude::*;
use std::fmt;

const INITIAL_CAPACITY: usize = 32;

/// Set of obstacles active in the current scene region.
///
/// The map borrows its obstacles, so every referent outlives the map.
/// Insertion order is kept; it decides the winner among exact ties.
#[derive(Default)]
pub struct ObstacleMap<'a> {
    obstacles: Vec<&'a dyn Obstacle>,
}

impl<'a> ObstacleMap<'a> {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Register an obstacle; duplicates are kept
    pub fn add_obstacle(&mut self, obstacle: &'a dyn Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Forget every obstacle without touching the obstacles themselves
    pub fn clear(&mut self) {
        debug!("Clearing obstacle map ({} obstacles)", self.obstacles.len());
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Registered obstacles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn Obstacle> + '_ {
        self.obstacles.iter().copied()
    }

    /// Best obstacle touching the probe `(x1, y1)-(x2, y2)`.
    ///
    /// The probe must already be rotated for `mode` and normalized so that
    /// `x1 <= x2` and `y1 <= y2`.
    pub fn get_best_obstacle_at(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        mode: MovementMode,
        layer_filter: ObstacleLayer,
    ) -> Option<&'a dyn Obstacle> {
        debug_assert!(
            x1 <= x2 && y1 <= y2,
            "probe corners must be normalized, got ({x1}, {y1})-({x2}, {y2})"
        );

        let probe = IRect {
            min: IVec2::new(x1, y1),
            max: IVec2::new(x2, y2),
        };

        self.iter()
            .filter(|obstacle| {
                !ignore_obstacle(*obstacle, layer_filter) && obstacle.got_collision(x1, y1, x2, y2)
            })
            .fold(None, |best, candidate| {
                pick_best_obstacle(Some(candidate), best, probe, mode)
            })
    }

    /// Same as [`Self::get_best_obstacle_at`] for a probe given as a rectangle
    pub fn get_best_obstacle_in(
        &self,
        probe: IRect,
        mode: MovementMode,
        layer_filter: ObstacleLayer,
    ) -> Option<&'a dyn Obstacle> {
        self.get_best_obstacle_at(
            probe.min.x,
            probe.min.y,
            probe.max.x,
            probe.max.y,
            mode,
            layer_filter,
        )
    }

    /// Whether any visible obstacle touches the point `(x, y)`
    pub fn obstacle_exists(&self, x: i32, y: i32, layer_filter: ObstacleLayer) -> bool {
        self.iter().any(|obstacle| {
            !ignore_obstacle(obstacle, layer_filter) && obstacle.got_collision(x, y, x, y)
        })
    }

    /// Whether any visible solid obstacle touches the point `(x, y)`
    pub fn solid_exists(&self, x: i32, y: i32, layer_filter: ObstacleLayer) -> bool {
        self.iter().any(|obstacle| {
            !ignore_obstacle(obstacle, layer_filter)
                && obstacle.got_collision(x, y, x, y)
                && obstacle.is_solid()
        })
    }
}

impl fmt::Debug for ObstacleMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObstacleMap")
            .field("len", &self.obstacles.len())
            .finish()
    }
}

impl<'a, T: Obstacle + 'a> FromIterator<&'a T> for ObstacleMap<'a> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, T: Obstacle + 'a> Extend<&'a T> for ObstacleMap<'a> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for obstacle in iter {
            self.add_obstacle(obstacle);
        }
    }
}

/// Pick between two overlapping obstacles touched by the same probe.
///
/// `None` yields the other argument. A solid obstacle beats a one-way
/// platform. Two platforms compare their surfaces at the probe's leading
/// point; two solids pick the tallest obstacle.
pub fn pick_best_obstacle<'a>(
    a: Option<&'a dyn Obstacle>,
    b: Option<&'a dyn Obstacle>,
    probe: IRect,
    mode: MovementMode,
) -> Option<&'a dyn Obstacle> {
    let (a, b) = match (a, b) {
        (None, other) | (other, None) => return other,
        (Some(a), Some(b)) => (a, b),
    };

    match (a.is_solid(), b.is_solid()) {
        (false, true) => return Some(b),
        (true, false) => return Some(a),
        _ => {}
    }

    let IRect {
        min: IVec2 { x: x1, y: y1 },
        max: IVec2 { x: x2, y: y2 },
    } = probe;
    let heights = |x: i32, y: i32, direction: GroundDirection| {
        (
            a.ground_position(x, y, direction),
            b.ground_position(x, y, direction),
        )
    };

    let prefer_a = if !a.is_solid() {
        // one-way platforms: the surface met first along the direction of travel
        match mode {
            MovementMode::Floor => {
                let (ha, hb) = heights(x2, y2, GroundDirection::Down);
                ha >= hb
            }
            MovementMode::RightWall => {
                let (ha, hb) = heights(x2, y2, GroundDirection::Right);
                ha >= hb
            }
            MovementMode::Ceiling => {
                let (ha, hb) = heights(x2, y1, GroundDirection::Up);
                ha < hb
            }
            MovementMode::LeftWall => {
                let (ha, hb) = heights(x1, y2, GroundDirection::Left);
                ha < hb
            }
        }
    } else {
        // solid obstacles: the tallest one
        match mode {
            MovementMode::Floor => {
                let (ha, hb) = heights(x2, y2, GroundDirection::Down);
                ha < hb
            }
            MovementMode::LeftWall => {
                let (ha, hb) = heights(x1, y2, GroundDirection::Left);
                ha >= hb
            }
            MovementMode::Ceiling => {
                let (ha, hb) = heights(x2, y1, GroundDirection::Up);
                ha >= hb
            }
            MovementMode::RightWall => {
                let (ha, hb) = heights(x2, y2, GroundDirection::Right);
                ha < hb
            }
        }
    };

    Some(if prefer_a { a } else { b })
}

/// Whether a query filtered by `layer_filter` skips `obstacle`
pub fn ignore_obstacle(obstacle: &dyn Obstacle, layer_filter: ObstacleLayer) -> bool {
    let layer = obstacle.layer();
    layer_filter != ObstacleLayer::Default
        && layer != ObstacleLayer::Default
        && layer != layer_filter
}
