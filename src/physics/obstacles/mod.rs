//! Trait-based obstacle system for platformer ground sensing

use crate::physics::types::{GroundDirection, ObstacleLayer};

pub mod collision_mask;
pub mod mask_obstacle;
pub mod obstacle_map;

pub use collision_mask::*;
pub use mask_obstacle::*;
pub use obstacle_map::*;

/// Core trait for environment features an actor can stand on or bump into.
///
/// Implementors must not change while they are registered in an
/// [`ObstacleMap`]; the map only ever reads them.
pub trait Obstacle {
    /// Solid obstacles block from every side; the rest are one-way platforms
    fn is_solid(&self) -> bool;

    /// Collision layer used by query filters
    fn layer(&self) -> ObstacleLayer;

    /// Test the inclusive rectangle `(x1, y1)-(x2, y2)` against this obstacle.
    /// Callers pass normalized corners (`x1 <= x2`, `y1 <= y2`).
    fn got_collision(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;

    /// Coordinate of this obstacle's surface as seen from `(x, y)` looking
    /// along `direction`. For `Down` this is the y of the top surface.
    fn ground_position(&self, x: i32, y: i32, direction: GroundDirection) -> i32;

    /// Test if a single world point touches this obstacle
    fn contains_point(&self, x: i32, y: i32) -> bool {
        self.got_collision(x, y, x, y)
    }
}
