//! Obstacles placed in the world from collision masks

use crate::physics::obstacles::{CollisionMask, Obstacle};
use crate::physics::types::{GroundDirection, ObstacleLayer};
use bevy::prelude::*;

/// A collision mask placed at an integer world position
#[derive(Debug, Clone)]
pub struct MaskObstacle {
    pub position: IVec2,
    pub mask: CollisionMask,
    pub solid: bool,
    pub layer: ObstacleLayer,
}

impl MaskObstacle {
    /// Solid obstacle on the default layer
    pub fn new(position: IVec2, mask: CollisionMask) -> Self {
        Self {
            position,
            mask,
            solid: true,
            layer: ObstacleLayer::Default,
        }
    }

    /// One-way platform on the default layer
    pub fn one_way(position: IVec2, mask: CollisionMask) -> Self {
        Self {
            solid: false,
            ..Self::new(position, mask)
        }
    }

    pub fn with_layer(mut self, layer: ObstacleLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Inclusive world-space bounding box
    pub fn bounds(&self) -> IRect {
        let size = IVec2::new(self.mask.width() as i32, self.mask.height() as i32);
        IRect::from_corners(self.position, self.position.saturating_add(size - IVec2::ONE))
    }
}

impl Obstacle for MaskObstacle {
    fn is_solid(&self) -> bool {
        self.solid
    }

    fn layer(&self) -> ObstacleLayer {
        self.layer
    }

    fn got_collision(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let bounds = self.bounds();
        if x2 < bounds.min.x || x1 > bounds.max.x || y2 < bounds.min.y || y1 > bounds.max.y {
            return false;
        }

        // clipped to the bounds, so local coordinates stay inside the mask
        let min = IVec2::new(x1, y1).max(bounds.min) - self.position;
        let max = IVec2::new(x2, y2).min(bounds.max) - self.position;
        self.mask.area_test(min.x, min.y, max.x, max.y)
    }

    fn ground_position(&self, x: i32, y: i32, direction: GroundDirection) -> i32 {
        let local = self.mask.locate_ground(
            x.saturating_sub(self.position.x),
            y.saturating_sub(self.position.y),
            direction,
        );

        match direction {
            GroundDirection::Up | GroundDirection::Down => self.position.y.saturating_add(local),
            GroundDirection::Left | GroundDirection::Right => self.position.x.saturating_add(local),
        }
    }
}
