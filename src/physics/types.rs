//! Orientation and layer tags shared by obstacles, maps and sensors

use crate::errors::PhysicsError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which of the four cardinal surfaces an actor is currently walking on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum MovementMode {
    #[default]
    #[display("floor")]
    Floor,
    #[display("leftwall")]
    LeftWall,
    #[display("ceiling")]
    Ceiling,
    #[display("rightwall")]
    RightWall,
}

/// Direction along which an obstacle's surface is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GroundDirection {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

/// Collision layer of an obstacle; `Default` is visible to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleLayer {
    #[default]
    #[display("default")]
    Default,
    #[display("green")]
    Green,
    #[display("yellow")]
    Yellow,
}

impl MovementMode {
    pub const ALL: [MovementMode; 4] = [
        MovementMode::Floor,
        MovementMode::LeftWall,
        MovementMode::Ceiling,
        MovementMode::RightWall,
    ];

    /// The direction treated as "down" while in this mode
    pub fn ground_direction(self) -> GroundDirection {
        match self {
            MovementMode::Floor => GroundDirection::Down,
            MovementMode::LeftWall => GroundDirection::Left,
            MovementMode::Ceiling => GroundDirection::Up,
            MovementMode::RightWall => GroundDirection::Right,
        }
    }
}

impl FromStr for MovementMode {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor" => Ok(MovementMode::Floor),
            "leftwall" | "left-wall" | "left_wall" => Ok(MovementMode::LeftWall),
            "ceiling" => Ok(MovementMode::Ceiling),
            "rightwall" | "right-wall" | "right_wall" => Ok(MovementMode::RightWall),
            other => Err(PhysicsError::InvalidArgument {
                reason: format!("Unknown movement mode '{other}'"),
            }),
        }
    }
}

impl FromStr for ObstacleLayer {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ObstacleLayer::Default),
            "green" => Ok(ObstacleLayer::Green),
            "yellow" => Ok(ObstacleLayer::Yellow),
            other => Err(PhysicsError::InvalidArgument {
                reason: format!("Unknown obstacle layer '{other}'"),
            }),
        }
    }
}
