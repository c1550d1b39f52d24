pub mod config;
pub mod errors;
pub mod level;
pub mod physics;
pub mod plugins;

// Selective re-exports for external consumers

// Plugins - host games add these to their App
pub use plugins::*;

// Errors - every fallible API returns these
pub use errors::{PhysicsError, PhysicsResult};

// Physics - the obstacle map and its collaborators
pub use physics::{
    GroundDirection, MaskObstacle, MovementMode, Obstacle, ObstacleLayer, ObstacleMap, Sensor,
    SensorSet, pick_best_obstacle,
};

// Levels and config
pub use config::{PhysicsConfig, SensorSettings};
pub use level::LevelDefinition;
