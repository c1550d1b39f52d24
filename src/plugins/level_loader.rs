use crate::config::{PhysicsConfig, load_config};
use crate::errors::PhysicsResult;
use crate::level::LevelDefinition;
use crate::physics::obstacles::{MaskObstacle, ObstacleMap};
use bevy::prelude::*;
use std::path::Path;

/// Loads the physics config and the configured level's obstacles
pub struct ObstaclePlugin;

impl Plugin for ObstaclePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_config())
            .init_resource::<LevelObstacles>()
            .add_systems(Startup, load_level_obstacles);
    }
}

/// Owns the obstacles of the current level
#[derive(Resource, Debug, Default)]
pub struct LevelObstacles {
    pub name: String,
    pub obstacles: Vec<MaskObstacle>,
}

impl LevelObstacles {
    pub fn from_file<P: AsRef<Path>>(path: P) -> PhysicsResult<Self> {
        let path = path.as_ref();
        let level = LevelDefinition::load(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let obstacles = level.build_obstacles(base_dir)?;

        Ok(Self {
            name: level.name,
            obstacles,
        })
    }

    /// Borrowing map over every obstacle of the level, in file order
    pub fn obstacle_map(&self) -> ObstacleMap<'_> {
        self.obstacles.iter().collect()
    }
}

pub fn load_level_obstacles(mut level: ResMut<LevelObstacles>, config: Res<PhysicsConfig>) {
    match LevelObstacles::from_file(&config.level_file) {
        Ok(loaded) => {
            info!(
                "Successfully loaded level '{name}' with {count} obstacles",
                name = loaded.name,
                count = loaded.obstacles.len()
            );
            *level = loaded;
        }
        Err(err) => {
            warn!(
                "Failed to load level {}: {err}",
                config.level_file.display()
            );
            warn!("Ground sensing will run against an empty obstacle map");
            *level = LevelObstacles::default();
        }
    }
}
