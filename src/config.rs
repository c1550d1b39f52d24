pub mod range_types;

use crate::errors::{PhysicsError, PhysicsResult};
use crate::physics::types::ObstacleLayer;
use bevy::prelude::*;
use range_types::{SensorExtent, SensorReach};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime settings for ground sensing, stored as TOML
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Level loaded at startup, relative to the working directory
    pub level_file: PathBuf,
    /// Layer filter used by actor sensors
    pub layer: ObstacleLayer,
    pub sensors: SensorSettings,
}

/// Sensor geometry of a platformer actor, in pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SensorSettings {
    pub half_width: SensorExtent,
    pub half_height: SensorExtent,
    pub ground_reach: SensorReach,
    pub side_reach: SensorReach,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            level_file: PathBuf::from("levels/default.toml"),
            layer: ObstacleLayer::Default,
            sensors: SensorSettings::default(),
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            half_width: SensorExtent::new(9),
            half_height: SensorExtent::new(20),
            ground_reach: SensorReach::new(16),
            side_reach: SensorReach::new(4),
        }
    }
}

pub fn get_config_path() -> PhysicsResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or(PhysicsError::ConfigDirNotFound)?;
    path.push("groundsense");
    fs::create_dir_all(&path)?;
    path.push("config.toml");
    Ok(path)
}

/// Read a config file, failing on I/O or parse errors
pub fn load_config_from<P: AsRef<Path>>(path: P) -> PhysicsResult<PhysicsConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Load the user config, falling back to defaults
pub fn load_config() -> PhysicsConfig {
    let loaded = get_config_path().and_then(|path| {
        if path.exists() {
            load_config_from(&path).map(Some)
        } else {
            Ok(None)
        }
    });

    match loaded {
        Ok(Some(config)) => config,
        Ok(None) => PhysicsConfig::default(),
        Err(err) => {
            warn!("Failed to load physics config, using defaults: {err}");
            PhysicsConfig::default()
        }
    }
}

pub fn save_config_to<P: AsRef<Path>>(config: &PhysicsConfig, path: P) -> PhysicsResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

pub fn save_config(config: &PhysicsConfig) -> PhysicsResult<()> {
    save_config_to(config, get_config_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PhysicsConfig = toml::from_str(
            r#"
            layer = "green"

            [sensors]
            half_width = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.layer, ObstacleLayer::Green);
        assert_eq!(config.sensors.half_width.get(), 12);
        assert_eq!(config.sensors.half_height.get(), 20);
        assert_eq!(config.level_file, PathBuf::from("levels/default.toml"));
    }

    #[test]
    fn test_out_of_range_sensor_values_are_clamped() {
        let config: PhysicsConfig = toml::from_str(
            "[sensors]\nhalf_width = 100000\nhalf_height = 0\nground_reach = -7\nside_reach = 900",
        )
        .unwrap();

        assert_eq!(config.sensors.half_width.get(), 256);
        assert_eq!(config.sensors.half_height.get(), 1);
        assert_eq!(config.sensors.ground_reach.get(), 0);
        assert_eq!(config.sensors.side_reach.get(), 64);
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = std::env::temp_dir().join(format!("groundsense-config-{}.toml", std::process::id()));
        let config = PhysicsConfig {
            level_file: PathBuf::from("levels/zone1.toml"),
            layer: ObstacleLayer::Yellow,
            ..Default::default()
        };

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let path = std::env::temp_dir().join(format!("groundsense-bad-{}.toml", std::process::id()));
        fs::write(&path, "layer = 42").unwrap();
        let result = load_config_from(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(PhysicsError::DeserializationFailed(_))));
    }
}
