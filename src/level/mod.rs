use crate::errors::{PhysicsError, PhysicsResult};
use crate::physics::obstacles::{CollisionMask, MAX_MASK_SIZE, MaskObstacle};
use crate::physics::types::ObstacleLayer;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError, ValidationErrors};

/// A level's collision layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LevelDefinition {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub obstacles: Vec<ObstacleDefinition>,
}

/// One obstacle: a mask shape placed at its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObstacleDefinition {
    #[validate(range(min = -1000000, max = 1000000))]
    pub x: i32,
    #[validate(range(min = -1000000, max = 1000000))]
    pub y: i32,
    #[serde(default = "default_solid")]
    pub solid: bool,
    #[serde(default)]
    pub layer: ObstacleLayer,
    #[validate(custom(function = "validate_shape"))]
    pub shape: ObstacleShape,
}

/// Where an obstacle's collision mask comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleShape {
    Box { width: u32, height: u32 },
    /// Column heights measured from the bottom of a `height`-tall mask
    Heightmap { heights: Vec<u32>, height: u32 },
    /// ASCII rows, `#` is solid
    Rows { rows: Vec<String> },
    /// Image file, relative to the level file; opaque pixels are solid
    Image { path: PathBuf },
}

fn default_solid() -> bool {
    true
}

fn shape_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_shape(shape: &ObstacleShape) -> Result<(), ValidationError> {
    let in_range = |value: u32| (1..=MAX_MASK_SIZE).contains(&value);

    match shape {
        ObstacleShape::Box { width, height } => {
            if !in_range(*width) || !in_range(*height) {
                return Err(shape_error(
                    "box_size",
                    format!("box {width}x{height} must be within 1..={MAX_MASK_SIZE}"),
                ));
            }
        }
        ObstacleShape::Heightmap { heights, height } => {
            if !in_range(heights.len() as u32) || !in_range(*height) {
                return Err(shape_error(
                    "heightmap_size",
                    format!(
                        "heightmap {}x{height} must be within 1..={MAX_MASK_SIZE}",
                        heights.len()
                    ),
                ));
            }
            if heights.iter().any(|h| h > height) {
                return Err(shape_error(
                    "heightmap_column",
                    format!("column heights must not exceed {height}"),
                ));
            }
        }
        ObstacleShape::Rows { rows } => {
            let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
            if !in_range(rows.len() as u32) || !in_range(width as u32) {
                return Err(shape_error(
                    "rows_size",
                    format!(
                        "rows {width}x{} must be within 1..={MAX_MASK_SIZE}",
                        rows.len()
                    ),
                ));
            }
            if rows.iter().any(|row| row.chars().count() != width) {
                return Err(shape_error(
                    "rows_ragged",
                    "all rows must have the same length".to_string(),
                ));
            }
        }
        ObstacleShape::Image { path } => {
            if path.as_os_str().is_empty() {
                return Err(shape_error("image_path", "image path is empty".to_string()));
            }
        }
    }

    Ok(())
}

fn describe_validation(errors: &ValidationErrors) -> String {
    let field_details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("{field}: {}", error_msgs.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ");

    if field_details.is_empty() {
        errors.to_string()
    } else {
        field_details
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

impl LevelDefinition {
    /// Load a level from a `.toml` file or a bincode file (any other extension)
    pub fn load<P: AsRef<Path>>(path: P) -> PhysicsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PhysicsError::LevelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let level: LevelDefinition = if is_toml(path) {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents).map_err(|e| PhysicsError::CorruptedLevelFile {
                reason: format!("Failed to parse level TOML: {e}"),
            })?
        } else {
            let data = std::fs::read(path)?;
            let (level, _): (LevelDefinition, usize) =
                bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(
                    |e| PhysicsError::CorruptedLevelFile {
                        reason: format!("Failed to deserialize level data: {e}"),
                    },
                )?;
            level
        };

        level
            .validate()
            .map_err(|errors| PhysicsError::LevelValidationFailed {
                reason: describe_validation(&errors),
            })?;

        debug!(
            "Loaded level '{}' with {} obstacles from {}",
            level.name,
            level.obstacles.len(),
            path.display()
        );
        Ok(level)
    }

    /// Save the level, choosing the format from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PhysicsResult<()> {
        self.validate()
            .map_err(|errors| PhysicsError::LevelValidationFailed {
                reason: describe_validation(&errors),
            })?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if is_toml(path) {
            toml::to_string_pretty(self)?.into_bytes()
        } else {
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                PhysicsError::CorruptedLevelFile {
                    reason: format!("Failed to serialize level: {e}"),
                }
            })?
        };

        std::fs::write(path, data)?;
        Ok(())
    }

    /// Build every obstacle; image paths resolve against `base_dir`
    pub fn build_obstacles(&self, base_dir: &Path) -> PhysicsResult<Vec<MaskObstacle>> {
        let obstacles = self
            .obstacles
            .iter()
            .map(|definition| definition.build(base_dir))
            .collect::<PhysicsResult<Vec<_>>>()?;

        info!(
            "Built {} obstacles for level '{}'",
            obstacles.len(),
            self.name
        );
        Ok(obstacles)
    }
}

impl ObstacleDefinition {
    pub fn build(&self, base_dir: &Path) -> PhysicsResult<MaskObstacle> {
        let mask = match &self.shape {
            ObstacleShape::Box { width, height } => CollisionMask::filled(*width, *height)?,
            ObstacleShape::Heightmap { heights, height } => {
                CollisionMask::from_heights(heights, *height)?
            }
            ObstacleShape::Rows { rows } => CollisionMask::from_rows(rows)?,
            ObstacleShape::Image { path } => CollisionMask::load(base_dir.join(path))?,
        };

        Ok(MaskObstacle {
            position: IVec2::new(self.x, self.y),
            mask,
            solid: self.solid,
            layer: self.layer,
        })
    }
}
