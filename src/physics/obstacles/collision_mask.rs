//! Per-pixel collision masks backing concrete obstacles

use crate::errors::{PhysicsError, PhysicsResult};
use crate::physics::types::GroundDirection;
use image::RgbaImage;
use std::path::Path;

/// Largest accepted mask side, in pixels
pub const MAX_MASK_SIZE: u32 = 4096;

/// Grid of solid/empty pixels in obstacle-local coordinates.
///
/// `(0, 0)` is the top-left pixel and y grows downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl CollisionMask {
    /// Fully solid rectangle
    pub fn filled(width: u32, height: u32) -> PhysicsResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![true; (width * height) as usize],
        })
    }

    /// Column heightmap: column `i` is solid for its bottom `heights[i]` pixels
    pub fn from_heights(heights: &[u32], height: u32) -> PhysicsResult<Self> {
        let width = heights.len() as u32;
        check_dimensions(width, height)?;

        if let Some((column, h)) = heights.iter().enumerate().find(|(_, h)| **h > height) {
            return Err(PhysicsError::InvalidObstacle {
                reason: format!("Column {column} height {h} exceeds mask height {height}"),
            });
        }

        let mut pixels = vec![false; (width * height) as usize];
        for (x, h) in heights.iter().enumerate() {
            for y in (height - h)..height {
                pixels[y as usize * width as usize + x] = true;
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// ASCII art rows; `#` marks a solid pixel
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> PhysicsResult<Self> {
        let height = rows.len() as u32;
        let width = rows
            .first()
            .map(|row| row.as_ref().chars().count() as u32)
            .unwrap_or(0);
        check_dimensions(width, height)?;

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as u32 != width {
                return Err(PhysicsError::InvalidObstacle {
                    reason: format!(
                        "Row {index} has {} columns, expected {width}",
                        row.chars().count()
                    ),
                });
            }
            pixels.extend(row.chars().map(|c| c == '#'));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Any pixel with non-zero alpha is solid
    pub fn from_rgba(image: &RgbaImage) -> PhysicsResult<Self> {
        let (width, height) = image.dimensions();
        check_dimensions(width, height)?;

        let pixels = image.pixels().map(|pixel| pixel.0[3] > 0).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load a mask from an image file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> PhysicsResult<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Self::from_rgba(&image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the local pixel `(x, y)` is solid; out-of-range pixels are empty
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Whether any pixel of the inclusive rectangle is solid
    pub fn area_test(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        let y2 = y2.min(self.height as i32 - 1);

        (y1..=y2).any(|y| (x1..=x2).any(|x| self.is_solid_at(x, y)))
    }

    /// Local coordinate of the surface seen from `(x, y)` along `direction`.
    ///
    /// The starting point is clamped into the mask. From inside solid
    /// ground the scan walks back toward the surface; from empty space it
    /// walks forward until it meets a solid pixel or the mask edge.
    pub fn locate_ground(&self, x: i32, y: i32, direction: GroundDirection) -> i32 {
        let last_x = self.width as i32 - 1;
        let last_y = self.height as i32 - 1;
        let mut x = x.clamp(0, last_x);
        let mut y = y.clamp(0, last_y);

        match direction {
            GroundDirection::Down => {
                if self.is_solid_at(x, y) {
                    while y > 0 && self.is_solid_at(x, y - 1) {
                        y -= 1;
                    }
                } else {
                    while y < last_y && !self.is_solid_at(x, y) {
                        y += 1;
                    }
                }
                y
            }
            GroundDirection::Up => {
                if self.is_solid_at(x, y) {
                    while y < last_y && self.is_solid_at(x, y + 1) {
                        y += 1;
                    }
                } else {
                    while y > 0 && !self.is_solid_at(x, y) {
                        y -= 1;
                    }
                }
                y
            }
            GroundDirection::Right => {
                if self.is_solid_at(x, y) {
                    while x > 0 && self.is_solid_at(x - 1, y) {
                        x -= 1;
                    }
                } else {
                    while x < last_x && !self.is_solid_at(x, y) {
                        x += 1;
                    }
                }
                x
            }
            GroundDirection::Left => {
                if self.is_solid_at(x, y) {
                    while x < last_x && self.is_solid_at(x + 1, y) {
                        x += 1;
                    }
                } else {
                    while x > 0 && !self.is_solid_at(x, y) {
                        x -= 1;
                    }
                }
                x
            }
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> PhysicsResult<()> {
    if width == 0 || height == 0 {
        return Err(PhysicsError::InvalidObstacle {
            reason: format!("Mask size {width}x{height} must be at least 1x1"),
        });
    }

    if width > MAX_MASK_SIZE || height > MAX_MASK_SIZE {
        return Err(PhysicsError::InvalidObstacle {
            reason: format!("Mask size {width}x{height} exceeds {MAX_MASK_SIZE}x{MAX_MASK_SIZE}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_filled_mask() {
        let mask = CollisionMask::filled(4, 3).unwrap();
        assert_eq!((mask.width(), mask.height()), (4, 3));
        assert!(mask.is_solid_at(0, 0));
        assert!(mask.is_solid_at(3, 2));
        assert!(!mask.is_solid_at(4, 0));
        assert!(!mask.is_solid_at(-1, 1));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(CollisionMask::filled(0, 4).is_err());
        assert!(CollisionMask::filled(4, MAX_MASK_SIZE + 1).is_err());
        assert!(CollisionMask::from_heights(&[], 4).is_err());
        assert!(CollisionMask::from_heights(&[1, 5], 4).is_err());
        assert!(CollisionMask::from_rows(&["##", "#"]).is_err());
    }

    #[test]
    fn test_rows_mask() {
        let mask = CollisionMask::from_rows(&["....", ".##.", "####"]).unwrap();
        assert!(!mask.is_solid_at(0, 1));
        assert!(mask.is_solid_at(1, 1));
        assert!(mask.is_solid_at(0, 2));
        assert!(mask.area_test(0, 0, 1, 1));
        assert!(!mask.area_test(0, 0, 3, 0));
    }

    #[test]
    fn test_rgba_mask_uses_alpha() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 0, 1]));

        let mask = CollisionMask::from_rgba(&image).unwrap();
        assert!(!mask.is_solid_at(0, 0));
        assert!(mask.is_solid_at(1, 0));
        assert!(mask.is_solid_at(0, 1));
        assert!(!mask.is_solid_at(1, 1));
    }

    #[test]
    fn test_area_test_clips_to_mask() {
        let mask = CollisionMask::from_heights(&[0, 0, 2], 4).unwrap();
        assert!(mask.area_test(-10, -10, 100, 100));
        assert!(!mask.area_test(-10, -10, 1, 100));
        assert!(!mask.area_test(10, 10, 20, 20));
    }

    #[test]
    fn test_locate_ground_on_slope() {
        // Rising slope, one pixel per column
        let mask = CollisionMask::from_heights(&[1, 2, 3, 4], 4).unwrap();

        // From empty space above each column the scan lands on its top pixel
        assert_eq!(mask.locate_ground(0, 0, GroundDirection::Down), 3);
        assert_eq!(mask.locate_ground(1, 0, GroundDirection::Down), 2);
        assert_eq!(mask.locate_ground(2, -50, GroundDirection::Down), 1);
        // From inside the ground it walks back up to the surface
        assert_eq!(mask.locate_ground(3, 3, GroundDirection::Down), 0);
        assert_eq!(mask.locate_ground(2, 3, GroundDirection::Down), 1);
    }

    #[test]
    fn test_locate_ground_empty_column_reaches_edge() {
        let mask = CollisionMask::from_heights(&[0, 2], 4).unwrap();
        assert_eq!(mask.locate_ground(0, 0, GroundDirection::Down), 3);
        assert_eq!(mask.locate_ground(0, 3, GroundDirection::Up), 0);
    }

    #[test]
    fn test_locate_ground_other_directions() {
        let mask = CollisionMask::from_rows(&[".....", ".###.", ".###.", "....."]).unwrap();

        // Up finds the bottom surface
        assert_eq!(mask.locate_ground(2, 3, GroundDirection::Up), 2);
        assert_eq!(mask.locate_ground(2, 1, GroundDirection::Up), 2);
        // Right finds the left-most solid pixel
        assert_eq!(mask.locate_ground(0, 1, GroundDirection::Right), 1);
        assert_eq!(mask.locate_ground(3, 2, GroundDirection::Right), 1);
        // Left finds the right-most solid pixel
        assert_eq!(mask.locate_ground(4, 1, GroundDirection::Left), 3);
        assert_eq!(mask.locate_ground(1, 2, GroundDirection::Left), 3);
    }
}
