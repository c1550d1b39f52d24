//! Actor-relative probe segments rotated by movement mode

use crate::config::SensorSettings;
use crate::physics::obstacles::{Obstacle, ObstacleMap};
use crate::physics::types::{MovementMode, ObstacleLayer};
use bevy::prelude::*;

/// A probe segment relative to an actor standing on the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    offsets: IRect,
    pub enabled: bool,
}

impl Sensor {
    /// Offsets are given for `MovementMode::Floor` and normalized here
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            offsets: IRect::new(x1, y1, x2, y2),
            enabled: true,
        }
    }

    pub fn offsets(&self) -> IRect {
        self.offsets
    }

    /// World-space probe for an actor at `position` walking in `mode`.
    ///
    /// The result is always normalized (`min <= max` on both axes).
    pub fn world_rect(&self, position: IVec2, mode: MovementMode) -> IRect {
        let IRect {
            min: IVec2 { x: x1, y: y1 },
            max: IVec2 { x: x2, y: y2 },
        } = self.offsets;
        let IVec2 { x, y } = position;

        // saturating arithmetic is monotonic, so clamped corners stay ordered
        let add = i32::saturating_add;
        let sub = i32::saturating_sub;
        let (min, max) = match mode {
            MovementMode::Floor => (
                IVec2::new(add(x, x1), add(y, y1)),
                IVec2::new(add(x, x2), add(y, y2)),
            ),
            MovementMode::LeftWall => (
                IVec2::new(sub(x, y2), add(y, x1)),
                IVec2::new(sub(x, y1), add(y, x2)),
            ),
            MovementMode::Ceiling => (
                IVec2::new(sub(x, x2), sub(y, y2)),
                IVec2::new(sub(x, x1), sub(y, y1)),
            ),
            MovementMode::RightWall => (
                IVec2::new(add(x, y1), sub(y, x2)),
                IVec2::new(add(x, y2), sub(y, x1)),
            ),
        };

        IRect { min, max }
    }

    /// Best obstacle under this sensor, or `None` when disabled
    pub fn check<'a>(
        &self,
        position: IVec2,
        mode: MovementMode,
        layer_filter: ObstacleLayer,
        map: &ObstacleMap<'a>,
    ) -> Option<&'a dyn Obstacle> {
        if !self.enabled {
            return None;
        }

        map.get_best_obstacle_in(self.world_rect(position, mode), mode, layer_filter)
    }
}

/// The six sensors of a platformer actor.
///
/// `a`/`b` reach below the feet, `c`/`d` above the head and `m`/`n`
/// sideways from the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSet {
    pub a: Sensor,
    pub b: Sensor,
    pub c: Sensor,
    pub d: Sensor,
    pub m: Sensor,
    pub n: Sensor,
}

impl SensorSet {
    pub fn from_settings(settings: &SensorSettings) -> Self {
        let w = settings.half_width.get();
        let h = settings.half_height.get();
        let reach = settings.ground_reach.get();
        let side = settings.side_reach.get();

        Self {
            a: Sensor::new(-w, 0, -w, h + reach),
            b: Sensor::new(w, 0, w, h + reach),
            c: Sensor::new(-w, -h, -w, 0),
            d: Sensor::new(w, -h, w, 0),
            m: Sensor::new(-(w + side), 0, 0, 0),
            n: Sensor::new(0, 0, w + side, 0),
        }
    }

    /// Check every sensor against the map
    pub fn read<'a>(
        &self,
        position: IVec2,
        mode: MovementMode,
        layer_filter: ObstacleLayer,
        map: &ObstacleMap<'a>,
    ) -> SensorReadings<'a> {
        let check = |sensor: &Sensor| sensor.check(position, mode, layer_filter, map);

        SensorReadings {
            a: check(&self.a),
            b: check(&self.b),
            c: check(&self.c),
            d: check(&self.d),
            m: check(&self.m),
            n: check(&self.n),
        }
    }
}

impl Default for SensorSet {
    fn default() -> Self {
        Self::from_settings(&SensorSettings::default())
    }
}

/// Obstacles found by each sensor of a [`SensorSet`]
#[derive(Clone, Copy, Default)]
pub struct SensorReadings<'a> {
    pub a: Option<&'a dyn Obstacle>,
    pub b: Option<&'a dyn Obstacle>,
    pub c: Option<&'a dyn Obstacle>,
    pub d: Option<&'a dyn Obstacle>,
    pub m: Option<&'a dyn Obstacle>,
    pub n: Option<&'a dyn Obstacle>,
}

impl SensorReadings<'_> {
    pub fn is_grounded(&self) -> bool {
        self.a.is_some() || self.b.is_some()
    }

    /// Only solid obstacles block the head and the sides
    pub fn touches_ceiling(&self) -> bool {
        [self.c, self.d].into_iter().flatten().any(|o| o.is_solid())
    }

    pub fn blocked_left(&self) -> bool {
        self.m.is_some_and(|o| o.is_solid())
    }

    pub fn blocked_right(&self) -> bool {
        self.n.is_some_and(|o| o.is_solid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::obstacles::{CollisionMask, MaskObstacle};

    fn block(x: i32, y: i32, width: u32, height: u32) -> MaskObstacle {
        MaskObstacle::new(
            IVec2::new(x, y),
            CollisionMask::filled(width, height).unwrap(),
        )
    }

    #[test]
    fn test_world_rect_rotation() {
        let sensor = Sensor::new(-9, 0, -9, 20);
        let position = IVec2::new(100, 200);

        assert_eq!(
            sensor.world_rect(position, MovementMode::Floor),
            IRect::new(91, 200, 91, 220)
        );
        assert_eq!(
            sensor.world_rect(position, MovementMode::RightWall),
            IRect::new(100, 209, 120, 209)
        );
        assert_eq!(
            sensor.world_rect(position, MovementMode::Ceiling),
            IRect::new(109, 180, 109, 200)
        );
        assert_eq!(
            sensor.world_rect(position, MovementMode::LeftWall),
            IRect::new(80, 191, 100, 191)
        );
    }

    #[test]
    fn test_world_rect_is_normalized_in_every_mode() {
        let sensor = Sensor::new(12, 8, -3, -5);
        for mode in MovementMode::ALL {
            let rect = sensor.world_rect(IVec2::new(-7, 33), mode);
            assert!(rect.min.x <= rect.max.x, "{mode}");
            assert!(rect.min.y <= rect.max.y, "{mode}");
            assert_eq!(rect.width(), if matches!(mode, MovementMode::Floor | MovementMode::Ceiling) { 15 } else { 13 });
        }
    }

    #[test]
    fn test_world_rect_saturates_at_extreme_positions() {
        let sensor = Sensor::new(-9, -20, 9, 36);
        let corners = [
            IVec2::new(i32::MAX, i32::MAX),
            IVec2::new(i32::MIN, i32::MIN),
            IVec2::new(i32::MAX, i32::MIN),
        ];

        for position in corners {
            for mode in MovementMode::ALL {
                let rect = sensor.world_rect(position, mode);
                assert!(rect.min.x <= rect.max.x, "{mode} at {position}");
                assert!(rect.min.y <= rect.max.y, "{mode} at {position}");
            }
        }

        let rect = sensor.world_rect(IVec2::new(i32::MAX, 0), MovementMode::Floor);
        assert_eq!(rect.min, IVec2::new(i32::MAX - 9, -20));
        assert_eq!(rect.max, IVec2::new(i32::MAX, 36));
    }

    #[test]
    fn test_actor_far_from_origin_reads_without_overflow() {
        let ground = block(-100, 21, 200, 16);
        let map: ObstacleMap = [&ground].into_iter().collect();
        let sensors = SensorSet::default();

        for mode in MovementMode::ALL {
            let readings = sensors.read(IVec2::new(i32::MIN, i32::MAX), mode, ObstacleLayer::Default, &map);
            assert!(!readings.is_grounded(), "{mode}");
        }
    }

    #[test]
    fn test_disabled_sensor_finds_nothing() {
        let ground = block(0, 10, 32, 8);
        let map: ObstacleMap = [&ground].into_iter().collect();
        let mut sensor = Sensor::new(0, 0, 0, 12);

        assert!(sensor.check(IVec2::new(4, 0), MovementMode::Floor, ObstacleLayer::Default, &map).is_some());
        sensor.enabled = false;
        assert!(sensor.check(IVec2::new(4, 0), MovementMode::Floor, ObstacleLayer::Default, &map).is_none());
    }

    #[test]
    fn test_sensor_set_standing_on_floor() {
        let settings = SensorSettings::default();
        let sensors = SensorSet::from_settings(&settings);
        let h = settings.half_height.get();

        // Ground starting just below the feet, wall to the right
        let ground = block(-100, h + 1, 200, 16);
        let wall = block(settings.half_width.get() + 2, -40, 8, 80);
        let map: ObstacleMap = [&ground, &wall].into_iter().collect();

        let readings = sensors.read(IVec2::ZERO, MovementMode::Floor, ObstacleLayer::Default, &map);
        assert!(readings.is_grounded());
        assert!(!readings.touches_ceiling());
        assert!(!readings.blocked_left());
        assert!(readings.blocked_right());
    }

    #[test]
    fn test_sensor_set_on_right_wall() {
        let settings = SensorSettings::default();
        let sensors = SensorSet::from_settings(&settings);
        let h = settings.half_height.get();

        // In right-wall mode "down" is +x
        let wall = block(h + 1, -100, 16, 200);
        let map: ObstacleMap = [&wall].into_iter().collect();

        let readings = sensors.read(IVec2::ZERO, MovementMode::RightWall, ObstacleLayer::Default, &map);
        assert!(readings.is_grounded());
        assert!(!readings.touches_ceiling());

        let readings = sensors.read(IVec2::ZERO, MovementMode::Floor, ObstacleLayer::Default, &map);
        assert!(!readings.is_grounded());
    }

    #[test]
    fn test_one_way_platform_does_not_block_sides() {
        let platform = MaskObstacle::one_way(IVec2::new(-50, -2), CollisionMask::filled(100, 4).unwrap());
        let map: ObstacleMap = [&platform].into_iter().collect();

        let readings = SensorSet::default().read(IVec2::ZERO, MovementMode::Floor, ObstacleLayer::Default, &map);
        assert!(readings.m.is_some());
        assert!(!readings.blocked_left());
        assert!(!readings.blocked_right());
    }
}
