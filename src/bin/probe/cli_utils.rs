use bevy::prelude::*;
use groundsense::errors::{PhysicsError, PhysicsResult};
use groundsense::physics::{GroundDirection, MovementMode, Obstacle};

/// Generic parser for delimited integer lists
pub fn parse_delimited<const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
) -> PhysicsResult<[i32; N]> {
    let parts: Vec<&str> = input.split(delimiter).map(str::trim).collect();
    if parts.len() != N {
        return Err(PhysicsError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [0; N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = part.parse().map_err(|_| PhysicsError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse probe string "X1,Y1,X2,Y2"; corners are normalized
pub fn parse_probe(probe_str: &str) -> PhysicsResult<IRect> {
    let [x1, y1, x2, y2] = parse_delimited::<4>(probe_str, ',', "probe")?;
    // stderr keeps query results on stdout parseable
    if let Some(warning) = corner_order_warning(x1, y1, x2, y2) {
        eprintln!("{warning}");
    }
    Ok(IRect::new(x1, y1, x2, y2))
}

/// Warning for probe corners given out of order
pub fn corner_order_warning(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<String> {
    (x1 > x2 || y1 > y2).then(|| {
        format!("Warning: probe corners ({x1},{y1})-({x2},{y2}) are out of order, normalizing")
    })
}

/// Parse point string "X,Y"
pub fn parse_point(point_str: &str) -> PhysicsResult<IVec2> {
    let [x, y] = parse_delimited::<2>(point_str, ',', "point")?;
    Ok(IVec2::new(x, y))
}

/// Point at which the tie-break measures ground for `mode`
pub fn leading_point(probe: IRect, mode: MovementMode) -> IVec2 {
    match mode {
        MovementMode::Floor | MovementMode::RightWall => probe.max,
        MovementMode::Ceiling => IVec2::new(probe.max.x, probe.min.y),
        MovementMode::LeftWall => IVec2::new(probe.min.x, probe.max.y),
    }
}

/// One-line summary of an obstacle found by a query
pub fn describe_obstacle(
    index: Option<usize>,
    obstacle: &dyn Obstacle,
    at: IVec2,
    direction: GroundDirection,
) -> String {
    let kind = if obstacle.is_solid() { "solid" } else { "one-way" };
    let index = index.map_or_else(|| "?".to_string(), |i| i.to_string());
    format!(
        "obstacle #{index} ({kind}, layer {}), ground {direction} from ({}, {}) at {}",
        obstacle.layer(),
        at.x,
        at.y,
        obstacle.ground_position(at.x, at.y, direction)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe() {
        assert_eq!(parse_probe("50,0,50,95").unwrap(), IRect::new(50, 0, 50, 95));
        assert_eq!(parse_probe(" -4, 8 ,2,1").unwrap(), IRect::new(-4, 1, 2, 8));

        assert!(parse_probe("1,2,3").is_err());
        assert!(parse_probe("a,b,c,d").is_err());
        assert!(parse_probe("1.5,2,3,4").is_err());
    }

    #[test]
    fn test_corner_order_warning() {
        assert!(corner_order_warning(0, 0, 5, 5).is_none());
        assert!(corner_order_warning(3, 3, 3, 3).is_none());

        let warning = corner_order_warning(-4, 8, 2, 1).unwrap();
        assert!(warning.contains("(-4,8)-(2,1)"));
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,-20").unwrap(), IVec2::new(10, -20));
        assert!(parse_point("10").is_err());
    }

    #[test]
    fn test_leading_point() {
        let probe = IRect::new(1, 2, 3, 4);
        assert_eq!(leading_point(probe, MovementMode::Floor), IVec2::new(3, 4));
        assert_eq!(leading_point(probe, MovementMode::RightWall), IVec2::new(3, 4));
        assert_eq!(leading_point(probe, MovementMode::Ceiling), IVec2::new(3, 2));
        assert_eq!(leading_point(probe, MovementMode::LeftWall), IVec2::new(1, 4));
    }
}
