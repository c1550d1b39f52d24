use clap::Parser;
use groundsense::config::load_config;
use groundsense::errors::{PhysicsError, PhysicsResult};
use groundsense::physics::{MovementMode, Obstacle, ObstacleLayer, SensorSet};
use groundsense::plugins::LevelObstacles;
use std::path::PathBuf;

mod probe {
    pub mod cli_utils;
}

use probe::cli_utils::*;

#[derive(Parser, Clone)]
#[command(name = "obstacle_probe")]
#[command(about = "Run ground-sensing queries against a level's obstacles")]
struct Args {
    /// Level file (.toml, or bincode for any other extension); defaults to the configured level
    #[arg(long)]
    level: Option<PathBuf>,

    /// Probe rectangle, already rotated for the mode (format: X1,Y1,X2,Y2)
    #[arg(long, conflicts_with_all = ["point", "actor"])]
    probe: Option<String>,

    /// Point test (format: X,Y)
    #[arg(long, conflicts_with = "actor")]
    point: Option<String>,

    /// Actor position; reads every sensor of the configured sensor set (format: X,Y)
    #[arg(long)]
    actor: Option<String>,

    /// Movement mode (floor, leftwall, ceiling, rightwall)
    #[arg(long, default_value = "floor")]
    mode: String,

    /// Layer filter (default, green, yellow)
    #[arg(long, default_value = "default")]
    layer: String,

    /// With --point, only report solid obstacles
    #[arg(long)]
    solid_only: bool,
}

fn index_of(level: &LevelObstacles, found: &dyn Obstacle) -> Option<usize> {
    level
        .obstacles
        .iter()
        .position(|o| std::ptr::addr_eq(o, found))
}

fn main() -> PhysicsResult<()> {
    let args = Args::parse();
    let config = load_config();

    let mode: MovementMode = args.mode.parse()?;
    let layer: ObstacleLayer = args.layer.parse()?;
    let level_path = args.level.unwrap_or_else(|| config.level_file.clone());

    let level = LevelObstacles::from_file(&level_path)?;
    let map = level.obstacle_map();
    println!(
        "Level '{}': {} obstacles from {}",
        level.name,
        map.len(),
        level_path.display()
    );

    if let Some(probe_str) = &args.probe {
        let probe = parse_probe(probe_str)?;
        match map.get_best_obstacle_in(probe, mode, layer) {
            Some(found) => println!(
                "{}",
                describe_obstacle(
                    index_of(&level, found),
                    found,
                    leading_point(probe, mode),
                    mode.ground_direction()
                )
            ),
            None => println!("No obstacle in probe"),
        }
    } else if let Some(point_str) = &args.point {
        let point = parse_point(point_str)?;
        let exists = if args.solid_only {
            map.solid_exists(point.x, point.y, layer)
        } else {
            map.obstacle_exists(point.x, point.y, layer)
        };
        let kind = if args.solid_only { "solid obstacle" } else { "obstacle" };
        println!("{kind} at ({}, {}): {exists}", point.x, point.y);
    } else if let Some(actor_str) = &args.actor {
        let position = parse_point(actor_str)?;
        let sensors = SensorSet::from_settings(&config.sensors);
        let readings = sensors.read(position, mode, layer, &map);

        let named = [
            ("A", &sensors.a, readings.a),
            ("B", &sensors.b, readings.b),
            ("C", &sensors.c, readings.c),
            ("D", &sensors.d, readings.d),
            ("M", &sensors.m, readings.m),
            ("N", &sensors.n, readings.n),
        ];
        for (name, sensor, found) in named {
            let rect = sensor.world_rect(position, mode);
            match found {
                Some(found) => println!(
                    "{name}: {}",
                    describe_obstacle(
                        index_of(&level, found),
                        found,
                        leading_point(rect, mode),
                        mode.ground_direction()
                    )
                ),
                None => println!("{name}: nothing"),
            }
        }
        println!(
            "grounded={} ceiling={} blocked_left={} blocked_right={}",
            readings.is_grounded(),
            readings.touches_ceiling(),
            readings.blocked_left(),
            readings.blocked_right()
        );
    } else {
        return Err(PhysicsError::InvalidArgument {
            reason: "one of --probe, --point or --actor is required".to_string(),
        });
    }

    Ok(())
}
