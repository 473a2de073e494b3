//! tilenav - robô navegador de ladrilhos
//! Interface de linha de comando sobre o curso simulado

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use tilenav_core::prelude::*;
use tilenav_navigation::{
    calibrate, CourseLayout, Mission, MissionRunner, NavResult, ObjectLocator, ObjectPlacement,
    Robot, SimCourse, TileCounter,
};
use tilenav_photonic::Thresholds;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tilenav")]
#[command(author = "Silvano Neto <dev@silvanoneto.com>")]
#[command(version = "2026.1.16")]
#[command(about = "tilenav - tile-course navigation robot", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct GlobalArgs {
    /// Load configuration from TILENAV_* environment variables (and .env)
    #[arg(long, global = true)]
    config_from_env: bool,

    /// Highest reading classified as black
    #[arg(long, global = true, value_name = "VALUE")]
    black_max: Option<i32>,

    /// Lowest reading classified as white
    #[arg(long, global = true, value_name = "VALUE")]
    white_min: Option<i32>,

    /// Tile boundary transition (black-to-white or white-to-black)
    #[arg(long, global = true, value_name = "EDGE")]
    edge: Option<BoundaryEdge>,

    /// Sensor polling interval in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    poll_ms: Option<u64>,

    /// Simulated delay before the operator acknowledges a fault
    #[arg(long, global = true, env = "TILENAV_ACK_AFTER_MS", default_value_t = 3000)]
    ack_after_ms: u64,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture black and white readings and derive thresholds
    Calibrate {
        /// Simulated delay before each operator press
        #[arg(long, value_name = "MS", default_value_t = 1000)]
        press_after_ms: u64,
    },

    /// Drive forward counting tile boundaries
    Tiles {
        /// Number of tiles to count
        #[arg(value_name = "COUNT")]
        count: u32,

        /// Wheel speed in degrees per second
        #[arg(short, long, default_value_t = 180.0)]
        speed: f32,

        /// Right wheel speed factor (below 1.0 drifts right)
        #[arg(long, default_value_t = 1.0)]
        drift: f32,
    },

    /// Sweep an arc looking for the nearest object
    Sweep {
        /// Sweep arc in degrees
        #[arg(long, default_value_t = 180.0)]
        arc: f32,

        /// Only objects nearer than this count (mm)
        #[arg(long, value_name = "MM", default_value_t = 800)]
        threshold_mm: u32,

        /// Simulated object bearing (degrees, positive = right)
        #[arg(long, default_value_t = 40.0, allow_hyphen_values = true)]
        bearing: f32,

        /// Simulated object range (mm)
        #[arg(long, value_name = "MM", default_value_t = 600.0)]
        range_mm: f32,
    },

    /// Run a full mission (tower course unless a JSON file is given)
    Mission {
        /// Mission file (.json)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "tilenav=debug" } else { "tilenav=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.global)?;
    let ack_after = Duration::from_millis(cli.global.ack_after_ms);

    match cli.command {
        Commands::Calibrate { press_after_ms } => {
            let course = SimCourse::new(CourseLayout::default(), &config)?;
            let report = on_course(&course, config, ack_after, |course, robot| {
                calibrate_command(course, robot, Duration::from_millis(press_after_ms))
            })?;
            print_json("Calibrated", &report)
        }

        Commands::Tiles { count, speed, drift } => {
            let layout = CourseLayout {
                right_wheel_scale: drift,
                ..Default::default()
            };
            let course = SimCourse::new(layout, &config)?;
            let run = on_course(&course, config, ack_after, |_, robot| {
                let counter = TileCounter::from_config(robot.config());
                counter.move_for_tiles(robot, count, speed, HeadingState::default())
            })?;
            print_json("Counted", &run)
        }

        Commands::Sweep { arc, threshold_mm, bearing, range_mm } => {
            let layout = CourseLayout {
                object: Some(ObjectPlacement {
                    bearing_deg: bearing,
                    range_mm,
                    ..Default::default()
                }),
                ..Default::default()
            };
            let course = SimCourse::new(layout, &config)?;
            let result = on_course(&course, config, ack_after, |_, robot| {
                let locator = ObjectLocator::from_config(robot.config());
                locator.locate(robot, arc, DistanceSample::new(threshold_mm))
            })?;
            print_json("Swept", &result)
        }

        Commands::Mission { file } => {
            let mission = match file {
                Some(path) => load_mission(&path)?,
                None => Mission::tower_course(),
            };
            mission.validate()?;

            let course = SimCourse::new(CourseLayout::tower(), &config)?;
            let runner_config = config.clone();
            let report = on_course(&course, config, ack_after, |_, robot| {
                MissionRunner::new(&runner_config).run(robot, &mission)
            })?;
            print_json("Completed", &report)
        }

        Commands::Config => print_json("Configuration", &config),
    }
}

/// Padrões (ou ambiente) com as flags por cima
fn resolve_config(args: &GlobalArgs) -> Result<NavConfig> {
    let mut config = if args.config_from_env {
        NavConfig::from_env()
    } else {
        NavConfig::default()
    };

    if let Some(black_max) = args.black_max {
        config.black_max = black_max;
    }
    if let Some(white_min) = args.white_min {
        config.white_min = white_min;
    }
    if let Some(edge) = args.edge {
        config.edge = edge;
    }
    if let Some(poll_ms) = args.poll_ms {
        config.poll_interval_ms = poll_ms;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_mission(path: &Path) -> Result<Mission> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read mission file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse mission file '{}'", path.display()))
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    eprintln!("{}", label.green().bold());
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct CalibrationReport {
    black: ReflectanceSample,
    white: ReflectanceSample,
    thresholds: Thresholds,
}

/// Preto na posição inicial, branco uma faixa adiante
fn calibrate_command(
    course: &SimCourse,
    robot: &mut Robot,
    press_after: Duration,
) -> NavResult<CalibrationReport> {
    course.button().press_after(press_after);
    let black = calibrate(robot)?;
    course.button().release();

    let speed = robot.config().default_speed;
    robot.move_to_rel(course.layout().stripe_deg, speed)?;

    course.button().press_after(press_after);
    let white = calibrate(robot)?;
    course.button().release();

    let thresholds = Thresholds::from_calibration(black, white)?;
    Ok(CalibrationReport { black, white, thresholds })
}

// ═══════════════════════════════════════════════════════════════════════════════
// FRONTEIRA DE FALHA
// ═══════════════════════════════════════════════════════════════════════════════

/// Roda `task` no robô do curso. Falha não recuperada: para, toca o alarme e
/// espera o operador apertar o botão antes de devolver o erro.
fn on_course<T>(
    course: &SimCourse,
    config: NavConfig,
    ack_after: Duration,
    task: impl FnOnce(&SimCourse, &mut Robot) -> NavResult<T>,
) -> Result<T> {
    let mut robot = course.robot(config)?;

    match task(course, &mut robot) {
        Ok(value) => Ok(value),
        Err(fault) => {
            halt(course, &mut robot, &fault, ack_after);
            Err(anyhow::Error::new(fault).context("mission aborted"))
        }
    }
}

fn halt(course: &SimCourse, robot: &mut Robot, fault: &dyn std::error::Error, ack_after: Duration) {
    tracing::error!(%fault, "unrecovered fault, waiting for operator");

    if let Err(e) = robot.emergency_stop() {
        tracing::error!(error = %e, "failed to latch motors off");
    }
    robot.feedback_mut().tone(Tone::FAULT);

    course.button().release();
    course.button().press_after(ack_after);
    if let Err(e) = robot.wait_for_press() {
        tracing::error!(error = %e, "operator button unreadable");
        return;
    }
    tracing::info!(at = ?robot.now(), "fault acknowledged");
}
