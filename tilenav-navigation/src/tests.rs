//! Testes do módulo tilenav-navigation

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::*;
use tilenav_acoustic::{Speaker, UltrasonicSensor};
use tilenav_actuator::{DifferentialDrive, DriveConfig};
use tilenav_core::prelude::*;
use tilenav_haptic::TouchSensor;

const BLACK: i32 = 6;
const WHITE: i32 = 54;
const LOST: i32 = 25;

fn course(config: &NavConfig) -> SimCourse {
    SimCourse::new(CourseLayout::default(), config).unwrap()
}

fn scripted_robot(
    config: NavConfig,
    floor: Vec<i32>,
    contact: SampleSource<bool>,
    distance: SampleSource<u32>,
) -> (Robot, SimCourse) {
    let course = course(&config);
    let robot = course
        .robot_with(
            config,
            SensorSources {
                reflectance: SampleSource::scripted(floor, LOST),
                contact,
                distance,
            },
        )
        .unwrap();
    (robot, course)
}

/// Roteiro de distâncias com contador de leituras
fn counted(samples: Vec<u32>) -> (SampleSource<u32>, Arc<AtomicUsize>) {
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = reads.clone();
    let source = SampleSource::live(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        samples[n.min(samples.len() - 1)]
    });
    (source, reads)
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTADOR DE LADRILHOS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_tiles_zero_target_returns_immediately() {
    let config = NavConfig::default();
    let (mut robot, course) = scripted_robot(
        config,
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let heading = HeadingState::new(TurnDirection::Right);
    let run = TileCounter::default()
        .move_for_tiles(&mut robot, 0, 180.0, heading)
        .unwrap();
    assert_eq!(run.tiles, 0);
    assert_eq!(run.heading, heading);
    assert!(course.left().history().is_empty());
}

#[test]
fn test_tiles_alternating_stream_counts_latch_once() {
    let config = NavConfig {
        edge: BoundaryEdge::WhiteToBlack,
        ..Default::default()
    };
    let floor = [vec![WHITE; 5], vec![BLACK; 5], vec![WHITE; 5], vec![BLACK; 5]].concat();
    let (mut robot, course) = scripted_robot(
        config.clone(),
        floor,
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let run = TileCounter::from_config(&config)
        .move_for_tiles(&mut robot, 2, 180.0, HeadingState::default())
        .unwrap();
    assert_eq!(run.tiles, 2);
    assert_eq!(run.corrections, 0);
    assert_eq!(course.speaker().beeps(), 2);
    // a segunda borda é a 16ª amostra
    assert_eq!(course.clock().now(), Duration::from_millis(16 * 50));
}

#[test]
fn test_tiles_line_loss_triggers_one_correction_with_motors_stopped() {
    let config = NavConfig::default();
    let floor = vec![BLACK, BLACK, BLACK, LOST, LOST, LOST, LOST, WHITE, BLACK, BLACK, WHITE];
    let (mut robot, course) = scripted_robot(
        config,
        floor,
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let run = TileCounter::default()
        .move_for_tiles(&mut robot, 1, 180.0, HeadingState::default())
        .unwrap();
    assert_eq!(run.tiles, 1);
    assert_eq!(run.corrections, 1);
    assert_eq!(run.heading.last, TurnDirection::Right);

    // para → passo de correção → empurrão oposto → retoma → para
    let history = course.left().history();
    assert!(
        matches!(
            history.as_slice(),
            [
                MotorCommand::RunForever { .. },
                MotorCommand::Stop,
                MotorCommand::RunToRelPos { delta: step, .. },
                MotorCommand::RunToRelPos { delta: nudge, .. },
                MotorCommand::RunForever { .. },
                MotorCommand::Stop,
            ] if *step > 0.0 && *nudge < 0.0
        ),
        "unexpected history: {history:?}"
    );
    assert!(!course.left().is_running());
}

#[test]
fn test_tiles_debounce_tolerates_short_ambiguity() {
    let config = NavConfig::default();
    let floor = vec![BLACK, BLACK, LOST, LOST, LOST, WHITE];
    let (mut robot, _course) = scripted_robot(
        config,
        floor,
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let run = TileCounter::default()
        .move_for_tiles(&mut robot, 1, 180.0, HeadingState::default())
        .unwrap();
    assert_eq!(run.tiles, 1);
    assert_eq!(run.corrections, 0);
}

#[derive(Debug)]
struct FailingFloor {
    reads_left: u32,
}

impl TileComponent for FailingFloor {
    fn name(&self) -> &str {
        "failing-floor"
    }
}

impl Sensor for FailingFloor {
    type Reading = ReflectanceSample;

    fn read(&mut self) -> Result<ReflectanceSample, SensorError> {
        if self.reads_left == 0 {
            return Err(SensorError::ReadFailed("i2c bus".into()));
        }
        self.reads_left -= 1;
        Ok(ReflectanceSample::new(BLACK))
    }
}

#[test]
fn test_tiles_error_path_stops_both_motors() {
    let config = NavConfig::default();
    let course = course(&config);
    let drive = DifferentialDrive::new(
        course.left().clone(),
        course.right().clone(),
        Arc::new(course.clock().clone()),
        DriveConfig::from(&config),
    )
    .unwrap();
    let mut robot = Robot::new(
        drive,
        Box::new(FailingFloor { reads_left: 3 }),
        Box::new(TouchSensor::released()),
        Box::new(UltrasonicSensor::scripted([2550])),
        Box::new(Speaker::muted()),
        config,
    )
    .unwrap();

    let result = TileCounter::default().move_for_tiles(&mut robot, 5, 360.0, HeadingState::default());
    assert!(matches!(result, Err(NavError::Sensor(SensorError::ReadFailed(_)))));
    assert!(!course.left().is_running());
    assert!(!course.right().is_running());
    assert_eq!(course.right().history().last(), Some(&MotorCommand::Stop));
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCALIZADOR
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_locate_stops_after_minimum() {
    let (distance, reads) = counted(vec![1000, 900, 700, 500, 300, 150, 200, 250, 300]);
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        distance,
    );

    let result = ObjectLocator::default()
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();

    assert_eq!(result.distance(), DistanceSample::new(150));
    // rápida + 6 leituras na varredura; parou na primeira que subiu
    assert_eq!(reads.load(Ordering::SeqCst), 7);
    assert!(!robot.drive().is_running());
    assert!(result.angle_offset() > -90.0 && result.angle_offset() < 0.0);
    assert!(course.heading_deg() < 0.0);
}

#[test]
fn test_locate_plateau_does_not_stop() {
    let (distance, reads) = counted(vec![1000, 400, 150, 150, 160]);
    let (mut robot, _course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        distance,
    );

    let result = ObjectLocator::default()
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();
    assert_eq!(result.distance(), DistanceSample::new(150));
    assert_eq!(reads.load(Ordering::SeqCst), 5);
}

#[test]
fn test_locate_not_found_restores_heading() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let result = ObjectLocator::default()
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();
    assert_eq!(result, SweepResult::NotFound);
    assert!(result.distance().is_not_found());
    assert!(course.heading_deg().abs() < 0.5);
    assert!(!robot.drive().is_running());
}

#[test]
fn test_locate_fast_path_inclusive() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(800),
    );

    let result = ObjectLocator::default()
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();
    assert_eq!(
        result,
        SweepResult::Found {
            distance: DistanceSample::new(800),
            angle_offset: 0.0
        }
    );
    assert!(course.left().history().is_empty());
}

#[test]
fn test_locate_rejects_invalid_arc_before_moving() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(100),
    );
    let locator = ObjectLocator::default();

    for arc in [0.0, -90.0, f32::NAN, f32::INFINITY] {
        let result = locator.locate(&mut robot, arc, DistanceSample::new(800));
        assert!(matches!(result, Err(NavError::InvalidConfig(_))), "arc {arc}");
    }
    assert!(course.left().history().is_empty());
    assert!(course.right().history().is_empty());
}

#[test]
fn test_locate_without_fast_path_always_sweeps() {
    let config = NavConfig {
        sweep_fast_path: false,
        ..Default::default()
    };
    let (distance, reads) = counted(vec![300, 300, 310]);
    let (mut robot, course) = scripted_robot(
        config.clone(),
        vec![BLACK],
        SampleSource::Constant(false),
        distance,
    );

    let result = ObjectLocator::from_config(&config)
        .locate(&mut robot, 90.0, DistanceSample::new(800))
        .unwrap();
    assert_eq!(result.distance(), DistanceSample::new(300));
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert!(!course.left().history().is_empty());
}

#[test]
fn test_locate_contact_aborts_sweep() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::scripted([false, false, true], true),
        SampleSource::Constant(2550),
    );

    let result = ObjectLocator::default()
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();
    assert!(matches!(result, SweepResult::Contact { .. }));
    assert_eq!(result.distance(), DistanceSample::ZERO);
    assert!(!course.left().is_running());
    assert!(!course.right().is_running());
}

#[test]
fn test_locate_recenter() {
    let config = NavConfig {
        recenter_deg: 5.0,
        ..Default::default()
    };
    let (distance, _reads) = counted(vec![1000, 500, 200, 400]);
    let (mut robot, course) = scripted_robot(
        config.clone(),
        vec![BLACK],
        SampleSource::Constant(false),
        distance,
    );

    let result = ObjectLocator::from_config(&config)
        .locate(&mut robot, 180.0, DistanceSample::new(800))
        .unwrap();
    assert_eq!(result.distance(), DistanceSample::new(200));
    // parou um pouco depois do mínimo e voltou 5°
    assert!(course.heading_deg() < result.angle_offset());
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRIMITIVAS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_calibrate_waits_for_button() {
    let config = NavConfig::default();
    let course = course(&config);
    let mut robot = course
        .robot_with(
            config,
            SensorSources {
                reflectance: SampleSource::Constant(33),
                contact: course.contact_source(),
                distance: SampleSource::Constant(2550),
            },
        )
        .unwrap();

    course.button().press_after(Duration::from_secs(1));
    let sample = calibrate(&mut robot).unwrap();

    assert_eq!(sample.value, 33);
    assert_eq!(course.speaker().spoken(), vec!["33".to_string()]);
    assert!(course.clock().now() >= Duration::from_secs(1));
}

#[test]
fn test_calibrated_robot_uses_captured_thresholds() {
    let config = NavConfig::default();
    let (robot, _course) = scripted_robot(
        config,
        vec![30],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    // padrão 10/40: 30 é indeterminado; calibrado em 20/80 passa a ser preto
    let mut robot = robot
        .calibrated(ReflectanceSample::new(20), ReflectanceSample::new(80))
        .unwrap();
    assert_eq!(robot.thresholds().black_max(), 40);
    assert_eq!(robot.classify().unwrap(), tilenav_photonic::ColorClass::Black);
}

#[test]
fn test_calibrated_rejects_narrow_span() {
    let config = NavConfig::default();
    let (robot, _course) = scripted_robot(
        config,
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let result = robot.calibrated(ReflectanceSample::new(30), ReflectanceSample::new(31));
    assert!(matches!(result, Err(NavError::Calibration(_))));
}

#[test]
fn test_move_until_touching() {
    let mut contact = vec![false; 10];
    contact.push(true);
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::scripted(contact, true),
        SampleSource::Constant(2550),
    );

    move_until_touching(&mut robot, 360.0).unwrap();
    assert!(!course.left().is_running());
    assert!((course.odometer_deg() - 180.0).abs() < 1.0);
}

#[test]
fn test_approach_gives_up_after_max_attempts() {
    let config = NavConfig {
        max_search_attempts: 3,
        ..Default::default()
    };
    let (mut robot, course) = scripted_robot(
        config.clone(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let locator = ObjectLocator::from_config(&config);
    let result = approach_object(&mut robot, &locator, 180.0, DistanceSample::new(400));
    assert_eq!(result, Err(NavError::ObjectNotFound { attempts: 3 }));
    // avançou entre as varreduras, não depois da última
    assert!((course.odometer_deg() - 720.0).abs() < 1e-2);
    assert!(course.heading_deg().abs() < 0.5);
}

#[test]
fn test_approach_advances_until_found() {
    let config = NavConfig::default();
    let course = course(&config);
    let (left, right) = (course.left().clone(), course.right().clone());
    let distance = SampleSource::live(move || {
        if (left.position() + right.position()) / 2.0 > 300.0 { 500 } else { 2550 }
    });
    let mut robot = course
        .robot_with(
            config.clone(),
            SensorSources {
                reflectance: SampleSource::Constant(BLACK),
                contact: SampleSource::Constant(false),
                distance,
            },
        )
        .unwrap();

    let locator = ObjectLocator::from_config(&config);
    let distance = approach_object(&mut robot, &locator, 180.0, DistanceSample::new(800)).unwrap();
    assert_eq!(distance, DistanceSample::new(500));
    assert!((course.odometer_deg() - 360.0).abs() < 1e-2);
}

#[test]
fn test_advance_to_object() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    advance_to_object(&mut robot, DistanceSample::new(400)).unwrap();
    assert!((course.odometer_deg() - 360.0).abs() < 1e-2);

    assert!(advance_to_object(&mut robot, DistanceSample::NOT_FOUND).is_err());
}

#[test]
fn test_ram() {
    let (mut robot, course) = scripted_robot(
        NavConfig::default(),
        vec![BLACK],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    ram(&mut robot).unwrap();
    assert!((course.odometer_deg() - 1260.0).abs() < 1e-2);
    assert_eq!(
        course.left().history(),
        vec![
            MotorCommand::RunToRelPos { delta: -540.0, speed: 360.0 },
            MotorCommand::RunToRelPos { delta: 1800.0, speed: 900.0 },
        ]
    );
}

#[test]
fn test_ram_until_off_course() {
    let (mut robot, _course) = scripted_robot(
        NavConfig::default(),
        vec![WHITE, BLACK, LOST],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );
    assert_eq!(ram_until_off_course(&mut robot).unwrap(), 2);
}

#[test]
fn test_ram_until_off_course_is_bounded() {
    let config = NavConfig {
        max_search_attempts: 2,
        ..Default::default()
    };
    let (mut robot, _course) = scripted_robot(
        config,
        vec![WHITE],
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );
    assert_eq!(ram_until_off_course(&mut robot).unwrap(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════════
// MISSÃO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_mission_runner_short_mission() {
    let config = NavConfig::default();
    let course = course(&config);
    let mut robot = course.robot(config.clone()).unwrap();

    let mission = Mission::new("short")
        .then(MissionStep::Move { degrees: 360.0, speed: None })
        .then(MissionStep::Rotate { degrees: 90.0, speed: Some(180.0) })
        .then(MissionStep::Beep);

    let report = MissionRunner::new(&config).run(&mut robot, &mission).unwrap();
    assert_eq!(report.steps, 3);
    assert_eq!(report.tiles, 0);
    assert_eq!(course.speaker().beeps(), 1);
    assert_eq!(course.speaker().tone_count(Tone::MISSION_END), 1);
    assert!((course.heading_deg() - 90.0).abs() < 1e-2);
}

#[test]
fn test_mission_aborts_on_error() {
    let config = NavConfig {
        max_search_attempts: 1,
        ..Default::default()
    };
    let course = course(&config);
    let mut robot = course.robot(config.clone()).unwrap();

    let mission = Mission::new("no tower")
        .then(MissionStep::Approach { arc_deg: 90.0, threshold_mm: 400 })
        .then(MissionStep::Beep);

    let result = MissionRunner::new(&config).run(&mut robot, &mission);
    assert_eq!(result, Err(NavError::ObjectNotFound { attempts: 1 }));
    assert_eq!(course.speaker().beeps(), 0);
    assert_eq!(course.speaker().tone_count(Tone::MISSION_END), 0);
    assert!(!course.left().is_running());
}

#[test]
fn test_mission_threads_heading_between_runs() {
    let config = NavConfig::default();
    let floor = vec![BLACK, BLACK, LOST, LOST, LOST, LOST, WHITE, BLACK, BLACK, WHITE];
    let (mut robot, _course) = scripted_robot(
        config.clone(),
        floor,
        SampleSource::Constant(false),
        SampleSource::Constant(2550),
    );

    let mission = Mission::new("tiles").then(MissionStep::CountTiles { tiles: 1, speed: 180.0 });
    let mut runner = MissionRunner::new(&config);
    let report = runner.run(&mut robot, &mission).unwrap();

    assert_eq!(report.corrections, 1);
    assert_eq!(report.heading.last, TurnDirection::Right);
    assert_eq!(runner.heading().last, TurnDirection::Right);
}
