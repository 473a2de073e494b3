//! Primitivas compostas: calibração, toque, aproximação e aríete

use tilenav_core::types::{DistanceSample, ReflectanceSample};

use crate::error::{NavError, NavResult};
use crate::locator::ObjectLocator;
use crate::robot::Robot;

/// Ré antes de investir (graus de roda)
pub const RAM_BACKUP_DEG: f32 = 360.0 * 1.5;
/// Investida (graus de roda)
pub const RAM_CHARGE_DEG: f32 = 360.0 * 5.0;
pub const RAM_SPEED: f32 = 900.0;

/// Espera o operador apertar o botão, lê o chão e anuncia o valor.
///
/// Bloqueia indefinidamente até o toque.
pub fn calibrate(robot: &mut Robot) -> NavResult<ReflectanceSample> {
    tracing::info!("waiting for operator button");
    robot.wait_for_press()?;

    let sample = robot.read_reflectance()?;
    robot.feedback_mut().speak(&sample.value.to_string());
    tracing::info!(value = sample.value, "calibration reading");
    Ok(sample)
}

/// Anda em frente até o para-choque encostar em algo
pub fn move_until_touching(robot: &mut Robot, speed: f32) -> NavResult<()> {
    robot.with_stop_guard(|robot| {
        robot.run_forever(speed)?;
        while !robot.is_pressed()? {
            robot.sleep_poll();
        }
        tracing::info!("touching");
        Ok(())
    })
}

/// Varre; enquanto nada aparece, avança `search_advance_deg` e varre de novo.
///
/// Falha com [`NavError::ObjectNotFound`] após `max_search_attempts` varreduras.
pub fn approach_object(
    robot: &mut Robot,
    locator: &ObjectLocator,
    arc_deg: f32,
    threshold: DistanceSample,
) -> NavResult<DistanceSample> {
    let attempts = robot.config().max_search_attempts;
    let advance = robot.config().search_advance_deg;
    let speed = robot.config().default_speed;

    for attempt in 1..=attempts {
        let result = locator.locate(robot, arc_deg, threshold)?;
        if result.found() {
            tracing::info!(attempt, mm = result.distance().mm, "object acquired");
            return Ok(result.distance());
        }

        if attempt < attempts {
            tracing::debug!(attempt, advance, "advancing before next sweep");
            robot.move_to_rel(advance, speed)?;
        }
    }

    Err(NavError::ObjectNotFound { attempts })
}

/// Avança em direção a um objeto medido (fração calibrada da distância)
pub fn advance_to_object(robot: &mut Robot, distance: DistanceSample) -> NavResult<()> {
    if distance.is_not_found() {
        return Err(NavError::InvalidConfig(
            "cannot advance toward an object that was not found".into(),
        ));
    }
    let degrees = 360.0 * (distance.mm as f32 / robot.config().approach_mm_per_rev);
    let speed = robot.config().default_speed;
    tracing::debug!(mm = distance.mm, degrees, "advance to object");
    robot.move_to_rel(degrees, speed)
}

/// Dá ré e investe em alta velocidade
pub fn ram(robot: &mut Robot) -> NavResult<()> {
    let speed = robot.config().default_speed;
    robot.move_to_rel(-RAM_BACKUP_DEG, speed)?;
    robot.move_to_rel(RAM_CHARGE_DEG, RAM_SPEED)
}

/// Investe enquanto o sensor de chão ainda vê a pista.
///
/// Limitado a `max_search_attempts` investidas; devolve quantas foram feitas.
pub fn ram_until_off_course(robot: &mut Robot) -> NavResult<u32> {
    let limit = robot.config().max_search_attempts;
    let mut rams = 0;

    while robot.on_course()? {
        if rams == limit {
            tracing::warn!(rams, "still on course after ram limit");
            break;
        }
        ram(robot)?;
        rams += 1;
    }

    Ok(rams)
}
