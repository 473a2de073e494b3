//! Localizador de objeto: varredura rotacional com histerese
//!
//! ```text
//!   leitura à frente ≤ limiar? ── sim ──► Found (sem varrer)
//!            │ não
//!   gira -arco/2, assenta, inicia giro de +arco sem esperar
//!   a cada amostra:
//!     toque?                          ──► para, Contact
//!     já achou e leitura > melhor?    ──► para, Found(melhor)
//!     leitura ≤ limiar e < melhor     ──► melhor = leitura
//!   arco completo sem achar           ──► volta -arco/2, NotFound
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tilenav_core::config::NavConfig;
use tilenav_core::types::DistanceSample;

use crate::error::{NavError, NavResult};
use crate::robot::Robot;

/// Resultado de uma varredura
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SweepResult {
    /// Leitura mais próxima dentro do limiar e o ângulo (relativo ao rumo
    /// anterior à varredura) em que foi vista
    Found {
        distance: DistanceSample,
        angle_offset: f32,
    },
    /// O para-choque encostou durante a varredura
    Contact { angle_offset: f32 },
    NotFound,
}

impl SweepResult {
    pub fn found(&self) -> bool {
        !matches!(self, SweepResult::NotFound)
    }

    /// Distância medida; zero no contato, sentinela se não achou
    pub fn distance(&self) -> DistanceSample {
        match self {
            SweepResult::Found { distance, .. } => *distance,
            SweepResult::Contact { .. } => DistanceSample::ZERO,
            SweepResult::NotFound => DistanceSample::NOT_FOUND,
        }
    }

    pub fn angle_offset(&self) -> f32 {
        match self {
            SweepResult::Found { angle_offset, .. } | SweepResult::Contact { angle_offset } => {
                *angle_offset
            }
            SweepResult::NotFound => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectLocator {
    pub fast_path: bool,
    /// Velocidade das rodas durante a varredura
    pub sweep_speed: f32,
    /// Pausa após girar ao início do arco
    pub settle: Duration,
    /// Velocidade do giro até o início do arco
    pub turn_speed: f32,
    /// Velocidade do giro de volta quando nada é achado
    pub return_speed: f32,
    /// Giro de volta após passar do mínimo (0 = desligado)
    pub recenter_deg: f32,
}

impl ObjectLocator {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            fast_path: config.sweep_fast_path,
            sweep_speed: config.sweep_speed,
            settle: config.sweep_settle(),
            turn_speed: config.default_speed,
            return_speed: config.retreat_speed,
            recenter_deg: config.recenter_deg,
        }
    }

    /// Varre `arc_deg` graus centrados no rumo atual procurando algo a no
    /// máximo `threshold`.
    pub fn locate(
        &self,
        robot: &mut Robot,
        arc_deg: f32,
        threshold: DistanceSample,
    ) -> NavResult<SweepResult> {
        if !arc_deg.is_finite() || arc_deg <= 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "sweep arc must be a positive number of degrees, got {}",
                arc_deg
            )));
        }

        if self.fast_path {
            let ahead = robot.read_distance()?;
            if ahead.within(threshold) {
                tracing::info!(mm = ahead.mm, "object straight ahead");
                return Ok(SweepResult::Found {
                    distance: ahead,
                    angle_offset: 0.0,
                });
            }
        }

        robot.with_stop_guard(|robot| self.sweep(robot, arc_deg, threshold))
    }

    fn sweep(
        &self,
        robot: &mut Robot,
        arc_deg: f32,
        threshold: DistanceSample,
    ) -> NavResult<SweepResult> {
        let half = arc_deg / 2.0;
        let origin = robot.drive().heading_deg();

        robot.rotate(-half, self.turn_speed)?;
        robot.sleep(self.settle);
        robot.drive_mut().start_rotation(arc_deg, self.sweep_speed)?;
        tracing::debug!(arc_deg, threshold = threshold.mm, "sweep started");

        let mut best: Option<(DistanceSample, f32)> = None;

        while robot.drive().is_running() {
            let distance = robot.read_distance()?;
            let angle = robot.drive().heading_deg() - origin;
            tracing::debug!(mm = distance.mm, angle, "sweep sample");

            if robot.is_pressed()? {
                robot.stop()?;
                tracing::info!(angle, "contact during sweep");
                return Ok(SweepResult::Contact { angle_offset: angle });
            }

            if let Some((nearest, at)) = best {
                if distance > nearest {
                    robot.stop()?;
                    tracing::info!(mm = nearest.mm, angle = at, "object located");
                    if self.recenter_deg > 0.0 {
                        robot.rotate(-self.recenter_deg, self.return_speed)?;
                    }
                    return Ok(SweepResult::Found {
                        distance: nearest,
                        angle_offset: at,
                    });
                }
            }

            if distance.within(threshold) && best.is_none_or(|(nearest, _)| distance < nearest) {
                best = Some((distance, angle));
            }

            robot.sleep_poll();
        }

        robot.stop()?;

        match best {
            Some((distance, angle_offset)) => {
                tracing::info!(mm = distance.mm, angle = angle_offset, "object located at sweep end");
                Ok(SweepResult::Found {
                    distance,
                    angle_offset,
                })
            }
            None => {
                tracing::warn!(arc_deg, threshold = threshold.mm, "nothing within threshold");
                robot.rotate(-half, self.return_speed)?;
                Ok(SweepResult::NotFound)
            }
        }
    }
}

impl Default for ObjectLocator {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}
