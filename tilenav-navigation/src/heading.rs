//! Corretor de rumo: busca em zigue-zague pela linha perdida
//!
//! ```text
//!   tentativa n:
//!     lado preferido  → passos de 10° até 90°, lendo o chão após cada passo
//!                       esgotou? volta ao ângulo inicial
//!     lado oposto     → idem
//!     ambos falharam  → ré, giro de afastamento, nova tentativa
//!   após max_correction_attempts tentativas → CorrectionFailed
//! ```
//!
//! O corretor só gira com os motores em posição relativa; nunca há giro
//! contínuo durante a busca.

use serde::{Deserialize, Serialize};
use tilenav_core::config::NavConfig;
use tilenav_core::types::TurnDirection;

use crate::error::{NavError, NavResult};
use crate::robot::Robot;

/// Resultado de uma correção bem sucedida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Lado em que a linha foi reencontrada (novo `HeadingState`)
    pub direction: TurnDirection,
    /// Ciclos de busca usados (1 = achou sem recuar)
    pub attempts: u32,
    /// Passos de giro dados no total
    pub steps: u32,
}

/// Parâmetros da busca
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingCorrector {
    pub step_deg: f32,
    pub steps_per_side: u32,
    pub backup_deg: f32,
    pub backup_speed: f32,
    pub retreat_rotation_deg: f32,
    pub retreat_speed: f32,
    pub max_attempts: u32,
}

impl HeadingCorrector {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            step_deg: config.correction_step_deg,
            steps_per_side: config.correction_steps(),
            backup_deg: config.backup_deg,
            backup_speed: config.backup_speed,
            retreat_rotation_deg: config.retreat_rotation_deg,
            retreat_speed: config.retreat_speed,
            max_attempts: config.max_correction_attempts,
        }
    }

    /// Procura a linha começando por `preferred`, girando a `speed`.
    ///
    /// Deve ser chamado com os motores parados.
    pub fn correct(
        &self,
        robot: &mut Robot,
        preferred: TurnDirection,
        speed: f32,
    ) -> NavResult<Correction> {
        robot.with_stop_guard(|robot| self.search(robot, preferred, speed))
    }

    fn search(&self, robot: &mut Robot, preferred: TurnDirection, speed: f32) -> NavResult<Correction> {
        let mut steps = 0;

        for attempt in 1..=self.max_attempts {
            let mut side = preferred;
            for _ in 0..2 {
                if self.search_side(robot, side, speed, &mut steps)? {
                    tracing::info!(?side, attempt, steps, "line reacquired");
                    return Ok(Correction {
                        direction: side,
                        attempts: attempt,
                        steps,
                    });
                }
                side = side.flip();
            }

            // `side` voltou a `preferred`; o último lado buscado foi o oposto
            let last_searched = side.flip();
            tracing::warn!(attempt, "line not found on either side, backing up");
            robot.move_to_rel(-self.backup_deg, self.backup_speed)?;
            robot.rotate(
                last_searched.flip().signed(self.retreat_rotation_deg),
                self.retreat_speed,
            )?;
        }

        tracing::error!(attempts = self.max_attempts, "heading correction failed");
        Err(NavError::CorrectionFailed {
            attempts: self.max_attempts,
        })
    }

    /// Um lado da busca. Devolve `true` se a linha apareceu; senão restaura o
    /// ângulo em que o lado começou.
    fn search_side(
        &self,
        robot: &mut Robot,
        side: TurnDirection,
        speed: f32,
        steps: &mut u32,
    ) -> NavResult<bool> {
        for n in 1..=self.steps_per_side {
            robot.rotate(side.signed(self.step_deg), speed)?;
            *steps += 1;

            let class = robot.classify()?;
            tracing::debug!(?side, step = n, ?class, "correction step");
            if class.is_known() {
                return Ok(true);
            }
        }

        let swept = self.step_deg * self.steps_per_side as f32;
        robot.rotate(-side.signed(swept), speed)?;
        Ok(false)
    }
}

impl Default for HeadingCorrector {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}
