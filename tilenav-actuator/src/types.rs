//! Tipos de dados para atuadores

use serde::{Deserialize, Serialize};

use crate::error::{ActuatorError, ActuatorResult};

/// Velocidade máxima de um motor de tração (graus de roda/s)
pub const MAX_SPEED_DPS: f32 = 1050.0;

/// Velocidade de motor (graus de roda por segundo)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorSpeed {
    /// Negativo = reverso, positivo = avante, 0 = parado
    pub dps: f32,
}

impl MotorSpeed {
    /// Cria nova velocidade de motor
    pub fn new(dps: f32) -> ActuatorResult<Self> {
        let speed = Self { dps };
        speed.validate()?;
        Ok(speed)
    }

    /// Valida se a velocidade está no range válido
    pub fn validate(&self) -> ActuatorResult<()> {
        if !self.dps.is_finite() || self.dps.abs() > MAX_SPEED_DPS {
            return Err(ActuatorError::SpeedOutOfRange {
                dps: self.dps,
                max: MAX_SPEED_DPS,
            });
        }
        Ok(())
    }
}

/// Porta de saída do bloco controlador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorPort {
    A,
    B,
    C,
    D,
}
