//! Erros da camada de atuador

use thiserror::Error;
use tilenav_core::traits::{ActuatorError as CoreActuatorError, ActuatorStatus};

pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Erros de motor e tração
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActuatorError {
    #[error("Motor speed must be within ±{max}°/s, got {dps}°/s")]
    SpeedOutOfRange { dps: f32, max: f32 },

    #[error("Invalid relative target: {0}°")]
    InvalidDelta(f32),

    /// Motor travado em `Fault` ou desligado por parada de emergência
    #[error("Motor latched in {0:?} state")]
    Latched(ActuatorStatus),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ActuatorError> for CoreActuatorError {
    fn from(err: ActuatorError) -> Self {
        match err {
            ActuatorError::SpeedOutOfRange { .. } | ActuatorError::InvalidDelta(_) => {
                CoreActuatorError::OutOfRange(err.to_string())
            }
            ActuatorError::Latched(_) => CoreActuatorError::Fault(err.to_string()),
            ActuatorError::InvalidConfig(_) => CoreActuatorError::CommandFailed(err.to_string()),
        }
    }
}
