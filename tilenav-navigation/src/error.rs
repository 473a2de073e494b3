//! Erros de navegação

use thiserror::Error;
use tilenav_core::config::ConfigError;
use tilenav_core::traits::{ActuatorError, SensorError};
use tilenav_acoustic::AcousticError;
use tilenav_haptic::HapticError;
use tilenav_photonic::PhotonicError;

pub type NavResult<T> = Result<T, NavError>;

/// Erros que atravessam o laço de controle até a fronteira de falha
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavError {
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    /// Linha perdida de vez: busca e recuo esgotados
    #[error("Heading correction failed after {attempts} attempts")]
    CorrectionFailed { attempts: u32 },

    /// Nenhuma varredura encontrou o objeto
    #[error("Object not found after {attempts} sweeps")]
    ObjectNotFound { attempts: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Calibration failed: {0}")]
    Calibration(String),
}

impl From<ConfigError> for NavError {
    fn from(err: ConfigError) -> Self {
        NavError::InvalidConfig(err.to_string())
    }
}

impl From<PhotonicError> for NavError {
    fn from(err: PhotonicError) -> Self {
        match err {
            PhotonicError::InvalidThresholds { .. } | PhotonicError::InvalidConfig(_) => {
                NavError::InvalidConfig(err.to_string())
            }
            PhotonicError::NarrowCalibration { .. } => NavError::Calibration(err.to_string()),
            other => NavError::Sensor(other.into()),
        }
    }
}

impl From<HapticError> for NavError {
    fn from(err: HapticError) -> Self {
        NavError::Sensor(err.into())
    }
}

impl From<AcousticError> for NavError {
    fn from(err: AcousticError) -> Self {
        NavError::Sensor(err.into())
    }
}

impl From<tilenav_actuator::ActuatorError> for NavError {
    fn from(err: tilenav_actuator::ActuatorError) -> Self {
        NavError::Actuator(err.into())
    }
}
