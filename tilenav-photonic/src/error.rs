//! Erros específicos do módulo fotônico

use thiserror::Error;
use tilenav_core::traits::SensorError;

pub type PhotonicResult<T> = Result<T, PhotonicError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotonicError {
    #[error("Color sensor read failed: {0}")]
    ReadFailed(String),

    #[error("Invalid thresholds: black_max ({black_max}) must be below white_min ({white_min})")]
    InvalidThresholds { black_max: i32, white_min: i32 },

    #[error("Calibration span too narrow: black={black}, white={white}")]
    NarrowCalibration { black: i32, white: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sensor not ready")]
    NotReady,

    #[error("Hardware error: {0}")]
    Hardware(String),
}

// Conversão para SensorError do core
impl From<PhotonicError> for SensorError {
    fn from(err: PhotonicError) -> Self {
        match err {
            PhotonicError::NotReady => SensorError::NotInitialized,
            PhotonicError::Hardware(msg) => SensorError::Hardware(msg),
            PhotonicError::InvalidConfig(msg) => SensorError::InvalidConfig(msg),
            err @ (PhotonicError::InvalidThresholds { .. }
            | PhotonicError::NarrowCalibration { .. }) => {
                SensorError::CalibrationFailed(err.to_string())
            }
            other => SensorError::ReadFailed(other.to_string()),
        }
    }
}
