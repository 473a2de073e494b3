//! Erros específicos do módulo acústico

use thiserror::Error;
use tilenav_core::traits::SensorError;

pub type AcousticResult<T> = Result<T, AcousticError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcousticError {
    #[error("Echo capture failed: {0}")]
    CaptureFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sensor not ready")]
    NotReady,

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Hardware error: {0}")]
    Hardware(String),

    #[error("Invalid range: {0}mm")]
    InvalidRange(u32),
}

// Conversão para SensorError do core
impl From<AcousticError> for SensorError {
    fn from(err: AcousticError) -> Self {
        match err {
            AcousticError::NotReady => SensorError::NotInitialized,
            AcousticError::Timeout(ms) => SensorError::Timeout(ms),
            AcousticError::Hardware(msg) => SensorError::Hardware(msg),
            AcousticError::InvalidConfig(msg) => SensorError::InvalidConfig(msg),
            AcousticError::InvalidRange(mm) => {
                SensorError::InvalidConfig(format!("Invalid range: {}mm", mm))
            }
            other => SensorError::ReadFailed(other.to_string()),
        }
    }
}
