//! Erros do sensor de toque

use thiserror::Error;
use tilenav_core::traits::SensorError;

pub type HapticResult<T> = Result<T, HapticError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HapticError {
    #[error("Touch sensor read failed: {0}")]
    ReadFailed(String),

    #[error("Touch sample rate must be within 1..=10000 Hz, got {0}")]
    InvalidSampleRate(u32),

    #[error("Touch sensor not ready")]
    NotReady,

    /// Porta desconectada ou curto no para-choque
    #[error("Bumper wiring fault: {0}")]
    Wiring(String),
}

impl From<HapticError> for SensorError {
    fn from(err: HapticError) -> Self {
        match err {
            HapticError::NotReady => SensorError::NotInitialized,
            HapticError::Wiring(msg) => SensorError::Hardware(msg),
            err @ HapticError::InvalidSampleRate(_) => SensorError::InvalidConfig(err.to_string()),
            HapticError::ReadFailed(msg) => SensorError::ReadFailed(msg),
        }
    }
}
