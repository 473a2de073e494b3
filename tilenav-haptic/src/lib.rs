//! # 🤚 tilenav-haptic — Percepção Háptica
//!
//! Sensor de toque usado como para-choque (interrompe a varredura ao colidir)
//! e como botão do operador (calibração e reconhecimento de falha).
//!
//! ## Exemplo
//!
//! ```
//! use tilenav_haptic::TouchSensor;
//! use tilenav_core::traits::Sensor;
//!
//! let mut touch = TouchSensor::scripted([false, true]);
//! assert!(!touch.read().unwrap().pressed);
//! assert!(touch.read().unwrap().pressed);
//! ```

pub mod error;
pub mod touch;

pub use error::{HapticError, HapticResult};
pub use touch::{TouchConfig, TouchSensor};
