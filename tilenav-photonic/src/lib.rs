//! # 📷 tilenav-photonic — Percepção Fotônica
//!
//! Implementa o sensor de cor em modo refletância usando o trait `Sensor` e a
//! classificação de cada leitura em preto / branco / indeterminado.
//!
//! ## Exemplo
//!
//! ```
//! use tilenav_photonic::{ColorClass, ColorSensor, Thresholds};
//! use tilenav_core::traits::Sensor;
//!
//! let thresholds = Thresholds::new(10, 40).unwrap();
//! let mut sensor = ColorSensor::scripted([5, 25, 60]);
//!
//! let classes: Vec<ColorClass> = (0..3)
//!     .map(|_| thresholds.classify(sensor.read().unwrap()))
//!     .collect();
//! assert_eq!(classes, [ColorClass::Black, ColorClass::Indeterminate, ColorClass::White]);
//! ```

pub mod classify;
pub mod color;
pub mod error;

pub use classify::{ColorClass, Thresholds, edge_classes};
pub use color::{ColorConfig, ColorSensor};
pub use error::{PhotonicError, PhotonicResult};
