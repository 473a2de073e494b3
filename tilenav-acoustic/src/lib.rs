//! # 🔊 tilenav-acoustic — Ultrassom e Alto-falante
//!
//! - [`UltrasonicSensor`]: implementa `Sensor<Reading = DistanceSample>`,
//!   saturando no alcance máximo do sensor.
//! - [`Speaker`]: implementa `Feedback` (bipes, tons e fala), registrando tudo
//!   o que emitiu.
//!
//! ## Exemplo
//!
//! ```
//! use tilenav_acoustic::{Speaker, UltrasonicSensor};
//! use tilenav_core::traits::{Feedback, Sensor};
//!
//! let mut sonar = UltrasonicSensor::scripted([300, 9000]);
//! assert_eq!(sonar.read().unwrap().mm, 300);
//! assert_eq!(sonar.read().unwrap().mm, 2550);
//!
//! let mut speaker = Speaker::muted();
//! speaker.beep();
//! assert_eq!(speaker.beeps(), 1);
//! ```

pub mod error;
pub mod speaker;
pub mod ultrasonic;

pub use error::{AcousticError, AcousticResult};
pub use speaker::{Speaker, Utterance};
pub use ultrasonic::{MAX_RANGE_MM, UltrasonicConfig, UltrasonicSensor};
