//! # 🧭 tilenav-core
//!
//! Núcleo do robô navegador de ladrilhos: traits de hardware, tipos
//! compartilhados, relógio e configuração imutável.
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! ## Módulos
//!
//! - [`traits`]: `Sensor`, `Actuator`, `DriveMotor`, `Feedback`
//! - [`types`]: leituras (`ReflectanceSample`, `Contact`, `DistanceSample`) e
//!   estado de rumo (`TurnDirection`, `HeadingState`)
//! - [`clock`]: `SystemClock` (hardware) e `SimClock` (tempo virtual)
//! - [`config`]: `NavConfig`, carregável de `TILENAV_*`
//! - [`source`]: `SampleSource`, origem das leituras dos sensores simulados
//!
//! ## Quick Start
//!
//! ```
//! use tilenav_core::prelude::*;
//!
//! let config = NavConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let heading = HeadingState::default();
//! assert_eq!(heading.preferred(config.heading_preference), TurnDirection::Right);
//! ```

pub mod clock;
pub mod config;
pub mod prelude;
pub mod source;
pub mod traits;
pub mod types;

pub use clock::{Clock, SimClock, SystemClock};
pub use config::{ConfigError, NavConfig};
pub use source::SampleSource;
