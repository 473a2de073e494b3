//! # Prelude — Re-exportações Convenientes
//!
//! ```
//! use tilenav_core::prelude::*;
//! ```

// Traits fundamentais
pub use crate::traits::{
    // Base
    TileComponent,
    // Percepção
    Sensor,
    SensorError,
    ReflectanceSensor,
    ContactSensor,
    DistanceSensor,
    // Atuação
    Actuator,
    ActuatorError,
    ActuatorStatus,
    DriveMotor,
    MotorCommand,
    // Operador
    Feedback,
    Tone,
};

// Tipos
pub use crate::types::{
    BoundaryEdge,
    Contact,
    DistanceSample,
    HeadingPreference,
    HeadingState,
    ReflectanceSample,
    TurnDirection,
};

// Tempo e configuração
pub use crate::clock::{Clock, SimClock, SystemClock};
pub use crate::config::{ConfigError, NavConfig};
pub use crate::source::SampleSource;
