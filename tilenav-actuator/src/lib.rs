//! # 🦾 tilenav-actuator — Atuação
//!
//! Camada de atuação implementando os traits `Actuator` / `DriveMotor` do core.
//! Gerencia os dois motores de tração e converte comandos de alto nível
//! (andar, girar, parar) em comandos de roda.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          DifferentialDrive              │
//! │  move_to_rel() rotate() run_forever()   │
//! │  stop() wait_idle() stop_after()        │
//! │         ↓                   ↓           │
//! │  ┌──────────────┐  ┌──────────────┐     │
//! │  │ left (outB)  │  │ right (outC) │     │
//! │  │ DriveMotor   │  │ DriveMotor   │     │
//! │  └──────────────┘  └──────────────┘     │
//! └─────────────────────────────────────────┘
//!                   ↓
//!       Hardware (tacho motors) / SimClock
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::sync::Arc;
//! use tilenav_actuator::{DifferentialDrive, DriveConfig, MotorActuator, MotorPort};
//! use tilenav_core::clock::SimClock;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = SimClock::new();
//! let left = MotorActuator::named("left", MotorPort::B, clock.clone())?;
//! let right = MotorActuator::named("right", MotorPort::C, clock.clone())?;
//! let mut drive = DifferentialDrive::new(left, right, Arc::new(clock), DriveConfig::default())?;
//!
//! drive.rotate(90.0, 360.0)?;
//! assert!((drive.heading_deg() - 90.0).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Segurança
//!
//! - Os dois motores são sempre parados juntos, inclusive em caminhos de erro
//! - `stop()` sobre motor parado é no-op
//! - Movimentos bloqueantes têm timeout

pub mod drive;
pub mod error;
pub mod motor;
pub mod types;

pub use drive::{DifferentialDrive, DriveConfig};
pub use error::{ActuatorError, ActuatorResult};
pub use motor::{MotionMode, MotorActuator, MotorConfig, MotorState};
pub use types::{MAX_SPEED_DPS, MotorPort, MotorSpeed};
