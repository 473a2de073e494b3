//! # 🧭 tilenav-navigation — Laço de Navegação
//!
//! As três decisões algorítmicas do robô, sobre o rig [`Robot`]:
//!
//! | Componente | Entrada | Saída |
//! |:-----------|:--------|:------|
//! | [`TileCounter`] | alvo, velocidade, `HeadingState` | [`TileRun`] |
//! | [`HeadingCorrector`] | lado preferido, velocidade | [`Correction`] ou `CorrectionFailed` |
//! | [`ObjectLocator`] | arco, limiar | [`SweepResult`] |
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     MissionRunner                        │
//! │   Move · Rotate · CountTiles · Approach · Ram · Beep     │
//! │         ↓                 ↓                 ↓            │
//! │  ┌─────────────┐  ┌────────────────┐  ┌──────────────┐   │
//! │  │ TileCounter │─►│HeadingCorrector│  │ObjectLocator │   │
//! │  └─────────────┘  └────────────────┘  └──────────────┘   │
//! │         ↓                 ↓                 ↓            │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ Robot: DifferentialDrive · cor · toque · ultrassom │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use tilenav_core::prelude::*;
//! use tilenav_navigation::{CourseLayout, SimCourse, TileCounter};
//!
//! # fn main() -> Result<(), tilenav_navigation::NavError> {
//! let config = NavConfig::default();
//! let course = SimCourse::new(CourseLayout::default(), &config)?;
//! let mut robot = course.robot(config.clone())?;
//!
//! let run = TileCounter::from_config(&config)
//!     .move_for_tiles(&mut robot, 3, 180.0, HeadingState::default())?;
//! assert_eq!(run.tiles, 3);
//! assert_eq!(run.corrections, 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod heading;
pub mod locator;
pub mod mission;
pub mod primitives;
pub mod robot;
pub mod sim;
pub mod tiles;

pub use error::{NavError, NavResult};
pub use heading::{Correction, HeadingCorrector};
pub use locator::{ObjectLocator, SweepResult};
pub use mission::{Mission, MissionReport, MissionRunner, MissionStep};
pub use primitives::{
    advance_to_object, approach_object, calibrate, move_until_touching, ram, ram_until_off_course,
};
pub use robot::Robot;
pub use sim::{CourseLayout, ObjectPlacement, OperatorButton, SensorSources, SimCourse};
pub use tiles::{BoundaryDetector, TileCounter, TileRun};

#[cfg(test)]
mod tests;
