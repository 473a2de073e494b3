//! Sequenciador de missão
//!
//! Uma [`Mission`] é uma lista ordenada de [`MissionStep`]s. O
//! [`MissionRunner`] executa os passos em ordem, levando o `HeadingState` e a
//! última distância medida de um passo para o outro. Qualquer erro aborta a
//! missão.

use serde::{Deserialize, Serialize};
use tilenav_core::config::NavConfig;
use tilenav_core::traits::Tone;
use tilenav_core::types::{DistanceSample, HeadingState};

use crate::error::{NavError, NavResult};
use crate::locator::ObjectLocator;
use crate::primitives;
use crate::robot::Robot;
use crate::tiles::TileCounter;

/// Passo de missão. Velocidades ausentes usam `default_speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum MissionStep {
    /// Anda em linha reta (graus de roda, negativo = ré)
    Move { degrees: f32, speed: Option<f32> },
    /// Gira o chassi (graus, positivo = horário)
    Rotate { degrees: f32, speed: Option<f32> },
    CountTiles { tiles: u32, speed: f32 },
    /// Varre e avança até achar o objeto
    Approach { arc_deg: f32, threshold_mm: u32 },
    /// Avança proporcionalmente à última distância medida
    AdvanceToObject,
    Ram,
    RamUntilOffCourse,
    UntilTouching { speed: f32 },
    Beep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub name: String,
    pub steps: Vec<MissionStep>,
}

impl Mission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Acrescenta um passo (builder)
    pub fn then(mut self, step: MissionStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `AdvanceToObject` exige um `Approach` antes
    pub fn validate(&self) -> NavResult<()> {
        let mut measured = false;
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                MissionStep::Approach { .. } => measured = true,
                MissionStep::AdvanceToObject if !measured => {
                    return Err(NavError::InvalidConfig(format!(
                        "step {index}: advance_to_object before any approach"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Curso da torre: 15 ladrilhos, curva, reta longa, três aproximações
    /// cada vez mais curtas e aríete até sair da pista.
    pub fn tower_course() -> Self {
        use MissionStep::*;

        Mission::new("tower")
            .then(Move { degrees: 320.0, speed: None })
            .then(Rotate { degrees: 90.0, speed: None })
            .then(Move { degrees: -90.0, speed: None })
            .then(CountTiles { tiles: 15, speed: 180.0 })
            .then(Rotate { degrees: 90.0, speed: None })
            .then(Move { degrees: 360.0 * 11.0, speed: Some(720.0) })
            .then(Approach { arc_deg: 180.0, threshold_mm: 1000 })
            .then(AdvanceToObject)
            .then(Approach { arc_deg: 260.0, threshold_mm: 700 })
            .then(AdvanceToObject)
            .then(Approach { arc_deg: 260.0, threshold_mm: 400 })
            .then(Ram)
            .then(RamUntilOffCourse)
            .then(Beep)
    }
}

/// Resumo de uma missão concluída
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionReport {
    pub mission: String,
    pub steps: usize,
    pub tiles: u32,
    pub corrections: u32,
    pub rams: u32,
    pub last_distance: Option<DistanceSample>,
    pub heading: HeadingState,
}

#[derive(Debug, Clone)]
pub struct MissionRunner {
    counter: TileCounter,
    locator: ObjectLocator,
    heading: HeadingState,
    last_distance: Option<DistanceSample>,
}

impl MissionRunner {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            counter: TileCounter::from_config(config),
            locator: ObjectLocator::from_config(config),
            heading: HeadingState::default(),
            last_distance: None,
        }
    }

    pub fn heading(&self) -> HeadingState {
        self.heading
    }

    pub fn run(&mut self, robot: &mut Robot, mission: &Mission) -> NavResult<MissionReport> {
        mission.validate()?;
        tracing::info!(mission = %mission.name, steps = mission.len(), "mission started");

        let mut report = MissionReport {
            mission: mission.name.clone(),
            steps: 0,
            tiles: 0,
            corrections: 0,
            rams: 0,
            last_distance: None,
            heading: self.heading,
        };

        for (index, step) in mission.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "mission step");
            self.step(robot, step, &mut report)?;
            report.steps += 1;
        }

        report.heading = self.heading;
        report.last_distance = self.last_distance;
        robot.feedback_mut().tone(Tone::MISSION_END);
        tracing::info!(mission = %mission.name, tiles = report.tiles, "mission complete");
        Ok(report)
    }

    fn step(&mut self, robot: &mut Robot, step: &MissionStep, report: &mut MissionReport) -> NavResult<()> {
        let default_speed = robot.config().default_speed;

        match *step {
            MissionStep::Move { degrees, speed } => {
                robot.move_to_rel(degrees, speed.unwrap_or(default_speed))?;
            }
            MissionStep::Rotate { degrees, speed } => {
                robot.rotate(degrees, speed.unwrap_or(default_speed))?;
            }
            MissionStep::CountTiles { tiles, speed } => {
                let run = self.counter.move_for_tiles(robot, tiles, speed, self.heading)?;
                self.heading = run.heading;
                report.tiles += run.tiles;
                report.corrections += run.corrections;
            }
            MissionStep::Approach { arc_deg, threshold_mm } => {
                let threshold = DistanceSample::new(threshold_mm);
                let distance = primitives::approach_object(robot, &self.locator, arc_deg, threshold)?;
                self.last_distance = Some(distance);
            }
            MissionStep::AdvanceToObject => {
                let distance = self.last_distance.ok_or_else(|| {
                    NavError::InvalidConfig("no measured distance to advance toward".into())
                })?;
                primitives::advance_to_object(robot, distance)?;
            }
            MissionStep::Ram => primitives::ram(robot)?,
            MissionStep::RamUntilOffCourse => {
                report.rams += primitives::ram_until_off_course(robot)?;
            }
            MissionStep::UntilTouching { speed } => primitives::move_until_touching(robot, speed)?,
            MissionStep::Beep => robot.beep(),
        }

        Ok(())
    }
}
