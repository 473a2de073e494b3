//! Contador de ladrilhos
//!
//! Anda em linha reta contando bordas de ladrilho até atingir o alvo.
//!
//! ```text
//!   amostra ──► classifica ──┬─► Indeterminado × (limiar+1) ─► para, corrige, empurra, retoma
//!                            └─► BoundaryDetector ─► borda? ─► conta, bipa
//! ```
//!
//! O [`BoundaryDetector`] é uma máquina de estados pura: uma borda conta
//! quando a cor anterior é a de saída, a atual é a de chegada, a trava
//! `can_count` está armada e já foram vistas amostras de saída suficientes.
//! Depois de contar, a trava só rearma com uma nova amostra de saída, então
//! uma borda larga nunca conta duas vezes.

use serde::{Deserialize, Serialize};
use tilenav_core::config::NavConfig;
use tilenav_core::types::{BoundaryEdge, HeadingPreference, HeadingState};
use tilenav_photonic::{ColorClass, edge_classes};

use crate::error::NavResult;
use crate::heading::HeadingCorrector;
use crate::robot::Robot;

// ═══════════════════════════════════════════════════════════════════════════════
// DETECTOR DE BORDA
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryDetector {
    departing: ColorClass,
    arriving: ColorClass,
    min_departing_samples: u32,
    /// Última classe conhecida (preto ou branco)
    previous: Option<ColorClass>,
    can_count: bool,
    /// Amostras de saída vistas desde a última borda contada
    departing_seen: u32,
}

impl BoundaryDetector {
    pub fn new(edge: BoundaryEdge, min_departing_samples: u32) -> Self {
        let (departing, arriving) = edge_classes(edge);
        Self {
            departing,
            arriving,
            min_departing_samples,
            previous: None,
            can_count: true,
            departing_seen: 0,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(config.edge, config.min_departing_samples)
    }

    /// Alimenta uma amostra. Devolve `true` se ela fecha uma borda.
    pub fn observe(&mut self, class: ColorClass) -> bool {
        if class == self.departing {
            self.departing_seen += 1;
        }

        let counted = self.previous == Some(self.departing)
            && class == self.arriving
            && self.can_count
            && self.departing_seen >= self.min_departing_samples;

        if counted {
            self.departing_seen = 0;
            self.can_count = false;
        } else if class == self.departing {
            self.can_count = true;
        }

        if class.is_known() {
            self.previous = Some(class);
        }

        counted
    }

    /// Esquece a cor anterior e rearma a trava (após uma correção)
    pub fn reset(&mut self) {
        self.previous = None;
        self.can_count = true;
    }

    pub fn previous(&self) -> Option<ColorClass> {
        self.previous
    }

    pub fn can_count(&self) -> bool {
        self.can_count
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTADOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Resultado de `move_for_tiles`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRun {
    pub tiles: u32,
    /// Estado de rumo a passar para a próxima chamada
    pub heading: HeadingState,
    /// Correções de rumo feitas no caminho
    pub corrections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileCounter {
    pub edge: BoundaryEdge,
    pub min_departing_samples: u32,
    /// Indeterminados consecutivos tolerados antes de declarar a linha perdida
    pub debounce_threshold: u32,
    pub nudge_deg: f32,
    pub nudge_speed: f32,
    pub correction_speed: f32,
    pub preference: HeadingPreference,
    pub corrector: HeadingCorrector,
}

impl TileCounter {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            edge: config.edge,
            min_departing_samples: config.min_departing_samples,
            debounce_threshold: config.debounce_threshold,
            nudge_deg: config.nudge_deg,
            nudge_speed: config.default_speed,
            correction_speed: config.correction_speed,
            preference: config.heading_preference,
            corrector: HeadingCorrector::from_config(config),
        }
    }

    /// Anda em frente a `speed` até contar `target` bordas.
    ///
    /// Os dois motores param na saída, inclusive por erro.
    pub fn move_for_tiles(
        &self,
        robot: &mut Robot,
        target: u32,
        speed: f32,
        heading: HeadingState,
    ) -> NavResult<TileRun> {
        if target == 0 {
            return Ok(TileRun {
                tiles: 0,
                heading,
                corrections: 0,
            });
        }

        tracing::info!(target, speed, edge = ?self.edge, "counting tiles");
        robot.with_stop_guard(|robot| self.run(robot, target, speed, heading))
    }

    fn run(
        &self,
        robot: &mut Robot,
        target: u32,
        speed: f32,
        mut heading: HeadingState,
    ) -> NavResult<TileRun> {
        let mut detector = BoundaryDetector::new(self.edge, self.min_departing_samples);
        let mut tiles = 0;
        let mut corrections = 0;
        let mut lost = 0;

        robot.run_forever(speed)?;

        while tiles < target {
            let class = robot.classify()?;
            tracing::debug!(?class, tiles, "tile sample");

            if class.is_known() {
                lost = 0;
            } else {
                lost += 1;
            }

            if lost > self.debounce_threshold {
                tracing::warn!(lost, tiles, "line lost");
                robot.stop()?;

                let preferred = heading.preferred(self.preference);
                let correction = self.corrector.correct(robot, preferred, self.correction_speed)?;
                heading = HeadingState::new(correction.direction);
                robot.rotate(-correction.direction.signed(self.nudge_deg), self.nudge_speed)?;

                detector.reset();
                lost = 0;
                corrections += 1;

                robot.run_forever(speed)?;
                robot.sleep_poll();
                continue;
            }

            if detector.observe(class) {
                tiles += 1;
                tracing::info!(tiles, target, "tile counted");
                robot.beep();
            }

            robot.sleep_poll();
        }

        Ok(TileRun {
            tiles,
            heading,
            corrections,
        })
    }
}

impl Default for TileCounter {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}
