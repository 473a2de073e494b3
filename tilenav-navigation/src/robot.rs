//! Rig do robô: dono único da tração, dos sensores e do alto-falante

use std::time::Duration;

use tilenav_actuator::DifferentialDrive;
use tilenav_core::config::NavConfig;
use tilenav_core::traits::{ContactSensor, DistanceSensor, Feedback, ReflectanceSensor};
use tilenav_core::types::{DistanceSample, ReflectanceSample};
use tilenav_photonic::{ColorClass, Thresholds};

use crate::error::NavResult;

/// Hardware completo do robô.
///
/// Todas as primitivas de navegação recebem `&mut Robot`; nada mais comanda os
/// motores.
#[derive(Debug)]
pub struct Robot {
    drive: DifferentialDrive,
    reflectance: Box<ReflectanceSensor>,
    contact: Box<ContactSensor>,
    distance: Box<DistanceSensor>,
    feedback: Box<dyn Feedback>,
    config: NavConfig,
    thresholds: Thresholds,
}

impl Robot {
    /// Monta o robô. A configuração é validada aqui, uma única vez.
    pub fn new(
        drive: DifferentialDrive,
        reflectance: Box<ReflectanceSensor>,
        contact: Box<ContactSensor>,
        distance: Box<DistanceSensor>,
        feedback: Box<dyn Feedback>,
        config: NavConfig,
    ) -> NavResult<Self> {
        config.validate()?;
        let thresholds = Thresholds::from_config(&config)?;

        tracing::debug!(
            black_max = thresholds.black_max(),
            white_min = thresholds.white_min(),
            "robot assembled"
        );

        Ok(Self {
            drive,
            reflectance,
            contact,
            distance,
            feedback,
            config,
            thresholds,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Troca os limiares da configuração pelos de uma calibração.
    ///
    /// Consome o robô: só roda antes de uma missão tomar `&mut Robot`, então
    /// os limiares ficam fixos durante ela.
    pub fn calibrated(mut self, black: ReflectanceSample, white: ReflectanceSample) -> NavResult<Self> {
        let thresholds = Thresholds::from_calibration(black, white)?;
        tracing::info!(
            black_max = thresholds.black_max(),
            white_min = thresholds.white_min(),
            "thresholds calibrated"
        );
        self.thresholds = thresholds;
        Ok(self)
    }

    pub fn drive(&self) -> &DifferentialDrive {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut DifferentialDrive {
        &mut self.drive
    }

    pub fn feedback_mut(&mut self) -> &mut dyn Feedback {
        self.feedback.as_mut()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SENSORES
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn read_reflectance(&mut self) -> NavResult<ReflectanceSample> {
        Ok(self.reflectance.read()?)
    }

    /// Lê e classifica o chão
    pub fn classify(&mut self) -> NavResult<ColorClass> {
        let sample = self.read_reflectance()?;
        Ok(self.thresholds.classify(sample))
    }

    /// Sensor sobre preto ou branco?
    pub fn on_course(&mut self) -> NavResult<bool> {
        Ok(self.classify()?.is_known())
    }

    pub fn is_pressed(&mut self) -> NavResult<bool> {
        Ok(self.contact.read()?.pressed)
    }

    pub fn read_distance(&mut self) -> NavResult<DistanceSample> {
        Ok(self.distance.read()?)
    }

    /// Bloqueia até o sensor de toque ser pressionado
    pub fn wait_for_press(&mut self) -> NavResult<()> {
        while !self.is_pressed()? {
            self.sleep_poll();
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MOVIMENTO
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn move_to_rel(&mut self, degrees: f32, speed: f32) -> NavResult<()> {
        Ok(self.drive.move_to_rel(degrees, speed)?)
    }

    pub fn rotate(&mut self, degrees: f32, speed: f32) -> NavResult<()> {
        Ok(self.drive.rotate(degrees, speed)?)
    }

    pub fn run_forever(&mut self, speed: f32) -> NavResult<()> {
        Ok(self.drive.run_forever(speed)?)
    }

    pub fn stop(&mut self) -> NavResult<()> {
        Ok(self.drive.stop()?)
    }

    /// Trava os dois motores desligados (fronteira de falha)
    pub fn emergency_stop(&mut self) -> NavResult<()> {
        Ok(self.drive.emergency_stop()?)
    }

    /// Executa `f` e para os dois motores na saída, com sucesso ou erro
    pub fn with_stop_guard<T>(&mut self, f: impl FnOnce(&mut Self) -> NavResult<T>) -> NavResult<T> {
        let result = f(self);
        self.drive.stop_after(result)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TEMPO E SOM
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn sleep(&self, duration: Duration) {
        self.drive.sleep(duration);
    }

    /// Um intervalo de amostragem
    pub fn sleep_poll(&self) {
        self.drive.sleep(self.config.poll_interval());
    }

    pub fn now(&self) -> Duration {
        self.drive.clock().now()
    }

    pub fn beep(&mut self) {
        self.feedback.beep();
    }
}
