//! Tração diferencial: dois motores sempre comandados em par
//!
//! Giro do chassi = rodas em posições relativas opostas, escaladas pela razão
//! de esterçamento. Todo caminho de saída para os dois motores juntos.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tilenav_core::clock::Clock;
use tilenav_core::config::NavConfig;
use tilenav_core::traits::{ActuatorError, DriveMotor};

use crate::error::{ActuatorError as LocalActuatorError, ActuatorResult};

/// Configuração da tração
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Graus de roda por grau de giro do chassi
    pub steering_ratio: f32,
    /// Intervalo de espera entre consultas de estado
    pub poll_interval: Duration,
    /// Tempo máximo de um movimento bloqueante
    pub motion_timeout: Duration,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::from(&NavConfig::default())
    }
}

impl From<&NavConfig> for DriveConfig {
    fn from(config: &NavConfig) -> Self {
        Self {
            steering_ratio: config.steering_ratio,
            poll_interval: config.poll_interval(),
            motion_timeout: config.motion_timeout(),
        }
    }
}

/// Dono único dos dois motores de tração
pub struct DifferentialDrive {
    left: Box<dyn DriveMotor>,
    right: Box<dyn DriveMotor>,
    clock: Arc<dyn Clock>,
    config: DriveConfig,
}

impl std::fmt::Debug for DifferentialDrive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifferentialDrive")
            .field("left", &self.left.name())
            .field("right", &self.right.name())
            .field("config", &self.config)
            .finish()
    }
}

impl DifferentialDrive {
    /// Cria a tração a partir de dois motores
    pub fn new(
        left: impl DriveMotor + 'static,
        right: impl DriveMotor + 'static,
        clock: Arc<dyn Clock>,
        config: DriveConfig,
    ) -> ActuatorResult<Self> {
        if !(config.steering_ratio > 0.0) {
            return Err(LocalActuatorError::InvalidConfig(
                "steering_ratio must be positive".into(),
            ));
        }
        if config.poll_interval.is_zero() {
            return Err(LocalActuatorError::InvalidConfig(
                "poll_interval must be > 0".into(),
            ));
        }

        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
            clock,
            config,
        })
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Espera cooperativa do laço de controle
    pub fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    /// Os dois motores em modo contínuo
    pub fn run_forever(&mut self, speed: f32) -> Result<(), ActuatorError> {
        let result = self
            .left
            .run_forever(speed)
            .and_then(|_| self.right.run_forever(speed));
        if let Err(err) = result {
            // nunca deixa uma roda girando sozinha
            let _ = self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Para os dois motores. Sempre tenta os dois; devolve o primeiro erro.
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        let left = self.left.stop();
        let right = self.right.stop();
        left.and(right)
    }

    /// Parada de emergência: os dois motores ficam travados em `Off` até
    /// o `reset()` de cada motor e recusam novos comandos
    pub fn emergency_stop(&mut self) -> Result<(), ActuatorError> {
        let left = self.left.emergency_stop();
        let right = self.right.emergency_stop();
        tracing::warn!("drive latched off");
        left.and(right)
    }

    /// Algum motor girando?
    pub fn is_running(&self) -> bool {
        self.left.is_running() || self.right.is_running()
    }

    /// Bloqueia até os dois motores pararem
    pub fn wait_idle(&mut self) -> Result<(), ActuatorError> {
        let start = self.clock.now();
        while self.is_running() {
            let waited = self.clock.now().saturating_sub(start);
            if waited >= self.config.motion_timeout {
                let _ = self.stop();
                tracing::error!(waited_ms = waited.as_millis() as u64, "motion timeout");
                return Err(ActuatorError::Timeout(waited.as_millis() as u64));
            }
            self.clock.sleep(self.config.poll_interval);
        }
        Ok(())
    }

    /// Anda em linha reta `degrees` graus de roda (negativo = ré)
    pub fn move_to_rel(&mut self, degrees: f32, speed: f32) -> Result<(), ActuatorError> {
        tracing::debug!(degrees, speed, "move_to_rel");
        self.start_pair(degrees, degrees, speed)?;
        self.wait_idle()
    }

    /// Gira o chassi `degrees` graus (positivo = horário) e espera
    pub fn rotate(&mut self, degrees: f32, speed: f32) -> Result<(), ActuatorError> {
        tracing::debug!(degrees, speed, "rotate");
        self.start_rotation(degrees, speed)?;
        self.wait_idle()
    }

    /// Inicia o giro sem esperar (varredura)
    pub fn start_rotation(&mut self, degrees: f32, speed: f32) -> Result<(), ActuatorError> {
        let wheel = degrees * self.config.steering_ratio;
        self.start_pair(wheel, -wheel, speed)
    }

    fn start_pair(&mut self, left: f32, right: f32, speed: f32) -> Result<(), ActuatorError> {
        let result = self
            .left
            .run_to_rel_pos(left, speed)
            .and_then(|_| self.right.run_to_rel_pos(right, speed));
        if let Err(err) = result {
            let _ = self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Rumo do chassi (graus) derivado da diferença entre as rodas
    pub fn heading_deg(&self) -> f32 {
        (self.left.position() - self.right.position()) / (2.0 * self.config.steering_ratio)
    }

    /// Avanço médio das rodas (graus de roda)
    pub fn odometer_deg(&self) -> f32 {
        (self.left.position() + self.right.position()) / 2.0
    }

    /// Para os dois motores e devolve `result`. Um erro de `result` tem
    /// precedência sobre uma falha ao parar.
    pub fn stop_after<T, E>(&mut self, result: Result<T, E>) -> Result<T, E>
    where
        E: From<ActuatorError>,
    {
        let stopped = self.stop();
        match result {
            Ok(value) => stopped.map(|_| value).map_err(E::from),
            Err(err) => {
                if let Err(stop_err) = stopped {
                    tracing::error!(%stop_err, "failed to stop motors after error");
                }
                Err(err)
            }
        }
    }
}
