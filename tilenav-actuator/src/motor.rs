//! Motor de tração com tacômetro (simulado)
//!
//! A posição não é integrada a cada tick: ela é derivada sob demanda do tempo
//! do [`SimClock`] desde o último comando. O laço de controle avança o tempo
//! com `sleep()` e o motor "anda" sozinho.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tilenav_core::clock::{Clock, SimClock};
use tilenav_core::traits::{
    Actuator, ActuatorError as CoreActuatorError, ActuatorStatus, DriveMotor, MotorCommand,
    TileComponent,
};

use crate::error::{ActuatorError, ActuatorResult};
use crate::types::{MotorPort, MotorSpeed};

/// Modo de movimento em curso
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionMode {
    Idle,
    /// Velocidade com sinal (graus/s)
    Forever { speed: f32 },
    /// Alvo absoluto e velocidade absoluta
    ToTarget { target: f32, speed: f32 },
}

/// Estado interno do motor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorState {
    /// Posição no instante do último comando (graus de roda)
    pub anchor_position: f32,
    /// Instante do último comando
    pub anchor_time: Duration,
    /// Movimento em curso
    pub mode: MotionMode,
    /// Falha / desligado sobrepõem o status derivado do movimento
    #[serde(skip, default = "default_status")]
    pub latched_status: Option<ActuatorStatus>,
    /// Total de comandos aceitos
    pub commands: u64,
    /// Histórico de comandos aceitos
    pub history: Vec<MotorCommand>,
}

fn default_status() -> Option<ActuatorStatus> {
    None
}

impl MotorState {
    /// Cria novo estado
    pub fn new() -> Self {
        Self {
            anchor_position: 0.0,
            anchor_time: Duration::ZERO,
            mode: MotionMode::Idle,
            latched_status: None,
            commands: 0,
            history: Vec::new(),
        }
    }

    /// Posição e "ainda girando?" no instante `now`
    pub fn sample(&self, now: Duration, speed_scale: f32) -> (f32, bool) {
        let dt = now.saturating_sub(self.anchor_time).as_secs_f32();
        match self.mode {
            MotionMode::Idle => (self.anchor_position, false),
            MotionMode::Forever { speed } => {
                (self.anchor_position + speed * speed_scale * dt, true)
            }
            MotionMode::ToTarget { target, speed } => {
                let remaining = target - self.anchor_position;
                let travelled = speed * speed_scale * dt;
                if travelled >= remaining.abs() {
                    (target, false)
                } else {
                    (self.anchor_position + remaining.signum() * travelled, true)
                }
            }
        }
    }

    /// Reseta o estado (mantém a posição)
    pub fn reset(&mut self, now: Duration, speed_scale: f32) {
        let (position, _) = self.sample(now, speed_scale);
        self.anchor_position = position;
        self.anchor_time = now;
        self.mode = MotionMode::Idle;
        self.latched_status = None;
    }
}

impl Default for MotorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuração do motor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Nome do motor
    pub name: String,
    /// Porta de saída
    pub port: MotorPort,
    /// Fator aplicado à velocidade comandada (simula roda "preguiçosa")
    pub speed_scale: f32,
    /// Inverter direção?
    pub invert_direction: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: "motor".to_string(),
            port: MotorPort::B,
            speed_scale: 1.0,
            invert_direction: false,
        }
    }
}

/// Motor de tração simulado.
///
/// Clones compartilham o mesmo estado, de modo que um teste pode guardar um
/// clone e inspecionar o motor depois de entregá-lo à tração.
#[derive(Clone)]
pub struct MotorActuator {
    state: Arc<Mutex<MotorState>>,
    config: MotorConfig,
    clock: SimClock,
}

impl std::fmt::Debug for MotorActuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotorActuator")
            .field("config", &self.config)
            .field("position", &self.position())
            .finish()
    }
}

impl MotorActuator {
    /// Cria motor padrão sobre o relógio dado
    pub fn new(clock: SimClock) -> ActuatorResult<Self> {
        Self::with_config(MotorConfig::default(), clock)
    }

    /// Cria com configuração específica
    pub fn with_config(config: MotorConfig, clock: SimClock) -> ActuatorResult<Self> {
        if !(config.speed_scale > 0.0) || config.speed_scale > 2.0 {
            return Err(ActuatorError::InvalidConfig(
                "speed_scale must be in (0, 2]".into(),
            ));
        }

        let mut state = MotorState::new();
        state.anchor_time = clock.now();

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            config,
            clock,
        })
    }

    /// Cria motor com nome e porta
    pub fn named(name: &str, port: MotorPort, clock: SimClock) -> ActuatorResult<Self> {
        let config = MotorConfig {
            name: name.to_string(),
            port,
            ..Default::default()
        };
        Self::with_config(config, clock)
    }

    fn lock(&self) -> MutexGuard<'_, MotorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Retorna configuração
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Número de comandos aceitos
    pub fn command_count(&self) -> u64 {
        self.lock().commands
    }

    /// Histórico de comandos aceitos
    pub fn history(&self) -> Vec<MotorCommand> {
        self.lock().history.clone()
    }

    fn apply(&self, cmd: MotorCommand) -> ActuatorResult<()> {
        let now = self.clock.now();
        let mut state = self.lock();

        if let Some(status @ (ActuatorStatus::Fault | ActuatorStatus::Off)) = state.latched_status {
            return Err(ActuatorError::Latched(status));
        }

        let sign = if self.config.invert_direction { -1.0 } else { 1.0 };
        let (position, running) = state.sample(now, self.config.speed_scale);

        let mode = match cmd {
            MotorCommand::RunForever { speed } => {
                MotorSpeed::new(speed)?;
                MotionMode::Forever { speed: speed * sign }
            }
            MotorCommand::RunToRelPos { delta, speed } => {
                MotorSpeed::new(speed)?;
                if !delta.is_finite() {
                    return Err(ActuatorError::InvalidDelta(delta));
                }
                if delta == 0.0 || speed == 0.0 {
                    MotionMode::Idle
                } else {
                    MotionMode::ToTarget {
                        target: position + delta * sign,
                        speed: speed.abs(),
                    }
                }
            }
            MotorCommand::Stop => {
                if !running {
                    return Ok(());
                }
                MotionMode::Idle
            }
        };

        state.anchor_position = position;
        state.anchor_time = now;
        state.mode = mode;
        state.commands += 1;
        state.history.push(cmd);

        tracing::trace!(motor = %self.config.name, ?cmd, position, "motor command");
        Ok(())
    }
}

/// Implementação do trait Actuator
impl Actuator for MotorActuator {
    type Command = MotorCommand;

    fn send(&mut self, cmd: Self::Command) -> Result<(), CoreActuatorError> {
        self.apply(cmd).map_err(|e| e.into())
    }

    fn status(&self) -> ActuatorStatus {
        let state = self.lock();
        if let Some(status) = state.latched_status {
            return status;
        }
        let (_, running) = state.sample(self.clock.now(), self.config.speed_scale);
        if running {
            ActuatorStatus::Busy
        } else {
            ActuatorStatus::Ready
        }
    }

    fn emergency_stop(&mut self) -> Result<(), CoreActuatorError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.reset(now, self.config.speed_scale);
        state.latched_status = Some(ActuatorStatus::Off);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), CoreActuatorError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.reset(now, self.config.speed_scale);
        Ok(())
    }
}

impl DriveMotor for MotorActuator {
    fn position(&self) -> f32 {
        let state = self.lock();
        state.sample(self.clock.now(), self.config.speed_scale).0
    }
}

/// Implementação do trait TileComponent
impl TileComponent for MotorActuator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_ready(&self) -> bool {
        self.lock().latched_status.is_none()
    }
}
