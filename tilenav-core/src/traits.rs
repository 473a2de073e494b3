//! # 🎯 Traits — Abstrações Fundamentais do Robô
//!
//! Este módulo define os traits base que todo componente de hardware do robô
//! implementa. A arquitetura é organizada por grupos:
//!
//! | Grupo | Traits | Implementações |
//! |:------|:-------|:---------------|
//! | Percepção | [`Sensor`] | `tilenav-photonic`, `tilenav-haptic`, `tilenav-acoustic` |
//! | Atuação | [`Actuator`], [`DriveMotor`] | `tilenav-actuator` |
//! | Retorno ao operador | [`Feedback`] | `tilenav-acoustic` |
//!
//! ## Princípio de Design
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! Os traits aqui são **abstrações puras**. A navegação (`tilenav-navigation`)
//! depende apenas deles, nunca de um driver concreto.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::types::{Contact, DistanceSample, ReflectanceSample};

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE — Todo componente
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base para qualquer componente de hardware do robô.
///
/// # Exemplo
///
/// ```ignore
/// use tilenav_core::traits::TileComponent;
///
/// #[derive(Debug)]
/// struct MyColorSensor;
///
/// impl TileComponent for MyColorSensor {
///     fn name(&self) -> &str { "color-in1" }
/// }
/// ```
pub trait TileComponent: Send + Sync + Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente (para compatibilidade)
    fn version(&self) -> &str {
        "2026.1.16"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERCEPÇÃO — Sensores
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de sensor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
    #[error("Calibration failed: {0}")]
    CalibrationFailed(String),
    #[error("Configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("Hardware error: {0}")]
    Hardware(String),
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Trait para sensores.
///
/// | Sensor | Leitura | Crate |
/// |:-------|:--------|:------|
/// | Cor (modo refletância) | [`ReflectanceSample`] | `tilenav-photonic` |
/// | Toque | [`Contact`] | `tilenav-haptic` |
/// | Ultrassom | [`DistanceSample`] | `tilenav-acoustic` |
///
/// # Exemplo
///
/// ```ignore
/// use tilenav_core::traits::{Sensor, SensorError, TileComponent};
/// use tilenav_core::types::ReflectanceSample;
///
/// #[derive(Debug)]
/// struct FixedFloor(i32);
///
/// impl TileComponent for FixedFloor {
///     fn name(&self) -> &str { "fixed-floor" }
/// }
///
/// impl Sensor for FixedFloor {
///     type Reading = ReflectanceSample;
///
///     fn read(&mut self) -> Result<ReflectanceSample, SensorError> {
///         Ok(ReflectanceSample::new(self.0))
///     }
/// }
/// ```
pub trait Sensor: TileComponent {
    /// Tipo da leitura produzida pelo sensor
    type Reading;

    /// Lê uma amostra do sensor
    fn read(&mut self) -> Result<Self::Reading, SensorError>;

    /// Taxa de amostragem em Hz (0 = sob demanda)
    fn sample_rate(&self) -> f32 {
        0.0
    }

    /// Calibra o sensor
    fn calibrate(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

/// Sensor de refletância (chão)
pub type ReflectanceSensor = dyn Sensor<Reading = ReflectanceSample>;

/// Sensor de contato (para-choque / botão)
pub type ContactSensor = dyn Sensor<Reading = Contact>;

/// Sensor de distância
pub type DistanceSensor = dyn Sensor<Reading = DistanceSample>;

// ═══════════════════════════════════════════════════════════════════════════════
// ATUAÇÃO — Motores
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de atuador
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActuatorError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Actuator busy")]
    Busy,
    #[error("Actuator fault: {0}")]
    Fault(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
    #[error("Motion timeout after {0}ms")]
    Timeout(u64),
}

/// Status de atuador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActuatorStatus {
    /// Parado, pronto para receber comandos
    Ready,
    /// Executando comando (motor girando)
    Busy,
    /// Em erro (precisa reset)
    Fault,
    /// Desligado
    Off,
}

/// Comando de motor de tração.
///
/// Unidades: graus de roda e graus de roda por segundo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotorCommand {
    /// Gira continuamente até `Stop`
    RunForever { speed: f32 },
    /// Gira `delta` graus relativos à posição atual e para
    RunToRelPos { delta: f32, speed: f32 },
    /// Para imediatamente
    Stop,
}

/// Trait para atuadores que executam ações físicas.
pub trait Actuator: TileComponent {
    /// Tipo de comando aceito
    type Command;

    /// Envia comando para o atuador
    fn send(&mut self, cmd: Self::Command) -> Result<(), ActuatorError>;

    /// Status atual do atuador
    fn status(&self) -> ActuatorStatus;

    /// Para movimento imediatamente (emergência)
    fn emergency_stop(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    /// Reseta atuador após falha
    fn reset(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }
}

/// Motor de tração com tacômetro.
///
/// `stop()` sobre um motor já parado é no-op.
pub trait DriveMotor: Actuator<Command = MotorCommand> {
    /// Posição do tacômetro (graus de roda)
    fn position(&self) -> f32;

    /// Motor está girando?
    fn is_running(&self) -> bool {
        self.status() == ActuatorStatus::Busy
    }

    fn run_forever(&mut self, speed: f32) -> Result<(), ActuatorError> {
        self.send(MotorCommand::RunForever { speed })
    }

    fn run_to_rel_pos(&mut self, delta: f32, speed: f32) -> Result<(), ActuatorError> {
        self.send(MotorCommand::RunToRelPos { delta, speed })
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.send(MotorCommand::Stop)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RETORNO AO OPERADOR — Som
// ═══════════════════════════════════════════════════════════════════════════════

/// Tom audível
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequência (Hz)
    pub frequency_hz: f32,
    /// Duração (ms)
    pub duration_ms: u32,
}

impl Tone {
    /// Bipe curto (ladrilho contado)
    pub const BEEP: Tone = Tone { frequency_hz: 1000.0, duration_ms: 100 };

    /// Tom de fim de missão
    pub const MISSION_END: Tone = Tone { frequency_hz: 440.0, duration_ms: 800 };

    /// Tom de falha
    pub const FAULT: Tone = Tone { frequency_hz: 220.0, duration_ms: 1500 };
}

/// Retorno audível ao operador.
///
/// Fire-and-forget: nunca falha do ponto de vista do laço de controle e nunca
/// bloqueia movimento de motor.
pub trait Feedback: Send + Sync + Debug {
    /// Toca um tom
    fn tone(&mut self, tone: Tone);

    /// Fala um texto
    fn speak(&mut self, text: &str);

    /// Bipe padrão
    fn beep(&mut self) {
        self.tone(Tone::BEEP);
    }
}
