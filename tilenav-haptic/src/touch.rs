//! Implementação de sensor de toque

use serde::{Deserialize, Serialize};
use tilenav_core::source::SampleSource;
use tilenav_core::traits::{Sensor, SensorError, TileComponent};
use tilenav_core::types::Contact;

use crate::error::{HapticError, HapticResult};

/// Configuração do sensor de toque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Nome / porta do sensor
    pub name: String,
    /// Taxa de amostragem (Hz)
    pub sample_rate: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            name: "touch-in1".to_string(),
            sample_rate: 200,
        }
    }
}

/// Sensor de toque (binário)
#[derive(Debug)]
pub struct TouchSensor {
    config: TouchConfig,
    source: SampleSource<bool>,
    ready: bool,
    press_count: u64,
    was_pressed: bool,
}

impl TouchSensor {
    /// Cria novo sensor de toque com configuração padrão
    pub fn new(source: SampleSource<bool>) -> HapticResult<Self> {
        Self::with_config(TouchConfig::default(), source)
    }

    /// Cria sensor com configuração específica
    pub fn with_config(config: TouchConfig, source: SampleSource<bool>) -> HapticResult<Self> {
        if config.sample_rate == 0 || config.sample_rate > 10_000 {
            return Err(HapticError::InvalidSampleRate(config.sample_rate));
        }

        Ok(Self {
            config,
            source,
            ready: true,
            press_count: 0,
            was_pressed: false,
        })
    }

    /// Sensor nunca pressionado
    pub fn released() -> Self {
        Self {
            config: TouchConfig::default(),
            source: SampleSource::Constant(false),
            ready: true,
            press_count: 0,
            was_pressed: false,
        }
    }

    /// Sensor que segue um roteiro de estados
    pub fn scripted(states: impl IntoIterator<Item = bool>) -> Self {
        Self {
            source: SampleSource::scripted(states, false),
            ..Self::released()
        }
    }

    /// Número de toques detectados (bordas solto → pressionado)
    pub fn press_count(&self) -> u64 {
        self.press_count
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl TileComponent for TouchSensor {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Sensor for TouchSensor {
    type Reading = Contact;

    fn read(&mut self) -> Result<Self::Reading, SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialized);
        }

        let pressed = self.source.next_sample();
        if pressed && !self.was_pressed {
            self.press_count += 1;
            tracing::debug!(sensor = %self.config.name, "touch pressed");
        }
        self.was_pressed = pressed;

        Ok(Contact::from(pressed))
    }

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate as f32
    }

    fn calibrate(&mut self) -> Result<(), SensorError> {
        // Estabelece baseline de não-toque
        self.press_count = 0;
        self.was_pressed = false;
        self.ready = true;
        Ok(())
    }
}
