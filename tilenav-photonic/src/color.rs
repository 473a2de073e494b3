//! Sensor de cor em modo refletância

use serde::{Deserialize, Serialize};
use tilenav_core::source::SampleSource;
use tilenav_core::traits::{Sensor, SensorError, TileComponent};
use tilenav_core::types::ReflectanceSample;

use crate::error::{PhotonicError, PhotonicResult};

/// Configuração do sensor de cor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Nome / porta do sensor
    pub name: String,
    /// Taxa de amostragem (Hz)
    pub sample_rate: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            name: "color-in3".to_string(),
            sample_rate: 1000.0,
        }
    }
}

/// Sensor de cor apontado para o chão (refletância 0-100)
#[derive(Debug)]
pub struct ColorSensor {
    config: ColorConfig,
    source: SampleSource<i32>,
    ready: bool,
}

impl ColorSensor {
    /// Cria sensor com configuração padrão
    pub fn new(source: SampleSource<i32>) -> PhotonicResult<Self> {
        Self::with_config(ColorConfig::default(), source)
    }

    /// Cria sensor com configuração específica
    pub fn with_config(config: ColorConfig, source: SampleSource<i32>) -> PhotonicResult<Self> {
        if !(config.sample_rate > 0.0) || config.sample_rate > 10_000.0 {
            return Err(PhotonicError::InvalidConfig(
                "Sample rate must be between 0 and 10000 Hz".into(),
            ));
        }

        Ok(Self {
            config,
            source,
            ready: true,
        })
    }

    /// Sensor lendo um roteiro fixo de valores
    pub fn scripted(samples: impl IntoIterator<Item = i32>) -> Self {
        Self {
            config: ColorConfig::default(),
            source: SampleSource::scripted(samples, 0),
            ready: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl TileComponent for ColorSensor {
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

impl Sensor for ColorSensor {
    type Reading = ReflectanceSample;

    fn read(&mut self) -> Result<Self::Reading, SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialized);
        }

        let sample = ReflectanceSample::new(self.source.next_sample());
        tracing::trace!(sensor = %self.config.name, value = sample.value, "reflectance");

        Ok(sample)
    }

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    fn calibrate(&mut self) -> Result<(), SensorError> {
        self.ready = true;
        Ok(())
    }
}
