//! Sensor ultrassônico de distância

use serde::{Deserialize, Serialize};
use tilenav_core::source::SampleSource;
use tilenav_core::traits::{Sensor, SensorError, TileComponent};
use tilenav_core::types::DistanceSample;

use crate::error::{AcousticError, AcousticResult};

/// Alcance máximo reportado pelo sensor (mm)
pub const MAX_RANGE_MM: u32 = 2550;

/// Configuração do ultrassom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltrasonicConfig {
    pub name: String,
    /// Leituras acima disso saturam no alcance máximo
    pub max_range_mm: u32,
    pub sample_rate: f32,
}

impl Default for UltrasonicConfig {
    fn default() -> Self {
        Self {
            name: "ultrasonic-in4".to_string(),
            max_range_mm: MAX_RANGE_MM,
            sample_rate: 20.0,
        }
    }
}

/// Sensor ultrassônico (distância em mm)
#[derive(Debug)]
pub struct UltrasonicSensor {
    config: UltrasonicConfig,
    source: SampleSource<u32>,
    ready: bool,
}

impl UltrasonicSensor {
    /// Cria sensor com configuração padrão
    pub fn new(source: SampleSource<u32>) -> AcousticResult<Self> {
        Self::with_config(UltrasonicConfig::default(), source)
    }

    /// Cria sensor com configuração específica
    pub fn with_config(config: UltrasonicConfig, source: SampleSource<u32>) -> AcousticResult<Self> {
        if config.max_range_mm == 0 || config.max_range_mm >= u32::MAX {
            return Err(AcousticError::InvalidRange(config.max_range_mm));
        }

        if !(config.sample_rate > 0.0) {
            return Err(AcousticError::InvalidConfig(
                "Sample rate must be > 0".into(),
            ));
        }

        Ok(Self {
            config,
            source,
            ready: true,
        })
    }

    /// Sensor lendo um roteiro fixo de distâncias
    pub fn scripted(samples: impl IntoIterator<Item = u32>) -> Self {
        Self {
            config: UltrasonicConfig::default(),
            source: SampleSource::scripted(samples, MAX_RANGE_MM),
            ready: true,
        }
    }
}

impl TileComponent for UltrasonicSensor {
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

impl Sensor for UltrasonicSensor {
    type Reading = DistanceSample;

    fn read(&mut self) -> Result<Self::Reading, SensorError> {
        if !self.ready {
            return Err(AcousticError::NotReady.into());
        }

        let raw = self.source.next_sample();
        let sample = DistanceSample::new(raw.min(self.config.max_range_mm));
        tracing::trace!(sensor = %self.config.name, mm = sample.mm, "distance");

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
