//! Classificação de refletância em preto / branco / indeterminado
//!
//! Dois limiares calibrados, `black_max < white_min`:
//!
//! ```text
//!   0 ──── black_max ──────────── white_min ──── 100
//!   │ Black │     Indeterminate      │   White   │
//! ```
//!
//! Os limiares são fixados uma vez antes da missão e nunca mudam durante ela.

use serde::{Deserialize, Serialize};
use tilenav_core::config::NavConfig;
use tilenav_core::types::{BoundaryEdge, ReflectanceSample};

use crate::error::{PhotonicError, PhotonicResult};

/// Classe de cor de uma leitura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorClass {
    Black,
    White,
    Indeterminate,
}

impl ColorClass {
    /// Preto ou branco (sensor sobre a pista)
    pub fn is_known(self) -> bool {
        !matches!(self, ColorClass::Indeterminate)
    }
}

/// Cor que o robô deixa e cor em que chega numa borda
pub fn edge_classes(edge: BoundaryEdge) -> (ColorClass, ColorClass) {
    match edge {
        BoundaryEdge::BlackToWhite => (ColorClass::Black, ColorClass::White),
        BoundaryEdge::WhiteToBlack => (ColorClass::White, ColorClass::Black),
    }
}

/// Limiares calibrados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    black_max: i32,
    white_min: i32,
}

impl Thresholds {
    pub fn new(black_max: i32, white_min: i32) -> PhotonicResult<Self> {
        if black_max >= white_min {
            return Err(PhotonicError::InvalidThresholds { black_max, white_min });
        }
        Ok(Self { black_max, white_min })
    }

    pub fn from_config(config: &NavConfig) -> PhotonicResult<Self> {
        Self::new(config.black_max, config.white_min)
    }

    /// Deriva limiares de uma leitura sobre preto e uma sobre branco.
    ///
    /// O terço central do intervalo fica indeterminado.
    pub fn from_calibration(black: ReflectanceSample, white: ReflectanceSample) -> PhotonicResult<Self> {
        let span = white.value - black.value;
        if span < 3 {
            return Err(PhotonicError::NarrowCalibration {
                black: black.value,
                white: white.value,
            });
        }
        let third = span / 3;
        Self::new(black.value + third, white.value - third)
    }

    pub fn black_max(&self) -> i32 {
        self.black_max
    }

    pub fn white_min(&self) -> i32 {
        self.white_min
    }

    pub fn is_black(&self, sample: ReflectanceSample) -> bool {
        sample.value <= self.black_max
    }

    pub fn is_white(&self, sample: ReflectanceSample) -> bool {
        sample.value >= self.white_min
    }

    /// Função total: toda leitura cai em exatamente uma classe
    pub fn classify(&self, sample: ReflectanceSample) -> ColorClass {
        if self.is_black(sample) {
            ColorClass::Black
        } else if self.is_white(sample) {
            ColorClass::White
        } else {
            ColorClass::Indeterminate
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { black_max: 10, white_min: 40 }
    }
}
