//! Configuração imutável da navegação
//!
//! Todos os limiares e constantes empíricas (cortes preto/branco, debounce,
//! razão de esterçamento, passos de correção, varredura) vivem em um único
//! [`NavConfig`], construído uma vez e passado a todos os componentes.
//!
//! Valores podem vir de variáveis de ambiente `TILENAV_*` (ou de um `.env`).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BoundaryEdge, HeadingPreference};

// Carrega .env automaticamente na primeira leitura de configuração
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

/// Garante que o ambiente foi carregado
#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Maior arco de busca por lado (graus de chassi)
pub const MAX_CORRECTION_ARC_DEG: f32 = 180.0;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    ensure_loaded();
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Erro de configuração
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("black_max ({black_max}) must be below white_min ({white_min})")]
    ThresholdOrder { black_max: i32, white_min: i32 },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuração de navegação
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    // ── Classificação de refletância ──
    /// Maior leitura considerada preta
    pub black_max: i32,
    /// Menor leitura considerada branca
    pub white_min: i32,

    // ── Contador de ladrilhos ──
    /// Transição que conta como borda
    pub edge: BoundaryEdge,
    /// Amostras mínimas da cor de saída antes de contar
    pub min_departing_samples: u32,
    /// Amostras indeterminadas consecutivas toleradas antes de corrigir
    pub debounce_threshold: u32,
    /// Intervalo entre amostras (ms)
    pub poll_interval_ms: u64,

    // ── Tração ──
    /// Graus de roda por grau de giro do chassi
    pub steering_ratio: f32,
    /// Velocidade padrão (graus de roda/s)
    pub default_speed: f32,
    /// Tempo máximo de espera por um movimento (ms)
    pub motion_timeout_ms: u64,

    // ── Correção de rumo ──
    pub correction_step_deg: f32,
    pub correction_arc_deg: f32,
    pub correction_speed: f32,
    /// Ré após falhar dos dois lados (graus de roda)
    pub backup_deg: f32,
    pub backup_speed: f32,
    /// Giro de escape após a ré (graus de chassi)
    pub retreat_rotation_deg: f32,
    pub retreat_speed: f32,
    /// Giro oposto à correção após readquirir a linha
    pub nudge_deg: f32,
    pub max_correction_attempts: u32,
    pub heading_preference: HeadingPreference,

    // ── Localização de objeto ──
    pub sweep_speed: f32,
    pub sweep_settle_ms: u64,
    /// Retorna sem varrer se já há objeto à frente
    pub sweep_fast_path: bool,
    /// Giro de recentralização após passar do mínimo (0 = desligado)
    pub recenter_deg: f32,
    pub max_search_attempts: u32,
    /// Avanço entre varreduras sem sucesso (graus de roda)
    pub search_advance_deg: f32,
    /// Milímetros de aproximação por volta de roda
    pub approach_mm_per_rev: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            black_max: 10,
            white_min: 40,
            edge: BoundaryEdge::BlackToWhite,
            min_departing_samples: 2,
            debounce_threshold: 3,
            poll_interval_ms: 50,
            steering_ratio: 1.7,
            default_speed: 360.0,
            motion_timeout_ms: 30_000,
            correction_step_deg: 10.0,
            correction_arc_deg: 90.0,
            correction_speed: 80.0,
            backup_deg: 100.0,
            backup_speed: 360.0,
            retreat_rotation_deg: 60.0,
            retreat_speed: 180.0,
            nudge_deg: 5.0,
            max_correction_attempts: 5,
            heading_preference: HeadingPreference::Alternate,
            sweep_speed: 45.0,
            sweep_settle_ms: 500,
            sweep_fast_path: true,
            recenter_deg: 0.0,
            max_search_attempts: 8,
            search_advance_deg: 360.0,
            approach_mm_per_rev: 400.0,
        }
    }
}

impl NavConfig {
    /// Carrega do ambiente (`TILENAV_*`), com os padrões como fallback
    pub fn from_env() -> Self {
        let d = Self::default();
        let heading_preference = match env_or("TILENAV_HEADING_PREFERENCE", String::new())
            .to_ascii_lowercase()
            .as_str()
        {
            "repeat" => HeadingPreference::Repeat,
            "alternate" => HeadingPreference::Alternate,
            _ => d.heading_preference,
        };

        Self {
            black_max: env_or("TILENAV_BLACK_MAX", d.black_max),
            white_min: env_or("TILENAV_WHITE_MIN", d.white_min),
            edge: env_or("TILENAV_EDGE", d.edge),
            min_departing_samples: env_or("TILENAV_MIN_DEPARTING_SAMPLES", d.min_departing_samples),
            debounce_threshold: env_or("TILENAV_DEBOUNCE_THRESHOLD", d.debounce_threshold),
            poll_interval_ms: env_or("TILENAV_POLL_INTERVAL_MS", d.poll_interval_ms),
            steering_ratio: env_or("TILENAV_STEERING_RATIO", d.steering_ratio),
            default_speed: env_or("TILENAV_DEFAULT_SPEED", d.default_speed),
            motion_timeout_ms: env_or("TILENAV_MOTION_TIMEOUT_MS", d.motion_timeout_ms),
            correction_step_deg: env_or("TILENAV_CORRECTION_STEP_DEG", d.correction_step_deg),
            correction_arc_deg: env_or("TILENAV_CORRECTION_ARC_DEG", d.correction_arc_deg),
            correction_speed: env_or("TILENAV_CORRECTION_SPEED", d.correction_speed),
            backup_deg: env_or("TILENAV_BACKUP_DEG", d.backup_deg),
            backup_speed: env_or("TILENAV_BACKUP_SPEED", d.backup_speed),
            retreat_rotation_deg: env_or("TILENAV_RETREAT_ROTATION_DEG", d.retreat_rotation_deg),
            retreat_speed: env_or("TILENAV_RETREAT_SPEED", d.retreat_speed),
            nudge_deg: env_or("TILENAV_NUDGE_DEG", d.nudge_deg),
            max_correction_attempts: env_or("TILENAV_MAX_CORRECTION_ATTEMPTS", d.max_correction_attempts),
            heading_preference,
            sweep_speed: env_or("TILENAV_SWEEP_SPEED", d.sweep_speed),
            sweep_settle_ms: env_or("TILENAV_SWEEP_SETTLE_MS", d.sweep_settle_ms),
            sweep_fast_path: env_or("TILENAV_SWEEP_FAST_PATH", d.sweep_fast_path),
            recenter_deg: env_or("TILENAV_RECENTER_DEG", d.recenter_deg),
            max_search_attempts: env_or("TILENAV_MAX_SEARCH_ATTEMPTS", d.max_search_attempts),
            search_advance_deg: env_or("TILENAV_SEARCH_ADVANCE_DEG", d.search_advance_deg),
            approach_mm_per_rev: env_or("TILENAV_APPROACH_MM_PER_REV", d.approach_mm_per_rev),
        }
    }

    /// Valida invariantes antes da missão começar
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.black_max >= self.white_min {
            return Err(ConfigError::ThresholdOrder {
                black_max: self.black_max,
                white_min: self.white_min,
            });
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".into()));
        }

        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.steering_ratio <= 0.0 {
            return Err(ConfigError::Invalid("steering_ratio must be positive".into()));
        }

        if self.correction_step_deg <= 0.0 || self.correction_arc_deg < self.correction_step_deg {
            return Err(ConfigError::Invalid(
                "correction arc must hold at least one positive step".into(),
            ));
        }

        if self.correction_arc_deg > MAX_CORRECTION_ARC_DEG {
            return Err(ConfigError::Invalid(format!(
                "correction_arc_deg must be <= {MAX_CORRECTION_ARC_DEG}"
            )));
        }

        if self.max_correction_attempts == 0 {
            return Err(ConfigError::Invalid("max_correction_attempts must be >= 1".into()));
        }

        if self.max_search_attempts == 0 {
            return Err(ConfigError::Invalid("max_search_attempts must be >= 1".into()));
        }

        for (name, speed) in [
            ("default_speed", self.default_speed),
            ("correction_speed", self.correction_speed),
            ("backup_speed", self.backup_speed),
            ("retreat_speed", self.retreat_speed),
            ("sweep_speed", self.sweep_speed),
            ("approach_mm_per_rev", self.approach_mm_per_rev),
        ] {
            if speed <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }

        for (name, distance) in [
            ("backup_deg", self.backup_deg),
            ("retreat_rotation_deg", self.retreat_rotation_deg),
            ("nudge_deg", self.nudge_deg),
            ("recenter_deg", self.recenter_deg),
            ("search_advance_deg", self.search_advance_deg),
        ] {
            if distance < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0")));
            }
        }

        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 14] {
        [
            ("steering_ratio", self.steering_ratio),
            ("default_speed", self.default_speed),
            ("correction_step_deg", self.correction_step_deg),
            ("correction_arc_deg", self.correction_arc_deg),
            ("correction_speed", self.correction_speed),
            ("backup_deg", self.backup_deg),
            ("backup_speed", self.backup_speed),
            ("retreat_rotation_deg", self.retreat_rotation_deg),
            ("retreat_speed", self.retreat_speed),
            ("nudge_deg", self.nudge_deg),
            ("sweep_speed", self.sweep_speed),
            ("recenter_deg", self.recenter_deg),
            ("search_advance_deg", self.search_advance_deg),
            ("approach_mm_per_rev", self.approach_mm_per_rev),
        ]
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn sweep_settle(&self) -> Duration {
        Duration::from_millis(self.sweep_settle_ms)
    }

    pub fn motion_timeout(&self) -> Duration {
        Duration::from_millis(self.motion_timeout_ms)
    }

    /// Passos de correção por lado (10° até 90° = 9 passos)
    pub fn correction_steps(&self) -> u32 {
        (self.correction_arc_deg / self.correction_step_deg).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = NavConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.correction_steps(), 9);
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_threshold_order_enforced() {
        let config = NavConfig {
            black_max: 40,
            white_min: 40,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { black_max: 40, white_min: 40 })
        );
    }

    #[test]
    fn test_invalid_poll_interval() {
        let config = NavConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_correction_arc() {
        let config = NavConfig {
            correction_arc_deg: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        let nan_arc = NavConfig {
            correction_arc_deg: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_arc.validate(), Err(ConfigError::Invalid(m)) if m.contains("correction_arc_deg")));

        let infinite_arc = NavConfig {
            correction_arc_deg: f32::INFINITY,
            ..Default::default()
        };
        assert!(infinite_arc.validate().is_err());

        let nan_nudge = NavConfig {
            nudge_deg: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_nudge.validate(), Err(ConfigError::Invalid(m)) if m.contains("nudge_deg")));

        let infinite_backup = NavConfig {
            backup_deg: f32::INFINITY,
            ..Default::default()
        };
        assert!(infinite_backup.validate().is_err());
    }

    #[test]
    fn test_correction_arc_upper_bound() {
        let half_turn = NavConfig {
            correction_arc_deg: MAX_CORRECTION_ARC_DEG,
            ..Default::default()
        };
        assert!(half_turn.validate().is_ok());
        assert_eq!(half_turn.correction_steps(), 18);

        let too_wide = NavConfig {
            correction_arc_deg: 360.0,
            ..Default::default()
        };
        assert!(too_wide.validate().is_err());
    }

    #[test]
    fn test_negative_distances_rejected() {
        let config = NavConfig {
            retreat_rotation_deg: -60.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_from_env_rejected() {
        // SAFETY: variável exclusiva deste teste
        unsafe {
            env::set_var("TILENAV_CORRECTION_ARC_DEG", "NaN");
        }
        let config = NavConfig::from_env();
        unsafe {
            env::remove_var("TILENAV_CORRECTION_ARC_DEG");
        }
        assert!(config.correction_arc_deg.is_nan());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        // SAFETY: variável exclusiva deste teste
        unsafe {
            env::set_var("TILENAV_DEBOUNCE_THRESHOLD", "7");
        }
        let config = NavConfig::from_env();
        assert_eq!(config.debounce_threshold, 7);
        unsafe {
            env::remove_var("TILENAV_DEBOUNCE_THRESHOLD");
        }
    }

    #[test]
    fn test_serde_partial_json_uses_defaults() {
        let config: NavConfig = serde_json::from_str(r#"{"black_max": 5, "edge": "WhiteToBlack"}"#).unwrap();
        assert_eq!(config.black_max, 5);
        assert_eq!(config.white_min, 40);
        assert_eq!(config.edge, BoundaryEdge::WhiteToBlack);
    }
}
