//! Alto-falante: retorno audível ao operador
//!
//! Sem hardware de áudio: cada som vira um evento de log (`tracing`) e fica
//! registrado para inspeção.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tilenav_core::traits::{Feedback, Tone};

/// Som emitido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Utterance {
    Tone(Tone),
    Speech(String),
}

/// Alto-falante. Clones compartilham o mesmo registro.
#[derive(Debug, Clone, Default)]
pub struct Speaker {
    log: Arc<Mutex<Vec<Utterance>>>,
    muted: bool,
}

impl Speaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alto-falante que só registra (não loga)
    pub fn muted() -> Self {
        Self {
            muted: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Utterance>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tudo que já foi emitido, em ordem
    pub fn played(&self) -> Vec<Utterance> {
        self.lock().clone()
    }

    /// Quantas vezes o tom dado tocou
    pub fn tone_count(&self, tone: Tone) -> usize {
        self.lock()
            .iter()
            .filter(|u| matches!(u, Utterance::Tone(t) if *t == tone))
            .count()
    }

    pub fn beeps(&self) -> usize {
        self.tone_count(Tone::BEEP)
    }

    /// Textos falados, em ordem
    pub fn spoken(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|u| match u {
                Utterance::Speech(text) => Some(text.clone()),
                Utterance::Tone(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Feedback for Speaker {
    fn tone(&mut self, tone: Tone) {
        if !self.muted {
            tracing::debug!(hz = tone.frequency_hz, ms = tone.duration_ms, "tone");
        }
        self.lock().push(Utterance::Tone(tone));
    }

    fn speak(&mut self, text: &str) {
        if !self.muted {
            tracing::info!(text, "speak");
        }
        self.lock().push(Utterance::Speech(text.to_string()));
    }
}
