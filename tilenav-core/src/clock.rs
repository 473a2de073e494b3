//! Relógio do laço de controle
//!
//! O único ponto de espera cooperativa do sistema é [`Clock::sleep`] entre
//! amostras. [`SystemClock`] dorme de verdade; [`SimClock`] avança um tempo
//! virtual compartilhado, usado pelos motores e sensores simulados.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Fonte de tempo e espera
pub trait Clock: Send + Sync + Debug {
    /// Tempo decorrido desde a criação do relógio
    fn now(&self) -> Duration;

    /// Bloqueia o laço por `duration`
    fn sleep(&self, duration: Duration);
}

/// Relógio de parede (hardware real)
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Relógio virtual determinístico.
///
/// Clones compartilham o mesmo tempo: o motor simulado lê `now()` do mesmo
/// relógio em que o laço de controle chama `sleep()`.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    elapsed: Arc<Mutex<Duration>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Avança o tempo sem passar pelo laço de controle
    pub fn advance(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += duration;
    }
}

impl Clock for SimClock {
    fn now(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
