//! Fontes de amostras para sensores simulados
//!
//! Um sensor simulado não gera ruído aleatório: ele lê de uma
//! [`SampleSource`], que pode ser um valor fixo, um roteiro de amostras
//! (o último valor se repete quando o roteiro acaba) ou uma closure que consulta
//! o mundo simulado a cada leitura.

use std::collections::VecDeque;
use std::fmt;

/// Closure consultada a cada leitura
pub type Sampler<T> = Box<dyn FnMut() -> T + Send + Sync>;

/// Origem das leituras de um sensor simulado
pub enum SampleSource<T> {
    /// Sempre o mesmo valor
    Constant(T),
    /// Roteiro de amostras; repete a última quando esgotado
    Scripted { samples: VecDeque<T>, last: T },
    /// Consulta arbitrária (ex.: posição dos motores no curso simulado)
    Live(Sampler<T>),
}

impl<T: Clone> SampleSource<T> {
    /// Roteiro a partir de uma sequência. `fallback` é usado se vier vazia.
    pub fn scripted(samples: impl IntoIterator<Item = T>, fallback: T) -> Self {
        let samples: VecDeque<T> = samples.into_iter().collect();
        let last = samples.back().cloned().unwrap_or(fallback);
        SampleSource::Scripted { samples, last }
    }

    pub fn live(f: impl FnMut() -> T + Send + Sync + 'static) -> Self {
        SampleSource::Live(Box::new(f))
    }

    /// Próxima amostra
    pub fn next_sample(&mut self) -> T {
        match self {
            SampleSource::Constant(value) => value.clone(),
            SampleSource::Scripted { samples, last } => match samples.pop_front() {
                Some(value) => value,
                None => last.clone(),
            },
            SampleSource::Live(f) => f(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SampleSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSource::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            SampleSource::Scripted { samples, last } => f
                .debug_struct("Scripted")
                .field("remaining", &samples.len())
                .field("last", last)
                .finish(),
            SampleSource::Live(_) => f.write_str("Live(..)"),
        }
    }
}
