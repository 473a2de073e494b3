//! Tipos de dados compartilhados entre sensores, atuadores e navegação

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// LEITURAS DE SENSOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Leitura de refletância do chão (brilho bruto)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReflectanceSample {
    pub value: i32,
}

impl ReflectanceSample {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl From<i32> for ReflectanceSample {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

/// Leitura do sensor de toque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub pressed: bool,
}

impl Contact {
    pub const PRESSED: Contact = Contact { pressed: true };
    pub const RELEASED: Contact = Contact { pressed: false };
}

impl From<bool> for Contact {
    fn from(pressed: bool) -> Self {
        Self { pressed }
    }
}

/// Distância medida em milímetros.
///
/// [`DistanceSample::NOT_FOUND`] é o sentinela reservado para "nenhum objeto
/// dentro do limiar".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DistanceSample {
    pub mm: u32,
}

impl DistanceSample {
    pub const NOT_FOUND: DistanceSample = DistanceSample { mm: u32::MAX };
    pub const ZERO: DistanceSample = DistanceSample { mm: 0 };

    pub fn new(mm: u32) -> Self {
        Self { mm }
    }

    /// É o sentinela "não encontrado"?
    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }

    /// Dentro do limiar (inclusivo)
    pub fn within(&self, threshold: DistanceSample) -> bool {
        self.mm <= threshold.mm
    }
}

impl From<u32> for DistanceSample {
    fn from(mm: u32) -> Self {
        Self::new(mm)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RUMO
// ═══════════════════════════════════════════════════════════════════════════════

/// Sentido de giro. Positivo = horário (direita).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Sinal do giro (-1 esquerda, +1 direita)
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            TurnDirection::Left => TurnDirection::Right,
            TurnDirection::Right => TurnDirection::Left,
        }
    }

    /// Aplica o sentido a um ângulo absoluto
    pub fn signed(self, degrees: f32) -> f32 {
        degrees * self.sign()
    }
}

/// Política de preferência entre correções consecutivas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadingPreference {
    /// Começa pelo lado oposto à última correção bem sucedida
    #[default]
    Alternate,
    /// Começa pelo mesmo lado da última correção bem sucedida
    Repeat,
}

/// Último sentido usado com sucesso para corrigir o rumo.
///
/// Passado e devolvido explicitamente entre chamadas (nunca um campo global).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingState {
    pub last: TurnDirection,
}

impl HeadingState {
    pub fn new(last: TurnDirection) -> Self {
        Self { last }
    }

    /// Lado a tentar primeiro na próxima correção
    pub fn preferred(&self, policy: HeadingPreference) -> TurnDirection {
        match policy {
            HeadingPreference::Alternate => self.last.flip(),
            HeadingPreference::Repeat => self.last,
        }
    }
}

impl Default for HeadingState {
    /// Estado inicial: a primeira correção alternada tenta a direita.
    fn default() -> Self {
        Self::new(TurnDirection::Left)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LADRILHOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Transição de cor que conta como borda de ladrilho
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryEdge {
    /// Conta ao sair do preto para o branco
    #[default]
    BlackToWhite,
    /// Conta ao sair do branco para o preto
    WhiteToBlack,
}

impl std::str::FromStr for BoundaryEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black-to-white" | "black_to_white" | "b2w" => Ok(BoundaryEdge::BlackToWhite),
            "white-to-black" | "white_to_black" | "w2b" => Ok(BoundaryEdge::WhiteToBlack),
            other => Err(format!("unknown boundary edge: {other}")),
        }
    }
}
