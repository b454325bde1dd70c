use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A protocol phase, 1 through 6 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "i64", into = "u8")]
#[ts(export)]
pub struct PhaseNumber(u8);

impl PhaseNumber {
    pub const FIRST: PhaseNumber = PhaseNumber(1);
    pub const LAST: PhaseNumber = PhaseNumber(6);

    pub fn new(value: i64) -> Result<Self, CoreError> {
        match u8::try_from(value) {
            Ok(v) if (Self::FIRST.0..=Self::LAST.0).contains(&v) => Ok(Self(v)),
            _ => Err(CoreError::InvalidPhase(value)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PhaseNumber> {
        (Self::FIRST.0..=Self::LAST.0).map(PhaseNumber)
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Acolhimento",
            2 => "Diagnóstico",
            3 => "Limpeza",
            4 => "Reequilíbrio",
            5 => "Integração",
            _ => "Autonomia",
        }
    }

    /// What the phase works on, as shown next to its name.
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Escuta inicial, criação de vínculo e levantamento da história do paciente.",
            2 => "Análise quântica completa e identificação das áreas em desequilíbrio.",
            3 => "Liberação de bloqueios energéticos e emocionais identificados no diagnóstico.",
            4 => "Harmonização das cinco dimensões com práticas direcionadas.",
            5 => "Consolidação dos novos hábitos no dia a dia do paciente.",
            _ => "Manutenção do equilíbrio com acompanhamento espaçado e autocuidado.",
        }
    }
}

impl Default for PhaseNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for PhaseNumber {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhaseNumber> for u8 {
    fn from(p: PhaseNumber) -> Self {
        p.0
    }
}

impl fmt::Display for PhaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a patient currently sits in the protocol.
///
/// `id` is the storage identity used for updates; it is `None` until the
/// state has been persisted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhaseState {
    pub id: Option<Uuid>,
    pub patient_id: Uuid,
    pub current_phase_number: PhaseNumber,
    pub phase_start_date: Option<jiff::Timestamp>,
}

impl PhaseState {
    /// The state of a patient with nothing recorded: phase 1, no start date.
    pub fn initial(patient_id: Uuid) -> Self {
        Self {
            id: None,
            patient_id,
            current_phase_number: PhaseNumber::FIRST,
            phase_start_date: None,
        }
    }
}
