//! Rejected player actions. None of these are fatal: the action simply does
//! not touch the progress state and the message is shown to the player.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a scene transition was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// No edge between the two scenes.
    NoPath,
    /// Locked door, the key has not been found.
    MissingKey,
    /// Nothing to read yet, the newspaper has not been found.
    MissingDocument,
}

impl Denial {
    pub fn message(self) -> &'static str {
        match self {
            Denial::NoPath => "Não podes ir para aí ainda.",
            Denial::MissingKey => "A porta do quarto está trancada. Falta a chave.",
            Denial::MissingDocument => "Ainda não há nada para ler. Falta encontrar o jornal.",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of judging an accusation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NoSuspectChosen,
    DocumentNotFound,
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn title(self) -> &'static str {
        match self {
            Verdict::NoSuspectChosen => "Escolhe um suspeito",
            Verdict::DocumentNotFound => "Ainda não",
            Verdict::Correct => "Acusação correcta",
            Verdict::Incorrect => "Acusação errada",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::NoSuspectChosen => {
                "Selecciona primeiro um dos suspeitos antes de submeter."
            }
            Verdict::DocumentNotFound => {
                "Encontra o jornal no Quarto antes de submeter a acusação final."
            }
            Verdict::Correct => {
                "A Esposa matou Patrick Maloney com a perna de borrego. \
                 Encontraste o jornal com a confissão."
            }
            Verdict::Incorrect => {
                "A tua acusação está incorreta. Lê o jornal novamente para confirmar."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("transition refused: {0}")]
    InvalidTransition(Denial),
    #[error("unknown clue `{0}`")]
    UnknownClue(String),
    #[error("accusation not accepted: {0}")]
    InvalidAccusationState(Verdict),
}
