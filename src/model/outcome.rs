//! Where a submission stands.

use serde::Serialize;

/// The lifecycle of the most recent submission.
///
/// Success and failure are mutually exclusive: settling a request replaces
/// whatever was shown before.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RequestOutcome {
    /// Nothing submitted yet.
    #[default]
    Idle,

    /// A round trip is in flight.
    Pending,

    /// The service predicted a winner.
    Success {
        #[serde(rename = "predictedTeam")]
        predicted_team: String,
    },

    /// The round trip failed; `message` is what the user sees.
    Failure { message: String },
}

impl RequestOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The line shown under the form, if any.
    pub fn display_line(&self) -> Option<String> {
        match self {
            Self::Idle | Self::Pending => None,
            Self::Success { predicted_team } => {
                Some(format!("A equipe prevista para vencer é: {predicted_team}"))
            }
            Self::Failure { message } => Some(format!("Erro: {message}")),
        }
    }
}
