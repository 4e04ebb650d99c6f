//! The prediction service client.
//!
//! One POST per submission, JSON in and JSON out. The HTTP layer decides
//! whether a failure happened in transport (nothing came back) or in the
//! application (a response came back but was not a prediction).

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::model::FormInput;

/// Why a prediction could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The request never reached the service, or no response came back.
    #[error("prediction service unreachable at {origin}: {source}")]
    Transport {
        origin: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A response arrived but it does not carry a prediction.
    #[error("prediction service answered {status}: {message}")]
    Api { status: u16, message: String },
}

impl PredictError {
    /// The message shown to the user.
    ///
    /// Transport failures get connectivity guidance instead of the raw error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { origin, .. } => {
                format!("Erro de Conexão: Certifique-se de que a API Flask está rodando em {origin}")
            }
            Self::Api { message, .. } => format!("Erro na API: {message}"),
        }
    }
}

/// Something that turns form input into a predicted team.
pub trait Predictor: Send + Sync {
    fn predict(&self, input: &FormInput) -> Result<String, PredictError>;
}

/// Talks to the prediction service over HTTP.
pub struct HttpPredictor {
    client: Client,
    endpoint: Url,
}

impl HttpPredictor {
    /// Builds a client for the given endpoint.
    ///
    /// No timeout is set: a submission waits as long as the service takes.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport(&self, source: reqwest::Error) -> PredictError {
        PredictError::Transport {
            origin: self.endpoint.origin().ascii_serialization(),
            source: Box::new(source),
        }
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, input: &FormInput) -> Result<String, PredictError> {
        debug!(endpoint = %self.endpoint, ?input, "sending prediction request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(input)
            .send()
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport(e))?;
        debug!(status = status.as_u16(), body_len = body.len(), "prediction response received");

        interpret(status, &body)
    }
}

/// Decide what a response means.
///
/// Only a 2xx response whose body says `"status": "success"` and names a team
/// is a prediction. Anything else is an API error carrying the service's
/// `message`, or the HTTP status text when there is none. Each field is read
/// on its own, so a field of an unexpected type only hides that field.
fn interpret(status: StatusCode, body: &str) -> Result<String, PredictError> {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let field = |name: &str| parsed.get(name).and_then(Value::as_str);

    if status.is_success() && field("status") == Some("success") {
        if let Some(team) = field("predicted_team") {
            return Ok(team.to_string());
        }
    }

    let message = field("message")
        .filter(|m| !m.is_empty())
        .map_or_else(|| status_text(status), str::to_string);

    Err(PredictError::Api {
        status: status.as_u16(),
        message,
    })
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}
