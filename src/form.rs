//! The prediction form: input fields plus the outcome of the last submission.
//!
//! A submission is split in two so the round trip can run elsewhere:
//! [`PredictionForm::begin_submit`] marks the form pending and hands back a
//! snapshot of the input, and [`PredictionForm::settle`] applies whatever the
//! round trip produced. Settling is unconditional, so when submissions race
//! the last one to settle is what the user sees.

use tracing::error;

use crate::model::{
    Distance, Field, FormInput, Gender, RequestOutcome, Stroke, UnknownOption, parse_year,
};
use crate::predict::{PredictError, Predictor};

/// Why an edit or a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid {field}: {source}")]
    InvalidOption {
        field: Field,
        #[source]
        source: UnknownOption,
    },

    /// The year is required and must be a number.
    #[error("year is required")]
    YearRequired,
}

#[derive(Debug, Default)]
pub struct PredictionForm {
    input: FormInput,
    outcome: RequestOutcome,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with `input` instead of the defaults.
    pub fn with_input(input: FormInput) -> Self {
        Self {
            input,
            outcome: RequestOutcome::Idle,
        }
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.is_pending()
    }

    /// Apply a user edit to one field.
    ///
    /// The year is stored as the leading-integer parse of `raw`, which may be
    /// "not a number". Option fields must name one of their options; an
    /// unknown option leaves the field untouched.
    pub fn on_field_change(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        let invalid = |source| FormError::InvalidOption { field, source };
        match field {
            Field::Year => self.set_year_text(raw),
            Field::Distance => self.set_distance(raw.parse::<Distance>().map_err(invalid)?),
            Field::Stroke => self.set_stroke(raw.parse::<Stroke>().map_err(invalid)?),
            Field::Gender => self.set_gender(raw.parse::<Gender>().map_err(invalid)?),
        }
        Ok(())
    }

    /// Store the leading-integer parse of the raw year text.
    pub fn set_year_text(&mut self, raw: &str) {
        self.input.year = parse_year(raw);
    }

    pub fn set_distance(&mut self, distance: Distance) {
        self.input.distance = distance;
    }

    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.input.stroke = stroke;
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.input.gender = gender;
    }

    /// Start a submission.
    ///
    /// Clears any shown result, marks the form pending and returns the input
    /// to send. A form that is already pending can still begin another
    /// submission; keeping the control disabled is up to the caller.
    pub fn begin_submit(&mut self) -> Result<FormInput, FormError> {
        if self.input.year.is_none() {
            return Err(FormError::YearRequired);
        }
        self.outcome = RequestOutcome::Pending;
        Ok(self.input.clone())
    }

    /// Apply the result of a round trip. Always clears the pending state.
    pub fn settle(&mut self, result: Result<String, PredictError>) {
        self.outcome = match result {
            Ok(predicted_team) => RequestOutcome::Success { predicted_team },
            Err(e) => {
                error!(error = %e, "prediction request failed");
                RequestOutcome::Failure {
                    message: e.user_message(),
                }
            }
        };
    }

    /// Run one full submission in place, blocking on the round trip.
    pub fn submit(&mut self, predictor: &dyn Predictor) -> Result<(), FormError> {
        let input = self.begin_submit()?;
        let result = predictor.predict(&input);
        self.settle(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::Mutex;

    /// Records every request and answers with a canned reply.
    struct FakePredictor {
        calls: Mutex<Vec<FormInput>>,
        reply: fn() -> Result<String, PredictError>,
    }

    impl FakePredictor {
        fn new(reply: fn() -> Result<String, PredictError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<FormInput> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Predictor for FakePredictor {
        fn predict(&self, input: &FormInput) -> Result<String, PredictError> {
            self.calls.lock().unwrap().push(input.clone());
            (self.reply)()
        }
    }

    fn usa() -> Result<String, PredictError> {
        Ok("USA".to_string())
    }

    fn feature_names_missing() -> Result<String, PredictError> {
        Err(PredictError::Api {
            status: 400,
            message: "Feature names missing".to_string(),
        })
    }

    fn refused() -> Result<String, PredictError> {
        Err(PredictError::Transport {
            origin: "http://127.0.0.1:5000".to_string(),
            source: Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }

    #[test]
    fn new_form_has_defaults_and_is_idle() {
        let form = PredictionForm::new();
        assert_eq!(form.input(), &FormInput::default());
        assert_eq!(form.outcome(), &RequestOutcome::Idle);
        assert!(!form.is_pending());
    }

    #[test]
    fn field_changes_update_input() {
        let mut form = PredictionForm::new();
        form.on_field_change(Field::Year, "2016").unwrap();
        form.on_field_change(Field::Distance, "1500m").unwrap();
        form.on_field_change(Field::Stroke, "Butterfly").unwrap();
        form.on_field_change(Field::Gender, "Women").unwrap();

        assert_eq!(
            form.input(),
            &FormInput {
                year: Some(2016),
                distance: Distance::M1500,
                stroke: Stroke::Butterfly,
                gender: Gender::Women,
            }
        );
    }

    #[test]
    fn empty_year_is_stored_as_not_a_number() {
        let mut form = PredictionForm::new();
        form.on_field_change(Field::Year, "").unwrap();
        assert_eq!(form.input().year, None);
    }

    #[test]
    fn typed_setters_update_input() {
        let mut form = PredictionForm::new();
        form.set_year_text("1996");
        form.set_distance(Distance::M800);
        form.set_stroke(Stroke::Backstroke);
        form.set_gender(Gender::Women);

        assert_eq!(
            form.input(),
            &FormInput {
                year: Some(1996),
                distance: Distance::M800,
                stroke: Stroke::Backstroke,
                gender: Gender::Women,
            }
        );
    }

    #[test]
    fn unknown_option_leaves_field_unchanged() {
        let mut form = PredictionForm::new();
        let err = form.on_field_change(Field::Stroke, "Doggy paddle").unwrap_err();
        assert!(matches!(
            err,
            FormError::InvalidOption {
                field: Field::Stroke,
                ..
            }
        ));
        assert_eq!(form.input().stroke, Stroke::Freestyle);
    }

    #[test]
    fn submit_sends_exactly_one_request_with_current_input() {
        let predictor = FakePredictor::new(usa);
        let mut form = PredictionForm::new();
        form.on_field_change(Field::Distance, "4x100m").unwrap();

        form.submit(&predictor).unwrap();

        let calls = predictor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], *form.input());
        assert_eq!(calls[0].distance, Distance::Relay4x100);
    }

    #[test]
    fn success_shows_team_and_no_error() {
        let mut form = PredictionForm::new();
        form.submit(&FakePredictor::new(usa)).unwrap();
        assert_eq!(
            form.outcome(),
            &RequestOutcome::Success {
                predicted_team: "USA".to_string()
            }
        );
        assert!(!form.is_pending());
    }

    #[test]
    fn api_error_shows_service_message() {
        let mut form = PredictionForm::new();
        form.submit(&FakePredictor::new(feature_names_missing))
            .unwrap();
        assert_eq!(
            form.outcome(),
            &RequestOutcome::Failure {
                message: "Erro na API: Feature names missing".to_string()
            }
        );
        assert!(!form.is_pending());
    }

    #[test]
    fn transport_error_shows_connectivity_guidance() {
        let mut form = PredictionForm::new();
        form.submit(&FakePredictor::new(refused)).unwrap();
        let RequestOutcome::Failure { message } = form.outcome() else {
            panic!("expected failure, got {:?}", form.outcome());
        };
        assert_eq!(
            message,
            "Erro de Conexão: Certifique-se de que a API Flask está rodando em http://127.0.0.1:5000"
        );
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn begin_submit_marks_pending_and_clears_previous_result() {
        let mut form = PredictionForm::new();
        form.submit(&FakePredictor::new(usa)).unwrap();

        let snapshot = form.begin_submit().unwrap();
        assert_eq!(snapshot, *form.input());
        assert!(form.is_pending());
        assert_eq!(form.outcome().display_line(), None);

        form.settle(feature_names_missing());
        assert!(!form.is_pending());
    }

    #[test]
    fn snapshot_is_taken_at_submit_time() {
        let mut form = PredictionForm::new();
        let snapshot = form.begin_submit().unwrap();
        form.on_field_change(Field::Year, "1996").unwrap();
        assert_eq!(snapshot.year, Some(2028));
        assert_eq!(form.input().year, Some(1996));
    }

    #[test]
    fn missing_year_refuses_to_submit() {
        let predictor = FakePredictor::new(usa);
        let mut form = PredictionForm::new();
        form.on_field_change(Field::Year, "").unwrap();

        assert_eq!(form.submit(&predictor), Err(FormError::YearRequired));
        assert!(predictor.calls().is_empty());
        assert_eq!(form.outcome(), &RequestOutcome::Idle);
    }

    #[test]
    fn last_settled_response_wins() {
        let mut form = PredictionForm::new();
        form.begin_submit().unwrap();
        form.begin_submit().unwrap();

        form.settle(usa());
        assert!(!form.is_pending());

        form.settle(feature_names_missing());
        assert_eq!(
            form.outcome(),
            &RequestOutcome::Failure {
                message: "Erro na API: Feature names missing".to_string()
            }
        );
    }
}
