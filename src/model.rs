//! Core data model for Podium.
//!
//! The form's input fields and the outcome of submitting them.

mod input;
mod outcome;

pub use input::{DEFAULT_YEAR, Distance, Field, FormInput, Gender, Stroke, UnknownOption, parse_year};
pub use outcome::RequestOutcome;
