//! Screen rendering and input handling.

mod prediction;

pub use prediction::PredictionScreen;
