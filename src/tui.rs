//! Interactive terminal form.

mod app;
mod screens;

pub use app::run;
