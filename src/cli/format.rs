//! Output formatting for CLI display.

use std::path::Path;

use crate::config::Config;
use crate::model::FormInput;

/// One-line summary of what is being asked, e.g. `2028 · 100m · Freestyle · Men`.
pub(super) fn describe_input(input: &FormInput) -> String {
    let year = input
        .year
        .map_or_else(|| "?".to_string(), |y| y.to_string());
    format!(
        "{year} · {} · {} · {}",
        input.distance.as_str(),
        input.stroke.as_str(),
        input.gender.as_str()
    )
}

/// The resolved configuration, one `key: value` per line.
pub(super) fn describe_config(config: &Config, path: Option<&Path>) -> String {
    let path = path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    format!("config:   {path}\nendpoint: {}", config.endpoint)
}
