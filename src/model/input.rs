//! Form input: the four fields sent to the prediction service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The year a fresh form starts with.
pub const DEFAULT_YEAR: i64 = 2028;

/// Everything the prediction service needs to pick a winner.
///
/// Serializes with the exact column names the service's model was trained on.
/// `year` is `None` when the raw year text holds no leading integer; it then
/// goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "Year")]
    pub year: Option<i64>,

    #[serde(rename = "Distance (in meters)")]
    pub distance: Distance,

    #[serde(rename = "Stroke")]
    pub stroke: Stroke,

    #[serde(rename = "Gender")]
    pub gender: Gender,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            year: Some(DEFAULT_YEAR),
            distance: Distance::M100,
            stroke: Stroke::Freestyle,
            gender: Gender::Men,
        }
    }
}

/// Which form field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Distance,
    Stroke,
    Gender,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::Distance => "distance",
            Self::Stroke => "stroke",
            Self::Gender => "gender",
        })
    }
}

/// Race distance, as the service spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    #[serde(rename = "100m")]
    M100,
    #[serde(rename = "200m")]
    M200,
    #[serde(rename = "400m")]
    M400,
    #[serde(rename = "800m")]
    M800,
    #[serde(rename = "1500m")]
    M1500,
    /// Relay: four legs of 100m.
    #[serde(rename = "4x100m")]
    Relay4x100,
}

impl Distance {
    /// Every option, in display order.
    pub const ALL: [Self; 6] = [
        Self::M100,
        Self::M200,
        Self::M400,
        Self::M800,
        Self::M1500,
        Self::Relay4x100,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M100 => "100m",
            Self::M200 => "200m",
            Self::M400 => "400m",
            Self::M800 => "800m",
            Self::M1500 => "1500m",
            Self::Relay4x100 => "4x100m",
        }
    }
}

/// Swim style category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "Individual medley")]
    IndividualMedley,
}

impl Stroke {
    /// Every option, in display order.
    pub const ALL: [Self; 5] = [
        Self::Freestyle,
        Self::Backstroke,
        Self::Breaststroke,
        Self::Butterfly,
        Self::IndividualMedley,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freestyle => "Freestyle",
            Self::Backstroke => "Backstroke",
            Self::Breaststroke => "Breaststroke",
            Self::Butterfly => "Butterfly",
            Self::IndividualMedley => "Individual medley",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Every option, in display order.
    pub const ALL: [Self; 2] = [Self::Men, Self::Women];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }

    /// The label shown to the user. The wire value stays in English.
    pub fn label(self) -> &'static str {
        match self {
            Self::Men => "Masculino",
            Self::Women => "Feminino",
        }
    }
}

/// A raw value that doesn't name any option of its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid option")]
pub struct UnknownOption(pub String);

impl FromStr for Distance {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for Stroke {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for Gender {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// Parse the leading integer of a raw year.
///
/// Leading whitespace and an optional sign are accepted; anything after the
/// digits is ignored (`"2028abc"` is 2028). Returns `None` when no digits lead
/// the text, including for `""`. Years far past any calendar still parse;
/// only a magnitude beyond `i64` is treated as not a number.
pub fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
