//! CLI interface for Podium.
//!
//! With no subcommand, Podium opens the interactive form. `predict` performs
//! one submission non-interactively: arguments in, outcome out.

mod format;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::Config;
use crate::form::PredictionForm;
use crate::logging::{self, LogSink};
use crate::model::{DEFAULT_YEAR, Distance, FormInput, Gender, RequestOutcome, Stroke};
use crate::predict::HttpPredictor;
use crate::tui;

use format::{describe_config, describe_input};

/// Podium: ask the prediction service who wins the race.
#[derive(Debug, Parser)]
#[command(name = "podium", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Prediction endpoint URL. Overrides the config file.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file to use instead of `~/.podium/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

const USAGE_HELP: &str = r"Examples:
  podium
     → opens the form
  podium predict --year 2028 --distance 4x100m --stroke freestyle --gender women
  podium --endpoint http://10.0.0.5:5000/predict_winner predict --json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive prediction form (the default).
    Form,

    /// Submit one prediction request and print the outcome.
    ///
    /// Prints the predicted team to stdout and exits 0, or the error to
    /// stderr and exits 1. Omitted fields take the form's defaults.
    Predict {
        /// Competition year.
        #[arg(long, default_value_t = DEFAULT_YEAR, allow_negative_numbers = true)]
        year: i64,

        /// Race distance.
        #[arg(long, value_enum, default_value_t = DistanceArg::M100)]
        distance: DistanceArg,

        /// Swim style.
        #[arg(long, value_enum, default_value_t = StrokeArg::Freestyle)]
        stroke: StrokeArg,

        #[arg(long, value_enum, default_value_t = GenderArg::Men)]
        gender: GenderArg,

        /// Print the settled outcome as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration.
    Config,
}

/// CLI-facing distance, mapped to the domain `Distance`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DistanceArg {
    #[value(name = "100m")]
    M100,
    #[value(name = "200m")]
    M200,
    #[value(name = "400m")]
    M400,
    #[value(name = "800m")]
    M800,
    #[value(name = "1500m")]
    M1500,
    #[value(name = "4x100m")]
    Relay4x100,
}

impl DistanceArg {
    fn to_domain(self) -> Distance {
        match self {
            Self::M100 => Distance::M100,
            Self::M200 => Distance::M200,
            Self::M400 => Distance::M400,
            Self::M800 => Distance::M800,
            Self::M1500 => Distance::M1500,
            Self::Relay4x100 => Distance::Relay4x100,
        }
    }
}

/// CLI-facing stroke, mapped to the domain `Stroke`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrokeArg {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    IndividualMedley,
}

impl StrokeArg {
    fn to_domain(self) -> Stroke {
        match self {
            Self::Freestyle => Stroke::Freestyle,
            Self::Backstroke => Stroke::Backstroke,
            Self::Breaststroke => Stroke::Breaststroke,
            Self::Butterfly => Stroke::Butterfly,
            Self::IndividualMedley => Stroke::IndividualMedley,
        }
    }
}

/// CLI-facing gender, mapped to the domain `Gender`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Men,
    Women,
}

impl GenderArg {
    fn to_domain(self) -> Gender {
        match self {
            Self::Men => Gender::Men,
            Self::Women => Gender::Women,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<ExitCode, String> {
    let cli = Cli::parse();

    let sink = match cli.command {
        None | Some(Command::Form) => match Config::dir() {
            Some(dir) => LogSink::File(dir.join("podium.log")),
            None => LogSink::Stderr,
        },
        Some(_) => LogSink::Stderr,
    };
    logging::init(sink)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    debug!(endpoint = %config.endpoint, "configuration resolved");

    match cli.command {
        None | Some(Command::Form) => cmd_form(&config),
        Some(Command::Predict {
            year,
            distance,
            stroke,
            gender,
            json,
        }) => {
            let input = FormInput {
                year: Some(year),
                distance: distance.to_domain(),
                stroke: stroke.to_domain(),
                gender: gender.to_domain(),
            };
            cmd_predict(&config, &input, json)
        }
        Some(Command::Config) => cmd_config(&config, cli.config.as_deref()),
    }
}

fn build_predictor(config: &Config) -> Result<HttpPredictor, String> {
    let endpoint = config.endpoint_url()?;
    HttpPredictor::new(endpoint).map_err(|e| format!("failed to build HTTP client: {e}"))
}

fn cmd_form(config: &Config) -> Result<ExitCode, String> {
    let predictor = build_predictor(config)?;
    tui::run(Arc::new(predictor)).map_err(|e| format!("terminal error: {e}"))?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_predict(config: &Config, input: &FormInput, json: bool) -> Result<ExitCode, String> {
    let predictor = build_predictor(config)?;

    let mut form = PredictionForm::with_input(input.clone());
    if !json {
        eprintln!("Predicting {} → {}", describe_input(input), predictor.endpoint());
    }
    form.submit(&predictor).map_err(|e| e.to_string())?;

    let outcome = form.outcome();
    if json {
        let rendered = serde_json::to_string_pretty(outcome)
            .map_err(|e| format!("failed to serialize outcome: {e}"))?;
        println!("{rendered}");
    } else if let Some(line) = outcome.display_line() {
        match outcome {
            RequestOutcome::Success { .. } => println!("{line}"),
            _ => eprintln!("{line}"),
        }
    }

    Ok(match outcome {
        RequestOutcome::Success { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn cmd_config(config: &Config, explicit: Option<&Path>) -> Result<ExitCode, String> {
    let path = explicit.map(Path::to_path_buf).or_else(Config::path);
    println!("{}", describe_config(config, path.as_deref()));
    Ok(ExitCode::SUCCESS)
}
