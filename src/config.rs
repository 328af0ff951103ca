use crate::layout::{validate, LayoutConfig};
use crate::model::Column;
use crate::settings;
use clap::{Parser, ValueEnum};
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    Map,
    Source,
    Value,
};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

// Environment overrides look like REPORT_PAGE_HEIGHT=60.
const ENV_PREFIX: &str = "REPORT";

/// Output path meaning "write the report to stdout".
pub const STDOUT_PATH: &str = "-";

// Define potential errors during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "fio, date and number columns need {required} characters with borders, \
         page width is {page_width}"
    )]
    WidthOverflow { required: usize, page_width: usize },
    #[error("page height {height} is too small, at least {minimum} lines are needed")]
    PageTooShort { height: usize, minimum: usize },
    #[error("column {0} has zero width")]
    ZeroWidth(&'static str),
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),
    #[error("malformed settings document: {0}")]
    Malformed(String),
    #[error("settings file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("cannot read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the fio column width is derived from the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FioWidthPolicy {
    /// The fio column takes whatever the page width leaves over. The
    /// declared fio width only takes part in the overflow check.
    #[default]
    Fill,
    /// Use the declared fio width as is.
    Declared,
}

/// Settings as read from the document and overrides, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    pub page_width: Option<usize>,
    pub page_height: Option<usize>,
    pub number_width: Option<usize>,
    pub date_width: Option<usize>,
    pub fio_width: Option<usize>,
    pub fio_width_policy: FioWidthPolicy,
}

impl RawSettings {
    pub fn set_column_width(&mut self, column: Column, width: usize) {
        match column {
            Column::Number => self.number_width = Some(width),
            Column::Date => self.date_width = Some(width),
            Column::Fio => self.fio_width = Some(width),
        }
    }

    fn apply(&mut self, overrides: SettingsOverrides) {
        self.page_width = overrides.page_width.or(self.page_width);
        self.page_height = overrides.page_height.or(self.page_height);
        self.number_width = overrides.number_width.or(self.number_width);
        self.date_width = overrides.date_width.or(self.date_width);
        self.fio_width = overrides.fio_width.or(self.fio_width);
        if let Some(policy) = overrides.fio_width_policy {
            self.fio_width_policy = policy;
        }
    }
}

// Serde struct for override values coming from the environment or the CLI.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct SettingsOverrides {
    page_width: Option<usize>,
    page_height: Option<usize>,
    number_width: Option<usize>,
    date_width: Option<usize>,
    fio_width: Option<usize>,
    fio_width_policy: Option<FioWidthPolicy>,
}

// Command line arguments defined using clap.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Paginated fixed-width report generator",
    long_about = None
)]
pub struct CliArgs {
    /// Settings document (XML, or TOML/JSON/YAML by extension)
    pub settings: PathBuf,

    /// Tab-separated record file: number, date, fio
    pub data: PathBuf,

    /// Report destination, `-` for stdout
    pub output: PathBuf,

    #[arg(long)]
    pub page_width: Option<usize>,
    #[arg(long)]
    pub page_height: Option<usize>,
    #[arg(long)]
    pub number_width: Option<usize>,
    #[arg(long)]
    pub date_width: Option<usize>,
    #[arg(long)]
    pub fio_width: Option<usize>,
    #[arg(long, value_enum)]
    pub fio_width_policy: Option<FioWidthPolicy>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the resolved layout and exit
    #[arg(long)]
    pub debug_config: bool,
}

impl CliArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            page_width: self.page_width,
            page_height: self.page_height,
            number_width: self.number_width,
            date_width: self.date_width,
            fio_width: self.fio_width,
            fio_width_policy: self.fio_width_policy,
        }
    }
}

/// Loads and validates the layout: settings file, then environment, then CLI.
pub fn load_config(args: &CliArgs) -> Result<LayoutConfig, ConfigError> {
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);
    // Missing env vars are fine, an unreadable environment is treated as empty.
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    build_config_from_args(args, Some(env_map))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<LayoutConfig, ConfigError> {
    let mut raw = settings::load_settings(&args.settings)?;

    if let Some(overrides) = override_source {
        raw.apply(overrides_from_map(overrides)?);
    }
    raw.apply(args.overrides());

    debug!(?raw, "resolved settings");
    validate(&raw)
}

fn overrides_from_map(map: Map<String, Value>) -> Result<SettingsOverrides, ConfigError> {
    let mut builder = ConfigCrate::builder();
    for (key, value) in map {
        builder = builder.set_override(&key, value)?;
    }
    Ok(builder.build()?.try_deserialize()?)
}
