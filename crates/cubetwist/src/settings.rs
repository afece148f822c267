//! Layered settings for the command-line front end.
//!
//! Settings are read from the built-in defaults, then an optional user file,
//! then `CUBETWIST_*` environment variables, and finally command-line flags.

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use eyre::{Result, WrapErr};
use serde::Deserialize;

const SETTINGS_FILE_FORMAT: FileFormat = FileFormat::Yaml;
const DEFAULT_SETTINGS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "CUBETWIST";

/// Output format for reports.
#[derive(Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}
impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// Settings after all layers are merged.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Number of layers along each axis.
    pub layer_count: u8,
    /// Whether to suppress twist notifications.
    pub quiet: bool,
    /// Output format.
    pub output: OutputFormat,
}

/// Settings given directly on the command line.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub layer_count: Option<u8>,
    pub output: Option<OutputFormat>,
    pub quiet: bool,
}

impl Settings {
    /// Loads settings, falling back to the defaults (plus `overrides`) if the
    /// user file or environment cannot be read.
    pub(crate) fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let defaults = File::from_str(DEFAULT_SETTINGS_STR, SETTINGS_FILE_FORMAT);

        let mut builder = Config::builder().add_source(defaults.clone());
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        build(builder, overrides).or_else(|e| {
            log::warn!("Error loading settings: {e}");
            build(Config::builder().add_source(defaults), overrides)
                .wrap_err("error loading default settings")
        })
    }
}

fn build(
    mut builder: ConfigBuilder<DefaultState>,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    if let Some(layer_count) = overrides.layer_count {
        builder = builder.set_override("layer_count", u64::from(layer_count))?;
    }
    if let Some(output) = overrides.output {
        builder = builder.set_override("output", output.name())?;
    }
    if overrides.quiet {
        builder = builder.set_override("quiet", true)?;
    }
    builder.build()?.try_deserialize()
}
