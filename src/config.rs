use crate::error::TodoError;
use chrono::format::{Item, StrftimeItems};
use clap::Parser;
use ratatui::style::Color;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Parser)]
#[command(author, version, about = "Terminal to-do list", long_about = None)]
pub struct Args {
    /// JSON configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Write logs to this file (overrides `log_file` from the config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// chrono format string used for due dates.
    pub date_format: String,
    /// Initial background, either `#rrggbb` or a color name.
    pub background: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            background: None,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults when no path is given; a named file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, TodoError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = fs::read_to_string(path).map_err(|source| TodoError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| TodoError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// chrono only reports a bad format string when it is rendered, so
    /// check it up front.
    pub fn validate(&self) -> Result<(), TodoError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TodoError::InvalidDateFormat(self.date_format.clone()));
        }
        self.background_color()?;
        Ok(())
    }

    pub fn from_args(args: &Args) -> Result<Self, TodoError> {
        let mut config = Self::load(args.config.as_deref())?;
        if let Some(log_file) = &args.log_file {
            config.log_file = Some(log_file.clone());
        }
        Ok(config)
    }

    pub fn background_color(&self) -> Result<Option<Color>, TodoError> {
        self.background
            .as_deref()
            .map(|raw| {
                raw.parse::<Color>()
                    .map_err(|_| TodoError::InvalidColor(raw.to_string()))
            })
            .transpose()
    }
}
