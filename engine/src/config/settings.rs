// Engine settings, loaded from a JSON file with environment overrides
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EngineError;

/// Environment variable that overrides `history_path`.
pub const HISTORY_PATH_ENV: &str = "CALC_HISTORY_PATH";

/// What to do with list tokens that are not numbers.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListPolicy {
    /// Skip the token and keep a diagnostic.
    #[default]
    DropInvalid,
    /// Fail the whole input.
    RejectInvalid,
}

/// Words for the day count in long time durations, picked by the
/// one / few (2-4) / many (5+) rule.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DayForms {
    pub one: String,
    pub few: String,
    pub many: String,
}

impl DayForms {
    pub fn select(&self, days: u64) -> &str {
        match days {
            1 => &self.one,
            2..=4 => &self.few,
            _ => &self.many,
        }
    }
}

impl Default for DayForms {
    fn default() -> Self {
        DayForms {
            one: "day".to_string(),
            few: "days".to_string(),
            many: "days".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub history_path: PathBuf,
    /// Oldest entries are evicted past this size. `None` keeps everything.
    pub history_limit: Option<usize>,
    pub batch_delimiter: char,
    pub list_policy: ListPolicy,
    pub day_forms: DayForms,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            history_path: PathBuf::from("calc_history.json"),
            history_limit: None,
            batch_delimiter: ';',
            list_policy: ListPolicy::default(),
            day_forms: DayForms::default(),
        }
    }
}

impl EngineSettings {
    /// Reads settings from `path` when given, otherwise starts from defaults.
    /// The history path can always be overridden through the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => EngineSettings::default(),
        };
        if let Ok(history_path) = std::env::var(HISTORY_PATH_ENV) {
            if !history_path.trim().is_empty() {
                tracing::debug!(path = %history_path, "History path overridden from environment");
                settings.history_path = PathBuf::from(history_path);
            }
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid config JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.history_limit == Some(0) {
            return Err(EngineError::ConfigError("history_limit must be greater than 0".to_string()));
        }
        if !self.batch_delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "batch_delimiter must be a single ASCII character, got '{}'",
                self.batch_delimiter
            )));
        }
        Ok(())
    }
}
