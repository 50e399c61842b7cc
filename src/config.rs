// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::{atomic_write, with_lock};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Names recognised for every user.
    #[serde(default)]
    pub known_names: Vec<String>,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub log_level: Option<String>,
    /// Extra names keyed by user id.
    #[serde(default)]
    pub user_names: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file yet, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `err` means the config file does not exist (explicit message
    /// or an io NotFound anywhere in the chain).
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Names to hand to the parser: global names first, then the user's own,
    /// without case-insensitive duplicates.
    pub fn names_for(&self, user: Option<&str>) -> Vec<String> {
        let user_list = user
            .and_then(|u| self.user_names.get(u))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        let mut out: Vec<String> = Vec::new();
        for name in self.known_names.iter().chain(user_list) {
            let name = name.trim();
            if name.is_empty() || out.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                continue;
            }
            out.push(name.to_string());
        }
        out
    }

    /// Adds `name` to the global list, or to `user`'s list.
    /// Returns false when it was already there (case-insensitive).
    pub fn add_name(&mut self, name: &str, user: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let list = match user {
            Some(u) => self.user_names.entry(u.to_string()).or_default(),
            None => &mut self.known_names,
        };
        if list.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return false;
        }
        list.push(name.to_string());
        true
    }

    /// Removes `name` (case-insensitive). Returns false when it was not present.
    pub fn remove_name(&mut self, name: &str, user: Option<&str>) -> bool {
        let name = name.trim();
        let removed = match user {
            Some(u) => match self.user_names.get_mut(u) {
                Some(list) => {
                    let before = list.len();
                    list.retain(|n| !n.eq_ignore_ascii_case(name));
                    before != list.len()
                }
                None => false,
            },
            None => {
                let before = self.known_names.len();
                self.known_names.retain(|n| !n.eq_ignore_ascii_case(name));
                before != self.known_names.len()
            }
        };
        if let Some(u) = user
            && self.user_names.get(u).is_some_and(|l| l.is_empty())
        {
            self.user_names.remove(u);
        }
        removed
    }

    /// Level set by `log_level`, if any. An unrecognised value is an error so
    /// the caller can report it once logging is running.
    pub fn log_level_filter(&self) -> Result<Option<log::LevelFilter>> {
        let Some(raw) = self.log_level.as_deref() else {
            return Ok(None);
        };
        raw.parse::<log::LevelFilter>()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("Ignoring unknown log_level '{}' in config", raw))
    }
}
