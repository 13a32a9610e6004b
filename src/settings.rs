//! Settings shared by the list screens of an application.
//!
//! Read from an optional `viewstate.toml` (or any file `config` understands)
//! and overridden by `VIEWSTATE__`-prefixed environment variables, with a
//! double underscore between nested keys:
//!
//! ```text
//! VIEWSTATE__LOG_FILTER=debug
//! VIEWSTATE__SORT__NUMERIC_COLLATION=true
//! VIEWSTATE__NAVIGATION__PAGE_SIZE=25
//! ```

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::collate::Collator;
use crate::error::{Result, ViewStateError};
use crate::sort::{SortDirection, SortState};

pub const DEFAULT_FILE: &str = "viewstate";
pub const ENV_PREFIX: &str = "VIEWSTATE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directive for the log filter when `RUST_LOG` is not set.
    pub log_filter: String,
    pub sort: SortSettings,
    pub navigation: NavigationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            sort: SortSettings::default(),
            navigation: NavigationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub default_direction: SortDirection,
    /// Compare digit runs in text by value.
    pub numeric_collation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Rows moved by PageUp / PageDown.
    pub page_size: usize,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Settings {
    /// Loads `viewstate.*` from the working directory if present, then the environment.
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(DEFAULT_FILE).required(false), None)
    }

    /// Loads the given file, which must exist, then the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(File::from(path).required(true), None)
    }

    /// Parses TOML text without consulting the environment.
    pub fn from_toml(text: &str) -> Result<Self> {
        Self::build(File::from_str(text, FileFormat::Toml), Some(HashMap::new()))
    }

    fn build<S>(file: S, env: Option<HashMap<String, String>>) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env);
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.navigation.page_size == 0 {
            return Err(ViewStateError::Config("navigation.page_size must be at least 1".into()));
        }
        Ok(())
    }

    pub fn collator(&self) -> Collator {
        Collator::numeric(self.sort.numeric_collation)
    }

    /// Sort state for `key` in the configured default direction.
    pub fn initial_sort(&self, key: impl Into<String>) -> SortState {
        SortState::new(key, self.sort.default_direction)
    }
}
