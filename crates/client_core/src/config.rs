use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use url::Url;

use crate::{
    error::SettingsError,
    format::{DateStyle, DEFAULT_DATE_FORMAT},
};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SETTINGS_FILE_NAME: &str = "client.toml";
const APP_DIR_NAME: &str = "company_desk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub date_format: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    date_format: Option<String>,
}

/// Defaults, then the settings file if one exists, then environment.
/// Command-line flags are layered on by the binaries.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();
    if let Some(path) = settings_file_path() {
        settings.apply_file(&path)?;
    }
    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

/// `./client.toml` wins over the per-user config directory.
pub fn settings_file_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
        .filter(|path| path.is_file())
}

impl ClientSettings {
    pub fn apply_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.apply_toml(&raw, &path.display().to_string())
    }

    pub fn apply_toml(&mut self, raw: &str, origin: &str) -> Result<(), SettingsError> {
        let file: FileSettings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
            path: origin.to_string(),
            source,
        })?;
        if let Some(v) = file.server_url {
            self.server_url = v;
        }
        if let Some(v) = file.date_format {
            self.date_format = v;
        }
        Ok(())
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("COMPANY_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__DATE_FORMAT") {
            self.date_format = v;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        Url::parse(&self.server_url)
            .map(|_| ())
            .map_err(|_| SettingsError::InvalidServerUrl(self.server_url.clone()))
    }

    pub fn date_style(&self) -> DateStyle {
        DateStyle::new(self.date_format.clone())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
