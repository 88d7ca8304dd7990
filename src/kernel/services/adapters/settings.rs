use crate::kernel::services::ports::settings::FolderSettings;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

/// Reads settings from a JSON file; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<FolderSettings, SettingsError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FolderSettings::default());
        }
        Err(e) => return Err(SettingsError::Io(e)),
    };
    serde_json::from_str(&data).map_err(SettingsError::Parse)
}

/// Like `load_settings`, but logs failures and falls back to the defaults.
pub fn load_settings_or_default(path: &Path) -> FolderSettings {
    load_settings(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "using default folder settings");
        FolderSettings::default()
    })
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
