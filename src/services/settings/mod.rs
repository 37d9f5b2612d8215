// Settings service
// Loads and saves GridSettings as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::GridSettings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory.
    pub fn platform_default() -> Self {
        Self::new(default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate settings, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<GridSettings> {
        load_settings(&self.path)
    }

    pub fn save(&self, settings: &GridSettings) -> Result<()> {
        save_settings(&self.path, settings)
    }
}

pub fn default_settings_path() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "ScheduleGrid", "schedule-grid") {
        dirs.config_dir().join(SETTINGS_FILE)
    } else {
        log::warn!("Unable to resolve project directory; using current dir for settings");
        PathBuf::from(SETTINGS_FILE)
    }
}

pub fn load_settings(path: &Path) -> Result<GridSettings> {
    if !path.exists() {
        log::debug!("No settings at {}; using defaults", path.display());
        return Ok(GridSettings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: GridSettings = toml::from_str(&data)
        .with_context(|| format!("failed to parse settings from {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &GridSettings) -> Result<()> {
    settings.validate().context("refusing to save invalid settings")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
    }

    let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write settings to {}", path.display()))?;
    Ok(())
}
