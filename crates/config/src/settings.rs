use color_eyre::eyre::Result;
use reelmeter_models::RunRequest;
use reelmeter_utils::{DEFAULT_EXTENSION, normalize_extension};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_NAME: &str = "reelmeter";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub root_folder: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub skip_hidden_files: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_folder: None,
            extension: default_extension(),
            follow_links: false,
            skip_hidden_files: false,
        }
    }
}

impl Settings {
    /// Loads settings from the user's config directory, falling back to defaults
    /// when no config file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// config file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path).await
    }

    /// Loads settings from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!("No config file at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(config_path).await?;
        let mut settings: Self = toml::from_str(&content)?;
        settings.extension = normalize_extension(&settings.extension);
        if settings.extension.is_empty() {
            settings.extension = default_extension();
        }

        info!("Settings loaded from {:?}", config_path);
        Ok(settings)
    }

    /// Saves settings to the user's config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Saves settings as pretty TOML to `config_path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem write fails.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)?;

        info!("Settings saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| color_eyre::eyre::eyre!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Captures the inputs of a run rooted at `root`.
    #[must_use]
    pub fn run_request(&self, root: &Path) -> RunRequest {
        RunRequest {
            root: root.to_path_buf(),
            extension: self.extension.clone(),
            follow_links: self.follow_links,
            skip_hidden: self.skip_hidden_files,
        }
    }
}
