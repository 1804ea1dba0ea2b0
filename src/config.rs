use eyre::{Context, Result};
use ewit::CogSettings;
use ewit::export::{DEFAULT_BATCH_CHARS, DEFAULT_MAX_EXPORT_BYTES};
use ewit::quote::{ChannelCaps, DELIMITER};
use ewit::storage::{SeedPolicy, StoreConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub store: StoreSettings,
    pub export: ExportSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub path: PathBuf,
    pub seed: SeedPolicy,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ewit")
                .join("quotes.csv"),
            seed: SeedPolicy::Bootstrap,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub batch_chars: usize,
    pub max_file_bytes: u64,
    pub out_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            batch_chars: DEFAULT_BATCH_CHARS,
            max_file_bytes: DEFAULT_MAX_EXPORT_BYTES,
            out_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub embeds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            store: StoreSettings::default(),
            export: ExportSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.store.path.clone(),
            delimiter: DELIMITER,
            seed: self.store.seed,
        }
    }

    pub fn cog_settings(&self) -> CogSettings {
        CogSettings {
            batch_chars: self.export.batch_chars,
            max_export_bytes: self.export.max_file_bytes,
        }
    }

    /// Channel capabilities, with the command-line flag forcing embeds on
    pub fn channel_caps(&self, embed_flag: bool) -> ChannelCaps {
        ChannelCaps {
            embeds: embed_flag || self.display.embeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.store.seed, SeedPolicy::Bootstrap);
        assert!(config.store.path.ends_with("ewit/quotes.csv"));
        assert_eq!(config.export.batch_chars, DEFAULT_BATCH_CHARS);
        assert!(!config.display.embeds);
    }

    #[test]
    fn test_load_partial_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ewit.yml");
        fs::write(
            &path,
            "store:\n  path: /tmp/q.csv\n  seed: empty\nexport:\n  batch_chars: 500\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/q.csv"));
        assert_eq!(config.export.batch_chars, 500);
        assert_eq!(config.export.max_file_bytes, DEFAULT_MAX_EXPORT_BYTES);
        assert_eq!(config.store_config().seed, SeedPolicy::Empty);
        assert_eq!(config.cog_settings().batch_chars, 500);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_channel_caps_flag_overrides() {
        let config = Config::default();
        assert!(!config.channel_caps(false).embeds);
        assert!(config.channel_caps(true).embeds);
    }
}
