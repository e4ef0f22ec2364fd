use pagecraft_document::TemplateType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per page
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Quiet period before an autosave write
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Undo levels kept per editing session
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Template type for `pagecraft new` when none is given
    #[serde(default = "default_template_type")]
    pub default_template_type: TemplateType,
}

fn default_store_dir() -> String {
    ".pagecraft".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    1500
}

fn default_history_depth() -> usize {
    100
}

fn default_template_type() -> TemplateType {
    TemplateType::Page
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the page store
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        Path::new(cwd).join(&self.store_dir)
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            history_depth: default_history_depth(),
            default_template_type: default_template_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storeDir": "content/pages",
            "autosaveDebounceMs": 500,
            "historyDepth": 20,
            "defaultTemplateType": "category"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir, "content/pages");
        assert_eq!(config.autosave_debounce(), Duration::from_millis(500));
        assert_eq!(config.history_depth, 20);
        assert_eq!(config.default_template_type, TemplateType::Category);
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_dir, ".pagecraft");
        assert_eq!(config.autosave_debounce_ms, 1500);
        assert_eq!(config.history_depth, 100);
        assert_eq!(config.default_template_type, TemplateType::Page);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
