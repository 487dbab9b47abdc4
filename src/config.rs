use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: String,

    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,

    #[serde(default = "default_max_parses")]
    pub max_parses: usize,

    /// Cap on spelling variations looked up per search.
    #[serde(default = "default_max_variations")]
    pub max_variations: usize,

    /// Longer words are not segmented.
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
}

fn default_dictionary() -> String {
    "revo".to_string()
}

fn default_max_parses() -> usize {
    crate::morphology::MAX_PARSES
}

fn default_max_variations() -> usize {
    999
}

fn default_max_word_length() -> usize {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            dictionary_dir: None,
            max_parses: default_max_parses(),
            max_variations: default_max_variations(),
            max_word_length: default_max_word_length(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(dictionary: Option<String>, dictionary_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".vortaro.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(dictionary) = dictionary {
            config.dictionary = dictionary;
        }
        if let Some(dir) = dictionary_dir {
            config.dictionary_dir = Some(dir);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // other's values override self's if they differ from defaults
        if other.dictionary != default_dictionary() {
            self.dictionary = other.dictionary;
        }
        if other.dictionary_dir.is_some() {
            self.dictionary_dir = other.dictionary_dir;
        }
        if other.max_parses != default_max_parses() {
            self.max_parses = other.max_parses;
        }
        if other.max_variations != default_max_variations() {
            self.max_variations = other.max_variations;
        }
        if other.max_word_length != default_max_word_length() {
            self.max_word_length = other.max_word_length;
        }
        self
    }

    /// Directory holding the built dictionaries.
    pub fn dictionary_dir(&self) -> Result<PathBuf> {
        match &self.dictionary_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::data_dir().context("Failed to get data directory"),
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vortaro").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vortaro").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dictionary, "revo");
        assert_eq!(config.max_parses, 2);
        assert_eq!(config.max_variations, 999);
        assert_eq!(config.max_word_length, 40);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            dictionary: "plena".to_string(),
            max_variations: 500,
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.dictionary, "plena");
        assert_eq!(merged.max_variations, 500);
        assert_eq!(merged.max_parses, 2);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("max_word_length = 25\n").unwrap();
        assert_eq!(config.max_word_length, 25);
        assert_eq!(config.dictionary, "revo");
        assert!(config.dictionary_dir.is_none());
    }

    #[test]
    fn test_explicit_dictionary_dir() {
        let config = Config {
            dictionary_dir: Some(PathBuf::from("/tmp/vortaro")),
            ..Default::default()
        };
        assert_eq!(config.dictionary_dir().unwrap(), PathBuf::from("/tmp/vortaro"));
    }
}
