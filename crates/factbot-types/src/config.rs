//! Configuration types for factbot.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-user home directory under `$HOME`.
pub const HOME_DIR_NAME: &str = ".factbot";

/// Default database file name inside `data_dir`.
pub const DEFAULT_DB_FILE: &str = "factbot.db";

/// Question language. Selects the word lists used by the extraction engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English questions ("Who is Python's founder?").
    #[default]
    En,
    /// Chinese questions ("Python的创始人是谁").
    Zh,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => f.write_str("en"),
            Language::Zh => f.write_str("zh"),
        }
    }
}

/// Extraction word list configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Which built-in lexicon to use. Default: en.
    pub language: Language,
    /// Relation phrases added to the lexicon's seed relations.
    pub extra_relations: Vec<String>,
}

/// Top-level factbot configuration (`~/.factbot/config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactbotConfig {
    /// factbot home directory. Default: `~/.factbot`.
    pub home_dir: PathBuf,
    /// Directory holding the database. Default: `~/.factbot/data`.
    pub data_dir: PathBuf,
    /// Explicit database file; overrides `data_dir/factbot.db`.
    pub database_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset. Default: "info".
    pub log_level: String,
    /// Merge relations already in the store into the vocabulary at boot.
    /// Default: true.
    pub learn_from_store: bool,
    /// Extraction word lists.
    pub lexicon: LexiconConfig,
}

impl FactbotConfig {
    /// Resolved path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_DB_FILE))
    }
}

impl Default for FactbotConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(HOME_DIR_NAME);
        Self {
            data_dir: home_dir.join("data"),
            home_dir,
            database_path: None,
            log_level: "info".to_string(),
            learn_from_store: true,
            lexicon: LexiconConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FactbotConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.learn_from_store);
        assert_eq!(config.lexicon.language, Language::En);
        assert!(config.db_path().ends_with("data/factbot.db"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FactbotConfig = toml::from_str(
            r#"
            log_level = "debug"

            [lexicon]
            language = "zh"
            extra_relations = ["主演"]
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.learn_from_store);
        assert_eq!(config.lexicon.language, Language::Zh);
        assert_eq!(config.lexicon.extra_relations, vec!["主演".to_string()]);
    }

    #[test]
    fn test_database_path_override() {
        let config = FactbotConfig {
            database_path: Some(PathBuf::from("/tmp/facts.db")),
            ..Default::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/facts.db"));
    }
}
