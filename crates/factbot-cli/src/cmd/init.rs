//! `factbot init`: home directory, default config and database.

use crate::ui;
use factbot_kernel::config::{default_config_path, write_default_config};
use factbot_memory::FactStore;
use factbot_types::config::FactbotConfig;
use std::path::Path;

pub fn cmd_init(config_path: Option<&Path>, config: FactbotConfig) {
    for dir in [&config.home_dir, &config.data_dir] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            ui::error_with_fix(
                &format!("Failed to create {}", dir.display()),
                &format!("Check permissions on {}: {e}", dir.display()),
            );
            std::process::exit(1);
        }
    }

    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    match write_default_config(&config_path, &config) {
        Ok(true) => ui::success(&format!("Created: {}", config_path.display())),
        Ok(false) => ui::success(&format!(
            "Config already exists: {}",
            config_path.display()
        )),
        Err(e) => {
            ui::error_with_fix("Failed to write config", &e.to_string());
            std::process::exit(1);
        }
    }

    let db_path = config.db_path();
    let store = match FactStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            ui::error_with_fix(
                &format!("Failed to initialize database {}", db_path.display()),
                &e.to_string(),
            );
            std::process::exit(1);
        }
    };
    ui::success(&format!("Database ready: {}", db_path.display()));

    match store.tables() {
        Ok(tables) => ui::kv("Tables", &tables.join(", ")),
        Err(e) => ui::error(&format!("Could not list tables: {e}")),
    }
    if let Ok(count) = store.count() {
        ui::kv("Facts", &count.to_string());
    }
    ui::kv("Language", &config.lexicon.language.to_string());

    ui::blank();
    ui::next_steps(&[
        "Teach a fact:  factbot teach Python founder \"Guido van Rossum\"",
        "Start chatting: factbot chat",
    ]);
}
