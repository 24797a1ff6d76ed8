//! factbot CLI: answers questions from stored facts and learns new ones.
//!
//! Every command boots an in-process kernel over the SQLite fact store.

mod cli;
mod cmd;
mod table;
mod ui;

use crate::cli::*;
use clap::Parser;
use factbot_kernel::config::{factbot_home, load_config};
use factbot_kernel::error::KernelError;
use factbot_kernel::FactbotKernel;
use factbot_types::config::FactbotConfig;
use factbot_types::fact::InputSource;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` if set, else the configured level, else info.
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing_stderr(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_writer(io::stderr)
        .init();
}

/// Redirect tracing to a log file so it doesn't interleave with the chat.
fn init_tracing_file(log_level: &str) {
    let log_dir = factbot_home();
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("chat.log");

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);
    match file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(log_level))
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // Fallback: suppress output rather than clutter the conversation
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::ERROR)
                .with_writer(io::sink)
                .init();
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    if matches!(cli.command, None | Some(Commands::Chat)) {
        init_tracing_file(&config.log_level);
    } else {
        init_tracing_stderr(&config.log_level);
    }

    match cli.command {
        None | Some(Commands::Chat) => cmd::chat::cmd_chat(config),
        Some(Commands::Init) => cmd::init::cmd_init(cli.config.as_deref(), config),
        Some(Commands::Ask { question, json }) => {
            cmd::query::cmd_ask(config, &question.join(" "), json)
        }
        Some(Commands::Teach {
            subject,
            relation,
            object,
        }) => cmd::query::cmd_teach(config, &subject, &relation, &object),
        Some(Commands::Facts { limit, about, json }) => {
            cmd::store::cmd_facts(config, limit, about.as_deref(), json)
        }
        Some(Commands::Relations { json }) => cmd::store::cmd_relations(config, json),
        Some(Commands::Status { json }) => cmd::store::cmd_status(config, json),
    }
}

pub(crate) fn boot_kernel_error(e: &KernelError) {
    let msg = e.to_string();
    if msg.contains("locked") || msg.contains("busy") {
        ui::error_with_fix(
            "Database error (file may be locked)",
            "Check if another factbot process is using the database",
        );
    } else if msg.contains("open fact store") {
        ui::error_with_fix(
            &format!("Failed to open the fact database: {msg}"),
            "Run `factbot init` or set `database_path` in config.toml",
        );
    } else {
        ui::error_with_fix(
            &format!("Failed to boot kernel: {msg}"),
            "Run `factbot status` to check your setup",
        );
    }
}

pub(crate) fn boot_kernel(config: FactbotConfig) -> FactbotKernel {
    match FactbotKernel::boot_with_config(config) {
        Ok(k) => k,
        Err(e) => {
            boot_kernel_error(&e);
            std::process::exit(1);
        }
    }
}

/// Print `prompt` and read one line from stdin. `None` on EOF or read error.
pub(crate) fn prompt_input(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Interactive input on the terminal.
pub(crate) struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn prompt(&mut self, label: &str) -> Option<String> {
        if label.ends_with(char::is_whitespace) || label.ends_with('：') {
            prompt_input(label)
        } else {
            prompt_input(&format!("{label} "))
        }
    }
}
