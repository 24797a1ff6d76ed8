//! One-shot `ask` and `teach`.

use crate::{boot_kernel, ui};
use factbot_kernel::AskOutcome;
use factbot_types::config::FactbotConfig;
use factbot_types::fact::Triple;

pub fn cmd_ask(config: FactbotConfig, question: &str, json: bool) {
    let kernel = boot_kernel(config);
    let outcome = match kernel.ask(question) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::error_with_fix(
                &format!("Lookup failed: {e}"),
                "Check the database with `factbot status`",
            );
            std::process::exit(1);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).unwrap_or_default()
        );
        return;
    }

    match outcome {
        AskOutcome::Known {
            answer, strategy, ..
        } => {
            println!("{answer}");
            tracing::debug!(strategy = strategy.as_str(), "Answered");
        }
        AskOutcome::NotFound { subject, relation } => ui::warn_with_fix(
            &format!("Nothing stored for '{subject}' / '{relation}'"),
            &format!("factbot teach \"{subject}\" \"{relation}\" <answer>"),
        ),
        AskOutcome::Unrecognized => ui::warn_with_fix(
            "Could not recognize the subject of that question",
            "Rephrase it, e.g. \"Who is Python's founder?\"",
        ),
    }
}

pub fn cmd_teach(config: FactbotConfig, subject: &str, relation: &str, object: &str) {
    let mut kernel = boot_kernel(config);
    let triple = Triple::new(subject, relation, object);
    match kernel.teach(&triple) {
        Ok(true) => ui::success(&format!("Learned '{triple}'")),
        Ok(false) => {
            ui::error(&format!("Nothing was stored for '{triple}'"));
            std::process::exit(1);
        }
        Err(e) => {
            ui::error_with_fix(
                &format!("Failed to store fact: {e}"),
                "Subject, relation and object must all be non-empty",
            );
            std::process::exit(1);
        }
    }
}
