//! Interactive chat: answer from stored facts, learn on a miss.

use crate::{boot_kernel, prompt_input, ui, ConsoleInput};
use colored::Colorize;
use factbot_kernel::{AskOutcome, FactbotKernel};
use factbot_types::config::FactbotConfig;
use factbot_types::fact::InputSource;

const EXIT_WORDS: [&str; 2] = ["quit", "exit"];

/// What the user typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum Turn<'a> {
    Exit,
    Blank,
    Question(&'a str),
}

fn classify(line: &str) -> Turn<'_> {
    let line = line.trim();
    if line.is_empty() {
        Turn::Blank
    } else if EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        Turn::Exit
    } else {
        Turn::Question(line)
    }
}

pub fn cmd_chat(config: FactbotConfig) {
    let mut kernel = boot_kernel(config);
    let mut input = ConsoleInput;

    ui::banner();
    ui::hint("Ask a question. Type 'quit' or 'exit' to leave.");
    ui::blank();

    loop {
        let Some(line) = prompt_input(&format!("{} ", "you>".bold())) else {
            // EOF
            println!();
            break;
        };
        let question = match classify(&line) {
            Turn::Exit => {
                ui::reply("Bye!");
                break;
            }
            Turn::Blank => {
                ui::reply("Please enter a question.");
                continue;
            }
            Turn::Question(q) => q,
        };

        match kernel.ask(question) {
            Ok(AskOutcome::Known { answer, .. }) => ui::reply(&answer),
            Ok(AskOutcome::NotFound { .. }) => learn(&mut kernel, question, &mut input),
            Ok(AskOutcome::Unrecognized) => {
                ui::reply("I couldn't recognize what that question is about, please rephrase.");
                learn(&mut kernel, question, &mut input);
            }
            Err(e) => ui::error(&format!("Lookup failed: {e}")),
        }
    }
}

fn learn(kernel: &mut FactbotKernel, question: &str, input: &mut dyn InputSource) {
    let outcome = kernel.learn(question, input);
    let msg = outcome.notification(question);
    if outcome.is_learned() {
        ui::success(&msg);
    } else {
        ui::reply(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("  "), Turn::Blank);
        assert_eq!(classify("quit"), Turn::Exit);
        assert_eq!(classify(" EXIT "), Turn::Exit);
        assert_eq!(
            classify(" Who is Python's founder? "),
            Turn::Question("Who is Python's founder?")
        );
        assert_eq!(classify("quit smoking"), Turn::Question("quit smoking"));
    }
}
