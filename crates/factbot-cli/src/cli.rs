//! Clap CLI definitions for factbot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const AFTER_HELP: &str = "\
\x1b[1;36mExamples:\x1b[0m
  factbot init                          Create ~/.factbot/ and the fact database
  factbot                               Start chatting (same as `factbot chat`)
  factbot ask \"Who is Python's founder?\"  Answer one question, never learn
  factbot teach Python founder Guido    Store a fact directly
  factbot facts --about Python          List stored facts about an entity
  factbot relations                     Show the relation vocabulary
  factbot status                        Show database and lexicon status";

/// factbot: a chatbot that answers from the facts you teach it.
#[derive(Parser)]
#[command(
    name = "factbot",
    version,
    about = "factbot: answers questions from stored facts and learns what it does not know",
    after_help = AFTER_HELP,
)]
pub struct Cli {
    /// Path to config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize factbot (create ~/.factbot/, default config and database).
    Init,
    /// Interactive question/answer loop that learns on a miss.
    Chat,
    /// Answer a single question from stored facts.
    Ask {
        /// The question, e.g. "Who is Python's founder?".
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Store a fact directly.
    Teach {
        /// Subject, e.g. "Python".
        subject: String,
        /// Relation, e.g. "founder".
        relation: String,
        /// Object, e.g. "Guido van Rossum".
        object: String,
    },
    /// List stored facts.
    Facts {
        /// Maximum number of facts to show.
        #[arg(long, short = 'n', default_value_t = 50)]
        limit: usize,
        /// Only facts whose subject or object is this entity.
        #[arg(long)]
        about: Option<String>,
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Show the relation vocabulary used for extraction.
    Relations {
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Show database and lexicon status.
    Status {
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}
