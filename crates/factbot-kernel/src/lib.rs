//! Core kernel for factbot.
//!
//! Turns questions into `(subject, relation)` pairs, resolves them against the
//! fact store and, on a miss, runs the acquisition flow that learns the fact.

pub mod acquisition;
pub mod config;
pub mod error;
pub mod extraction;
pub mod kernel;
pub mod lexicon;
pub mod resolution;
pub mod vocabulary;

pub use kernel::{AskOutcome, FactbotKernel};
