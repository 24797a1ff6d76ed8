//! Core types and traits for factbot.
//!
//! This crate defines the fact model, the capabilities the engines consume
//! (fact lookup, fact sink, user input) and the shared configuration. It
//! contains no business logic.

pub mod config;
pub mod error;
pub mod fact;
