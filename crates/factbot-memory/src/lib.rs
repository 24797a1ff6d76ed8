//! Fact store for factbot.
//!
//! One SQLite table of `(subject, relation, object)` facts with create/update
//! timestamps. [`FactStore`] implements the lookup and sink capabilities the
//! kernel's engines are written against.

pub mod migration;
pub mod store;

pub use store::FactStore;
