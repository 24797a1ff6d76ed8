//! Command implementations by domain.

pub mod chat;
pub mod init;
pub mod query;
pub mod store;
