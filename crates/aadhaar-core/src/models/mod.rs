//! Data models: configuration and extracted identity fields.

pub mod config;
pub mod identity;
