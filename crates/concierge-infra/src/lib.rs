//! Infrastructure for the concierge: data directory layout and
//! `config.toml` loading.

pub mod config;
pub mod paths;
