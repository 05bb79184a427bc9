//! Core types shared by the Brave Search client and CLI.
//!
//! This crate provides:
//! - Layered settings loading (env, TOML file, defaults)
//! - Settings validation errors

pub mod config;

pub use config::{ConfigError, Settings};
