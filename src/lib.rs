//! Site Insights - stats insights dashboard and blogging prompts client
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod error;
pub mod experiments;
pub mod models;
pub mod remote;
pub mod session;
pub mod state;
pub mod traits;
pub mod view_model;
