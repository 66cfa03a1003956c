//! Application module
//!
//! This module contains the application state and its configuration.

pub mod config;
mod state;

pub use config::{Action, AppConfig, ShortcutConfig};
pub use state::AppState;
