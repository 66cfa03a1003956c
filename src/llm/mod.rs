//! LLM module
//!
//! Sends the problem text to a chat-completion endpoint and returns the answer.

mod client;
mod config;
mod gate;

pub use client::ChatClient;
pub use config::LlmConfig;
pub use gate::RequestGate;
