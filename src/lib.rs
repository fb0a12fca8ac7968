//! `TaskPilot` - template-driven AI assistant for business tasks
//!
//! A catalog of task templates turns form input into a prompt for Gemini; the
//! answer can then be refined in a multi-turn chat.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod fs;
pub mod logging;
pub mod tui;
