//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `chat` - Sending, message actions, feedback and reset
//! - `helpers` - Shared test utilities
//! - `render` - Screens and overlays rendered to a `TestBackend`
//! - `settings` - Settings panel and model persistence
//! - `setup` - Task form editing, validation and starting

#[allow(clippy::unwrap_used, clippy::expect_used)]
mod chat;
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod render;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod setup;
