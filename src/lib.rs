//! Reflex Snake - a terminal Snake that steers itself
//!
//! This library provides:
//! - Core simulation logic (game module)
//! - Plain-text and TUI rendering (render module)
//! - Key handling for the TUI view (input module)
//! - Session counters (metrics module)
//! - Run loops and entry selection (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
