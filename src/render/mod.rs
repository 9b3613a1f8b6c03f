//! Frame output for the simulation
//!
//! `TextRenderer` prints plain glyph frames to any writer. `Renderer` draws the
//! full-screen ratatui view used by the watch mode.

pub mod renderer;
pub mod text;

pub use renderer::Renderer;
pub use text::{format_frame, TextRenderer};

use anyhow::Result;

use crate::game::{SimulationState, SimulationStatus};

/// Annotation printed under the final frame of a won run
pub const WIN_BANNER: &str = "ENOUGH FOOD AND WIN";
/// Annotation printed under the final frame of a lost run
pub const LOSS_BANNER: &str = "CRASHED!!!";

/// Something that can show the simulation once per tick
pub trait RenderSink {
    /// Draw the current state. Finished runs get their Won/Lost annotation.
    fn frame(&mut self, state: &SimulationState, status: SimulationStatus) -> Result<()>;
}

/// Banner for a finished run, `None` while running
pub fn result_banner(status: SimulationStatus) -> Option<&'static str> {
    match status {
        SimulationStatus::Running => None,
        SimulationStatus::Won => Some(WIN_BANNER),
        SimulationStatus::Lost => Some(LOSS_BANNER),
    }
}
