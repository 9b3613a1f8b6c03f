use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use super::{result_banner, RenderSink};
use crate::game::{SimulationState, SimulationStatus};

/// Grid rows, the eaten counter and, for a finished run, the result banner
pub fn format_frame(state: &SimulationState, status: SimulationStatus) -> String {
    let mut out = String::new();
    for line in state.grid.render_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("Food eaten: {}\n", state.eaten));
    if let Some(banner) = result_banner(status) {
        out.push_str(banner);
        out.push('\n');
    }
    out
}

/// Writes plain-text frames, optionally clearing the terminal first
pub struct TextRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn frame(&mut self, state: &SimulationState, status: SimulationStatus) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
                .context("Failed to clear terminal")?;
        }
        self.out
            .write_all(format_frame(state, status).as_bytes())
            .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }
}
