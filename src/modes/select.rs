use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

/// The two ways to start a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Generate a random fenced world
    Random,
    /// Load the starting world from a level file
    Level,
}

const PROMPT: &str = "Choose game type (0 - random game, 1 - loading from file): ";

/// Ask on `output` until `input` yields `0` or `1`
pub fn prompt_game_source<R: BufRead, W: Write>(input: R, mut output: W) -> Result<SourceKind> {
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}").context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            bail!("input closed before a game type was chosen");
        };
        match line.context("Failed to read game type")?.trim() {
            "0" => return Ok(SourceKind::Random),
            "1" => return Ok(SourceKind::Level),
            _ => writeln!(output, "Try again!").context("Failed to write prompt")?,
        }
    }
}
