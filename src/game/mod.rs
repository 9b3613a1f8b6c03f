//! Core simulation logic for the self-driving snake
//!
//! This module contains all the simulation logic without any I/O or rendering
//! dependencies beyond reading level files.

pub mod config;
pub mod engine;
pub mod generate;
pub mod grid;
pub mod heading;
pub mod level;
pub mod policy;
pub mod state;

// Re-export commonly used types
pub use config::SimulationConfig;
pub use engine::{step, Simulation, SimulationStatus, StepOutcome};
pub use generate::{random_state, GenerateError};
pub use grid::{Cell, Tile, WorldGrid};
pub use heading::Heading;
pub use level::{load_level, parse_level, LevelError};
pub use policy::ReflexPolicy;
pub use state::{SimulationState, Snake};
