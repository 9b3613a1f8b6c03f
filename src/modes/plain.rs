use std::time::Duration;

use anyhow::Result;
use tokio::time::{interval, MissedTickBehavior};

use crate::game::{Simulation, SimulationStatus};
use crate::render::RenderSink;

/// Prints one frame per tick until the run ends, then the result frame
pub struct PlainMode<S: RenderSink> {
    sim: Simulation,
    sink: S,
    tick_interval: Duration,
}

impl<S: RenderSink> PlainMode<S> {
    pub fn new(sim: Simulation, sink: S, tick_interval: Duration) -> Self {
        Self {
            sim,
            sink,
            tick_interval,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run to completion. Ctrl+C stops early and returns `Running`.
    pub async fn run(&mut self) -> Result<SimulationStatus> {
        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.sim.status().is_finished() {
            tokio::select! {
                _ = tick_timer.tick() => {
                    self.sink.frame(self.sim.state(), SimulationStatus::Running)?;
                    self.sim.tick();
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(ticks = self.sim.state().ticks, "interrupted");
                    return Ok(SimulationStatus::Running);
                }
            }
        }

        self.sink.frame(self.sim.state(), self.sim.status())?;
        Ok(self.sim.status())
    }
}
