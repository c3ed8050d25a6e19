//! Drives a [`Simulation`] from an [`InputScript`] without any UI.

use crate::app::report::RunReport;
use crate::app::script::InputScript;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use toroid_core::metrics::Metrics;
use toroid_core::{FixedStepClock, Simulation, TickOutcome};

pub struct HeadlessRunner {
    sim: Simulation,
    script: InputScript,
    metrics: Metrics,
    frame: u64,
    infections: u64,
}

impl HeadlessRunner {
    pub fn new(sim: Simulation, script: InputScript) -> Result<Self> {
        script
            .validate(sim.indexer().dims())
            .context("Input script does not fit the lattice")?;
        let metrics = Metrics::new(sim.config().run.log_interval);
        Ok(Self {
            sim,
            script,
            metrics,
            frame: 0,
            infections: 0,
        })
    }

    /// Runs one frame: scripted infections, then one scheduler tick.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let frame = self.frame;
        for coord in self.script.infections_at(frame) {
            self.sim
                .infect(coord)
                .with_context(|| format!("Infection at {coord} in frame {frame}"))?;
            self.infections += 1;
        }

        let input = self.script.input_for(frame, self.sim.indexer().dims());
        let started = Instant::now();
        let outcome = self
            .sim
            .tick(&input)
            .with_context(|| format!("Tick failed in frame {frame}"))?;

        match outcome {
            TickOutcome::Paused => self.metrics.record_pause(),
            TickOutcome::Advanced { perturbed, .. } => {
                self.metrics.record_tick(started.elapsed(), perturbed);
            }
        }
        self.frame += 1;
        Ok(outcome)
    }

    /// Runs `frames` frames back to back.
    pub fn run(&mut self, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.step()?;
        }
        Ok(())
    }

    /// Runs `frames` frames paced by the configured timestep.
    pub fn run_realtime(&mut self, frames: u64) -> Result<()> {
        let mut clock = FixedStepClock::new(
            self.sim.config().run.timestep,
            FixedStepClock::DEFAULT_MAX_STEPS,
        );
        let idle = clock.timestep() / 4;
        let target = self.frame + frames;
        let mut last = Instant::now();

        while self.frame < target {
            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;
            for _ in 0..due {
                if self.frame >= target {
                    break;
                }
                self.step()?;
            }
            if due == 0 {
                std::thread::sleep(idle.max(Duration::from_millis(1)));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn report(&self) -> RunReport {
        let indexer = self.sim.indexer();
        RunReport {
            seed: self.sim.seed(),
            fingerprint: self.sim.config().fingerprint(),
            dimensionality: indexer.dims(),
            side: indexer.side(),
            frames: self.frame,
            ticks: self.sim.tick_count(),
            paused_frames: self.metrics.paused_count(),
            perturbations: self.metrics.perturbation_count(),
            infections: self.infections,
            current_buffer: self.sim.current_buffer_index(),
            elapsed_ms: self.metrics.elapsed().as_millis() as u64,
            mean_tick_us: self.metrics.mean_tick_time().as_micros() as u64,
            summary: self.sim.summary(),
        }
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
