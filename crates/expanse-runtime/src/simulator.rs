//! Simulator - headless tick loop

use std::path::PathBuf;
use std::time::{Duration, Instant};

use expanse_core::SpaceSnapshot;
use expanse_observe::{Projection, SpaceTime};
use tracing::{debug, info};

use crate::{unix_time, RuntimeResult, ScalarHistory, SimulatorConfig, SnapshotWriter};

/// Slack for intervals measured on accumulated frame time; sixty additions of
/// 1/60 fall just short of 1.0.
const INTERVAL_SLACK: f64 = 1e-9;

/// Callback run at a fixed rate, given the space and the simulation time
pub type PeriodicHook = Box<dyn FnMut(&SpaceTime, f64)>;

struct Periodic {
    period: f64,
    last_run: Option<f64>,
    hook: PeriodicHook,
}

#[derive(Clone, Debug, Default)]
pub struct RuntimeStats {
    /// Ticks processed, paused or not
    pub ticks: u64,
    /// Ticks that advanced the model
    pub steps: u64,
    pub snapshots_written: u64,
    pub last_tick_duration: Duration,
}

/// Drives a `SpaceTime` tick by tick
pub struct Simulator {
    space: SpaceTime,
    config: SimulatorConfig,
    /// Simulation time, advances only while running
    sim_time: f64,
    /// Frame time accumulated over every tick, paused or not
    elapsed: f64,
    last_save: f64,
    paused: bool,
    running: bool,
    writer: Option<SnapshotWriter>,
    history: ScalarHistory,
    periodic: Vec<Periodic>,
    stats: RuntimeStats,
}

impl Simulator {
    /// Create a simulator. The snapshots directory is created only when
    /// automatic saving is enabled.
    pub fn new(space: SpaceTime, config: SimulatorConfig) -> RuntimeResult<Self> {
        config.validate()?;
        let writer = if config.save_interval > 0.0 {
            Some(SnapshotWriter::new(&config.snapshots_dir)?)
        } else {
            None
        };
        let mut history = ScalarHistory::new(config.history_points);
        history.record(&space.scalar_snapshot());

        info!(
            objects = space.objects().len(),
            law = space.model().law().name(),
            dt = config.dt,
            save_interval = config.save_interval,
            "simulator created"
        );

        Ok(Simulator {
            space,
            paused: config.start_paused,
            config,
            sim_time: 0.0,
            elapsed: 0.0,
            last_save: 0.0,
            running: true,
            writer,
            history,
            periodic: Vec::new(),
            stats: RuntimeStats::default(),
        })
    }

    /// Run `hook` every `1 / rate_hz` seconds of frame time
    pub fn every(&mut self, rate_hz: f64, hook: impl FnMut(&SpaceTime, f64) + 'static) {
        self.periodic.push(Periodic {
            period: 1.0 / rate_hz,
            last_run: None,
            hook: Box::new(hook),
        });
    }

    /// Execute one tick with the configured frame time
    pub fn tick(&mut self) -> RuntimeResult<()> {
        self.tick_with(self.config.dt)
    }

    /// Execute one tick with frame time `dt`
    pub fn tick_with(&mut self, dt: f64) -> RuntimeResult<()> {
        let start = Instant::now();
        self.stats.ticks += 1;

        // Model first, so everything below sees post-step state
        if !self.paused {
            let end = self.sim_time + dt;
            self.space.step(dt, end)?;
            self.sim_time = end;
            self.stats.steps += 1;
            self.history.record(&self.space.scalar_snapshot());
        }
        self.elapsed += dt;

        for periodic in &mut self.periodic {
            let due = periodic
                .last_run
                .map_or(true, |last| interval_elapsed(self.elapsed, last, periodic.period));
            if due {
                (periodic.hook)(&self.space, self.sim_time);
                periodic.last_run = Some(self.elapsed);
            }
        }

        if self.config.save_interval > 0.0
            && interval_elapsed(self.elapsed, self.last_save, self.config.save_interval)
        {
            self.save_snapshot()?;
            self.last_save = self.elapsed;
        }

        self.stats.last_tick_duration = start.elapsed();
        Ok(())
    }

    /// Run `ticks` ticks, stopping early if `stop` was called
    pub fn run(&mut self, ticks: u64) -> RuntimeResult<&RuntimeStats> {
        info!(ticks, "simulation started");
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            self.tick()?;
        }
        info!(
            sim_time = self.sim_time,
            steps = self.stats.steps,
            snapshots = self.stats.snapshots_written,
            "simulation finished"
        );
        Ok(&self.stats)
    }

    /// Write a snapshot now, stamped with wall-clock time
    pub fn save_snapshot(&mut self) -> RuntimeResult<PathBuf> {
        let snapshot = self.snapshot();
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => SnapshotWriter::new(&self.config.snapshots_dir)?,
        };
        let path = self.writer.insert(writer).write(&snapshot)?;
        self.stats.snapshots_written += 1;
        Ok(path)
    }

    pub fn snapshot(&self) -> SpaceSnapshot {
        self.space.snapshot(unix_time())
    }

    /// Everything the renderer draws for the current frame
    pub fn frame(&self) -> impl Iterator<Item = Projection> + '_ {
        self.space.project_all(self.sim_time)
    }

    /// Scalar readings plus the solver diagnostic
    pub fn readings(&self) -> Vec<(&'static str, f64)> {
        let mut items = vec![("time", self.sim_time)];
        items.extend(self.space.scalar_snapshot());
        items.push(("unconverged", self.space.unconverged(self.sim_time) as f64));
        items
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn space(&self) -> &SpaceTime {
        &self.space
    }

    pub fn history(&self) -> &ScalarHistory {
        &self.history
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

fn interval_elapsed(now: f64, since: f64, interval: f64) -> bool {
    now - since + INTERVAL_SLACK >= interval
}
