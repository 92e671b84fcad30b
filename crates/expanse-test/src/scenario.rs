//! Scenario Simulator - Drives a SpaceTime and measures what the observer sees
//!
//! Records per tick:
//! - Scale factor trajectory
//! - Light delay solver effort and convergence
//! - Distortion between present and apparent positions
//!
//! Frame time can be jittered to exercise unevenly spaced histories.

use expanse_core::{ExpanseResult, Position2D};
use expanse_model::CosmologyConfig;
use expanse_observe::{Role, SolverConfig, SpaceObject, SpaceTime};
use expanse_runtime::random_space;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frame time jitter for a simulated renderer
#[derive(Clone, Debug)]
pub struct TickJitter {
    /// Maximum relative deviation from the nominal frame time (0.1 = ±10%)
    pub max_jitter: f64,
}

impl TickJitter {
    pub fn new(max_jitter: f64) -> Self {
        TickJitter {
            max_jitter: max_jitter.clamp(0.0, 0.99),
        }
    }

    /// Every frame exactly `dt`
    pub fn steady() -> Self {
        Self::new(0.0)
    }

    /// Busy renderer, frames vary by ±50%
    pub fn uneven() -> Self {
        Self::new(0.5)
    }

    pub fn apply(&self, dt: f64, rng: &mut StdRng) -> f64 {
        if self.max_jitter == 0.0 {
            return dt;
        }
        dt * (1.0 + rng.gen_range(-self.max_jitter..=self.max_jitter))
    }
}

/// Steps a `SpaceTime` and projects every object each tick
pub struct ScenarioSimulator {
    space: SpaceTime,
    dt: f64,
    jitter: TickJitter,
    rng: StdRng,
    time: f64,
}

impl ScenarioSimulator {
    pub fn new(space: SpaceTime, dt: f64) -> Self {
        ScenarioSimulator {
            space,
            dt,
            jitter: TickJitter::steady(),
            rng: StdRng::seed_from_u64(0),
            time: 0.0,
        }
    }

    pub fn with_jitter(mut self, jitter: TickJitter, seed: u64) -> Self {
        self.jitter = jitter;
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Run `ticks` ticks
    pub fn run(&mut self, ticks: u64) -> ExpanseResult<ScenarioResult> {
        let mut result = ScenarioResult::new();
        for _ in 0..ticks {
            self.tick(&mut result)?;
        }
        result.finalize();
        Ok(result)
    }

    fn tick(&mut self, result: &mut ScenarioResult) -> ExpanseResult<()> {
        let dt = self.jitter.apply(self.dt, &mut self.rng);
        let end = self.time + dt;
        self.space.step(dt, end)?;
        self.time = end;
        result.record_tick(&self.space, self.time);
        Ok(())
    }

    pub fn space(&self) -> &SpaceTime {
        &self.space
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Scenario measurements
#[derive(Debug, Default)]
pub struct ScenarioResult {
    pub total_ticks: u64,
    /// `(time, scale factor)` after every tick
    pub scale_factors: Vec<(f64, f64)>,
    /// Largest solver iteration count seen
    pub max_iterations: u32,
    /// Solves that hit the iteration cap
    pub unconverged: u64,
    /// Solves whose emission time lies before t = 0
    pub predating: u64,
    /// Largest |present - apparent| over all objects and ticks
    pub max_distortion: f64,
    pub avg_distortion: f64,
    distortion_samples: Vec<f64>,
}

impl ScenarioResult {
    pub fn new() -> Self {
        ScenarioResult::default()
    }

    fn record_tick(&mut self, space: &SpaceTime, now: f64) {
        self.total_ticks += 1;
        self.scale_factors
            .push((now, space.model().scale_factor().get()));

        for object in space.objects() {
            let projections = space.project(object, now);
            let solution = projections.solution();
            self.max_iterations = self.max_iterations.max(solution.iterations);
            if !solution.converged {
                self.unconverged += 1;
            }
            if solution.predates_origin() {
                self.predating += 1;
            }

            let mut present = None;
            let mut apparent = None;
            for projection in &projections {
                match projection.role {
                    Role::Present => present = Some(projection.position),
                    Role::Apparent => apparent = Some(projection.position),
                    Role::Emitted => {}
                }
            }
            if let (Some(p), Some(a)) = (present, apparent) {
                let distortion = p.distance(&a);
                self.distortion_samples.push(distortion);
                self.max_distortion = self.max_distortion.max(distortion);
            }
        }
    }

    /// Calculate final statistics
    pub fn finalize(&mut self) {
        if !self.distortion_samples.is_empty() {
            let sum: f64 = self.distortion_samples.iter().sum();
            self.avg_distortion = sum / self.distortion_samples.len() as f64;
        }
    }

    /// Scale factor after the last tick
    pub fn final_scale_factor(&self) -> Option<f64> {
        self.scale_factors.last().map(|&(_, a)| a)
    }
}

/// Predefined scenarios
pub mod scenarios {
    use super::*;

    fn build(
        cosmology: CosmologyConfig,
        objects: Vec<SpaceObject>,
        dt: f64,
    ) -> ExpanseResult<ScenarioSimulator> {
        let space = SpaceTime::new(cosmology, SolverConfig::default(), objects)?;
        Ok(ScenarioSimulator::new(space, dt))
    }

    /// Random field in static space
    pub fn static_field(count: usize) -> ExpanseResult<ScenarioSimulator> {
        build(
            CosmologyConfig::static_space(),
            random_space(count, 200.0, 42),
            1.0 / 60.0,
        )
    }

    /// One object at (100, 0), unit expansion rate, one-second ticks
    pub fn linear_single() -> ExpanseResult<ScenarioSimulator> {
        build(
            CosmologyConfig::linear(1.0),
            vec![SpaceObject::new(Position2D::new(100.0, 0.0))],
            1.0,
        )
    }

    /// Random field under flat ΛCDM
    pub fn lambda_cdm_field(count: usize) -> ExpanseResult<ScenarioSimulator> {
        build(
            CosmologyConfig::lambda_cdm(0.3, 0.7, 1.0),
            random_space(count, 200.0, 7),
            1.0 / 60.0,
        )
    }

    /// Static space with light slowing down every tick
    pub fn decaying_light(count: usize) -> ExpanseResult<ScenarioSimulator> {
        build(
            CosmologyConfig::static_space().with_light_speed_decay(0.999),
            random_space(count, 50.0, 3),
            1.0 / 60.0,
        )
    }

    /// Linear expansion seen through an uneven frame rate
    pub fn jittered_linear(count: usize, seed: u64) -> ExpanseResult<ScenarioSimulator> {
        build(
            CosmologyConfig::linear(0.1),
            random_space(count, 200.0, seed),
            1.0 / 60.0,
        )
        .map(|sim| sim.with_jitter(TickJitter::uneven(), seed))
    }
}
