//! Light Delay Solver - when was the light arriving now emitted?
//!
//! Fixed-point iteration with relaxation on the light-travel delay:
//!
//! ```text
//! delay₀     = d / c
//! delayₙ₊₁'  = f(average rate over [now - delayₙ, now])
//! accept if |delayₙ₊₁' - delayₙ| < tolerance
//! otherwise  delayₙ₊₁ = r·delayₙ + (1 - r)·delayₙ₊₁'
//! ```
//!
//! Iteration is bounded by `max_iterations`; a non-converged solve returns
//! its last estimate with `converged = false`.

use expanse_core::{ExpanseError, ExpanseResult};
use expanse_model::ExpansionModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which history governs propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Expansion stretches the path, light speed is constant:
    /// `delay = d · mean(a) / c`
    #[default]
    ScaleFactor,
    /// Light speed itself varies, the path is the current physical distance:
    /// `delay = d · a(now) / mean(c)`
    LightSpeed,
}

/// Solver configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration cap
    pub max_iterations: u32,
    /// Acceptance threshold on successive delay estimates
    pub tolerance: f64,
    /// Distances below this are treated as "at the observer"
    pub epsilon: f64,
    /// Weight of the previous estimate when relaxing
    pub relaxation: f64,
    pub mode: SolverMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: 10,
            tolerance: 0.01,
            epsilon: 1e-9,
            relaxation: 0.5,
            mode: SolverMode::ScaleFactor,
        }
    }
}

impl SolverConfig {
    pub fn with_mode(mut self, mode: SolverMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> ExpanseResult<()> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(ExpanseError::invalid("tolerance", self.tolerance, "must be > 0"));
        }
        if !(self.epsilon >= 0.0) || !self.epsilon.is_finite() {
            return Err(ExpanseError::invalid("epsilon", self.epsilon, "must be >= 0"));
        }
        if !(0.0..1.0).contains(&self.relaxation) {
            return Err(ExpanseError::invalid(
                "relaxation",
                self.relaxation,
                "must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Result of one solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySolution {
    /// Time the light now arriving left the object
    pub emit_time: f64,
    /// `now - emit_time`
    pub delay: f64,
    /// Iterations performed (0 for an object at the observer)
    pub iterations: u32,
    /// Whether the tolerance was met within the iteration cap
    pub converged: bool,
}

impl DelaySolution {
    /// No propagation delay
    pub fn immediate(now: f64) -> Self {
        DelaySolution {
            emit_time: now,
            delay: 0.0,
            iterations: 0,
            converged: true,
        }
    }

    /// Emission before simulation time zero. Kept as-is, never clamped.
    pub fn predates_origin(&self) -> bool {
        self.emit_time < 0.0
    }
}

/// Light-travel-time solver
#[derive(Debug, Clone, Default)]
pub struct LightDelaySolver {
    config: SolverConfig,
}

impl LightDelaySolver {
    pub fn new(config: SolverConfig) -> ExpanseResult<Self> {
        config.validate()?;
        Ok(LightDelaySolver { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the emission time of light reaching the origin at `now`
    /// from an object at comoving distance `distance`.
    pub fn solve(&self, distance: f64, now: f64, model: &ExpansionModel) -> DelaySolution {
        let cfg = &self.config;
        if distance < cfg.epsilon {
            return DelaySolution::immediate(now);
        }

        let scale = model.scale_factor();
        let light = model.light_speed();

        let mut delay = match cfg.mode {
            SolverMode::ScaleFactor => distance / light.get(),
            SolverMode::LightSpeed => distance * scale.get() / light.get(),
        };

        // Without iterations the initial guess is the only estimate
        let mut last_estimate = delay;
        for iteration in 1..=cfg.max_iterations {
            let start = now - delay;
            let estimate = match cfg.mode {
                SolverMode::ScaleFactor => distance * scale.mean_between(start, now) / light.get(),
                SolverMode::LightSpeed => distance * scale.get() / light.mean_between(start, now),
            };
            debug!(iteration, delay, estimate, "light delay iteration");

            if (estimate - delay).abs() < cfg.tolerance {
                return finish(now, estimate, iteration, true);
            }
            last_estimate = estimate;
            delay = cfg.relaxation * delay + (1.0 - cfg.relaxation) * estimate;
        }

        warn!(
            distance,
            now,
            delay = last_estimate,
            iterations = cfg.max_iterations,
            "light delay did not converge"
        );
        finish(now, last_estimate, cfg.max_iterations, false)
    }
}

fn finish(now: f64, delay: f64, iterations: u32, converged: bool) -> DelaySolution {
    // Emission never lies in the future
    let delay = if delay < 0.0 { 0.0 } else { delay };
    DelaySolution {
        emit_time: now - delay,
        delay,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_model::CosmologyConfig;
    use proptest::prelude::*;

    fn stepped(config: CosmologyConfig, dt: f64, ticks: u32) -> ExpansionModel {
        let mut model = ExpansionModel::new(config).unwrap();
        for i in 1..=ticks {
            model.step(dt, i as f64 * dt).unwrap();
        }
        model
    }

    #[test]
    fn test_zero_distance_is_immediate() {
        let model = stepped(CosmologyConfig::linear(1.0), 1.0, 5);
        let solver = LightDelaySolver::default();
        let sol = solver.solve(0.0, 5.0, &model);
        assert_eq!(sol.emit_time, 5.0);
        assert_eq!(sol.iterations, 0);
        assert!(sol.converged);
    }

    #[test]
    fn test_converges_with_flat_scale_factor() {
        // c = 10, d = 50, a = 1
        let model = stepped(CosmologyConfig::linear(0.0).with_light_speed(10.0), 1.0, 20);
        let solver = LightDelaySolver::default();
        let sol = solver.solve(50.0, 20.0, &model);
        assert!(sol.converged);
        assert!(sol.iterations <= 10);
        assert!((sol.delay - 5.0).abs() < 0.01);
        assert!((sol.emit_time - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_static_law_without_history() {
        let model = stepped(CosmologyConfig::static_space().with_light_speed(10.0), 1.0, 3);
        let sol = LightDelaySolver::default().solve(50.0, 3.0, &model);
        assert!(sol.converged);
        assert!((sol.delay - 5.0).abs() < 1e-12);
        assert!(sol.predates_origin());
    }

    #[test]
    fn test_expansion_shortens_delay_relative_to_today() {
        // a grows from 1 to 11; light travelled while space was smaller
        let model = stepped(CosmologyConfig::linear(1.0).with_light_speed(10.0), 1.0, 10);
        let sol = LightDelaySolver::default().solve(10.0, 10.0, &model);
        let today = 10.0 * model.scale_factor().get() / 10.0;
        assert!(sol.delay < today);
        assert!(sol.delay > 1.0);
        if sol.converged {
            let mean = model.scale_factor().mean_between(sol.emit_time, 10.0);
            assert!((sol.delay - 10.0 * mean / 10.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_light_speed_mode_uses_mean_light_speed() {
        let config = CosmologyConfig::static_space()
            .with_light_speed(20.0)
            .with_light_speed_decay(0.9);
        let model = stepped(config, 1.0, 10);
        let solver = LightDelaySolver::new(SolverConfig::default().with_mode(SolverMode::LightSpeed)).unwrap();
        let sol = solver.solve(30.0, 10.0, &model);

        // Slower light now than in the past: delay between d/c_ref and d/c_now
        assert!(sol.delay > 30.0 / 20.0);
        assert!(sol.delay < 30.0 / model.light_speed().get());
    }

    #[test]
    fn test_non_convergence_returns_best_estimate() {
        let model = stepped(CosmologyConfig::linear(5.0).with_light_speed(1.0), 0.1, 100);
        let config = SolverConfig {
            max_iterations: 1,
            tolerance: 1e-9,
            ..Default::default()
        };
        let sol = LightDelaySolver::new(config).unwrap().solve(5.0, 10.0, &model);
        assert!(!sol.converged);
        assert_eq!(sol.iterations, 1);
        assert!(sol.emit_time <= 10.0);

        // The estimate from the first iteration, not the relaxed guess
        let guess = 5.0 / model.light_speed().get();
        let estimate = 5.0 * model.scale_factor().mean_between(10.0 - guess, 10.0)
            / model.light_speed().get();
        assert!((sol.delay - estimate).abs() < 1e-12);
        assert!((sol.delay - guess).abs() > 1.0);
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let model = stepped(CosmologyConfig::linear(1.0).with_light_speed(10.0), 1.0, 4);
        let config = SolverConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let sol = LightDelaySolver::new(config).unwrap().solve(20.0, 4.0, &model);
        assert!(!sol.converged);
        assert_eq!(sol.delay, 2.0);
    }

    #[test]
    fn test_invalid_solver_config() {
        for config in [
            SolverConfig { tolerance: 0.0, ..Default::default() },
            SolverConfig { epsilon: -1.0, ..Default::default() },
            SolverConfig { relaxation: 1.0, ..Default::default() },
        ] {
            assert!(LightDelaySolver::new(config).is_err());
        }
    }

    proptest! {
        #[test]
        fn prop_flat_scale_factor_gives_distance_over_speed(
            distance in 0.0f64..500.0,
            light_speed in 0.5f64..100.0,
        ) {
            let model = stepped(CosmologyConfig::linear(0.0).with_light_speed(light_speed), 1.0, 5);
            let sol = LightDelaySolver::default().solve(distance, 5.0, &model);
            prop_assert!(sol.converged);
            prop_assert!(sol.iterations <= 1);
            prop_assert!((sol.delay - distance / light_speed).abs() < 1e-9);
        }
    }
}
