//! Expansion Model - owns the scale factor and light speed histories

use expanse_core::{ExpanseResult, TimeSeries};
use tracing::debug;

use crate::{CosmologyConfig, ExpansionLaw, LightSpeedLaw};

/// Expansion model.
/// INVARIANT: the active laws are fixed for the lifetime of the instance,
/// and `step` is the only mutator of the histories.
#[derive(Debug, Clone)]
pub struct ExpansionModel {
    /// Scale factor history
    scale_factor: TimeSeries,
    /// Light speed history (holds a single value under the constant law)
    light_speed: TimeSeries,
    /// Scale factor law
    law: ExpansionLaw,
    /// Light speed law
    light_speed_law: LightSpeedLaw,
    /// Light speed the model was created with
    reference_light_speed: f64,
    /// ΛCDM characteristic time, recomputed every step
    characteristic_time: Option<f64>,
    /// Number of steps taken
    steps: u64,
}

impl ExpansionModel {
    /// Create a model, rejecting parameters the laws cannot evaluate
    pub fn new(config: CosmologyConfig) -> ExpanseResult<Self> {
        config.validate()?;
        debug!(
            law = config.law.name(),
            scale_factor = config.initial_scale_factor,
            light_speed = config.light_speed,
            "expansion model created"
        );
        Ok(ExpansionModel {
            scale_factor: TimeSeries::new(config.initial_scale_factor),
            light_speed: TimeSeries::new(config.light_speed),
            law: config.law,
            light_speed_law: config.light_speed_law,
            reference_light_speed: config.light_speed,
            characteristic_time: config.law.characteristic_time(),
            steps: 0,
        })
    }

    /// Advance the model by one tick.
    /// `absolute_time` is the simulation time at the end of the tick;
    /// every law records its sample there.
    pub fn step(&mut self, dt: f64, absolute_time: f64) -> ExpanseResult<()> {
        match self.law {
            ExpansionLaw::Static => {}
            ExpansionLaw::Constant { expansion_rate } => {
                let next = self.scale_factor.get() + expansion_rate * dt;
                self.scale_factor.update(next, absolute_time)?;
            }
            ExpansionLaw::LambdaCdm {
                omega_matter,
                omega_dark_energy,
                hubble_param,
            } => {
                let t_c = (2.0 / 3.0) / hubble_param / omega_dark_energy.sqrt();
                self.characteristic_time = Some(t_c);
                let a = lambda_cdm_scale_factor(omega_matter, omega_dark_energy, t_c, absolute_time);
                self.scale_factor.update(a, absolute_time)?;
            }
        }

        if let LightSpeedLaw::Decay { factor } = self.light_speed_law {
            let next = self.light_speed.get() * factor;
            self.light_speed.update(next, absolute_time)?;
        }

        self.steps += 1;
        Ok(())
    }

    /// Scale factor history
    pub fn scale_factor(&self) -> &TimeSeries {
        &self.scale_factor
    }

    /// Light speed history
    pub fn light_speed(&self) -> &TimeSeries {
        &self.light_speed
    }

    /// Light speed at creation
    pub fn reference_light_speed(&self) -> f64 {
        self.reference_light_speed
    }

    pub fn characteristic_time(&self) -> Option<f64> {
        self.characteristic_time
    }

    pub fn law(&self) -> ExpansionLaw {
        self.law
    }

    pub fn light_speed_law(&self) -> LightSpeedLaw {
        self.light_speed_law
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Current scalar values for HUD and graph overlays
    pub fn scalar_snapshot(&self) -> Vec<(&'static str, f64)> {
        let mut items = vec![("scale_factor", self.scale_factor.get())];
        if let Some(t_c) = self.characteristic_time {
            items.push(("characteristic_time", t_c));
        }
        items.push(("light_speed", self.light_speed.get()));
        items
    }
}

/// Flat ΛCDM scale factor at time `t`.
/// `sinh^(2/3)` is taken as the squared cube root so negative times stay real.
pub fn lambda_cdm_scale_factor(
    omega_matter: f64,
    omega_dark_energy: f64,
    characteristic_time: f64,
    t: f64,
) -> f64 {
    let amplitude = (omega_matter / omega_dark_energy).cbrt();
    amplitude * (t / characteristic_time).sinh().cbrt().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_law_records_nothing() {
        let mut model = ExpansionModel::new(CosmologyConfig::static_space()).unwrap();
        for i in 1..=5 {
            model.step(0.1, i as f64 * 0.1).unwrap();
        }
        assert_eq!(model.scale_factor().get(), 1.0);
        assert!(model.scale_factor().is_empty());
        assert_eq!(model.steps(), 5);
    }

    #[test]
    fn test_constant_law_zero_rate_is_flat() {
        let mut model = ExpansionModel::new(CosmologyConfig::linear(0.0)).unwrap();
        for i in 1..=20 {
            model.step(0.5, i as f64 * 0.5).unwrap();
        }
        assert!(model
            .scale_factor()
            .samples()
            .iter()
            .all(|s| s.value == 1.0));
        assert_eq!(model.scale_factor().value_at(3.3), 1.0);
    }

    #[test]
    fn test_constant_law_linear_growth() {
        let mut model = ExpansionModel::new(CosmologyConfig::linear(1.0)).unwrap();
        for i in 1..=10 {
            model.step(1.0, i as f64).unwrap();
        }
        assert!((model.scale_factor().get() - 11.0).abs() < 1e-12);
        assert_eq!(model.scale_factor().len(), 10);
        // Linear between recorded ticks
        assert!((model.scale_factor().value_at(4.5) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_lambda_cdm_small_time_limit() {
        let mut model = ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.7, 1.0)).unwrap();
        model.step(1e-6, 1e-6).unwrap();
        let a_small = model.scale_factor().get();
        model.step(9e-6, 1e-5).unwrap();
        let a_large = model.scale_factor().get();

        let expected = a_large * (1e-6f64 / 1e-5).powf(2.0 / 3.0);
        assert!(a_small > 0.0);
        assert!(((a_small - expected) / expected).abs() < 0.01);
        assert!(a_small < 1e-3);
    }

    #[test]
    fn test_lambda_cdm_reports_characteristic_time() {
        let mut model = ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.7, 2.0)).unwrap();
        model.step(0.1, 0.1).unwrap();
        let t_c = model.characteristic_time().unwrap();
        assert!((t_c - (1.0 / 3.0) / 0.7f64.sqrt()).abs() < 1e-12);

        let labels: Vec<_> = model.scalar_snapshot().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["scale_factor", "characteristic_time", "light_speed"]);
    }

    #[test]
    fn test_lambda_cdm_grows() {
        let mut model = ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.7, 1.0)).unwrap();
        let mut prev = 0.0;
        for i in 1..=50 {
            model.step(0.1, i as f64 * 0.1).unwrap();
            let a = model.scale_factor().get();
            assert!(a > prev);
            prev = a;
        }
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        assert!(ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.0, 1.0)).is_err());
        assert!(ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.7, -1.0)).is_err());
    }

    #[test]
    fn test_light_speed_decay() {
        let config = CosmologyConfig::static_space()
            .with_light_speed(10.0)
            .with_light_speed_decay(0.5);
        let mut model = ExpansionModel::new(config).unwrap();
        model.step(1.0, 1.0).unwrap();
        model.step(1.0, 2.0).unwrap();
        assert_eq!(model.light_speed().get(), 2.5);
        assert_eq!(model.reference_light_speed(), 10.0);
        assert_eq!(model.light_speed().value_at(1.5), 3.75);
    }

    #[test]
    fn test_constant_light_speed_is_queryable() {
        let model = ExpansionModel::new(CosmologyConfig::default()).unwrap();
        assert_eq!(model.light_speed().get(), 10.0);
        assert_eq!(model.light_speed().value_at(-5.0), 10.0);
        assert_eq!(model.light_speed().mean_between(0.0, 5.0), 10.0);
    }

    #[test]
    fn test_step_backward_in_time_is_rejected() {
        let mut model = ExpansionModel::new(CosmologyConfig::linear(1.0)).unwrap();
        model.step(1.0, 2.0).unwrap();
        assert!(model.step(1.0, 1.0).is_err());
        assert_eq!(model.scale_factor().get(), 2.0);
    }

    #[test]
    fn test_negative_time_stays_real() {
        let a = lambda_cdm_scale_factor(0.3, 0.7, 1.0, -1.0);
        assert!(a.is_finite());
        assert!((a - lambda_cdm_scale_factor(0.3, 0.7, 1.0, 1.0)).abs() < 1e-12);
    }
}
