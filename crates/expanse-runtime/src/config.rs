//! Runtime configuration
//!
//! Every section has defaults; a JSON file only needs the keys it changes:
//!
//! ```json
//! {
//!   "cosmology": { "law": { "kind": "constant", "expansion_rate": 0.5 } },
//!   "simulator": { "save_interval": 0.0 },
//!   "objects": { "num": 50 }
//! }
//! ```

use std::path::{Path, PathBuf};

use expanse_core::ExpanseError;
use expanse_model::CosmologyConfig;
use expanse_observe::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::{RuntimeError, RuntimeResult};

/// Tick loop configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Frame time per tick, in seconds
    pub dt: f64,
    /// Seconds between automatic snapshots (0 disables)
    pub save_interval: f64,
    /// Directory snapshots are written to
    pub snapshots_dir: PathBuf,
    /// Maximum points kept per scalar for graph overlays
    pub history_points: usize,
    pub start_paused: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            dt: 1.0 / 60.0,
            save_interval: 1.0,
            snapshots_dir: PathBuf::from("snapshots"),
            history_points: 500,
            start_paused: false,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> RuntimeResult<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(ExpanseError::invalid("dt", self.dt, "must be > 0").into());
        }
        if !(self.save_interval >= 0.0) {
            return Err(
                ExpanseError::invalid("save_interval", self.save_interval, "must be >= 0").into(),
            );
        }
        Ok(())
    }
}

/// Random object field parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of objects
    pub num: usize,
    /// Half-width of the square the comoving positions are drawn from
    pub spread: f64,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            num: 200,
            spread: 200.0,
            seed: 42,
        }
    }
}

/// Complete configuration of one run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanseConfig {
    pub cosmology: CosmologyConfig,
    pub solver: SolverConfig,
    pub simulator: SimulatorConfig,
    pub objects: FieldConfig,
}

impl ExpanseConfig {
    pub fn from_json(data: &str) -> RuntimeResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| RuntimeError::io(path, e))?;
        Self::from_json(&data)
    }

    /// Check every section before anything is built
    pub fn validate(&self) -> RuntimeResult<()> {
        self.cosmology.validate()?;
        self.solver.validate()?;
        self.simulator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_model::ExpansionLaw;
    use expanse_observe::SolverMode;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ExpanseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ExpanseConfig::from_json(
            r#"{
                "cosmology": { "law": { "kind": "constant", "expansion_rate": 0.5 } },
                "solver": { "mode": "light_speed" },
                "simulator": { "save_interval": 0.0 },
                "objects": { "num": 50 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.cosmology.law,
            ExpansionLaw::Constant {
                expansion_rate: 0.5
            }
        );
        assert_eq!(config.solver.mode, SolverMode::LightSpeed);
        assert_eq!(config.solver.max_iterations, 10);
        assert_eq!(config.simulator.save_interval, 0.0);
        assert_eq!(config.objects.num, 50);
        assert_eq!(config.objects.spread, 200.0);
    }

    #[test]
    fn test_invalid_sections_are_reported() {
        let mut config = ExpanseConfig::default();
        config.simulator.dt = 0.0;
        assert!(config.validate().is_err());

        let config = ExpanseConfig::from_json(
            r#"{ "cosmology": { "law": { "kind": "lambda_cdm", "omega_matter": 0.3, "omega_dark_energy": 0.0, "hubble_param": 1.0 } } }"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(RuntimeError::Core(_))));
    }

    #[test]
    fn test_unknown_law_is_rejected() {
        let result = ExpanseConfig::from_json(r#"{ "cosmology": { "law": { "kind": "bounce" } } }"#);
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }
}
