//! Expansion model configuration

use expanse_core::{ExpanseError, ExpanseResult};
use serde::{Deserialize, Serialize};

/// Law evolving the scale factor, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpansionLaw {
    /// Scale factor never changes (nothing is recorded)
    Static,
    /// Linear growth: `a += expansion_rate * dt`
    Constant { expansion_rate: f64 },
    /// Closed-form flat ΛCDM:
    /// `a(t) = (Ωm/ΩΛ)^(1/3) * sinh(t / t_c)^(2/3)`, `t_c = (2/3) / H / sqrt(ΩΛ)`
    LambdaCdm {
        omega_matter: f64,
        omega_dark_energy: f64,
        hubble_param: f64,
    },
}

impl ExpansionLaw {
    /// Law name as used in configuration files and logs
    pub fn name(&self) -> &'static str {
        match self {
            ExpansionLaw::Static => "static",
            ExpansionLaw::Constant { .. } => "constant",
            ExpansionLaw::LambdaCdm { .. } => "lambda_cdm",
        }
    }

    /// ΛCDM characteristic time, `None` for the other laws
    pub fn characteristic_time(&self) -> Option<f64> {
        match *self {
            ExpansionLaw::LambdaCdm {
                omega_dark_energy,
                hubble_param,
                ..
            } => Some((2.0 / 3.0) / hubble_param / omega_dark_energy.sqrt()),
            _ => None,
        }
    }

    pub fn validate(&self) -> ExpanseResult<()> {
        match *self {
            ExpansionLaw::Static => Ok(()),
            ExpansionLaw::Constant { expansion_rate } => {
                finite("expansion_rate", expansion_rate)?;
                Ok(())
            }
            ExpansionLaw::LambdaCdm {
                omega_matter,
                omega_dark_energy,
                hubble_param,
            } => {
                finite("omega_matter", omega_matter)?;
                if omega_matter < 0.0 {
                    return Err(ExpanseError::invalid(
                        "omega_matter",
                        omega_matter,
                        "must be >= 0",
                    ));
                }
                positive("omega_dark_energy", omega_dark_energy)?;
                positive("hubble_param", hubble_param)?;
                Ok(())
            }
        }
    }
}

impl Default for ExpansionLaw {
    fn default() -> Self {
        ExpansionLaw::Constant {
            expansion_rate: 0.1,
        }
    }
}

/// Law evolving the light speed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightSpeedLaw {
    /// Light speed keeps its initial value (nothing is recorded)
    #[default]
    Constant,
    /// `c *= factor` every tick
    Decay { factor: f64 },
}

impl LightSpeedLaw {
    pub fn validate(&self) -> ExpanseResult<()> {
        match *self {
            LightSpeedLaw::Constant => Ok(()),
            LightSpeedLaw::Decay { factor } => {
                positive("decay_factor", factor)?;
                if factor > 1.0 {
                    return Err(ExpanseError::invalid(
                        "decay_factor",
                        factor,
                        "must be <= 1",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Per-instance cosmology configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmologyConfig {
    /// Scale factor before the first tick
    pub initial_scale_factor: f64,
    /// Light speed before the first tick, also the reference light speed
    pub light_speed: f64,
    /// Scale factor law
    pub law: ExpansionLaw,
    /// Light speed law
    pub light_speed_law: LightSpeedLaw,
}

impl Default for CosmologyConfig {
    fn default() -> Self {
        CosmologyConfig {
            initial_scale_factor: 1.0,
            light_speed: 10.0,
            law: ExpansionLaw::default(),
            light_speed_law: LightSpeedLaw::Constant,
        }
    }
}

impl CosmologyConfig {
    /// Non-expanding space
    pub fn static_space() -> Self {
        CosmologyConfig {
            law: ExpansionLaw::Static,
            ..Default::default()
        }
    }

    /// Linear expansion at `expansion_rate` per unit time
    pub fn linear(expansion_rate: f64) -> Self {
        CosmologyConfig {
            law: ExpansionLaw::Constant { expansion_rate },
            ..Default::default()
        }
    }

    /// Flat ΛCDM expansion
    pub fn lambda_cdm(omega_matter: f64, omega_dark_energy: f64, hubble_param: f64) -> Self {
        CosmologyConfig {
            law: ExpansionLaw::LambdaCdm {
                omega_matter,
                omega_dark_energy,
                hubble_param,
            },
            ..Default::default()
        }
    }

    pub fn with_light_speed(mut self, light_speed: f64) -> Self {
        self.light_speed = light_speed;
        self
    }

    pub fn with_initial_scale_factor(mut self, scale_factor: f64) -> Self {
        self.initial_scale_factor = scale_factor;
        self
    }

    /// Make light speed decay geometrically every tick
    pub fn with_light_speed_decay(mut self, factor: f64) -> Self {
        self.light_speed_law = LightSpeedLaw::Decay { factor };
        self
    }

    /// Fail fast on parameters that would produce NaN or infinities
    pub fn validate(&self) -> ExpanseResult<()> {
        positive("initial_scale_factor", self.initial_scale_factor)?;
        positive("light_speed", self.light_speed)?;
        self.law.validate()?;
        self.light_speed_law.validate()
    }
}

fn finite(name: &'static str, value: f64) -> ExpanseResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpanseError::invalid(name, value, "must be finite"))
    }
}

fn positive(name: &'static str, value: f64) -> ExpanseResult<f64> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ExpanseError::invalid(name, value, "must be > 0"))
    }
}
