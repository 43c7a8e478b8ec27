//! Material constants for the S-N damage calculation.

use serde::{Deserialize, Serialize};

use crate::error::{FatigueError, Result};

/// Represents the material a stress signal is assessed against.
///
/// Only the ultimate strength and the S-N curve parameters enter the damage
/// sum; the endurance limit is derived as half the ultimate strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Name of the material, used in log output only.
    pub name: String,
    /// Ultimate strength `Rm` in the unit of the stress signal (e.g. MPa).
    pub ultimate_stress: f64,
    /// Fatigue characteristics of the material.
    pub fatigue: Fatigue,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: String::from("default"),
            ultimate_stress: 865.0,
            fatigue: Fatigue::default(),
        }
    }
}

impl Material {
    /// Validates the `Material` struct to ensure the ultimate strength and the
    /// `Fatigue` parameters are usable in the damage sum.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if all properties are valid. Otherwise it returns
    /// [`FatigueError::InvalidConfiguration`] detailing the issue.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatigue_damage::material::Material;
    ///
    /// assert!(Material::default().validate().is_ok());
    ///
    /// let mut material = Material::default();
    /// material.ultimate_stress = 0.0;
    /// assert!(material.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid(format!("name must not be empty, got {:?}", self.name)));
        }
        positive("ultimate_stress", self.ultimate_stress)?;
        self.fatigue.validate()?;
        Ok(())
    }

    /// Endurance limit `σ_af = Rm / 2`.
    pub fn endurance_limit(&self) -> f64 {
        self.ultimate_stress / 2.0
    }
}

/// Represents the S-N curve of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fatigue {
    /// Slope `m` of the S-N curve.
    pub slope: f64,
    /// Cycle count `N_k` at the knee point of the S-N curve.
    pub knee_cycles: f64,
}

impl Default for Fatigue {
    fn default() -> Self {
        Fatigue {
            slope: 8.0,
            knee_cycles: 2.0e6,
        }
    }
}

impl Fatigue {
    /// Ensures that both the slope and the knee point cycle count are greater than 0.
    pub fn validate(&self) -> Result<()> {
        positive("slope", self.slope)?;
        positive("knee_cycles", self.knee_cycles)?;
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be greater than 0.0, got {}", field, value)))
    }
}

fn invalid(message: String) -> FatigueError {
    FatigueError::InvalidConfiguration(message)
}
