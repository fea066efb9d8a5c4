//! The impact-physics and damage-assessment model.
//!
//! Every function in here is pure: it reads its arguments and a
//! [`ModelConfig`](crate::config::ModelConfig) and returns a value. The only
//! thing written is the per-structure overpressure handed to
//! [`damage::classify_structures`].

pub mod airburst;
pub mod blast;
pub mod damage;
pub mod economy;
pub mod hazard;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

pub use airburst::{calculate_airburst, AirburstResult};
pub use blast::{max_damage_radius_m, overpressure_psi, thermal_radius_m};
pub use damage::{classify_structures, DamageAssessment, DamageSummary};
pub use economy::{estimate_impact, ImpactEstimate};
pub use hazard::{score_hazard, CandidateYears, HazardBand, HazardScore};

/// Physical entry parameters of one impactor.
///
/// Only constructible through [`SimulationInput::new`], so anything that
/// reaches the pipeline has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationInput {
    diameter_m: f64,
    velocity_km_s: f64,
    angle_deg: f64,
}

impl SimulationInput {
    pub fn new(
        diameter_m: f64,
        velocity_km_s: f64,
        angle_deg: f64,
    ) -> Result<Self, SimulationError> {
        if !diameter_m.is_finite() || diameter_m <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "diameter_m",
                value: diameter_m,
                reason: "must be a positive number",
            });
        }
        if !velocity_km_s.is_finite() || velocity_km_s <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "velocity_km_s",
                value: velocity_km_s,
                reason: "must be a positive number",
            });
        }
        if !(0.0..=90.0).contains(&angle_deg) {
            return Err(SimulationError::InvalidInput {
                field: "angle_deg",
                value: angle_deg,
                reason: "must lie within [0, 90]",
            });
        }
        Ok(Self {
            diameter_m,
            velocity_km_s,
            angle_deg,
        })
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    pub fn velocity_km_s(&self) -> f64 {
        self.velocity_km_s
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }
}

impl<'de> Deserialize<'de> for SimulationInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            diameter_m: f64,
            velocity_km_s: f64,
            angle_deg: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        SimulationInput::new(raw.diameter_m, raw.velocity_km_s, raw.angle_deg)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_diameter() {
        let err = SimulationInput::new(0.0, 20.0, 45.0).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidInput {
                field: "diameter_m",
                ..
            }
        ));
        assert!(SimulationInput::new(-3.0, 20.0, 45.0).is_err());
    }

    #[test]
    fn rejects_non_positive_velocity() {
        assert!(SimulationInput::new(50.0, 0.0, 45.0).is_err());
        assert!(SimulationInput::new(50.0, f64::NAN, 45.0).is_err());
    }

    #[test]
    fn angle_bounds_are_inclusive() {
        assert!(SimulationInput::new(50.0, 20.0, 0.0).is_ok());
        assert!(SimulationInput::new(50.0, 20.0, 90.0).is_ok());
        assert!(SimulationInput::new(50.0, 20.0, 90.5).is_err());
        assert!(SimulationInput::new(50.0, 20.0, -1.0).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: SimulationInput =
            serde_json::from_str(r#"{"diameter_m": 50, "velocity_km_s": 20, "angle_deg": 45}"#)
                .unwrap();
        assert_eq!(ok.diameter_m(), 50.0);

        let bad = serde_json::from_str::<SimulationInput>(
            r#"{"diameter_m": 50, "velocity_km_s": 20, "angle_deg": 120}"#,
        );
        assert!(bad.is_err());
    }
}
