use serde::{Deserialize, Serialize};

use crate::{
    city::{DamageState, GroundPoint, Structure},
    config::ModelConfig,
    model::blast::overpressure_psi,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageAssessment {
    pub severe_count: usize,
    pub moderate_count: usize,
    pub max_damage_radius_m: f64,
}

/// Applies the blast field to every structure and counts the damage bands.
///
/// Each structure's `current_overpressure_psi` and `damage` are overwritten;
/// nothing is removed. `max_damage_radius_m` is left at zero for the caller
/// to fill in from the radial scan.
pub fn classify_structures(
    structures: &mut [Structure],
    altitude_m: f64,
    energy_megatons: f64,
    config: &ModelConfig,
) -> DamageAssessment {
    let ground_zero = GroundPoint::new(0.0, 0.0);
    let mut assessment = DamageAssessment::default();

    for structure in structures.iter_mut() {
        let distance = structure.position.distance_to(&ground_zero);
        let pressure = overpressure_psi(distance, altitude_m, energy_megatons);
        structure.current_overpressure_psi = pressure;
        structure.damage = if pressure > structure.damage_threshold_psi {
            assessment.severe_count += 1;
            DamageState::Severe
        } else if pressure > config.window_threshold_psi {
            assessment.moderate_count += 1;
            DamageState::Moderate
        } else {
            DamageState::None
        };
    }

    assessment
}

/// Headline classification of a run, worst band first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum DamageSummary {
    Severe { count: usize },
    Moderate { count: usize },
    Low,
}

impl DamageSummary {
    pub fn from_assessment(assessment: &DamageAssessment) -> Self {
        if assessment.severe_count > 0 {
            DamageSummary::Severe {
                count: assessment.severe_count,
            }
        } else if assessment.moderate_count > 0 {
            DamageSummary::Moderate {
                count: assessment.moderate_count,
            }
        } else {
            DamageSummary::Low
        }
    }

    pub fn headline(&self, damage_threshold_psi: f64) -> String {
        match self {
            DamageSummary::Severe { count } => format!(
                "SEVERE DAMAGE: {count} structures collapsed (Overpressure > {damage_threshold_psi} PSI)."
            ),
            DamageSummary::Moderate { count } => {
                format!("MODERATE DAMAGE: {count} structures affected (Window Shattering).")
            }
            DamageSummary::Low => {
                "LOW IMPACT: Primarily thermal flash risk. Structures mostly intact.".to_string()
            }
        }
    }
}
