use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    city::City,
    config::ModelConfig,
    model::{
        calculate_airburst, classify_structures, economy::ImpactFactors, estimate_impact,
        max_damage_radius_m, score_hazard, thermal_radius_m, AirburstResult, DamageAssessment,
        HazardScore, ImpactEstimate, SimulationInput,
    },
};

/// Who the impactor is, as opposed to its physical parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactorIdentity {
    pub name: String,
    /// Set for the built-in synthetic scenario object rather than a catalogued NEO.
    #[serde(default)]
    pub synthetic: bool,
}

impl ImpactorIdentity {
    pub fn custom() -> Self {
        Self {
            name: "Custom Simulation".to_string(),
            synthetic: false,
        }
    }
}

/// Full result of one pipeline run. Intermediate values are kept as typed
/// fields so downstream consumers never re-derive them from display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub airburst: AirburstResult,
    pub thermal_radius_m: f64,
    pub damage: DamageAssessment,
    pub impact: ImpactEstimate,
    pub hazard: HazardScore,
}

/// Runs airburst, blast field, structure damage, socio-economic and hazard
/// models in order. Overwrites the overpressure field of every structure in
/// `city`; nothing else is mutated.
pub fn simulate(
    input: &SimulationInput,
    impactor: &ImpactorIdentity,
    city: &mut City,
    config: &ModelConfig,
    current_year: i32,
) -> SimulationOutcome {
    let airburst = calculate_airburst(input, config);
    let altitude_m = airburst.altitude_m();
    let energy = airburst.energy_megatons;
    debug!(
        altitude_km = airburst.altitude_km,
        energy_megatons = energy,
        mass_kg = airburst.mass_kg,
        "airburst computed"
    );

    let thermal_radius = thermal_radius_m(energy, config.burn_threshold_cal_cm2);
    let max_radius = max_damage_radius_m(altitude_m, energy, config);
    debug!(
        thermal_radius_m = thermal_radius,
        max_damage_radius_m = max_radius,
        "blast field scanned"
    );

    let mut damage = classify_structures(city.structures_mut(), altitude_m, energy, config);
    damage.max_damage_radius_m = max_radius;
    debug!(
        severe = damage.severe_count,
        moderate = damage.moderate_count,
        "structures classified"
    );

    let impact = estimate_impact(
        &ImpactFactors {
            severe_count: damage.severe_count,
            blast_radius_m: max_radius,
            thermal_radius_m: thermal_radius,
            energy_megatons: energy,
            diameter_m: input.diameter_m(),
            velocity_km_s: input.velocity_km_s(),
        },
        &config.economy,
    );

    let hazard = score_hazard(input.diameter_m(), impactor.synthetic, current_year);
    debug!(
        damage_usd = impact.estimated_damage_usd,
        fatalities = impact.estimated_fatalities,
        hazard_level = hazard.level,
        "impact estimated"
    );

    SimulationOutcome {
        airburst,
        thermal_radius_m: thermal_radius,
        damage,
        impact,
        hazard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CityConfig, constants::BUILDING_DAMAGE_THRESHOLD_PSI, rng::RngManager};

    fn city() -> City {
        City::generate(
            &CityConfig::default(),
            BUILDING_DAMAGE_THRESHOLD_PSI,
            &mut RngManager::new(3),
        )
    }

    #[test]
    fn default_scenario_end_to_end() {
        let input = SimulationInput::new(50.0, 20.0, 45.0).unwrap();
        let impactor = ImpactorIdentity {
            name: "Impactor-2025 (Custom Sim)".to_string(),
            synthetic: true,
        };
        let mut city = city();
        let outcome = simulate(&input, &impactor, &mut city, &ModelConfig::default(), 2026);

        assert_eq!(outcome.airburst.altitude_km, 10.0);
        assert!((outcome.airburst.mass_kg - 1.963e8).abs() / 1.963e8 < 0.01);
        assert!((outcome.airburst.energy_megatons - 9.38).abs() / 9.38 < 0.01);
        assert!((outcome.thermal_radius_m - 8560.0).abs() / 8560.0 < 0.01);

        // ~3.06 PSI everywhere in the city: windows only.
        assert_eq!(outcome.damage.max_damage_radius_m, 0.0);
        assert_eq!(outcome.damage.severe_count, 0);
        assert_eq!(outcome.damage.moderate_count, city.len());

        assert_eq!(outcome.impact.estimated_fatalities, 300);
        assert_eq!(outcome.hazard.level, 2);
        assert_eq!(outcome.hazard.years_label(), "2031, 2036 (Synthetic)");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let input = SimulationInput::new(120.0, 30.0, 60.0).unwrap();
        let impactor = ImpactorIdentity::custom();
        let config = ModelConfig::default();
        let mut city = city();

        let first = simulate(&input, &impactor, &mut city, &config, 2026);
        let second = simulate(&input, &impactor, &mut city, &config, 2026);
        assert_eq!(first, second);
    }

    #[test]
    fn near_miss_reports_negligible_damage() {
        let input = SimulationInput::new(10.0, 10.0, 45.0).unwrap();
        let mut city = city();
        let outcome = simulate(
            &input,
            &ImpactorIdentity::custom(),
            &mut city,
            &ModelConfig::default(),
            2026,
        );
        assert!(outcome.impact.estimated_damage_usd <= 4999.0);
        assert_eq!(outcome.hazard.level, 0);
    }
}
