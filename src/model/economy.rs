use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{config::EconomyConfig, constants::*};

/// Everything the estimator reads for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactFactors {
    pub severe_count: usize,
    pub blast_radius_m: f64,
    pub thermal_radius_m: f64,
    pub energy_megatons: f64,
    /// Diameter and velocity only drive the near-miss and confirmed-impact bands.
    pub diameter_m: f64,
    pub velocity_km_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub estimated_damage_usd: f64,
    /// Always within `[MIN_FATALITIES, MAX_FATALITIES]`.
    pub estimated_fatalities: u32,
}

pub fn estimate_impact(factors: &ImpactFactors, config: &EconomyConfig) -> ImpactEstimate {
    ImpactEstimate {
        estimated_damage_usd: estimate_damage_usd(factors, config),
        estimated_fatalities: estimate_fatalities(factors, config),
    }
}

fn disc_area_sqkm(radius_m: f64) -> f64 {
    PI * (radius_m / 1000.0).powi(2)
}

fn estimate_damage_usd(factors: &ImpactFactors, config: &EconomyConfig) -> f64 {
    let floor = DAMAGE_FLOOR_COEFFICIENT_USD * factors.energy_megatons.powf(DAMAGE_FLOOR_EXPONENT);

    let structural = factors.severe_count as f64 * config.building_value_usd;

    let window_radius_m = if factors.blast_radius_m > 0.0 {
        factors.blast_radius_m * WINDOW_RADIUS_MULTIPLIER
    } else {
        WINDOW_FALLBACK_RADIUS_M
    };
    let window_buildings = (disc_area_sqkm(window_radius_m)
        * config.population_density_sqkm
        * WINDOW_BUILDING_FRACTION)
        .round();
    let windows = window_buildings * config.window_damage_cost_usd;

    let total = (structural + windows).max(floor);

    if factors.diameter_m < NEAR_MISS_DIAMETER_M && factors.velocity_km_s < NEAR_MISS_VELOCITY_KM_S
    {
        total.min(NEAR_MISS_DAMAGE_CAP_USD)
    } else if factors.diameter_m >= NEAR_MISS_DIAMETER_M
        && total < CONFIRMED_IMPACT_DAMAGE_FLOOR_USD
    {
        CONFIRMED_IMPACT_DAMAGE_FLOOR_USD
    } else {
        total
    }
}

fn estimate_fatalities(factors: &ImpactFactors, config: &EconomyConfig) -> u32 {
    let density = config.population_density_sqkm;

    let structural =
        (disc_area_sqkm(factors.blast_radius_m) * density * config.casualty_rate_structural).round();

    let thermal_multiplier = disc_area_sqkm(factors.thermal_radius_m).powf(THERMAL_AREA_EXPONENT)
        * (density / THERMAL_DENSITY_REFERENCE_SQKM);
    let thermal = (thermal_multiplier * THERMAL_CASUALTY_MULTIPLIER * config.casualty_rate_thermal)
        .round();

    let energy_floor = (ENERGY_FATALITY_COEFFICIENT
        * factors.energy_megatons.powf(ENERGY_FATALITY_EXPONENT))
    .round();

    let total = (structural + thermal).max(energy_floor);
    total.clamp(MIN_FATALITIES as f64, MAX_FATALITIES as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(energy: f64, blast: f64, thermal: f64, diameter: f64, velocity: f64) -> ImpactFactors {
        ImpactFactors {
            severe_count: 0,
            blast_radius_m: blast,
            thermal_radius_m: thermal,
            energy_megatons: energy,
            diameter_m: diameter,
            velocity_km_s: velocity,
        }
    }

    #[test]
    fn default_impactor_uses_energy_floors() {
        let estimate = estimate_impact(
            &factors(9.38, 0.0, 8560.0, 50.0, 20.0),
            &EconomyConfig::default(),
        );
        let floor = 5_000_000.0 * 9.38_f64.powf(0.75);
        assert!((estimate.estimated_damage_usd - floor).abs() < 1e-6);
        // round(50 * 9.38^0.8) = 300
        assert_eq!(estimate.estimated_fatalities, 300);
    }

    #[test]
    fn window_component_uses_fallback_radius() {
        // pi * 0.25 km² * 5000 * 0.1 = 392.7 -> 393 buildings at $5000.
        let estimate = estimate_impact(
            &factors(0.0, 0.0, 0.0, 20.0, 20.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_damage_usd, 393.0 * 5000.0);
    }

    #[test]
    fn structural_component_counts_severe_buildings() {
        let mut input = factors(0.0, 1.0, 0.0, 20.0, 20.0);
        input.severe_count = 40;
        let estimate = estimate_impact(&input, &EconomyConfig::default());
        assert_eq!(estimate.estimated_damage_usd, 4_000_000.0);
    }

    #[test]
    fn near_miss_is_capped() {
        let estimate = estimate_impact(
            &factors(50.0, 2000.0, 9000.0, 10.0, 10.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_damage_usd, 4999.0);
    }

    #[test]
    fn confirmed_impact_is_raised_to_floor() {
        // 1.5 m window radius rounds to zero buildings, zero energy gives no floor.
        let estimate = estimate_impact(
            &factors(0.0, 1.0, 0.0, 20.0, 20.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_damage_usd, 10_000.0);
    }

    #[test]
    fn fast_small_body_is_not_suppressed() {
        let estimate = estimate_impact(
            &factors(0.0, 1.0, 0.0, 10.0, 20.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_damage_usd, 0.0);
    }

    #[test]
    fn fatalities_are_clamped() {
        let config = EconomyConfig::default();
        let tiny = estimate_impact(&factors(0.01, 0.0, 10.0, 1.0, 1.0), &config);
        assert_eq!(tiny.estimated_fatalities, 10);

        let huge = estimate_impact(&factors(1.0e6, 5000.0, 1.0e6, 1000.0, 70.0), &config);
        assert_eq!(huge.estimated_fatalities, 500);
    }

    #[test]
    fn structural_and_thermal_terms_add() {
        // blast 1 km: round(pi * 5000 * 0.05) = 785, clamped to 500
        let estimate = estimate_impact(
            &factors(0.01, 1000.0, 0.0, 20.0, 20.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_fatalities, 500);

        // blast 200 m: round(0.12566 * 250) = 31; thermal 2 km:
        // (12.566^0.7) * 0.5 * 10 * 0.005 = 0.147 -> 0
        let estimate = estimate_impact(
            &factors(0.01, 200.0, 2000.0, 20.0, 20.0),
            &EconomyConfig::default(),
        );
        assert_eq!(estimate.estimated_fatalities, 31);
    }
}
