use crate::{config::ModelConfig, constants::*};

/// Peak overpressure on the ground at horizontal distance `radius_m` from the
/// burst's ground projection.
///
/// Inverse-power attenuation with slant distance, clamped to
/// `[0, MAX_OVERPRESSURE_PSI]`. Non-positive energy yields zero everywhere.
pub fn overpressure_psi(radius_m: f64, altitude_m: f64, energy_megatons: f64) -> f64 {
    if energy_megatons <= 0.0 {
        return 0.0;
    }

    let slant_distance_m = radius_m.hypot(altitude_m);
    let reference = REFERENCE_PRESSURE_COEFFICIENT * energy_megatons.sqrt();
    let pressure = reference / slant_distance_m.powf(PRESSURE_FALLOFF_EXPONENT);

    (pressure * PRESSURE_DISPLAY_SCALE).clamp(0.0, MAX_OVERPRESSURE_PSI)
}

/// Radius inside which the thermal dose exceeds `burn_threshold_cal_cm2`.
pub fn thermal_radius_m(energy_megatons: f64, burn_threshold_cal_cm2: f64) -> f64 {
    THERMAL_RADIUS_COEFFICIENT_M
        * energy_megatons.sqrt()
        * (THERMAL_REFERENCE_DOSE_CAL_CM2 / burn_threshold_cal_cm2).sqrt()
}

/// Largest sampled radius at which overpressure exceeds the damage threshold.
///
/// Samples from `scan_start_m` in `scan_step_m` increments while below
/// `scan_max_radius_m`, stopping at the first sample that falls back under
/// the threshold. Returns 0 if no sample exceeds it, or if the step is not
/// positive (see [`ModelConfig::validate`]).
pub fn max_damage_radius_m(altitude_m: f64, energy_megatons: f64, config: &ModelConfig) -> f64 {
    if config.scan_step_m.is_nan() || config.scan_step_m <= 0.0 {
        return 0.0;
    }

    let mut max_radius = 0.0;
    let mut radius = config.scan_start_m;

    while radius < config.scan_max_radius_m {
        let pressure = overpressure_psi(radius, altitude_m, energy_megatons);
        if pressure > config.damage_threshold_psi {
            max_radius = radius;
        } else if max_radius > 0.0 {
            break;
        }
        radius += config.scan_step_m;
    }

    max_radius
}
