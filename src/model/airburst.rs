use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{config::ModelConfig, constants::*, model::SimulationInput};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirburstResult {
    pub mass_kg: f64,
    pub energy_joules: f64,
    /// Never below 5 km.
    pub altitude_km: f64,
    /// Never below 0.01 Mt.
    pub energy_megatons: f64,
}

impl AirburstResult {
    pub fn altitude_m(&self) -> f64 {
        self.altitude_km * 1000.0
    }
}

/// Mass-banded burst altitude and kinetic energy yield.
///
/// The altitude bands are a heuristic: heavy bodies penetrate to a fixed low
/// band, light ones burst between 20 and 40 km depending on entry angle.
pub fn calculate_airburst(input: &SimulationInput, config: &ModelConfig) -> AirburstResult {
    let radius_m = input.diameter_m() / 2.0;
    let mass_kg = (4.0 / 3.0) * PI * radius_m.powi(3) * config.density_kg_m3;
    let velocity_m_s = input.velocity_km_s() * 1000.0;

    let altitude_km = if mass_kg > DEEP_BURST_MASS_KG {
        DEEP_BURST_ALTITUDE_KM
    } else if mass_kg > MID_BURST_MASS_KG {
        MID_BURST_ALTITUDE_KM
    } else {
        SHALLOW_BURST_BASE_KM + SHALLOW_BURST_SPAN_KM * input.angle_deg().to_radians().sin()
    };

    let energy_joules = 0.5 * mass_kg * velocity_m_s * velocity_m_s;
    let energy_megatons = energy_joules / JOULES_PER_MEGATON;

    AirburstResult {
        mass_kg,
        energy_joules,
        altitude_km: altitude_km.max(MIN_BURST_ALTITUDE_KM),
        energy_megatons: energy_megatons.max(MIN_ENERGY_MEGATONS),
    }
}
