use serde::{Deserialize, Serialize};

use crate::{constants::*, error::SimulationError};

/// Tunable parameters of the impact model.
///
/// Every field defaults to the matching item in [`crate::constants`], so a
/// scenario only has to list the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub density_kg_m3: f64,
    pub damage_threshold_psi: f64,
    pub window_threshold_psi: f64,
    pub burn_threshold_cal_cm2: f64,
    pub scan_start_m: f64,
    pub scan_step_m: f64,
    pub scan_max_radius_m: f64,
    pub economy: EconomyConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            damage_threshold_psi: BUILDING_DAMAGE_THRESHOLD_PSI,
            window_threshold_psi: WINDOW_DAMAGE_THRESHOLD_PSI,
            burn_threshold_cal_cm2: BURN_THRESHOLD_CAL_CM2,
            scan_start_m: SHOCKWAVE_SCAN_START_M,
            scan_step_m: SHOCKWAVE_SCAN_STEP_M,
            scan_max_radius_m: SHOCKWAVE_MAX_RADIUS_M,
            economy: EconomyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub building_value_usd: f64,
    pub window_damage_cost_usd: f64,
    pub population_density_sqkm: f64,
    pub casualty_rate_structural: f64,
    pub casualty_rate_thermal: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            building_value_usd: MOCK_BUILDING_VALUE_USD,
            window_damage_cost_usd: MOCK_WINDOW_DAMAGE_COST_USD,
            population_density_sqkm: MOCK_POP_DENSITY_SQKM,
            casualty_rate_structural: CASUALTY_RATE_STRUCTURAL,
            casualty_rate_thermal: CASUALTY_RATE_THERMAL_MINOR,
        }
    }
}

impl ModelConfig {
    /// Rejects settings that would make the pipeline meaningless or keep the
    /// radial scan from terminating.
    pub fn validate(&self) -> Result<(), SimulationError> {
        positive("density_kg_m3", self.density_kg_m3)?;
        positive("damage_threshold_psi", self.damage_threshold_psi)?;
        positive("window_threshold_psi", self.window_threshold_psi)?;
        positive("burn_threshold_cal_cm2", self.burn_threshold_cal_cm2)?;
        positive("scan_step_m", self.scan_step_m)?;
        if !self.scan_start_m.is_finite() || self.scan_start_m < 0.0 {
            return Err(SimulationError::InvalidConfig {
                field: "scan_start_m",
                value: self.scan_start_m,
                reason: "must be a non-negative number",
            });
        }
        if !self.scan_max_radius_m.is_finite() || self.scan_max_radius_m <= self.scan_start_m {
            return Err(SimulationError::InvalidConfig {
                field: "scan_max_radius_m",
                value: self.scan_max_radius_m,
                reason: "must exceed scan_start_m",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfig {
            field,
            value,
            reason: "must be a positive number",
        })
    }
}

fn default_half_extent() -> f64 {
    CITY_HALF_EXTENT_M
}

fn default_building_count() -> usize {
    BUILDING_COUNT
}

/// Layout of the synthetic city the blast is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    #[serde(default = "default_half_extent")]
    pub half_extent_m: f64,
    #[serde(default = "default_building_count")]
    pub building_count: usize,
}

impl CityConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        positive("half_extent_m", self.half_extent_m)
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            half_extent_m: default_half_extent(),
            building_count: default_building_count(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
