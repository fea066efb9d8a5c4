//! Fixed model parameters.
//!
//! `ModelConfig::default()` is built from these values; scenario files may
//! override any of them.

/// Bulk density of a stony impactor (kg/m³).
pub const DEFAULT_DENSITY_KG_M3: f64 = 3000.0;

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Mass above which the body penetrates to the low burst band (kg).
pub const DEEP_BURST_MASS_KG: f64 = 1.0e7;
pub const DEEP_BURST_ALTITUDE_KM: f64 = 10.0;

/// Mass above which the body bursts in the intermediate band (kg).
pub const MID_BURST_MASS_KG: f64 = 1.0e6;
pub const MID_BURST_ALTITUDE_KM: f64 = 15.0;

/// Small bodies burst at `base + span * sin(angle)` kilometres.
pub const SHALLOW_BURST_BASE_KM: f64 = 20.0;
pub const SHALLOW_BURST_SPAN_KM: f64 = 20.0;

pub const MIN_BURST_ALTITUDE_KM: f64 = 5.0;
pub const MIN_ENERGY_MEGATONS: f64 = 0.01;

// Blast field

pub const REFERENCE_PRESSURE_COEFFICIENT: f64 = 1000.0;
pub const PRESSURE_FALLOFF_EXPONENT: f64 = 1.5;
pub const PRESSURE_DISPLAY_SCALE: f64 = 1000.0;
pub const MAX_OVERPRESSURE_PSI: f64 = 100.0;

/// Overpressure at which a reference structure is severely damaged (PSI).
pub const BUILDING_DAMAGE_THRESHOLD_PSI: f64 = 5.0;

/// Overpressure above which windows shatter (PSI).
pub const WINDOW_DAMAGE_THRESHOLD_PSI: f64 = 1.0;

pub const SHOCKWAVE_MAX_RADIUS_M: f64 = 5000.0;
pub const SHOCKWAVE_SCAN_START_M: f64 = 1.0;
pub const SHOCKWAVE_SCAN_STEP_M: f64 = 10.0;

pub const THERMAL_RADIUS_COEFFICIENT_M: f64 = 2500.0;
pub const THERMAL_REFERENCE_DOSE_CAL_CM2: f64 = 10.0;

/// Second-degree burn dose (cal/cm²).
pub const BURN_THRESHOLD_CAL_CM2: f64 = 8.0;

// Synthetic city

pub const CITY_HALF_EXTENT_M: f64 = 500.0;
pub const BUILDING_COUNT: usize = 100;
pub const BUILDING_MIN_FOOTPRINT_M: f64 = 10.0;
pub const BUILDING_FOOTPRINT_SPAN_M: f64 = 50.0;
pub const BUILDING_MIN_HEIGHT_M: f64 = 30.0;
pub const BUILDING_HEIGHT_SPAN_M: f64 = 150.0;

/// Height that doubles a structure's damage threshold (m).
pub const THRESHOLD_HEIGHT_SCALE_M: f64 = 500.0;
pub const RESILIENCE_HEIGHT_SCALE_M: f64 = 200.0;

// Mock socio-economic figures. None of these are calibrated; they are
// placeholders kept for output compatibility.

pub const MOCK_BUILDING_VALUE_USD: f64 = 100_000.0;
pub const MOCK_WINDOW_DAMAGE_COST_USD: f64 = 5_000.0;
pub const MOCK_POP_DENSITY_SQKM: f64 = 5_000.0;
pub const CASUALTY_RATE_STRUCTURAL: f64 = 0.05;
pub const CASUALTY_RATE_THERMAL_MINOR: f64 = 0.005;

pub const DAMAGE_FLOOR_COEFFICIENT_USD: f64 = 5_000_000.0;
pub const DAMAGE_FLOOR_EXPONENT: f64 = 0.75;
pub const WINDOW_RADIUS_MULTIPLIER: f64 = 1.5;
pub const WINDOW_FALLBACK_RADIUS_M: f64 = 500.0;

/// Share of the population density taken as window-damaged buildings.
pub const WINDOW_BUILDING_FRACTION: f64 = 0.1;

pub const THERMAL_AREA_EXPONENT: f64 = 0.7;
pub const THERMAL_DENSITY_REFERENCE_SQKM: f64 = 10_000.0;
pub const THERMAL_CASUALTY_MULTIPLIER: f64 = 10.0;

pub const ENERGY_FATALITY_COEFFICIENT: f64 = 50.0;
pub const ENERGY_FATALITY_EXPONENT: f64 = 0.8;
pub const MIN_FATALITIES: u32 = 10;
pub const MAX_FATALITIES: u32 = 500;

/// Below both limits an event is reported as a near miss.
pub const NEAR_MISS_DIAMETER_M: f64 = 15.0;
pub const NEAR_MISS_VELOCITY_KM_S: f64 = 14.0;
pub const NEAR_MISS_DAMAGE_CAP_USD: f64 = 4_999.0;
pub const CONFIRMED_IMPACT_DAMAGE_FLOOR_USD: f64 = 10_000.0;

// Hazard scale

pub const HAZARD_LEVEL_2_DIAMETER_M: f64 = 50.0;
pub const HAZARD_LEVEL_1_DIAMETER_M: f64 = 20.0;

// NEO candidate filter

pub const NEO_MIN_DIAMETER_M: f64 = 10.0;
pub const NEO_MAX_DIAMETER_M: f64 = 100.0;
pub const NEO_SEARCH_WINDOW_DAYS: i64 = 7;
pub const NEO_SEARCH_OFFSETS_DAYS: [i64; 3] = [0, 60, 300];
