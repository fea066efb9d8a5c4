use serde::Serialize;

/// A well-documented real airburst used as a yardstick for simulated runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceAirburst {
    pub name: &'static str,
    pub energy_megatons: f64,
    pub altitude_km: f64,
}

pub const REFERENCE_AIRBURSTS: [ReferenceAirburst; 2] = [
    ReferenceAirburst {
        name: "Chelyabinsk (2013)",
        energy_megatons: 0.5,
        altitude_km: 29.7,
    },
    ReferenceAirburst {
        name: "Tunguska (1908)",
        energy_megatons: 12.0,
        altitude_km: 8.0,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalComparison {
    pub event: &'static str,
    pub event_energy_megatons: f64,
    pub event_altitude_km: f64,
    /// Simulated yield divided by the event's yield.
    pub energy_ratio: f64,
}

pub fn compare_to_references(energy_megatons: f64) -> Vec<HistoricalComparison> {
    REFERENCE_AIRBURSTS
        .iter()
        .map(|event| HistoricalComparison {
            event: event.name,
            event_energy_megatons: event.energy_megatons,
            event_altitude_km: event.altitude_km,
            energy_ratio: energy_megatons / event.energy_megatons,
        })
        .collect()
}
