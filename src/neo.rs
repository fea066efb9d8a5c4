//! Near-Earth-object feed records and the candidate filter that turns them
//! into simulation inputs.
//!
//! Input is a NeoWs-style feed document: `near_earth_objects` maps an
//! approach date to a list of objects. Fetching the document is left to the
//! caller.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    constants::{
        NEO_MAX_DIAMETER_M, NEO_MIN_DIAMETER_M, NEO_SEARCH_OFFSETS_DAYS, NEO_SEARCH_WINDOW_DAYS,
    },
    error::SimulationError,
    model::SimulationInput,
    orchestrator::ImpactorIdentity,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchWindow {
    pub start_date: String,
    pub end_date: String,
}

/// The three fixed feed windows queried for candidates: a week starting
/// today, in 60 days and in 300 days.
pub fn search_windows(today: NaiveDate) -> Vec<SearchWindow> {
    NEO_SEARCH_OFFSETS_DAYS
        .iter()
        .map(|&offset| {
            let start = today + Duration::days(offset);
            let end = start + Duration::days(NEO_SEARCH_WINDOW_DAYS);
            SearchWindow {
                start_date: start.format("%Y-%m-%d").to_string(),
                end_date: end.format("%Y-%m-%d").to_string(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub date: String,
    pub diameter_min_m: f64,
    pub diameter_max_m: f64,
    pub velocity_km_s: f64,
    pub potentially_hazardous: bool,
}

impl NeoRecord {
    pub fn identity(&self) -> ImpactorIdentity {
        ImpactorIdentity {
            name: self.name.clone(),
            synthetic: false,
        }
    }

    /// Uses the minimum estimated diameter, as the candidate filter does,
    /// rounded to whole metres; velocity is rounded to 0.1 km/s.
    pub fn simulation_input(&self, angle_deg: f64) -> Result<SimulationInput, SimulationError> {
        let diameter_m = self.diameter_min_m.round();
        let velocity_km_s = (self.velocity_km_s * 10.0).round() / 10.0;
        SimulationInput::new(diameter_m, velocity_km_s, angle_deg)
    }
}

#[derive(Deserialize)]
struct FeedDocument {
    #[serde(default)]
    near_earth_objects: BTreeMap<String, Vec<Value>>,
}

#[derive(Deserialize)]
struct RawNeo {
    id: String,
    name: String,
    is_potentially_hazardous_asteroid: bool,
    estimated_diameter: Option<RawEstimatedDiameter>,
    #[serde(default)]
    close_approach_data: Vec<RawCloseApproach>,
}

#[derive(Deserialize)]
struct RawEstimatedDiameter {
    meters: Option<RawDiameterRange>,
}

#[derive(Deserialize)]
struct RawDiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Deserialize)]
struct RawCloseApproach {
    orbiting_body: String,
    relative_velocity: RawRelativeVelocity,
}

#[derive(Deserialize)]
struct RawRelativeVelocity {
    kilometers_per_second: Value,
}

/// Potentially hazardous objects with an Earth approach and a minimum
/// diameter inside the simulated band, in approach-date order.
///
/// A record with missing or malformed fields is skipped and logged; only a
/// document that is not JSON at all is an error.
pub fn parse_feed(json: &str) -> Result<Vec<NeoRecord>> {
    let document: FeedDocument =
        serde_json::from_str(json).context("NEO feed is not a valid feed document")?;

    let mut records = Vec::new();
    for (date, objects) in &document.near_earth_objects {
        for object in objects {
            match parse_record(date, object) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(reason) => {
                    let id = object.get("id").and_then(Value::as_str).unwrap_or("?");
                    warn!(date = %date, id, reason = %reason, "skipping NEO record");
                }
            }
        }
    }
    debug!(candidates = records.len(), "NEO feed parsed");
    Ok(records)
}

fn parse_record(date: &str, object: &Value) -> Result<Option<NeoRecord>, String> {
    let raw = RawNeo::deserialize(object).map_err(|err| err.to_string())?;
    if !raw.is_potentially_hazardous_asteroid {
        return Ok(None);
    }

    let approach = raw
        .close_approach_data
        .iter()
        .find(|approach| approach.orbiting_body == "Earth")
        .ok_or("no Earth close approach")?;
    let diameter = raw
        .estimated_diameter
        .and_then(|estimate| estimate.meters)
        .ok_or("no estimated diameter in meters")?;
    let velocity_km_s = parse_velocity(&approach.relative_velocity.kilometers_per_second)
        .ok_or("relative velocity is not a number")?;

    if !(NEO_MIN_DIAMETER_M..=NEO_MAX_DIAMETER_M).contains(&diameter.estimated_diameter_min) {
        return Ok(None);
    }

    Ok(Some(NeoRecord {
        id: raw.id,
        name: raw.name,
        date: date.to_string(),
        diameter_min_m: diameter.estimated_diameter_min,
        diameter_max_m: diameter.estimated_diameter_max,
        velocity_km_s,
        potentially_hazardous: true,
    }))
}

fn parse_velocity(value: &Value) -> Option<f64> {
    let velocity = match value {
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };
    velocity.is_finite().then_some(velocity)
}

/// Keeps the first record seen for each id.
pub fn dedup(records: Vec<NeoRecord>) -> Vec<NeoRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_start_today_and_at_fixed_offsets() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let windows = search_windows(today);
        assert_eq!(
            windows,
            vec![
                SearchWindow {
                    start_date: "2026-01-01".into(),
                    end_date: "2026-01-08".into(),
                },
                SearchWindow {
                    start_date: "2026-03-02".into(),
                    end_date: "2026-03-09".into(),
                },
                SearchWindow {
                    start_date: "2026-10-28".into(),
                    end_date: "2026-11-04".into(),
                },
            ]
        );
    }

    #[test]
    fn velocity_accepts_strings_and_numbers() {
        assert_eq!(parse_velocity(&Value::from("14.5")), Some(14.5));
        assert_eq!(parse_velocity(&Value::from(9.25)), Some(9.25));
        assert_eq!(parse_velocity(&Value::from("fast")), None);
        assert_eq!(parse_velocity(&Value::Null), None);
    }

    #[test]
    fn missing_feed_key_yields_no_records() {
        assert!(parse_feed("{}").unwrap().is_empty());
        assert!(parse_feed("not json").is_err());
    }

    #[test]
    fn simulation_input_uses_rounded_values() {
        let record = NeoRecord {
            id: "1".into(),
            name: "(1)".into(),
            date: "2026-01-01".into(),
            diameter_min_m: 14.6,
            diameter_max_m: 32.0,
            velocity_km_s: 13.96,
            potentially_hazardous: true,
        };
        let input = record.simulation_input(45.0).unwrap();
        // 15 m lands outside the near-miss band a raw 14.6 m would hit.
        assert_eq!(input.diameter_m(), 15.0);
        assert_eq!(input.velocity_km_s(), 14.0);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let record = |id: &str, date: &str| NeoRecord {
            id: id.into(),
            name: format!("({id})"),
            date: date.into(),
            diameter_min_m: 20.0,
            diameter_max_m: 40.0,
            velocity_km_s: 12.0,
            potentially_hazardous: true,
        };
        let unique = dedup(vec![
            record("1", "2026-01-01"),
            record("2", "2026-01-02"),
            record("1", "2026-03-05"),
        ]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].date, "2026-01-01");
    }
}
