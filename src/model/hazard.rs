use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HAZARD_LEVEL_1_DIAMETER_M, HAZARD_LEVEL_2_DIAMETER_M};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateYears {
    None,
    Years(Vec<i32>),
}

/// Simplified Torino-like rating. Not an orbital risk computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardScore {
    pub level: u8,
    pub candidate_years: CandidateYears,
    pub synthetic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardBand {
    Green,
    Yellow,
    Red,
}

pub fn score_hazard(diameter_m: f64, synthetic: bool, current_year: i32) -> HazardScore {
    let (level, candidate_years) = if diameter_m >= HAZARD_LEVEL_2_DIAMETER_M {
        (
            2,
            CandidateYears::Years(vec![current_year + 5, current_year + 10]),
        )
    } else if diameter_m >= HAZARD_LEVEL_1_DIAMETER_M {
        (1, CandidateYears::Years(vec![current_year + 1]))
    } else {
        (0, CandidateYears::None)
    };

    HazardScore {
        level,
        candidate_years,
        synthetic,
    }
}

impl HazardScore {
    pub fn band(&self) -> HazardBand {
        match self.level {
            0 => HazardBand::Green,
            1..=4 => HazardBand::Yellow,
            _ => HazardBand::Red,
        }
    }

    /// Display label, e.g. `"2031, 2036"`, `"None"` or `"N/A (Synthetic)"`.
    pub fn years_label(&self) -> String {
        let base = match &self.candidate_years {
            CandidateYears::None => None,
            CandidateYears::Years(years) => Some(
                years
                    .iter()
                    .map(|year| year.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        };
        match (base, self.synthetic) {
            (None, false) => "None".to_string(),
            (None, true) => "N/A (Synthetic)".to_string(),
            (Some(years), false) => years,
            (Some(years), true) => format!("{years} (Synthetic)"),
        }
    }
}

impl fmt::Display for HazardBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HazardBand::Green => "Green",
            HazardBand::Yellow => "Yellow",
            HazardBand::Red => "Red",
        };
        f.write_str(label)
    }
}

impl fmt::Display for HazardScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} ({})", self.level, self.years_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_bodies_get_two_candidate_years() {
        let score = score_hazard(60.0, false, 2026);
        assert_eq!(score.level, 2);
        assert_eq!(score.candidate_years, CandidateYears::Years(vec![2031, 2036]));
        assert_eq!(score.years_label(), "2031, 2036");
        assert_eq!(score.band(), HazardBand::Yellow);
    }

    #[test]
    fn medium_bodies_get_next_year() {
        let score = score_hazard(25.0, false, 2026);
        assert_eq!(score.level, 1);
        assert_eq!(score.candidate_years, CandidateYears::Years(vec![2027]));
    }

    #[test]
    fn small_bodies_score_zero() {
        let score = score_hazard(5.0, false, 2026);
        assert_eq!(score.level, 0);
        assert_eq!(score.candidate_years, CandidateYears::None);
        assert_eq!(score.years_label(), "None");
        assert_eq!(score.band(), HazardBand::Green);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(score_hazard(50.0, false, 2026).level, 2);
        assert_eq!(score_hazard(20.0, false, 2026).level, 1);
        assert_eq!(score_hazard(19.999, false, 2026).level, 0);
    }

    #[test]
    fn synthetic_objects_are_qualified() {
        assert_eq!(
            score_hazard(50.0, true, 2026).years_label(),
            "2031, 2036 (Synthetic)"
        );
        assert_eq!(score_hazard(10.0, true, 2026).years_label(), "N/A (Synthetic)");
    }

    #[test]
    fn higher_levels_map_to_red() {
        let score = HazardScore {
            level: 5,
            candidate_years: CandidateYears::None,
            synthetic: false,
        };
        assert_eq!(score.band(), HazardBand::Red);
    }
}
