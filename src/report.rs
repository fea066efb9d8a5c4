use serde::Serialize;

use crate::{
    historical::{compare_to_references, HistoricalComparison},
    model::{DamageSummary, HazardBand, SimulationInput},
    orchestrator::{ImpactorIdentity, SimulationOutcome},
};

/// One run packaged for whoever presents, stores or shares it.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub scenario: String,
    pub run: u64,
    pub impactor: ImpactorIdentity,
    pub input: SimulationInput,
    #[serde(flatten)]
    pub outcome: SimulationOutcome,
    pub summary: DamageSummary,
    pub hazard_band: HazardBand,
    pub comparisons: Vec<HistoricalComparison>,
}

impl SimulationReport {
    pub fn new(
        scenario: &str,
        run: u64,
        impactor: ImpactorIdentity,
        input: SimulationInput,
        outcome: SimulationOutcome,
    ) -> Self {
        let summary = DamageSummary::from_assessment(&outcome.damage);
        let comparisons = compare_to_references(outcome.airburst.energy_megatons);
        let hazard_band = outcome.hazard.band();
        Self {
            scenario: scenario.to_string(),
            run,
            impactor,
            input,
            outcome,
            summary,
            hazard_band,
            comparisons,
        }
    }

    /// Plain-text digest suitable for posting or pasting.
    pub fn share_text(&self) -> String {
        let outcome = &self.outcome;
        let mut text = String::new();
        text.push_str("--- Atmosphere Shield Simulation Results ---\n\n");
        text.push_str(&format!("NEO: {}\n\n", self.impactor.name));

        text.push_str("[Airburst Prediction]\n");
        text.push_str(&format!("• Diameter: {:.0}m\n", self.input.diameter_m()));
        text.push_str(&format!("• Velocity: {:.1} km/s\n", self.input.velocity_km_s()));
        text.push_str(&format!("• Angle: {:.0}°\n", self.input.angle_deg()));
        text.push_str(&format!(
            "• Burst altitude: {:.1} km\n",
            outcome.airburst.altitude_km
        ));
        text.push_str(&format!(
            "• Energy yield: {:.2} Mt\n\n",
            outcome.airburst.energy_megatons
        ));

        text.push_str("[Catastrophe Impact & Casualty]\n");
        text.push_str(&format!(
            "• Damage: ≈{}\n",
            format_usd(outcome.impact.estimated_damage_usd)
        ));
        text.push_str(&format!(
            "• Fatalities: {}±\n\n",
            group_thousands(u64::from(outcome.impact.estimated_fatalities))
        ));

        text.push_str("[Sentry Risk Assessment]\n");
        text.push_str(&format!(
            "• Torino Scale: {} ({})\n",
            outcome.hazard.level, self.hazard_band
        ));
        text.push_str(&format!(
            "• Potential Impact Years: {}\n",
            outcome.hazard.years_label()
        ));
        text
    }
}

/// Whole-dollar US currency, e.g. `$26,801,450`.
pub fn format_usd(amount: f64) -> String {
    let dollars = amount.max(0.0).round() as u64;
    format!("${}", group_thousands(dollars))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
