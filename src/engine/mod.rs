use std::path::PathBuf;

use anyhow::Result;
use chrono::Datelike;
use tracing::info;

use crate::{
    city::City,
    config::ModelConfig,
    model::SimulationInput,
    orchestrator::{simulate, ImpactorIdentity},
    report::SimulationReport,
    snapshot::ReportWriter,
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub report_interval_runs: u64,
    pub report_dir: PathBuf,
}

/// Session context: owns the model parameters and the structure population
/// for as long as the session lives. Every input change is a fresh, complete
/// run; nothing is recomputed incrementally.
pub struct Engine {
    settings: EngineSettings,
    config: ModelConfig,
    city: City,
    runs: u64,
    report_writer: ReportWriter,
    latest: Option<SimulationReport>,
}

impl Engine {
    pub fn new(settings: EngineSettings, city: City, config: ModelConfig) -> Self {
        let report_writer = ReportWriter::new(&settings.report_dir, settings.report_interval_runs);
        Self {
            settings,
            config,
            city,
            runs: 0,
            report_writer,
            latest: None,
        }
    }

    /// Runs the pipeline with the current calendar year for the hazard scale.
    pub fn run(
        &mut self,
        input: &SimulationInput,
        impactor: &ImpactorIdentity,
    ) -> Result<SimulationReport> {
        let year = chrono::Local::now().year();
        self.run_in_year(input, impactor, year)
    }

    pub fn run_in_year(
        &mut self,
        input: &SimulationInput,
        impactor: &ImpactorIdentity,
        current_year: i32,
    ) -> Result<SimulationReport> {
        let outcome = simulate(input, impactor, &mut self.city, &self.config, current_year);
        self.runs += 1;
        let report = SimulationReport::new(
            &self.settings.scenario_name,
            self.runs,
            impactor.clone(),
            *input,
            outcome,
        );
        info!(
            run = report.run,
            impactor = %impactor.name,
            energy_megatons = report.outcome.airburst.energy_megatons,
            severe = report.outcome.damage.severe_count,
            fatalities = report.outcome.impact.estimated_fatalities,
            "simulation run complete"
        );
        if let Some(path) = self.report_writer.maybe_write(&report)? {
            info!(path = %path.display(), "report written");
        }
        self.latest = Some(report.clone());
        Ok(report)
    }

    /// Runs every input in order and hands each report to `hook` as soon as
    /// it is produced.
    pub fn run_with_hook<I, F>(&mut self, runs: I, mut hook: F) -> Result<()>
    where
        I: IntoIterator<Item = (SimulationInput, ImpactorIdentity)>,
        F: FnMut(&SimulationReport),
    {
        for (input, impactor) in runs {
            let report = self.run(&input, &impactor)?;
            hook(&report);
        }
        Ok(())
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn latest(&self) -> Option<&SimulationReport> {
        self.latest.as_ref()
    }
}
