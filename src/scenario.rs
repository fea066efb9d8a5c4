use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    city::City,
    config::{CityConfig, LoggingConfig, ModelConfig},
    engine::{Engine, EngineSettings},
    model::SimulationInput,
    orchestrator::ImpactorIdentity,
    rng::RngManager,
};

fn default_report_interval_runs() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    pub impactor: ScenarioImpactor,
    #[serde(default)]
    pub city: CityConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "default_report_interval_runs")]
    pub report_interval_runs: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioImpactor {
    pub name: String,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub angle_deg: f64,
    #[serde(default)]
    pub synthetic: bool,
}

impl ScenarioImpactor {
    pub fn identity(&self) -> ImpactorIdentity {
        ImpactorIdentity {
            name: self.name.clone(),
            synthetic: self.synthetic,
        }
    }

    pub fn input(&self) -> Result<SimulationInput> {
        SimulationInput::new(self.diameter_m, self.velocity_km_s, self.angle_deg)
            .with_context(|| format!("Scenario impactor '{}' is invalid", self.name))
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        self.impactor.input()?;
        self.city.validate()?;
        self.model.validate()?;
        Ok(())
    }

    /// Lays out the city from the scenario seed, with structure thresholds
    /// scaled from the model's damage threshold.
    pub fn build_city(&self) -> City {
        let mut rng = RngManager::new(self.seed);
        City::generate(&self.city, self.model.damage_threshold_psi, &mut rng)
    }

    pub fn build_engine(&self, report_dir: impl Into<PathBuf>) -> Engine {
        let settings = EngineSettings {
            scenario_name: self.name.clone(),
            report_interval_runs: self.report_interval_runs,
            report_dir: report_dir.into(),
        };
        Engine::new(settings, self.build_city(), self.model.clone())
    }
}
