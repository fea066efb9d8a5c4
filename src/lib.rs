pub mod city;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod historical;
pub mod model;
pub mod neo;
pub mod orchestrator;
pub mod report;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod web;

pub use engine::{Engine, EngineSettings};
pub use error::SimulationError;
pub use model::SimulationInput;
pub use orchestrator::{simulate, ImpactorIdentity, SimulationOutcome};
pub use report::SimulationReport;
pub use scenario::{Scenario, ScenarioLoader};
