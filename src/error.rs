use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("invalid model setting {field}: {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}
