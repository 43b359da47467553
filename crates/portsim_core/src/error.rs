use std::fmt;

/// Errors surfaced by the simulation engine
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A parameter failed its range check before generation started
    InvalidParameters {
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    },
    /// Model selector string not recognized by any generator
    UnknownModel(String),
    /// A cross-section was requested past the end of the step grid
    StepOutOfRange { step: usize, step_count: usize },
    /// The run was cancelled by caller request
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(f, "invalid {parameter} ({value}): {constraint}")
            }
            SimulationError::UnknownModel(name) => write!(f, "unknown model {name:?}"),
            SimulationError::StepOutOfRange { step, step_count } => {
                write!(f, "step {step} out of range for {step_count}-step paths")
            }
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {}

pub type Result<T> = std::result::Result<T, SimulationError>;
