mod params;
mod path;
mod results;

pub use params::{DepositFrequency, ModelKind, STEPS_PER_YEAR, SimulationParameters};
pub use path::{Ensemble, Path};
pub use results::{PercentileRow, ProjectionOutcome, RunStats, ScenarioSummary};
