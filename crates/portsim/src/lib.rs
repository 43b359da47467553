//! Host-side shell for the portsim engine
//!
//! Owns everything around the simulation core: the background worker that
//! keeps projection runs off the calling thread, file logging, and the
//! text/JSON rendering of projection outcomes. The chart, table, and PDF
//! collaborators consume the serialized [`ProjectionOutcome`] this crate
//! emits.
//!
//! [`ProjectionOutcome`]: portsim_core::model::ProjectionOutcome

pub mod logging;
pub mod table;
pub mod worker;

pub use logging::init_logging;
pub use worker::{ProjectionRequest, ProjectionResponse, ProjectionWorker};
