//! Background worker for running projections without blocking the caller
//!
//! Mirrors a message-passing worker: requests go out over a channel, the
//! run executes on a dedicated thread, and a single success/failure response
//! comes back. Per-path completion is reported live through shared atomics
//! rather than the response channel, so a UI can poll [`ProjectionWorker::get_progress`]
//! for its progress bar.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use portsim_core::error::SimulationError;
use portsim_core::model::{ProjectionOutcome, SimulationParameters};
use portsim_core::simulation::{RunConfig, RunProgress, run_projection};

/// Request sent to the background worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProjectionRequest {
    /// Run a full projection: ensemble plus yearly summary
    Run {
        params: SimulationParameters,
        run: RunConfig,
        year_count: usize,
    },
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProjectionResponse {
    /// Projection completed (boxed: the ensemble dominates the enum size)
    RunComplete(Box<ProjectionOutcome>),
    /// The run was cancelled before completion
    Cancelled,
    /// The run failed; the message is the single user-facing description
    Error(String),
}

/// Background worker that runs projections on a separate thread
pub struct ProjectionWorker {
    request_tx: Sender<ProjectionRequest>,
    response_rx: Receiver<ProjectionResponse>,
    cancel_flag: Arc<AtomicBool>,
    progress: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl ProjectionWorker {
    /// Create a new worker with a background thread
    #[must_use]
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let progress = Arc::new(AtomicUsize::new(0));
        let total = Arc::new(AtomicUsize::new(0));

        let ctx = WorkerContext {
            response_tx,
            cancel_flag: cancel_flag.clone(),
            progress: progress.clone(),
            total: total.clone(),
        };

        let thread = thread::spawn(move || {
            ctx.run(request_rx);
        });

        Self {
            request_tx,
            response_rx,
            cancel_flag,
            progress,
            total,
            thread: Some(thread),
        }
    }

    /// Send a request to the worker. Returns true if it was accepted.
    pub fn send(&self, request: ProjectionRequest) -> bool {
        // Clear state for new work
        self.cancel_flag.store(false, Ordering::SeqCst);
        self.progress.store(0, Ordering::SeqCst);
        self.request_tx.send(request).is_ok()
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<ProjectionResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ProjectionResponse> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    /// Paths completed and total paths for the in-flight run
    pub fn get_progress(&self) -> (usize, usize) {
        (
            self.progress.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    /// Request cancellation of the current run
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Shutdown the worker thread
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(ProjectionRequest::Shutdown);
    }
}

impl Default for ProjectionWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProjectionWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Shared state for the background worker thread
struct WorkerContext {
    response_tx: Sender<ProjectionResponse>,
    cancel_flag: Arc<AtomicBool>,
    progress: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl WorkerContext {
    fn run(&self, request_rx: Receiver<ProjectionRequest>) {
        while let Ok(request) = request_rx.recv() {
            match request {
                ProjectionRequest::Shutdown => break,

                ProjectionRequest::Run {
                    params,
                    run,
                    year_count,
                } => {
                    tracing::info!(
                        model = params.model.name(),
                        paths = run.path_count,
                        steps = params.step_count,
                        "starting projection run"
                    );
                    self.total.store(run.path_count, Ordering::SeqCst);
                    self.progress.store(0, Ordering::SeqCst);

                    let progress =
                        RunProgress::from_atomics(self.progress.clone(), self.cancel_flag.clone());

                    match run_projection(&params, &run, year_count, &progress) {
                        Ok(outcome) => {
                            tracing::info!(
                                seed = outcome.stats.base_seed,
                                "projection run complete"
                            );
                            let _ = self
                                .response_tx
                                .send(ProjectionResponse::RunComplete(Box::new(outcome)));
                        }
                        Err(SimulationError::Cancelled) => {
                            tracing::info!("projection run cancelled");
                            let _ = self.response_tx.send(ProjectionResponse::Cancelled);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "projection run failed");
                            let _ = self.response_tx.send(ProjectionResponse::Error(e.to_string()));
                        }
                    }
                }
            }
        }
    }
}
