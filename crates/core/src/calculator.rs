use reelmeter_models::{AggregateResult, RunEvent, RunRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::{Aggregator, CoreError, DurationProbe, Mp4Probe, Scanner, no_files_message};

/// Destination for events posted by a run.
pub trait EventSink {
    fn post(&self, event: RunEvent);
}

impl EventSink for UnboundedSender<RunEvent> {
    fn post(&self, event: RunEvent) {
        if self.send(event).is_err() {
            debug!("Event receiver dropped; discarding event");
        }
    }
}

/// Runs scan then aggregate for one request, posting every step to `events`.
///
/// Returns `Ok(None)` when the folder holds no matching files.
///
/// # Errors
///
/// Returns [`CoreError::InvalidExtension`] if the request's extension is unusable.
pub fn run_pipeline(
    request: &RunRequest,
    probe: &dyn DurationProbe,
    events: &dyn EventSink,
) -> Result<Option<AggregateResult>, CoreError> {
    let scanner = Scanner::from_request(request)?;

    events.post(RunEvent::Status(format!("Scanning {}...", request.root.display())));
    let outcome = scanner.scan(&request.root);

    if outcome.is_empty() {
        events.post(RunEvent::NoFiles(no_files_message(scanner.extension())));
        events.post(RunEvent::Progress(0.0));
        return Ok(None);
    }

    events.post(RunEvent::Status(format!(
        "Found {} videos... calculating",
        outcome.len()
    )));

    let sink = |fraction: f64| events.post(RunEvent::Progress(fraction));
    let aggregation = Aggregator::new(probe).aggregate(&outcome.paths(), &sink);

    let result = AggregateResult::new(aggregation, outcome.total_bytes);
    events.post(RunEvent::Finished(result.clone()));
    Ok(Some(result))
}

/// Clears the single-flight flag when the worker exits, even by panic.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Starts pipeline runs on a background thread, at most one at a time.
#[derive(Clone)]
pub struct Calculator {
    probe: Arc<dyn DurationProbe>,
    running: Arc<AtomicBool>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Arc::new(Mp4Probe::new()))
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Calculator {
    #[must_use]
    pub fn new(probe: Arc<dyn DurationProbe>) -> Self {
        Self {
            probe,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawns a worker for `request`. Events are posted to `events`; the
    /// worker never touches caller state directly.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyRunning`] while another run is active, or
    /// [`CoreError::Spawn`] if the thread cannot be created.
    pub fn start(&self, request: RunRequest, events: UnboundedSender<RunEvent>) -> Result<JoinHandle<()>, CoreError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Calculator: Start requested while a run is active");
            return Err(CoreError::AlreadyRunning);
        }

        let guard = RunGuard(Arc::clone(&self.running));
        let probe = Arc::clone(&self.probe);
        info!("Calculator: Starting run for {:?}", request.root);

        let handle = thread::Builder::new()
            .name("reelmeter-worker".to_string())
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = run_pipeline(&request, &*probe, &events) {
                    error!("Calculator: Run failed: {}", e);
                    events.post(RunEvent::Failed(e.to_string()));
                }
            })?;

        Ok(handle)
    }
}
