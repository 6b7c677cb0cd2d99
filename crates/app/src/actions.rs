use color_eyre::eyre::Result;
use reelmeter_core::{CoreError, format_summary};
use reelmeter_models::{AppState, MessageLevel, RunEvent};
use std::path::Path;
use std::thread::JoinHandle;
use tracing::{error, info, warn};

use crate::App;

pub(crate) const NO_FOLDER_WARNING: &str = "Please select a folder first!";

impl App {
    /// Selects the folder the next calculation will scan.
    ///
    /// Returns `false` and shows a warning when `path` is not a directory or
    /// a calculation is still running.
    pub fn select_folder(&mut self, path: &Path) -> bool {
        // Events still in flight belong to the folder captured at start.
        if self.is_calculating() {
            warn!("Rejected folder selection during a run: {:?}", path);
            self.set_message(MessageLevel::Warning, "Wait for the current calculation to finish");
            return false;
        }

        if !path.is_dir() {
            warn!("Rejected folder selection: {:?}", path);
            self.set_message(MessageLevel::Warning, format!("Not a folder: {}", path.display()));
            return false;
        }

        info!("Selected folder {:?}", path);
        self.selected_folder = Some(path.to_path_buf());
        self.result_text.clear();
        self.last_result = None;
        self.progress.reset();
        self.state = AppState::Idle;
        self.set_message(MessageLevel::Info, format!("Selected {}", path.display()));
        true
    }

    /// Starts a calculation for the selected folder on a background worker.
    ///
    /// A missing folder or an active run is reported through the message line
    /// instead of failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start_calculation(&mut self) -> Result<()> {
        let Some(folder) = self.selected_folder.clone() else {
            self.result_text = NO_FOLDER_WARNING.to_string();
            self.set_message(MessageLevel::Warning, NO_FOLDER_WARNING);
            return Ok(());
        };

        // The run is active until its final event has been applied.
        if self.is_calculating() {
            self.set_message(MessageLevel::Warning, CoreError::AlreadyRunning.to_string());
            return Ok(());
        }

        let request = self.settings.run_request(&folder);
        match self.calculator.start(request, self.events_tx.clone()) {
            Ok(handle) => {
                self.worker = Some(handle);
                self.state = AppState::Calculating;
                self.progress.reset();
                self.result_text.clear();
                self.last_result = None;
                self.set_message(MessageLevel::Info, "Calculation started");
                Ok(())
            }
            Err(CoreError::AlreadyRunning) => {
                self.set_message(MessageLevel::Warning, CoreError::AlreadyRunning.to_string());
                Ok(())
            }
            Err(e) => {
                error!("Failed to start calculation: {}", e);
                Err(e.into())
            }
        }
    }

    /// Applies every event the worker has posted since the last tick.
    ///
    /// Returns the number of events applied.
    pub fn on_tick(&mut self) -> usize {
        // A finished worker has already posted all of its events.
        let finished = self.worker.take_if(|h| h.is_finished());

        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }

        if let Some(handle) = finished {
            self.worker_exited(handle.join());
        }

        applied
    }

    /// Blocks until the active worker exits, then applies its remaining events.
    pub fn wait_for_calculation(&mut self) {
        let joined = self.worker.take().map(JoinHandle::join);
        self.on_tick();
        if let Some(outcome) = joined {
            self.worker_exited(outcome);
        }
    }

    fn worker_exited(&mut self, outcome: std::thread::Result<()>) {
        if outcome.is_err() {
            error!("Worker thread panicked");
            self.state = AppState::Idle;
            self.set_message(MessageLevel::Error, "Calculation worker crashed");
        }
    }

    pub fn apply_event(&mut self, event: RunEvent) {
        match event {
            RunEvent::Status(text) => {
                self.progress.set_message(text.clone());
                self.result_text = text;
            }
            RunEvent::Progress(fraction) => self.progress.set_fraction(fraction),
            RunEvent::NoFiles(text) => {
                self.state = AppState::Done;
                self.result_text = text.clone();
                self.set_message(MessageLevel::Info, text);
            }
            RunEvent::Finished(result) => {
                info!(
                    "Calculation finished: {} files, {:.1}s",
                    result.file_count, result.total_seconds
                );
                self.state = AppState::Done;
                self.result_text = format_summary(&result);
                self.last_result = Some(result);
                self.set_message(MessageLevel::Info, "Calculation complete");
            }
            RunEvent::Failed(text) => {
                self.state = AppState::Idle;
                self.set_message(MessageLevel::Error, format!("Calculation failed: {text}"));
            }
        }
    }

    /// Persists the selected folder as the default for the next launch.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn save_settings(&mut self) -> Result<()> {
        self.settings.root_folder.clone_from(&self.selected_folder);
        self.settings.save()?;
        self.set_message(MessageLevel::Info, "Settings saved");
        Ok(())
    }

    #[must_use]
    pub fn folder_label(&self) -> String {
        self.selected_folder
            .as_deref()
            .map_or_else(|| "No folder selected".to_string(), |p| p.display().to_string())
    }

    pub(crate) fn editing_seed(&self) -> String {
        self.selected_folder
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}
