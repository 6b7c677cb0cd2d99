use reelmeter_config::Settings;
use reelmeter_core::Calculator;
use reelmeter_models::{AggregateResult, AppState, InputMode, MessageLevel, RunEvent};
use reelmeter_utils::Progress;
use std::path::PathBuf;
use std::thread::JoinHandle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub struct App {
    // Core state
    pub state: AppState,
    pub input_mode: InputMode,
    pub should_quit: bool,

    // UI state
    pub show_help: bool,
    pub message: Option<(MessageLevel, String)>,
    pub input_buffer: String,

    // Components
    pub settings: Settings,
    pub(crate) calculator: Calculator,

    // Data
    pub selected_folder: Option<PathBuf>,
    pub progress: Progress,
    pub result_text: String,
    pub last_result: Option<AggregateResult>,

    // Worker plumbing; only the foreground reads `events_rx`.
    pub(crate) events_tx: UnboundedSender<RunEvent>,
    pub(crate) events_rx: UnboundedReceiver<RunEvent>,
    pub(crate) worker: Option<JoinHandle<()>>,
}

impl App {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_calculator(settings, Calculator::default())
    }

    /// Creates an app that runs calculations through `calculator`.
    #[must_use]
    pub fn with_calculator(settings: Settings, calculator: Calculator) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let selected_folder = settings.root_folder.clone().filter(|p| p.is_dir());

        Self {
            state: AppState::Idle,
            input_mode: InputMode::Normal,
            should_quit: false,
            show_help: false,
            message: None,
            input_buffer: String::new(),
            settings,
            calculator,
            selected_folder,
            progress: Progress::new(),
            result_text: String::new(),
            last_result: None,
            events_tx,
            events_rx,
            worker: None,
        }
    }

    #[must_use]
    pub fn is_calculating(&self) -> bool {
        self.state == AppState::Calculating
    }

    pub(crate) fn set_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.message = Some((level, text.into()));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
