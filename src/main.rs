use clap::Parser;
use color_eyre::eyre::{Result, bail, eyre};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use reelmeter_app::App;
use reelmeter_config::Settings;
use reelmeter_core::{Calculator, Mp4Probe, format_summary};
use reelmeter_models::RunEvent;
use reelmeter_utils::normalize_extension;
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info, warn};

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[cfg(windows)]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Total running time and size of the video files in a folder.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Folder to scan; defaults to the saved folder
    folder: Option<PathBuf>,

    /// File extension to collect. Durations are only read from MP4-family
    /// containers (mp4, m4v, mov, 3gp); other files count as unreadable
    #[arg(short, long)]
    extension: Option<String>,

    /// Print progress and the summary instead of opening the interactive UI
    #[arg(long)]
    plain: bool,

    /// Print the result as JSON (implies --plain)
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_logging()?;

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn setup_logging() -> Result<()> {
    use std::env;
    use tracing_subscriber::EnvFilter;

    let log_dir = env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("reelmeter.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelmeter=debug,info"));

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_thread_names(true)
        .init();

    info!("Starting reelmeter...");
    info!("Log file: {}", log_path.display());

    Ok(())
}

async fn load_settings(args: &Args) -> Settings {
    let mut settings = match Settings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Falling back to default settings: {}", e);
            Settings::default()
        }
    };

    if let Some(extension) = &args.extension {
        settings.extension = normalize_extension(extension);
    }
    if let Some(folder) = &args.folder {
        settings.root_folder = Some(folder.clone());
    }
    if !Mp4Probe::supports_extension(&settings.extension) {
        warn!(
            "Durations cannot be read from .{} files; they will count as 0s",
            settings.extension
        );
    }
    settings
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args).await;

    if args.plain || args.json || !io::stdout().is_terminal() {
        run_plain(settings, args.json).await
    } else {
        run_interactive(settings)
    }
}

async fn run_plain(settings: Settings, json: bool) -> Result<()> {
    let Some(folder) = settings.root_folder.clone() else {
        bail!("Please select a folder first!");
    };
    if !folder.is_dir() {
        bail!("Not a folder: {}", folder.display());
    }

    if !Mp4Probe::supports_extension(&settings.extension) {
        eprintln!(
            "Warning: durations cannot be read from .{} files; they will count as 0s",
            settings.extension
        );
    }

    let (tx, mut rx) = unbounded_channel();
    let handle = Calculator::default().start(settings.run_request(&folder), tx)?;

    // The channel closes once the worker drops its sender.
    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::Status(text) => eprintln!("{text}"),
            RunEvent::Progress(fraction) => eprintln!("Progress: {:>5.1}%", fraction * 100.0),
            RunEvent::NoFiles(text) => println!("{text}"),
            RunEvent::Finished(result) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", format_summary(&result));
                }
            }
            RunEvent::Failed(text) => bail!("Calculation failed: {text}"),
        }
    }

    handle.join().map_err(|_| eyre!("Calculation worker panicked"))
}

fn run_interactive(settings: Settings) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Runtime error: {:?}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| reelmeter_ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                    if app.should_quit {
                        info!("User requested quit");
                        return Ok(());
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
