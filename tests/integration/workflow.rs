use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use reelmeter_app::App;
use reelmeter_config::Settings;
use reelmeter_core::{Calculator, DurationProbe, ProbeError, VideoStats};
use reelmeter_models::{AppState, InputMode};

/// Reads the duration in whole seconds from the file's leading digits.
struct NameProbe;

impl DurationProbe for NameProbe {
    fn read_stats(&self, path: &Path) -> Result<VideoStats, ProbeError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let seconds: u64 = stem
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .map_err(|_| ProbeError::Malformed)?;
        Ok(VideoStats {
            frame_count: seconds * 30,
            frame_rate: 30.0,
        })
    }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
}

#[tokio::test]
async fn test_complete_calculation_workflow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let library = temp_dir.path().join("library");
    fs::create_dir_all(library.join("season1")).await?;
    fs::write(library.join("3600-pilot.mp4"), vec![0_u8; 1024]).await?;
    fs::write(library.join("season1/1800-episode.MP4"), vec![0_u8; 1024]).await?;
    fs::write(library.join("season1/broken.mp4"), vec![0_u8; 1024]).await?;
    fs::write(library.join("season1/notes.txt"), b"not a video").await?;

    let mut app = App::with_calculator(Settings::default(), Calculator::new(Arc::new(NameProbe)));

    // Select the folder through the editor
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.input_mode, InputMode::Editing);
    for c in library.display().to_string().chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected_folder.as_deref(), Some(library.as_path()));

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.state, AppState::Calculating);

    // A second start while running is ignored
    press(&mut app, KeyCode::Enter);

    app.wait_for_calculation();

    assert_eq!(app.state, AppState::Done);
    let result = app.last_result.clone().expect("run should finish");
    assert_eq!(result.file_count, 3);
    assert_eq!(result.unreadable_files, 1);
    assert_eq!(result.total_bytes, 3072);
    assert!((result.total_hours() - 1.5).abs() < 1e-9);
    assert!(app.result_text.starts_with("Total Time: 1.50 hours (01:30:00)"));
    assert!(app.result_text.contains("Total Size: 3.00 KB"));
    Ok(())
}

#[tokio::test]
async fn test_saved_folder_is_restored() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let library = temp_dir.path().join("videos");
    fs::create_dir_all(&library).await?;
    let config_path = temp_dir.path().join("config/reelmeter/config.toml");

    let settings = Settings {
        root_folder: Some(library.clone()),
        extension: ".MOV".to_string(),
        ..Default::default()
    };
    settings.save_to(&config_path)?;

    let loaded = Settings::load_from(&config_path).await?;
    assert_eq!(loaded.extension, "mov");

    let app = App::new(loaded);
    assert_eq!(app.selected_folder.as_deref(), Some(library.as_path()));
    assert_eq!(app.state, AppState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_stale_saved_folder_is_ignored() -> Result<()> {
    let settings = Settings {
        root_folder: Some("/non/existent/videos".into()),
        ..Default::default()
    };

    let mut app = App::new(settings);
    assert!(app.selected_folder.is_none());

    app.start_calculation()?;
    assert_eq!(app.state, AppState::Idle);
    assert_eq!(app.result_text, "Please select a folder first!");
    Ok(())
}
