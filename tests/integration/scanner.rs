use color_eyre::Result;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;

use reelmeter_config::Settings;
use reelmeter_core::Scanner;
use reelmeter_models::RunRequest;

/// Create a test file with specific content and size
async fn create_test_file(path: &Path, content: &[u8], size: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut data = content.to_vec();
    data.resize(size, 0);
    fs::write(path, &data).await?;
    Ok(())
}

/// A library with nested seasons, mixed casing and unrelated files.
async fn setup_library(root: &Path) -> Result<()> {
    create_test_file(&root.join("movies/heat.mp4"), b"MP4_DATA", 4 * 1024).await?;
    create_test_file(&root.join("movies/ronin.MP4"), b"MP4_DATA", 2 * 1024).await?;
    create_test_file(&root.join("shows/s01/e01.mp4"), b"MP4_DATA", 1024).await?;
    create_test_file(&root.join("shows/s01/e02.Mp4"), b"MP4_DATA", 1024).await?;
    create_test_file(&root.join("shows/s01/e01.srt"), b"1\n00:00:01", 64).await?;
    create_test_file(&root.join("shows/poster.jpg"), b"JPG_DATA", 8 * 1024).await?;
    create_test_file(&root.join("clips/trailer.mkv"), b"MKV_DATA", 512).await?;
    create_test_file(&root.join(".thumbnails/heat.mp4"), b"MP4_DATA", 256).await?;
    Ok(())
}

#[tokio::test]
async fn test_scanner_totals_matching_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    setup_library(root).await?;

    let scanner = Scanner::from_request(&RunRequest::new(root, "mp4"))?;
    let outcome = scanner.scan(root);

    assert_eq!(outcome.len(), 5, "Should find every .mp4 including hidden");
    assert_eq!(outcome.total_bytes, 4 * 1024 + 2 * 1024 + 1024 + 1024 + 256);
    assert_eq!(
        outcome.total_bytes,
        outcome.files.iter().map(|f| f.size).sum::<u64>()
    );
    Ok(())
}

#[tokio::test]
async fn test_scanner_respects_settings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    setup_library(root).await?;

    let settings = Settings {
        skip_hidden_files: true,
        ..Default::default()
    };
    let outcome = Scanner::from_request(&settings.run_request(root))?.scan(root);
    assert_eq!(outcome.len(), 4, "Hidden folders should be skipped");

    let settings = Settings {
        extension: "mkv".to_string(),
        ..Default::default()
    };
    let outcome = Scanner::from_request(&settings.run_request(root))?.scan(root);
    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.total_bytes, 512);
    Ok(())
}

#[tokio::test]
async fn test_scanner_edge_roots() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let scanner = Scanner::default();

    let empty = scanner.scan(temp_dir.path());
    assert!(empty.is_empty());
    assert_eq!(empty.total_bytes, 0);

    let missing = scanner.scan(&temp_dir.path().join("does-not-exist"));
    assert!(missing.is_empty());
    assert_eq!(missing.total_bytes, 0);
    Ok(())
}
