use reelmeter_models::AggregateResult;
use reelmeter_utils::{format_bytes, format_duration};

/// Informational message for a folder without matching files.
#[must_use]
pub fn no_files_message(extension: &str) -> String {
    format!("No {} files found in this folder.", extension.to_uppercase())
}

/// Human-readable summary of a finished run.
#[must_use]
pub fn format_summary(result: &AggregateResult) -> String {
    let mut summary = format!(
        "Total Time: {:.2} hours ({})\nTotal Size: {}\nFiles: {}",
        result.total_hours(),
        format_duration(result.total_seconds),
        format_bytes(result.total_bytes),
        result.file_count
    );

    if result.has_unreadable() {
        summary.push_str(&format!(
            "\nUnreadable: {} file(s) counted as 0s",
            result.unreadable_files
        ));
    }

    summary
}
