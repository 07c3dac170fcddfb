/// Format a byte count as the display string stored on file records.
///
/// Matches the dashboard convention: megabytes with two decimal places,
/// regardless of magnitude.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.00 MB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(2_516_582), "2.40 MB");
    }

    #[test]
    fn test_format_file_size_small_files_stay_in_mb() {
        // Sub-megabyte files still render in MB
        assert_eq!(format_file_size(159_744), "0.15 MB");
    }
}
