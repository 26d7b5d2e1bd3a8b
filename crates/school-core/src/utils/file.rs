//! File system helpers for downloaded documents

use crate::error::ApiError;
use crate::utils::error_helpers::convert_io_error;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Sub-directory that holds downloaded receipt PDFs
pub const RECEIPTS_DIR_NAME: &str = "Receipts";

/// Ensure a directory exists, creating it if necessary
pub async fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> Result<(), ApiError> {
    let path = path.as_ref();
    fs::create_dir_all(path)
        .await
        .map_err(|e| convert_io_error(e, path))
}

/// Replace characters that are unsafe in file names
pub fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "receipt".to_string()
    } else {
        cleaned
    }
}

/// Path a receipt PDF is written to under `base_dir`
pub fn receipt_file_path(base_dir: &Path, receipt_number: &str) -> PathBuf {
    base_dir
        .join(RECEIPTS_DIR_NAME)
        .join(format!("receipt_{}.pdf", sanitize_file_stem(receipt_number)))
}

/// Write `contents` to `path` through a temporary sibling so a failed write
/// never leaves a truncated file at the final location. The temporary file is
/// removed whichever step fails.
pub async fn write_file_atomically(path: &Path, contents: &[u8]) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        ensure_directory_exists(parent).await?;
    }

    let temp_path = path.with_extension("part");
    let outcome = match fs::write(&temp_path, contents).await {
        Ok(()) => fs::rename(&temp_path, path)
            .await
            .map_err(|e| convert_io_error(e, path)),
        Err(e) => Err(convert_io_error(e, &temp_path)),
    };

    if outcome.is_err() && fs::remove_file(&temp_path).await.is_err() {
        log::debug!("No temporary file to remove at {}", temp_path.display());
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_directory_exists_creates_new_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("new_directory");

        assert!(!test_path.exists());
        ensure_directory_exists(&test_path)
            .await
            .expect("Failed to create new directory");
        assert!(test_path.is_dir());

        ensure_directory_exists(&test_path)
            .await
            .expect("Existing directory is fine");
    }

    #[test]
    fn test_receipt_file_path() {
        let path = receipt_file_path(Path::new("/data"), "RCT/2024/001");
        assert_eq!(
            path,
            PathBuf::from("/data/Receipts/receipt_RCT_2024_001.pdf")
        );

        let path = receipt_file_path(Path::new("/data"), "  ");
        assert_eq!(path, PathBuf::from("/data/Receipts/receipt_receipt.pdf"));
    }

    #[tokio::test]
    async fn test_write_file_atomically() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("Receipts").join("receipt_1.pdf");

        write_file_atomically(&path, b"%PDF-1.4")
            .await
            .expect("write should succeed");

        assert_eq!(std::fs::read(&path).expect("read back"), b"%PDF-1.4");
        assert!(!path.with_extension("part").exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temporary_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let receipts = temp_dir.path().join("Receipts");
        // A non-empty directory at the destination makes the final rename fail
        let path = receipts.join("receipt_2.pdf");
        std::fs::create_dir_all(path.join("occupied")).expect("create blocking directory");

        let result = write_file_atomically(&path, b"%PDF-1.4").await;

        assert!(result.is_err());
        assert!(!path.with_extension("part").exists());
        assert!(path.is_dir());
    }
}
