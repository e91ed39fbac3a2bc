//! Input file validation and loading
//!
//! Only `.xlsx` and `.csv` files are handed to the parser; anything else is
//! rejected up front as a client-input error. A path of `-` means standard
//! input, which is parsed without an extension check.

use crate::constants::{STDIN_PATH, SUPPORTED_EXTENSIONS};
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Whether `path` names standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Check that `path` has a supported extension (case-insensitive)
pub fn validate_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::invalid_input(Some(format!(
            "unsupported file type for {}: expected .{}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(" or .")
        )))),
    }
}

/// Validate and read an input file
pub fn read_input_file(path: &Path) -> Result<Vec<u8>> {
    validate_extension(path)?;

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            Error::invalid_input(Some(format!("file not found: {}", path.display())))
        }
        _ => Error::io(format!("Failed to read {}", path.display()), e),
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_supported_extensions() {
        assert!(validate_extension(Path::new("incidents.csv")).is_ok());
        assert!(validate_extension(Path::new("incidents.XLSX")).is_ok());
        assert!(validate_extension(Path::new("/tmp/a.b.Csv")).is_ok());
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["incidents.xls", "incidents.txt", "incidents", "csv"] {
            let error = validate_extension(&PathBuf::from(name)).unwrap_err();
            match error {
                Error::InvalidInput { details } => {
                    assert!(details.unwrap().contains("expected .xlsx or .csv"));
                }
                other => panic!("expected invalid input, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dash_means_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("-.csv")));
        assert!(!is_stdin(Path::new("./-")));
    }

    #[test]
    fn test_read_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("incidents.csv");
        fs::write(&path, "Issue Key\n").unwrap();

        assert_eq!(read_input_file(&path).unwrap(), b"Issue Key\n");
    }

    #[test]
    fn test_missing_file_is_client_error() {
        let dir = TempDir::new().unwrap();
        let error = read_input_file(&dir.path().join("absent.csv")).unwrap_err();

        assert!(matches!(error, Error::InvalidInput { .. }));
    }
}
