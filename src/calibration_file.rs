//! Calibration matrix files
//!
//! A saved matrix is the raw 56 bytes with no header.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use htt_panel::CalibrationMatrix;
use htt_transport::CALIBRATION_MATRIX_LEN;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CalibrationFileError {
    #[error("error opening {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File size mismatch, {} is {size} bytes, expected 56.", path.display())]
    SizeMismatch { path: PathBuf, size: u64 },
}

impl CalibrationFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Write a matrix to `path`, replacing any existing file
pub fn save(path: &Path, matrix: &CalibrationMatrix) -> Result<(), CalibrationFileError> {
    fs::write(path, matrix.as_bytes()).map_err(|e| CalibrationFileError::io(path, e))?;
    debug!("Wrote calibration matrix to {}", path.display());
    Ok(())
}

/// Read a matrix from `path`
///
/// The file size is checked before its contents are read; anything other
/// than exactly 56 bytes is rejected.
pub fn load(path: &Path) -> Result<CalibrationMatrix, CalibrationFileError> {
    let size = fs::metadata(path)
        .map_err(|e| CalibrationFileError::io(path, e))?
        .len();
    if size != CALIBRATION_MATRIX_LEN as u64 {
        return Err(CalibrationFileError::SizeMismatch {
            path: path.to_path_buf(),
            size,
        });
    }
    let bytes = fs::read(path).map_err(|e| CalibrationFileError::io(path, e))?;
    CalibrationMatrix::try_from(bytes.as_slice()).map_err(|_| CalibrationFileError::SizeMismatch {
        path: path.to_path_buf(),
        size: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("panel.cal");
        let mut bytes = [0u8; CALIBRATION_MATRIX_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i * 3) as u8;
        }
        let matrix = CalibrationMatrix::new(bytes);
        save(&path, &matrix).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 56);
        assert_eq!(load(&path).unwrap(), matrix);
    }

    #[test]
    fn test_load_rejects_wrong_size() {
        let dir = TempDir::new().unwrap();
        for len in [0usize, 55, 57, 112] {
            let path = dir.path().join(format!("cal{len}"));
            fs::write(&path, vec![0u8; len]).unwrap();
            let err = load(&path).unwrap_err();
            assert!(matches!(err, CalibrationFileError::SizeMismatch { size, .. } if size == len as u64));
            assert!(err.to_string().contains("expected 56"));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, CalibrationFileError::Io { .. }));
    }
}
