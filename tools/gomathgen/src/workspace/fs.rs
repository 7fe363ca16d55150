use std::fs;
use std::path::Path;

use crate::errors::{GenError, Result};

/// Read a Go source file into a string.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write string contents to a path, creating parent directories as needed.
/// An existing file is replaced.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| GenError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}
