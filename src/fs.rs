//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes a finished translation next to its final location, then renames it
/// into place.
///
/// The staging file lives in the target's directory so the rename stays on
/// one filesystem. A translation that fails mid-stream is never written, so
/// an existing output file is either fully replaced or left untouched.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?
        .to_string_lossy();
    let staging = parent.join(format!(".{file_name}.partial"));

    fs::write(&staging, content)
        .with_context(|| format!("Failed to write file: {}", staging.display()))?;

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e).with_context(|| format!("Failed to replace file: {}", path.display()));
    }

    Ok(())
}
