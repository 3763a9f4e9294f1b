use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Largest course export accepted in a single request.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

const UTF8_BOM: char = '\u{FEFF}';

/// Reads the text to translate from `path`, or from stdin when `None`.
///
/// A leading byte-order mark (common in spreadsheet CSV exports) is removed.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    let text = match path {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };
    Ok(strip_bom(text))
}

fn read_file(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access file: {}", path.display()))?;

    check_size(metadata.len() as usize, "file")?;

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[allow(clippy::significant_drop_tightening)]
fn read_stdin() -> Result<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut stdin = io::stdin().lock();

    loop {
        let bytes_read = stdin
            .read(&mut chunk)
            .context("Failed to read from stdin")?;
        if bytes_read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
        check_size(buffer.len(), "input")?;
    }

    String::from_utf8(buffer).context("Input is not valid UTF-8")
}

fn check_size(size: usize, what: &str) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
             Consider splitting the {what} into smaller parts.",
            size as f64 / 1024.0 / 1024.0
        );
    }
    Ok(())
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_csv_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "\"course/title/\",\"Course title\"").unwrap();

        let content = read_source(Some(temp_file.path())).unwrap();
        assert_eq!(content, "\"course/title/\",\"Course title\"\n");
    }

    #[test]
    fn test_read_strips_byte_order_mark() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "\u{FEFF}\"a/\",\"Título\"").unwrap();

        let content = read_source(Some(temp_file.path())).unwrap();
        assert_eq!(content, "\"a/\",\"Título\"");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_source(Some(Path::new("/nonexistent/path/course.csv")));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("large.json");
        fs::write(&path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let err = read_source(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("max.json");
        fs::write(&path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        assert_eq!(read_source(Some(path.as_path())).unwrap().len(), MAX_INPUT_SIZE);
    }
}
