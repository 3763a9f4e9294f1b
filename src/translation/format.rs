//! Supported source text formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::TranslateError;

/// Structure of the text being translated. Selects the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Rows of two quoted fields: an identifier and a description.
    Csv,
    /// A JSON object whose property values are translated.
    Json,
}

impl Format {
    /// All supported formats, in display order.
    pub const ALL: [Self; 2] = [Self::Csv, Self::Json];

    /// The identifier used on the command line and in config files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Human-readable label used inside prompts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    /// Infers the format from a file extension, if it names a supported one.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for Format {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(TranslateError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_formats() {
        assert_eq!("csv".parse::<Format>().ok(), Some(Format::Csv));
        assert_eq!("JSON".parse::<Format>().ok(), Some(Format::Json));
        assert_eq!(" json ".parse::<Format>().ok(), Some(Format::Json));
    }

    #[test]
    fn test_parse_unsupported_format() {
        let result = "xml".parse::<Format>();
        assert!(matches!(result, Err(TranslateError::UnsupportedFormat(f)) if f == "xml"));
        assert!("".parse::<Format>().is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path("course/en.csv"), Some(Format::Csv));
        assert_eq!(Format::from_path("course.JSON"), Some(Format::Json));
        assert_eq!(Format::from_path("notes.md"), None);
        assert_eq!(Format::from_path("no_extension"), None);
    }

    #[test]
    fn test_display_round_trips_identifier() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>().ok(), Some(format));
        }
    }
}
