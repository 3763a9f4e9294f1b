use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adapt-tl")]
#[command(about = "Streaming translator for Adapt course exports (CSV and JSON)")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<String>,

    /// Source language (code or name, e.g. en, English)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language (code or name, e.g. es, Spanish)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Input format: csv or json (inferred from the file extension if omitted)
    #[arg(long)]
    pub format: Option<String>,

    /// Model name (gpt-3.5-turbo or gpt-4)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API key for this call (falls back to the configured key)
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    /// API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Abort if no data arrives for this many seconds
    #[arg(long = "idle-timeout", value_name = "SECS")]
    pub idle_timeout: Option<u64>,

    /// Also write the complete translation to this file
    #[arg(short = 'w', long, value_name = "OUT")]
    pub write: Option<String>,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported languages
    Languages,
    /// List supported input formats
    Formats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_translate_args() {
        let args = Args::try_parse_from([
            "adapt-tl", "course.csv", "--from", "en", "--to", "es", "-k", "key", "-w", "es.csv",
        ])
        .map_err(|e| e.to_string());

        let Ok(args) = args else {
            panic!("failed to parse: {args:?}");
        };
        assert_eq!(args.file.as_deref(), Some("course.csv"));
        assert_eq!(args.from.as_deref(), Some("en"));
        assert_eq!(args.api_key.as_deref(), Some("key"));
        assert_eq!(args.write.as_deref(), Some("es.csv"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_subcommand() {
        let args = Args::try_parse_from(["adapt-tl", "languages"]).map_err(|e| e.to_string());
        assert!(matches!(args, Ok(Args { command: Some(Command::Languages), .. })));
    }
}
