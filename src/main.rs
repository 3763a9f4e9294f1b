use anyhow::Result;
use clap::Parser;

use adapt_tl::cli::commands::{formats, translate};
use adapt_tl::cli::{Args, Command};
use adapt_tl::config::as_translate_error;
use adapt_tl::output::{self, OutputConfig};
use adapt_tl::translation::print_languages;
use adapt_tl::ui::Style;

/// Exit status for failures outside the translation pipeline.
const GENERAL_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    output::init(OutputConfig::from_flags(args.quiet, args.no_color));

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        let code = as_translate_error(&err).map_or(GENERAL_FAILURE, |e| e.exit_code());
        std::process::exit(code);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Formats) => {
            formats::print_formats();
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                from: args.from,
                to: args.to,
                format: args.format,
                model: args.model,
                api_key: args.api_key,
                endpoint: args.endpoint,
                idle_timeout_secs: args.idle_timeout,
                write: args.write,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
