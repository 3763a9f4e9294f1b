use anyhow::{Result, bail};
use futures_util::StreamExt;
use std::io::{self, Write};
use std::path::Path;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::fs::atomic_write;
use crate::input::read_source;
use crate::status;
use crate::translation::{TranslateError, TranslationRequest, Translator};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub idle_timeout_secs: Option<u64>,
    pub write: Option<String>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config_file = ConfigManager::new().load_or_default()?;

    let resolve_options = ResolveOptions {
        from: options.from,
        to: options.to,
        format: options.format,
        file: options.file.clone(),
        model: options.model,
        endpoint: options.endpoint,
        idle_timeout_secs: options.idle_timeout_secs,
    };
    let config = resolve_config(&resolve_options, &config_file)?;

    let source_text = read_source(options.file.as_deref().map(Path::new))?;
    if source_text.trim().is_empty() {
        bail!("Input is empty");
    }

    let translator = Translator::new(config.endpoint, config.fallback_api_key)
        .with_idle_timeout(config.idle_timeout);

    let request = TranslationRequest {
        source_language: config.source_language,
        target_language: config.target_language,
        source_text,
        model: config.model,
        format: config.format,
    };

    let spinner = Spinner::new(&format!(
        "Translating {} from {} to {}...",
        request.format.label(),
        request.source_language,
        request.target_language
    ));

    let mut stream = translator
        .translate(&request, options.api_key.as_deref())
        .await?;

    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    let mut full_response = String::new();
    let mut first_chunk = true;

    loop {
        let next = tokio::select! {
            next = stream.next() => next,
            _ = &mut interrupted => {
                Some(Err(TranslateError::Transport("cancelled by user".to_string())))
            }
        };

        let Some(item) = next else {
            break;
        };

        if first_chunk {
            spinner.stop();
            first_chunk = false;
        }

        match item {
            Ok(fragment) => {
                print!("{fragment}");
                io::stdout().flush()?;
                full_response.push_str(fragment.as_str());
            }
            Err(err) => {
                if err.is_mid_stream() && !full_response.is_empty() {
                    println!();
                    io::stdout().flush()?;
                    crate::warn!(
                        "{} translation stopped after {} characters; output above is incomplete",
                        Style::warning("Warning:"),
                        full_response.chars().count()
                    );
                }
                return Err(err.into());
            }
        }
    }

    spinner.stop();

    if !full_response.is_empty() && !full_response.ends_with('\n') {
        println!();
    }

    if let Some(out) = options.write.as_deref() {
        if full_response.is_empty() {
            bail!("Translation is empty; not writing {out}");
        }
        atomic_write(Path::new(out), &full_response)?;
        status!("{} {}", Style::success("Wrote"), out);
    }

    Ok(())
}
