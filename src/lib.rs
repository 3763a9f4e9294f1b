//! # adapt-tl - Streaming translation for Adapt course exports
//!
//! `adapt-tl` translates course content exported as CSV (`"path","text"`
//! rows) or JSON (course objects) through an OpenAI-compatible chat
//! completion endpoint, printing the translation as it streams in.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a CSV export from English to Spanish
//! adapt-tl --from en --to es ./course-en.csv
//!
//! # JSON from stdin, writing the result to a file as well
//! cat components.json | adapt-tl --format json --from English --to French -w components-fr.json
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/adapt-tl/config.toml`:
//!
//! ```toml
//! [defaults]
//! from = "en"
//! to = "es"
//! model = "gpt-4"
//!
//! [api]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! ```
//!
//! ## Library use
//!
//! [`translation::Translator`] is the entry point: it builds the prompt,
//! issues the streaming request and returns a [`translation::FragmentStream`]
//! of translated text in arrival order.

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Prompt construction, streaming client and SSE transcoding.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
