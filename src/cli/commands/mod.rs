//! Subcommand implementations.

/// Format listing command handler.
pub mod formats;

/// Translation command handler.
pub mod translate;
