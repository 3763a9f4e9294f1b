//! Languages offered for source and target selection.

use anyhow::Result;

use crate::ui::Style;

/// Supported language codes (ISO 639-1) and the labels handed to the model.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
];

/// Prints all supported languages to stdout, sorted by label.
pub fn print_languages() {
    let mut languages = SUPPORTED_LANGUAGES.to_vec();
    languages.sort_by_key(|(_, label)| *label);

    println!("{}", Style::header("Supported languages"));
    for (code, label) in languages {
        println!("  {:3} {}", Style::code(code), Style::secondary(label));
    }
}

/// Resolves a language code or label to the label used in prompts.
///
/// Matching is case-insensitive: `es`, `ES` and `spanish` all resolve to
/// `Spanish`.
///
/// # Errors
///
/// Returns an error if the language is not in the supported list.
pub fn resolve_language(lang: &str) -> Result<&'static str> {
    let lang = lang.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, label)| code.eq_ignore_ascii_case(lang) || label.eq_ignore_ascii_case(lang))
        .map(|(_, label)| *label)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid language: '{lang}'\n\n\
                 Use a code or a name, e.g. en, es, French, Japanese.\n\
                 Run 'adapt-tl languages' to see all supported languages."
            )
        })
}
