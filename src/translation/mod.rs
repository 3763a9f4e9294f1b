mod client;
mod error;
mod format;
mod language;
mod model;
mod prompt;
mod transcoder;

pub use client::{
    DEFAULT_ENDPOINT, FragmentStream, TranslateInput, TranslationRequest, Translator,
};
pub use error::TranslateError;
pub use format::Format;
pub use language::{SUPPORTED_LANGUAGES, print_languages, resolve_language};
pub use model::Model;
pub use prompt::{RESERVED_JSON_PROPERTIES, build_prompt};
pub use transcoder::{
    DONE_SENTINEL, EventKind, RawEvent, Step, StreamOutcome, TranscoderState, TranslationFragment,
    Transcoder, Utf8Decoder, transcode,
};
