//! Source text input from files and stdin.

mod reader;

pub use reader::{MAX_INPUT_SIZE, read_source};
