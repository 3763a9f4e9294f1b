use crate::translation::Format;
use crate::ui::Style;

/// Prints the supported input formats to stdout.
pub fn print_formats() {
    println!("{}", Style::header("Supported formats"));
    for format in Format::ALL {
        let description = match format {
            Format::Csv => "rows of \"identifier\",\"text\"; only the text column is translated",
            Format::Json => "objects whose property values are translated, names kept",
        };
        println!("  {:4} {}", Style::code(format), Style::secondary(description));
    }
}
