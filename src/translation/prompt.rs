//! Few-shot prompt construction for each supported format.

use super::format::Format;

/// Property names whose values are identifiers or styling hooks, never prose.
pub const RESERVED_JSON_PROPERTIES: [&str; 4] = ["_id", "_type", "_classes", "_htmlClasses"];

const CSV_EXAMPLE_SOURCE: &str = r#""course/course-id/title/","Course title"
"course/course-id/displayTitle/","<h1>Course title</h1>"
"blocks/b-95/_trickle/_button/text/","Continue"
"components/c-155/body/","<p>Welcome to the course.</p>""#;

const CSV_EXAMPLE_TARGET: &str = r#""course/course-id/title/","Título del curso"
"course/course-id/displayTitle/","<h1>Título del curso</h1>"
"blocks/b-95/_trickle/_button/text/","Continuar"
"components/c-155/body/","<p>Bienvenido al curso.</p>""#;

const JSON_EXAMPLE_SOURCE: &str = r#"{
  "_id": "course",
  "_type": "course",
  "_classes": "course-blue",
  "_htmlClasses": "course-html-blue",
  "title": "Course title",
  "displayTitle": "Course title",
  "description": "Course description",
  "body": "Welcome to the course."
}"#;

const JSON_EXAMPLE_TARGET: &str = r#"{
  "_id": "course",
  "_type": "course",
  "_classes": "course-blue",
  "_htmlClasses": "course-html-blue",
  "title": "Título del curso",
  "displayTitle": "Título del curso",
  "description": "Descripción del curso",
  "body": "Bienvenido al curso."
}"#;

/// Builds the complete system instruction for one translation request.
///
/// The source text is embedded verbatim. Identical inputs always produce an
/// identical string.
pub fn build_prompt(
    source_language: &str,
    target_language: &str,
    source_text: &str,
    format: Format,
) -> String {
    let instructions = match format {
        Format::Csv => csv_instructions(source_language, target_language),
        Format::Json => json_instructions(source_language, target_language),
    };

    let (example_source, example_target) = match format {
        Format::Csv => (CSV_EXAMPLE_SOURCE, CSV_EXAMPLE_TARGET),
        Format::Json => (JSON_EXAMPLE_SOURCE, JSON_EXAMPLE_TARGET),
    };
    let label = format.label();

    format!(
        "{instructions}\n\
         Example translating from English to Spanish:\n\
         \n\
         {label} code:\n\
         {example_source}\n\
         \n\
         {label} code:\n\
         {example_target}\n\
         \n\
         {source_language} code:\n\
         {source_text}\n\
         \n\
         Reply with the translated {label} code only. Do not wrap it in ``` fences.\n\
         {target_language} code (no ```):"
    )
}

fn csv_instructions(source_language: &str, target_language: &str) -> String {
    format!(
        "You are an expert translator in all languages. Translate the following CSV-formatted text \
         from \"{source_language}\" to \"{target_language}\".\n\
         Each row consists of a pair of quoted values: the first value is a path or identifier, \
         and the second value is a description or content in \"{source_language}\". \
         Translate only the second value. Keep the first value unchanged and keep the structure \
         of the CSV intact, one output row per input row. \
         Preserve any HTML or special characters, such as converting quotes to HTML entities \
         if applicable."
    )
}

fn json_instructions(source_language: &str, target_language: &str) -> String {
    let reserved = RESERVED_JSON_PROPERTIES
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an expert translator in all languages. Translate the \"{source_language}\" \
         JSON below to \"{target_language}\".\n\
         Translate only the texts in the property values. Never change the property names. \
         Never modify the values of the properties {reserved}, whatever their language."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_INPUT: &str = r#""course/c-1/title/","Hello""#;
    const JSON_INPUT: &str = r#"{"_id": "c-1", "title": "Hello"}"#;

    #[test]
    fn test_build_prompt_is_deterministic() {
        for format in Format::ALL {
            let first = build_prompt("English", "Spanish", CSV_INPUT, format);
            let second = build_prompt("English", "Spanish", CSV_INPUT, format);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_csv_prompt_contents() {
        let prompt = build_prompt("English", "French", CSV_INPUT, Format::Csv);

        assert!(prompt.contains("CSV-formatted text from \"English\" to \"French\""));
        assert!(prompt.contains("Translate only the second value"));
        assert!(prompt.contains(CSV_EXAMPLE_SOURCE));
        assert!(prompt.contains(CSV_EXAMPLE_TARGET));
        assert!(prompt.contains(&format!("English code:\n{CSV_INPUT}\n")));
        assert!(prompt.ends_with("French code (no ```):"));
    }

    #[test]
    fn test_json_prompt_protects_reserved_properties() {
        let prompt = build_prompt("English", "German", JSON_INPUT, Format::Json);

        assert!(prompt.contains("Never change the property names"));
        for name in RESERVED_JSON_PROPERTIES {
            assert!(prompt.contains(&format!("\"{name}\"")), "missing {name}");
        }
        assert!(prompt.contains(JSON_EXAMPLE_SOURCE));
        assert!(prompt.contains(JSON_EXAMPLE_TARGET));
        assert!(prompt.ends_with("German code (no ```):"));
    }

    #[test]
    fn test_templates_differ_by_format_only() {
        let csv = build_prompt("English", "Spanish", "text", Format::Csv);
        let json = build_prompt("English", "Spanish", "text", Format::Json);
        assert_ne!(csv, json);
        assert!(csv.starts_with("You are an expert translator"));
        assert!(json.starts_with("You are an expert translator"));
    }

    #[test]
    fn test_source_text_embedded_verbatim() {
        let text = "\"a/b/\",\"{placeholder} <b>ünïcode</b> &quot;\"\n\n  trailing  ";
        let prompt = build_prompt("English", "Japanese", text, Format::Csv);
        assert!(prompt.contains(text));
    }

    #[test]
    fn test_no_fence_instruction_present() {
        for format in Format::ALL {
            let prompt = build_prompt("English", "Korean", "x", format);
            assert!(prompt.contains("Do not wrap it in ``` fences."));
        }
    }
}
