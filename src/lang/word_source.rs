use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::split_args},
    runtime::error::{self, ScriptError},
};
use std::{fs::read_to_string, io::ErrorKind};

/// A single word definition read from a word source, before it is added to the dictionary.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    /// Where the definition was found.
    pub location: SourceLocation,

    /// The name of the new word.
    pub name: String,

    /// The text the word expands to when it is used.
    pub meaning: String,
}

/// Parse word definitions out of the text of a word source.  Every non-blank line holds exactly
/// two tokens, the name of the word and its meaning:
///
/// ```text
/// double  "2 *"
/// avg     "sum count /"
/// ```
///
/// Any other shape of line is an error that points at the line.
pub fn parse_definitions(path: &str, source: &str) -> error::Result<Vec<Definition>> {
    let mut definitions = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let column = line.len() - line.trim_start().len() + 1;
        let location = SourceLocation::new_from_info(path, index + 1, column);
        let mut tokens = split_args(&location, trimmed)?;

        if tokens.len() != 2 {
            return ScriptError::new_as_result(
                Some(location),
                format!(
                    "Invalid word definition, expected a name and a meaning but found {} tokens.",
                    tokens.len()
                ),
                None,
            );
        }

        let meaning = tokens.pop().unwrap_or_default();
        let name = tokens.pop().unwrap_or_default();

        definitions.push(Definition {
            location,
            name,
            meaning,
        });
    }

    Ok(definitions)
}

/// Read and parse a word file.  A file that does not exist simply holds no definitions.
pub fn load_definitions(path: &str) -> error::Result<Vec<Definition>> {
    match read_to_string(path) {
        Ok(source) => parse_definitions(path, &source),

        Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),

        Err(error) => ScriptError::new_as_result(
            None,
            format!("Could not read word file {}: {}", path, error),
            None,
        ),
    }
}
