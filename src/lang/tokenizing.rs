use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ScriptError},
};

/// A list of tokens split out of a line of text.
pub type TokenList = Vec<String>;

/// Characters that separate tokens outside of quotes.
fn is_separator(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

/// Whitespace skipped between tokens.  This is a little wider than the set of separators, vertical
/// tab and form feed are skipped but do not end an unquoted token.
fn is_whitespace(next: &char) -> bool {
    is_separator(next) || *next == '\x0b' || *next == '\x0c'
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

fn unterminated(location: &SourceLocation) -> error::Result<()> {
    ScriptError::new_as_result(
        Some(location.clone()),
        "Unterminated quoted string.".to_string(),
        None,
    )
}

/// A closing quote must be followed by whitespace or the end of the text.
fn check_after_closing_quote(buffer: &mut SourceBuffer) -> error::Result<()> {
    if let Some(next) = buffer.peek_next()
        && !is_whitespace(&next)
    {
        ScriptError::new_as_result(
            Some(buffer.location().clone()),
            "Closing quote must be followed by a space.".to_string(),
            None,
        )?;
    }

    Ok(())
}

/// Process a `\xHH` escape after the `\x` has been consumed.  If the two hex digits are not there
/// the escape is taken literally.
fn process_hex_escape(buffer: &mut SourceBuffer, text: &mut String) {
    let high = match buffer.peek_next().and_then(|c| c.to_digit(16)) {
        Some(digit) => digit,
        None => {
            text.push('x');
            return;
        }
    };

    let first = buffer.next_char().unwrap_or_default();

    match buffer.peek_next().and_then(|c| c.to_digit(16)) {
        Some(low) => {
            let _ = buffer.next_char();
            text.push(char::from((high * 16 + low) as u8));
        }

        None => {
            text.push('x');
            text.push(first);
        }
    }
}

/// Process the body of a double quoted string, the opening quote has already been consumed.
/// Backslash escapes are translated.
fn process_double_quoted(
    start: &SourceLocation,
    buffer: &mut SourceBuffer,
    text: &mut String,
) -> error::Result<()> {
    loop {
        match buffer.next_char() {
            Some('"') => return check_after_closing_quote(buffer),

            Some('\\') => match buffer.next_char() {
                Some('x') => process_hex_escape(buffer, text),
                Some('n') => text.push('\n'),
                Some('r') => text.push('\r'),
                Some('t') => text.push('\t'),
                Some('b') => text.push('\x08'),
                Some('a') => text.push('\x07'),
                Some(other) => text.push(other),
                None => return unterminated(start),
            },

            Some(next) => text.push(next),

            None => return unterminated(start),
        }
    }
}

/// Process the body of a single quoted string, the opening quote has already been consumed.  Only
/// `\'` is treated as an escape.
fn process_single_quoted(
    start: &SourceLocation,
    buffer: &mut SourceBuffer,
    text: &mut String,
) -> error::Result<()> {
    loop {
        match buffer.next_char() {
            Some('\'') => return check_after_closing_quote(buffer),

            Some('\\') => {
                if buffer.peek_next() == Some('\'') {
                    let _ = buffer.next_char();
                    text.push('\'');
                } else {
                    text.push('\\');
                }
            }

            Some(next) => text.push(next),

            None => return unterminated(start),
        }
    }
}

/// Split a line of text into tokens the way a shell splits a command line.  Tokens are separated by
/// whitespace, and can be wrapped in double quotes (with backslash escapes) or single quotes (taken
/// literally) so that a token may itself contain spaces.  A quote may also start part way through a
/// token, in which case the quoted text ends the token.
///
/// The location is where the text starts, and is used for the errors reported on unbalanced quotes.
pub fn split_args(location: &SourceLocation, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new_at(location.clone(), source);
    let mut token_list = TokenList::new();

    loop {
        skip_whitespace(&mut buffer);

        if buffer.peek_next().is_none() {
            break;
        }

        let mut text = String::new();

        // Collect characters until a separator, or until a quoted section closes the token.
        while let Some(next) = buffer.peek_next() {
            if is_separator(&next) {
                break;
            }

            let start = buffer.location().clone();
            let _ = buffer.next_char();

            match next {
                '"' => {
                    process_double_quoted(&start, &mut buffer, &mut text)?;
                    break;
                }

                '\'' => {
                    process_single_quoted(&start, &mut buffer, &mut text)?;
                    break;
                }

                _ => text.push(next),
            }
        }

        token_list.push(text);
    }

    Ok(token_list)
}

/// Attempt to read the whole token as a floating point literal.  Anything the standard float parser
/// accepts is a number, including `inf` and `nan`.  The empty token reads as zero.
pub fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }

    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> TokenList {
        split_args(&SourceLocation::new_from_path("<test>"), text).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split("  3 4\t+\n"), vec!["3", "4", "+"]);
        assert!(split("   ").is_empty());
    }

    #[test]
    fn double_quotes_group_and_escape() {
        assert_eq!(split(r#"double "2 *""#), vec!["double", "2 *"]);
        assert_eq!(split(r#""a\tb\x41\"""#), vec!["a\tbA\""]);
        assert_eq!(split(r#""\xZ1""#), vec!["xZ1"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(split(r"'a\nb' 'it\'s'"), vec![r"a\nb", "it's"]);
    }

    #[test]
    fn nested_body_survives_one_level_of_splitting() {
        let outer = split(r#"twice "'2 *' 2 *""#);
        assert_eq!(outer, vec!["twice", "'2 *' 2 *"]);

        let inner = split(&outer[1]);
        assert_eq!(inner, vec!["2 *", "2", "*"]);
    }

    #[test]
    fn quote_inside_a_token_ends_it() {
        assert_eq!(split(r#"ab"c d" e"#), vec!["abc d", "e"]);
    }

    #[test]
    fn unbalanced_quotes_are_errors() {
        let location = SourceLocation::new_from_path("<test>");

        let error = split_args(&location, "1 \"2 3").unwrap_err();
        assert_eq!(error.location().as_ref().unwrap().column(), 3);

        assert!(split_args(&location, "'abc").is_err());
        assert!(split_args(&location, "\"abc\"def").is_err());
    }

    #[test]
    fn numbers_parse_whole_token_only() {
        assert_eq!(parse_number("3.5"), Some(3.5));
        assert_eq!(parse_number("-2e3"), Some(-2000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number(""), Some(0.0));
        assert!(parse_number("inf").unwrap().is_infinite());
        assert!(parse_number("nan").unwrap().is_nan());
        assert_eq!(parse_number("3x"), None);
        assert_eq!(parse_number("+-"), None);
    }
}
