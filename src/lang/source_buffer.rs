use core::str::Chars;
use std::{ fmt::{ self,
                  Display,
                  Formatter },
           hash::{ Hash,
                   Hasher } };



/// The path given to text typed at the prompt or passed on the command line.
pub const INPUT_PATH: &str = "<input>";

/// The location in the source where a token or a word definition was found.  This is used in error
/// reporting for word files, and to record where each user word was defined.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq, Debug)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source.  For example a line typed at
    /// the prompt has a path of [`INPUT_PATH`].
    path: String,

    /// The 1 based line number in the source.
    line: usize,

    /// The 1 based column number in the source.
    column: usize
}


impl Hash for SourceLocation
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.path.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}


impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source or a meaningful description of the source.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Helper macro to get the location of the macro invocation.  Builtin words record where in the
/// Rust code they were registered from.
#[macro_export]
macro_rules! location_here
{
    () =>
    {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(),
                                      line!() as usize,
                                      column!() as usize)
    };
}



/// A buffer for splitting text into tokens.  This buffer acts as a forward only iterator over the
/// text.  As characters are consumed the location of the cursor is maintained, so that errors can
/// point at the offending column.
///
/// The SourceBuffer only holds a reference to the text, the text is not copied.
pub struct SourceBuffer<'a>
{
    /// An iterator over the text being processed.
    chars: Chars<'a>,

    /// The logical location of the cursor.
    location: SourceLocation,

    /// The current character being processed.  This is used to peek at the next character without
    /// consuming it.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer over the given text, with the cursor starting at the beginning of
    /// the source called `path`.
    pub fn new(path: &str, source: &'a str) -> Self
    {
        Self::new_at(SourceLocation::new_from_path(path), source)
    }

    /// Create a new SourceBuffer whose cursor starts at an arbitrary location.  Used when the text
    /// is a single line taken out of a larger file.
    pub fn new_at(location: SourceLocation, source: &'a str) -> Self
    {
        SourceBuffer {
            chars: source.chars(),
            location,
            current: None
        }
    }

    /// The location the cursor is at.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        match self.current
        {
            Some(_) => self.current,
            None =>
                {
                    let next = self.chars.next();

                    self.current = next;
                    next
                }
        }
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next: Option<char>;

        match self.current
        {
            Some(_) =>
                {
                    next = self.current;
                    self.current = None;
                },

            None => next = self.chars.next()
        }

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the colum to 1 and increment the line for
    /// new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn tracks_lines_and_columns()
    {
        let mut buffer = SourceBuffer::new("<test>", "ab\nc");

        assert_eq!(buffer.peek_next(), Some('a'));
        assert_eq!(buffer.location().column(), 1);

        let _ = buffer.next_char();
        let _ = buffer.next_char();
        assert_eq!(buffer.location().column(), 3);

        assert_eq!(buffer.next_char(), Some('\n'));
        assert_eq!(buffer.location().line(), 2);
        assert_eq!(buffer.location().column(), 1);

        assert_eq!(buffer.next_char(), Some('c'));
        assert_eq!(buffer.next_char(), None);
    }

    #[test]
    fn starts_at_given_location()
    {
        let location = SourceLocation::new_from_info("words", 7, 3);
        let mut buffer = SourceBuffer::new_at(location, "x");

        let _ = buffer.next_char();

        assert_eq!(buffer.location().to_string(), "words (7, 4)");
    }

    #[test]
    fn prompt_input_is_tagged()
    {
        let buffer = SourceBuffer::new(INPUT_PATH, "1 2 +");

        assert_eq!(buffer.location().to_string(), "<input> (1, 1)");
    }
}
