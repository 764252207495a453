/// Formatting of numbers and stacks for the terminal.
pub mod display;

/// Raw terminal access for the line editor.
pub mod terminal;

use crate::runtime::{
    error,
    interpreter::{
        Interpreter, InterpreterStack, WordManagement, clac_interpreter::ClacInterpreter,
    },
};
use display::{render_builtins, render_preview, render_result};
use std::io::{BufRead, Write, stdin, stdout};
use terminal::{KeySource, Terminal, is_interactive};

/// Shown at the start of every input line.
pub const PROMPT: &str = "> ";

const HINT_COLOR: &str = "\x1b[33m";
const RESET_COLOR: &str = "\x1b[0m";

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;
const BACKSPACE: u8 = 0x08;
const CTRL_U: u8 = 0x15;
const ESCAPE: u8 = 0x1b;
const DELETE: u8 = 0x7f;

/// An interactive calculator session.
pub struct Repl<'a> {
    interpreter: &'a mut ClacInterpreter,
    words_file: Option<String>,
}

impl<'a> Repl<'a> {
    pub fn new(interpreter: &'a mut ClacInterpreter, words_file: Option<String>) -> Repl<'a> {
        Repl {
            interpreter,
            words_file,
        }
    }

    /// Handle one committed line of input.
    ///
    /// Errors raised while evaluating the line are reported and the session carries on, a failure
    /// to reload the word file is handed back to the caller.
    pub fn process_line(&mut self, line: &str, output: &mut impl Write) -> error::Result<()> {
        match line.trim() {
            "words" => {
                write!(output, "{}", self.interpreter.dictionary())?;
            }

            "help" => {
                write!(output, "{}", render_builtins(&self.interpreter.builtins()))?;
            }

            "reload" => match &self.words_file {
                Some(path) => self.interpreter.reload_words(path)?,
                None => {
                    tracing::debug!("No word file configured, clearing the user words.");
                    self.interpreter.clear_words();
                }
            },

            _ => match self.interpreter.commit(line) {
                Ok(()) => write!(output, "{}", render_result(self.interpreter.stack()))?,
                Err(error) => eprintln!("Error: {}", error.error()),
            },
        }

        output.flush()?;
        Ok(())
    }

    /// Commit every line read from `input` in order.  Used when there is no terminal to edit on.
    pub fn run_lines(&mut self, input: impl BufRead, output: &mut impl Write) -> error::Result<()> {
        for line in input.lines() {
            self.process_line(&line?, output)?;
        }

        Ok(())
    }

    /// Redraw the line being edited along with the preview of what it would evaluate to.  The
    /// cursor is left at the end of the typed text.
    fn render(&mut self, buffer: &str, output: &mut impl Write) -> error::Result<()> {
        let hint = match self.interpreter.preview(buffer) {
            Ok(()) => render_preview(self.interpreter.stack(), self.interpreter.stash()),
            Err(error) => format!(" {}", error.error()),
        };

        write!(
            output,
            "\r\x1b[K{}{}{}{}{}",
            PROMPT, buffer, HINT_COLOR, hint, RESET_COLOR
        )?;

        let width = hint.chars().count();

        if width > 0 {
            write!(output, "\x1b[{}D", width)?;
        }

        output.flush()?;
        Ok(())
    }

    /// Swallow the rest of an escape sequence, cursor keys and the like are not supported.
    fn skip_escape_sequence(keys: &mut impl KeySource) -> error::Result<()> {
        match keys.next_key()? {
            Some(b'[') | Some(b'O') => {
                while let Some(key) = keys.next_key()? {
                    if (0x40..=0x7e).contains(&key) {
                        break;
                    }
                }
            }

            _ => {}
        }

        Ok(())
    }

    /// Edit a single line with a live preview.  Returns `None` when the user asks to leave.
    pub fn read_line(
        &mut self,
        keys: &mut impl KeySource,
        output: &mut impl Write,
    ) -> error::Result<Option<String>> {
        let mut buffer = String::new();

        self.render(&buffer, output)?;

        loop {
            let key = match keys.next_key()? {
                Some(key) => key,
                None => {
                    write!(output, "\r\n")?;
                    return Ok(None);
                }
            };

            match key {
                b'\r' | b'\n' => {
                    write!(output, "\r\x1b[K{}{}\r\n", PROMPT, buffer)?;
                    output.flush()?;

                    return Ok(Some(buffer));
                }

                CTRL_C => {
                    write!(output, "\r\n")?;
                    return Ok(None);
                }

                CTRL_D if buffer.is_empty() => {
                    write!(output, "\r\n")?;
                    return Ok(None);
                }

                BACKSPACE | DELETE => {
                    let _ = buffer.pop();
                }

                CTRL_U => buffer.clear(),

                ESCAPE => {
                    Self::skip_escape_sequence(keys)?;
                    continue;
                }

                b' '..=b'~' => buffer.push(key as char),

                _ => continue,
            }

            self.render(&buffer, output)?;
        }
    }

    /// Run the editor on the terminal until the user leaves.  Raw mode is dropped while each line
    /// is being processed.
    pub fn run_interactive(
        &mut self,
        terminal: &mut Terminal,
        output: &mut impl Write,
    ) -> error::Result<()> {
        loop {
            terminal.set_raw_mode(true)?;
            let line = self.read_line(terminal, output);
            terminal.set_raw_mode(false)?;

            match line? {
                Some(line) => self.process_line(&line, output)?,
                None => break,
            }
        }

        Ok(())
    }
}

/// Start a session, with the line editor when attached to a terminal and reading plain lines from
/// stdin otherwise.
pub fn run(interpreter: &mut ClacInterpreter, words_file: Option<String>) -> error::Result<()> {
    let mut repl = Repl::new(interpreter, words_file);
    let mut output = stdout();

    if is_interactive() {
        let mut terminal = Terminal::new();
        repl.run_interactive(&mut terminal, &mut output)
    } else {
        repl.run_lines(stdin().lock(), &mut output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn keys(text: &[u8]) -> VecDeque<u8> {
        text.iter().copied().collect()
    }

    fn session_output(interpreter: &mut ClacInterpreter, input: &str) -> String {
        let mut output = Vec::new();
        let mut repl = Repl::new(interpreter, None);

        repl.run_lines(input.as_bytes(), &mut output)
            .expect("Lines should run.");

        String::from_utf8(output).expect("Output should be text.")
    }

    #[test]
    fn committed_lines_print_the_stack() {
        let mut interpreter = ClacInterpreter::with_builtins();

        assert_eq!(session_output(&mut interpreter, "3 4 +\n1 2\n"), "7\n1\n2\n");
    }

    #[test]
    fn hole_carries_between_lines() {
        let mut interpreter = ClacInterpreter::with_builtins();

        assert_eq!(session_output(&mut interpreter, "6 7 *\n_ 2 /\n"), "42\n21\n");
    }

    #[test]
    fn words_lists_the_dictionary() {
        let mut interpreter = ClacInterpreter::with_builtins();
        interpreter.define_word(location_here!(), "double".to_string(), "2 *".to_string());

        assert_eq!(session_output(&mut interpreter, "words\n"), "double  2 *\n");
    }

    #[test]
    fn help_lists_the_builtins() {
        let mut interpreter = ClacInterpreter::with_builtins();
        let output = session_output(&mut interpreter, "help\n");

        assert_eq!(output.lines().count(), interpreter.builtins().len());
        assert!(output.contains("\ndup    value -- value value "));
        assert_eq!(interpreter.hole(), 0.0);
    }

    #[test]
    fn editor_builds_the_line() {
        let mut interpreter = ClacInterpreter::with_builtins();
        let mut repl = Repl::new(&mut interpreter, None);
        let mut output = Vec::new();

        let line = repl
            .read_line(&mut keys(b"3 4x\x7f +\x1b[D\r"), &mut output)
            .expect("Editing should work.");

        assert_eq!(line, Some("3 4 +".to_string()));

        let output = String::from_utf8(output).expect("Output should be text.");
        assert!(output.contains("\x1b[33m 7\x1b[0m"));
    }

    #[test]
    fn editor_clears_and_exits() {
        let mut interpreter = ClacInterpreter::with_builtins();
        let mut repl = Repl::new(&mut interpreter, None);
        let mut output = Vec::new();

        let line = repl
            .read_line(&mut keys(b"1 2\x15\x04"), &mut output)
            .expect("Editing should work.");
        assert_eq!(line, None);

        let line = repl
            .read_line(&mut keys(b"1\x04\x03"), &mut output)
            .expect("Editing should work.");
        assert_eq!(line, None);
    }

    #[test]
    fn preview_leaves_the_hole_alone() {
        let mut interpreter = ClacInterpreter::with_builtins();

        {
            let mut repl = Repl::new(&mut interpreter, None);
            let mut output = Vec::new();

            repl.process_line("5", &mut output).expect("Line should run.");
            let _ = repl
                .read_line(&mut keys(b"99\x03"), &mut output)
                .expect("Editing should work.");
        }

        assert_eq!(interpreter.hole(), 5.0);
    }
}
