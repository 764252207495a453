use crate::runtime::error::{self, ScriptError};
use libc::{
    BRKINT, CS8, ECHO, ICANON, ICRNL, IEXTEN, INPCK, ISIG, ISTRIP, IXON, OPOST, STDIN_FILENO,
    STDOUT_FILENO, TCSAFLUSH, isatty, tcgetattr, tcsetattr, termios,
};
use std::{
    io::{
        Error,
        ErrorKind::{Interrupted, UnexpectedEof},
        Read, stdin,
    },
    mem::zeroed,
};

/// Are both stdin and stdout attached to a terminal?
pub fn is_interactive() -> bool {
    unsafe { isatty(STDIN_FILENO) == 1 && isatty(STDOUT_FILENO) == 1 }
}

/// The controlling terminal.  Holds on to the settings found before raw mode was entered so that
/// they can be put back.
pub struct Terminal {
    original: Option<termios>,
}

impl Terminal {
    pub fn new() -> Terminal {
        Terminal { original: None }
    }

    /// Switch the terminal into or out of raw mode.  Asking for the mode already in effect does
    /// nothing.
    pub fn set_raw_mode(&mut self, requested_on: bool) -> error::Result<()> {
        if requested_on && self.original.is_none() {
            let mut original: termios = unsafe { zeroed() };

            if unsafe { tcgetattr(STDIN_FILENO, &mut original) } == -1 {
                return ScriptError::new_as_result(
                    None,
                    format!(
                        "Could not get terminal mode information: {}",
                        Error::last_os_error()
                    ),
                    None,
                );
            }

            let mut raw = original;

            raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
            raw.c_oflag &= !(OPOST);
            raw.c_cflag |= CS8;
            raw.c_lflag &= !(ECHO | ICANON | IEXTEN | ISIG);

            if unsafe { tcsetattr(STDIN_FILENO, TCSAFLUSH, &raw) } == -1 {
                return ScriptError::new_as_result(
                    None,
                    format!("Could not set terminal mode: {}", Error::last_os_error()),
                    None,
                );
            }

            self.original = Some(original);
        } else if !requested_on && let Some(original) = self.original.take() {
            if unsafe { tcsetattr(STDIN_FILENO, TCSAFLUSH, &original) } == -1 {
                return ScriptError::new_as_result(
                    None,
                    format!(
                        "Could not restore terminal mode: {}",
                        Error::last_os_error()
                    ),
                    None,
                );
            }
        }

        Ok(())
    }

    /// Read a single byte from the terminal, blocking until one is available.  `None` once the
    /// input has been closed.
    pub fn read_key(&mut self) -> error::Result<Option<u8>> {
        let mut buffer = [0; 1];
        let stdin = stdin();
        let mut handle = stdin.lock();

        loop {
            match handle.read_exact(&mut buffer) {
                Ok(()) => return Ok(Some(buffer[0])),
                Err(ref e) if e.kind() == Interrupted => continue,
                Err(ref e) if e.kind() == UnexpectedEof => return Ok(None),
                Err(e) => {
                    return ScriptError::new_as_result(
                        None,
                        format!("Failed to read from stdin: {}", e),
                        None,
                    );
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.set_raw_mode(false);
    }
}
