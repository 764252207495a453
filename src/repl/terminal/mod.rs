use crate::runtime::error;

#[cfg(windows)]
/// Windows console handling.
mod windows;

#[cfg(windows)]
pub use windows::{Terminal, is_interactive};

#[cfg(unix)]
/// Unix terminal handling through termios.
mod unix;

#[cfg(unix)]
pub use unix::{Terminal, is_interactive};

/// Anything the line editor can pull key presses from, one byte at a time.
pub trait KeySource {
    /// The next byte of input, or `None` once there is no more.
    fn next_key(&mut self) -> error::Result<Option<u8>>;
}

impl KeySource for Terminal {
    fn next_key(&mut self) -> error::Result<Option<u8>> {
        self.read_key()
    }
}

/// Scripted input, handy for driving the editor without a terminal.
impl KeySource for std::collections::VecDeque<u8> {
    fn next_key(&mut self) -> error::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}
