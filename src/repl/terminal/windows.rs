use crate::runtime::error::{self, ScriptError};
use std::{io::Error, mem::zeroed};
use winapi::{
    shared::minwindef::{DWORD, UINT},
    um::{
        consoleapi::{GetConsoleMode, ReadConsoleInputA, SetConsoleMode},
        handleapi::INVALID_HANDLE_VALUE,
        processenv::GetStdHandle,
        winbase::{STD_INPUT_HANDLE, STD_OUTPUT_HANDLE},
        wincon::{
            ENABLE_ECHO_INPUT, ENABLE_INSERT_MODE, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT,
            ENABLE_PROCESSED_OUTPUT, ENABLE_VIRTUAL_TERMINAL_INPUT,
            ENABLE_VIRTUAL_TERMINAL_PROCESSING, SetConsoleCP, SetConsoleOutputCP,
        },
        wincontypes::INPUT_RECORD,
        winnt::HANDLE,
    },
};

const CP_UTF8: UINT = 65001;
const KEY_EVENT: u16 = 1;

fn console_error<T>(what: &str) -> error::Result<T> {
    ScriptError::new_as_result(
        None,
        format!("{} failed: {}", what, Error::last_os_error()),
        None,
    )
}

fn std_handle(which: DWORD) -> error::Result<HANDLE> {
    let handle = unsafe { GetStdHandle(which) };

    if handle == INVALID_HANDLE_VALUE {
        return console_error("Get console handle");
    }

    Ok(handle)
}

/// Is stdin attached to a console?
pub fn is_interactive() -> bool {
    let mut mode: DWORD = 0;

    match std_handle(STD_INPUT_HANDLE) {
        Ok(handle) => unsafe { GetConsoleMode(handle, &mut mode) != 0 },
        Err(_) => false,
    }
}

/// The attached console.  Keeps the modes found before raw mode was entered so that they can be
/// put back.
pub struct Terminal {
    original_modes: Option<(DWORD, DWORD)>,
}

impl Terminal {
    pub fn new() -> Terminal {
        unsafe {
            SetConsoleCP(CP_UTF8);
            SetConsoleOutputCP(CP_UTF8);
        }

        Terminal {
            original_modes: None,
        }
    }

    /// Put the console into or out of raw mode.
    pub fn set_raw_mode(&mut self, requested_on: bool) -> error::Result<()> {
        let std_in_handle = std_handle(STD_INPUT_HANDLE)?;
        let std_out_handle = std_handle(STD_OUTPUT_HANDLE)?;

        if requested_on && self.original_modes.is_none() {
            let mut input_mode: DWORD = 0;
            let mut output_mode: DWORD = 0;

            if unsafe { GetConsoleMode(std_in_handle, &mut input_mode) } == 0 {
                return console_error("Get console input mode");
            }

            if unsafe { GetConsoleMode(std_out_handle, &mut output_mode) } == 0 {
                return console_error("Get console output mode");
            }

            let new_input_mode = (input_mode
                & !(ENABLE_ECHO_INPUT
                    | ENABLE_INSERT_MODE
                    | ENABLE_LINE_INPUT
                    | ENABLE_PROCESSED_INPUT))
                | ENABLE_VIRTUAL_TERMINAL_INPUT;
            let new_output_mode =
                output_mode | ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING;

            if unsafe { SetConsoleMode(std_in_handle, new_input_mode) } == 0 {
                return console_error("Set console input mode");
            }

            if unsafe { SetConsoleMode(std_out_handle, new_output_mode) } == 0 {
                return console_error("Set console output mode");
            }

            self.original_modes = Some((input_mode, output_mode));
        } else if !requested_on && let Some((input_mode, output_mode)) = self.original_modes.take()
        {
            if unsafe { SetConsoleMode(std_in_handle, input_mode) } == 0 {
                return console_error("Set console input mode");
            }

            if unsafe { SetConsoleMode(std_out_handle, output_mode) } == 0 {
                return console_error("Set console output mode");
            }
        }

        Ok(())
    }

    /// Read a single character from the console, blocking until a key press produces one.
    pub fn read_key(&mut self) -> error::Result<Option<u8>> {
        let std_in_handle = std_handle(STD_INPUT_HANDLE)?;

        let mut buffer: INPUT_RECORD = unsafe { zeroed() };
        let mut read: DWORD = 0;

        loop {
            if unsafe { ReadConsoleInputA(std_in_handle, &mut buffer, 1, &mut read) } == 0 {
                return console_error("Reading from console input");
            }

            if buffer.EventType == KEY_EVENT {
                let key_event = unsafe { buffer.Event.KeyEvent() };

                if key_event.bKeyDown != 0 {
                    // Modifier keys on their own arrive with no character attached.
                    let character = unsafe { *key_event.uChar.AsciiChar() } as u8;

                    if character != 0 {
                        return Ok(Some(character));
                    }
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
