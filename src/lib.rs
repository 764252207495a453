//! A stack based calculator using postfix notation.  Lines of tokens are evaluated against a pair
//! of stacks, with user defined words loaded from a word file.

/// Module for tracking source positions, splitting lines into tokens, and reading word files.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

/// Module for reading the calculator's settings from the environment.
pub mod config;

/// Module for the interactive session, the line editor and the formatting of results.
pub mod repl;
