/// The core data structures used by the calculator: stacks and the word dictionary.
pub mod data_structures;

/// Module for defining the built-in words that are always available to the calculator.
pub mod built_ins;

/// Module for defining the error reporting of the calculator.
pub mod error;

/// Module for the evaluation session itself, the token dispatcher and the interfaces that the
/// built-in words use to reach the stacks.
pub mod interpreter;
