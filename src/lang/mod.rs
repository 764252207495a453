/// Module for tracking positions within source text.
#[macro_use]
pub mod source_buffer;

/// Module for splitting a line of text into tokens, and for recognizing numeric literals.
pub mod tokenizing;

/// Module for reading user word definitions out of a word file.
pub mod word_source;
