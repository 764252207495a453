/// The bounded value stack used for both the primary and the stash stacks.
pub mod stack;

/// Moving values between stacks, and rotating the top of a stack.
pub mod roll;

/// The dictionary of user defined words.
pub mod dictionary;
