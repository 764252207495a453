/// The symbol operators and the summing words.
mod arithmetic_words;

/// The named math functions.
mod math_words;

/// Words that manipulate the primary stack.
mod stack_words;

/// Words that move values between the primary and the stash stacks.
mod stash_words;

use crate::runtime::{
    built_ins::{
        arithmetic_words::register_arithmetic_words, math_words::register_math_words,
        stack_words::register_stack_words, stash_words::register_stash_words,
    },
    data_structures::stack::STACK_CAPACITY,
    interpreter::Interpreter,
};

/// Turn a value popped off of the stack into a count of values.  Fractions are truncated, NaN and
/// negative values count as zero, and nothing can count past the capacity of a stack.
pub fn to_count(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }

    (value as usize).min(STACK_CAPACITY)
}

/// Called to register all of the built-in words of the calculator.
pub fn register_builtin_words(interpreter: &mut dyn Interpreter) {
    register_arithmetic_words(interpreter);
    register_math_words(interpreter);
    register_stack_words(interpreter);
    register_stash_words(interpreter);
}
