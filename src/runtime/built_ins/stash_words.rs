use crate::{
    add_native_word,
    runtime::{
        built_ins::to_count,
        data_structures::roll::{move_all, move_values},
        error,
        interpreter::Interpreter,
    },
};

/// Move the given number of values from the primary stack onto the stash.
///
/// Signature: `... count -- `
fn word_stash(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = to_count(interpreter.pop());
    let (primary, stash) = interpreter.stacks_mut();

    move_values(primary, stash, count);
    Ok(())
}

/// Move the given number of values from the stash back onto the primary stack.
///
/// Signature: `count -- ...`
fn word_fetch(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = to_count(interpreter.pop());
    let (primary, stash) = interpreter.stacks_mut();

    move_values(stash, primary, count);
    Ok(())
}

/// Signature: `value -- `
fn word_stash_one(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (primary, stash) = interpreter.stacks_mut();

    move_values(primary, stash, 1);
    Ok(())
}

/// Signature: ` -- value`
fn word_fetch_one(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (primary, stash) = interpreter.stacks_mut();

    move_values(stash, primary, 1);
    Ok(())
}

/// Signature: `... -- `
fn word_stash_all(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (primary, stash) = interpreter.stacks_mut();

    move_all(primary, stash);
    Ok(())
}

/// Signature: ` -- ...`
fn word_fetch_all(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (primary, stash) = interpreter.stacks_mut();

    move_all(stash, primary);
    Ok(())
}

/// Register the words that move values between the two stacks.
pub fn register_stash_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "stash",
        word_stash,
        "Move the given number of values onto the stash.",
        "... count -- "
    );

    add_native_word!(
        interpreter,
        "fetch",
        word_fetch,
        "Move the given number of values back from the stash.",
        "count -- ..."
    );

    add_native_word!(
        interpreter,
        ".",
        word_stash_one,
        "Move the top value onto the stash.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        ",",
        word_fetch_one,
        "Move the top of the stash back onto the stack.",
        " -- value"
    );

    add_native_word!(
        interpreter,
        ":",
        word_stash_all,
        "Move the whole stack onto the stash.",
        "... -- "
    );

    add_native_word!(
        interpreter,
        ";",
        word_fetch_all,
        "Move the whole stash back onto the stack.",
        " -- ..."
    );
}
