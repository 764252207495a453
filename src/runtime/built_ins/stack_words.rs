use crate::{
    add_native_word,
    runtime::{built_ins::to_count, data_structures::roll::roll, error, interpreter::Interpreter},
};

/// Push the answer of the last committed line.
///
/// Signature: ` -- hole`
fn word_recall(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let hole = interpreter.hole();

    interpreter.push(hole);
    Ok(())
}

/// Duplicate the top value on the stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.depth() > 0 {
        let value = interpreter.peek();
        interpreter.push(value);
    }

    Ok(())
}

/// Drop the top value on the stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop();

    Ok(())
}

/// Swap the top 2 values on the stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.depth() < 2 {
        return Ok(());
    }

    let a = interpreter.pop();
    let b = interpreter.pop();

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Get the depth of the stack before calling this word.
///
/// Signature: ` -- depth`
fn word_count(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let depth = interpreter.depth();

    interpreter.push(depth as f64);
    Ok(())
}

/// Empty the stack.
///
/// Signature: `... -- `
fn word_clear(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (primary, _) = interpreter.stacks_mut();

    primary.clear();
    Ok(())
}

/// Rotate the top m values by n positions, the stash is used as scratch space.  With `1 2 3` on
/// the stack, `3 1 roll` leaves `3 1 2`.
///
/// Signature: `... m n -- ...`
fn word_roll(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let n = interpreter.pop();
    let m = interpreter.pop();

    let (primary, stash) = interpreter.stacks_mut();

    roll(primary, stash, to_count(m), n as i64);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "_",
        word_recall,
        "Push the answer of the last committed line.",
        " -- hole"
    );

    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top 2 values on the stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "count",
        word_count,
        "Get the depth of the stack before calling this word.",
        " -- depth"
    );

    add_native_word!(
        interpreter,
        "clear",
        word_clear,
        "Empty the stack.",
        "... -- "
    );

    add_native_word!(
        interpreter,
        "roll",
        word_roll,
        "Rotate the top m values by n positions.",
        "... m n -- ..."
    );
}
