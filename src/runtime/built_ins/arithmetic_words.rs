use crate::{
    add_native_word,
    runtime::{built_ins::to_count, error, interpreter::Interpreter},
};

/// Apply a two operand operator as `second OP top`.  With fewer than two values on the stack the
/// operator does nothing at all.
fn binary_op(
    interpreter: &mut dyn Interpreter,
    operation: impl Fn(f64, f64) -> f64,
) -> error::Result<()> {
    if interpreter.depth() < 2 {
        return Ok(());
    }

    let a = interpreter.pop();
    let b = interpreter.pop();

    interpreter.push(operation(b, a));

    Ok(())
}

/// Modulo that takes the sign of the divisor, `b - a * floor(b / a)`.
fn floored_modulo(b: f64, a: f64) -> f64 {
    b - a * (b / a).floor()
}

/// Pop `count` values and push their total.
fn sum_values(interpreter: &mut dyn Interpreter, count: usize) {
    let mut total = 0.0;

    for _ in 0..count {
        total += interpreter.pop();
    }

    interpreter.push(total);
}

/// Add up the whole stack.
///
/// Signature: `... -- total`
fn word_sum(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = interpreter.depth();

    sum_values(interpreter, count);
    Ok(())
}

/// Add up the given number of values.
///
/// Signature: `... count -- total`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = to_count(interpreter.pop()).min(interpreter.depth());

    sum_values(interpreter, count);
    Ok(())
}

/// Register the arithmetic words.
pub fn register_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        |interp: &mut dyn Interpreter| binary_op(interp, |b, a| b + a),
        "Add the top two values.",
        "b a -- b+a"
    );

    add_native_word!(
        interpreter,
        "-",
        |interp: &mut dyn Interpreter| binary_op(interp, |b, a| b - a),
        "Subtract the top value from the one below it.",
        "b a -- b-a"
    );

    add_native_word!(
        interpreter,
        "*",
        |interp: &mut dyn Interpreter| binary_op(interp, |b, a| b * a),
        "Multiply the top two values.",
        "b a -- b*a"
    );

    add_native_word!(
        interpreter,
        "/",
        |interp: &mut dyn Interpreter| binary_op(interp, |b, a| b / a),
        "Divide the second value by the top value.",
        "b a -- b/a"
    );

    add_native_word!(
        interpreter,
        "%",
        |interp: &mut dyn Interpreter| binary_op(interp, floored_modulo),
        "Floored modulo, the result takes the sign of the divisor.",
        "b a -- b%a"
    );

    add_native_word!(
        interpreter,
        "^",
        |interp: &mut dyn Interpreter| binary_op(interp, f64::powf),
        "Raise the second value to the power of the top value.",
        "b a -- b^a"
    );

    add_native_word!(
        interpreter,
        "sum",
        word_sum,
        "Replace the whole stack with its total.",
        "... -- total"
    );

    add_native_word!(
        interpreter,
        "add",
        word_add,
        "Replace the given number of values with their total.",
        "... count -- total"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floored_modulo_follows_the_divisor() {
        assert_eq!(floored_modulo(10.0, 3.0), 1.0);
        assert_eq!(floored_modulo(-10.0, 3.0), 2.0);
        assert_eq!(floored_modulo(10.0, -3.0), -2.0);
        assert_eq!(floored_modulo(5.5, 2.0), 1.5);
        assert!(floored_modulo(1.0, 0.0).is_nan());
    }
}
