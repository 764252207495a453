use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Replace the top value with the function of it.  Nothing happens on an empty stack.
fn unary_op(interpreter: &mut dyn Interpreter, operation: fn(f64) -> f64) -> error::Result<()> {
    if interpreter.depth() < 1 {
        return Ok(());
    }

    let a = interpreter.pop();
    interpreter.push(operation(a));

    Ok(())
}

/// Factorial, extended to the reals through the gamma function.
fn factorial(a: f64) -> f64 {
    if a == 0.0 {
        return 1.0;
    }

    a * libm::tgamma(a)
}

/// The angle of the point `(x, y)`.
///
/// Signature: `y x -- angle`
fn word_atan2(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.depth() < 2 {
        return Ok(());
    }

    let x = interpreter.pop();
    let y = interpreter.pop();

    interpreter.push(y.atan2(x));

    Ok(())
}

/// Register the math function words.
pub fn register_math_words(interpreter: &mut dyn Interpreter) {
    let functions: [(&str, fn(f64) -> f64, &str); 14] = [
        ("abs", f64::abs, "Absolute value."),
        ("ceil", f64::ceil, "Round up to the next integer."),
        ("floor", f64::floor, "Round down to the previous integer."),
        ("round", f64::round, "Round to the nearest integer, halves away from zero."),
        ("sin", f64::sin, "Sine of an angle in radians."),
        ("cos", f64::cos, "Cosine of an angle in radians."),
        ("tan", f64::tan, "Tangent of an angle in radians."),
        ("asin", f64::asin, "Arc sine, in radians."),
        ("acos", f64::acos, "Arc cosine, in radians."),
        ("atan", f64::atan, "Arc tangent, in radians."),
        ("ln", f64::ln, "Natural logarithm."),
        ("log", f64::log10, "Base 10 logarithm."),
        ("erf", libm::erf, "The error function."),
        ("!", factorial, "Factorial, through the gamma function for non-integers."),
    ];

    for (name, function, description) in functions {
        add_native_word!(
            interpreter,
            name,
            move |interp: &mut dyn Interpreter| unary_op(interp, function),
            description,
            "a -- f(a)"
        );
    }

    add_native_word!(
        interpreter,
        "atan2",
        word_atan2,
        "Arc tangent of y/x, using the signs of both to pick the quadrant.",
        "y x -- angle"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_matches_integers() {
        assert_eq!(factorial(0.0), 1.0);
        assert!((factorial(5.0) - 120.0).abs() < 1e-9);
        assert!((factorial(0.5) - 0.886_226_925_452_758).abs() < 1e-12);
    }
}
