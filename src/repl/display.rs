use crate::runtime::{data_structures::stack::Stack, interpreter::WordHandlerInfo};

/// Significant digits shown for committed results.
pub const RESULT_PRECISION: usize = 15;

/// Significant digits shown in the live preview.
pub const PREVIEW_PRECISION: usize = 6;

/// Drop trailing zeros after a decimal point, and the point itself if nothing is left after it.
fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Format a value with the given number of significant digits, choosing between plain and
/// exponent notation the way C's `%g` does.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);

    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };

        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, value);

        strip_trailing_zeros(&fixed).to_string()
    }
}

/// The result of a committed line, one value per line, oldest first.
pub fn render_result(stack: &Stack) -> String {
    let mut text = String::new();

    for value in stack.as_slice() {
        text.push_str(&format_number(*value, RESULT_PRECISION));
        text.push('\n');
    }

    text
}

/// The hint shown after the line being edited.  The primary stack oldest first, then, if anything
/// is stashed, a bar and the stash with the most recently stashed value first.
pub fn render_preview(stack: &Stack, stash: &Stack) -> String {
    let mut text = String::new();

    for value in stack.as_slice() {
        text.push(' ');
        text.push_str(&format_number(*value, PREVIEW_PRECISION));
    }

    if !stash.is_empty() {
        text.push_str(" |");

        for value in stash.as_slice().iter().rev() {
            text.push(' ');
            text.push_str(&format_number(*value, PREVIEW_PRECISION));
        }
    }

    text
}

/// One line per built-in word, its name and stack signature in aligned columns followed by its
/// description.
pub fn render_builtins(builtins: &[&WordHandlerInfo]) -> String {
    let name_width = builtins.iter().map(|info| info.name().len()).max().unwrap_or(0);
    let signature_width = builtins
        .iter()
        .map(|info| info.signature().trim().len())
        .max()
        .unwrap_or(0);

    let mut text = String::new();

    for info in builtins {
        text.push_str(&format!(
            "{:name_width$}  {:signature_width$}  {}\n",
            info.name(),
            info.signature().trim(),
            info.description(),
            name_width = name_width,
            signature_width = signature_width
        ));
    }

    text
}
