//! Decimal formatting shared by the live result and the history line.

const MAX_FRACTION_DIGITS: usize = 2;

/// Formats `value` with at most two fraction digits, rounding half-up and
/// dropping trailing zeros: `3.0 -> "3"`, `3.10 -> "3.1"`, `3.005 -> "3.01"`.
///
/// Rounding works on the shortest decimal representation of the float rather
/// than on its binary value, so `.xx5` boundaries round the way they read.
/// Halves round away from zero for negative values.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let kept_len = frac_part.len().min(MAX_FRACTION_DIGITS);
    let round_up = frac_part
        .as_bytes()
        .get(MAX_FRACTION_DIGITS)
        .is_some_and(|digit| *digit >= b'5');

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..kept_len].bytes())
        .collect();
    if round_up {
        increment_decimal(&mut digits);
    }

    let int_len = digits.len() - kept_len;
    let int_digits = std::str::from_utf8(&digits[..int_len]).unwrap_or("0");
    let frac_digits = std::str::from_utf8(&digits[int_len..])
        .unwrap_or("")
        .trim_end_matches('0');

    let mut out = String::with_capacity(digits.len() + 2);
    let is_zero = int_digits.bytes().all(|d| d == b'0') && frac_digits.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(int_digits);
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

fn increment_decimal(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
