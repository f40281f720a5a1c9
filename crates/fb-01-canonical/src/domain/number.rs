//! # Number Formatting
//!
//! Renders an `f64` exactly as ECMAScript `Number.prototype.toString` does,
//! so hashes agree with every SDK. The shortest round-tripping digit string
//! comes from Rust's `{:e}` formatting; only the placement of the decimal
//! point and the exponent style are decided here.

use super::errors::CanonicalError;

/// Largest decimal exponent rendered without scientific notation.
const MAX_FIXED_EXPONENT: i32 = 21;

/// Smallest decimal exponent rendered without scientific notation.
const MIN_FIXED_EXPONENT: i32 = -6;

/// Formats a finite number in ECMAScript style.
///
/// # Errors
///
/// `CanonicalError::NonFiniteNumber` for NaN and the infinities.
pub fn format_number(value: f64) -> Result<String, CanonicalError> {
    if !value.is_finite() {
        return Err(CanonicalError::NonFiniteNumber);
    }
    // Covers -0 as well.
    if value == 0.0 {
        return Ok("0".to_string());
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .ok_or_else(|| CanonicalError::Encoding(scientific.clone()))?;
    let exponent: i32 = exponent
        .parse()
        .map_err(|_| CanonicalError::Encoding(scientific.clone()))?;

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the start of `digits`.
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_FIXED_EXPONENT {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_FIXED_EXPONENT {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if MIN_FIXED_EXPONENT < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let exponent_sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exponent_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{exponent_sign}{}", e.abs())
        }
    };

    Ok(format!("{sign}{body}"))
}
