//! Validation of the user-supplied count.

use crate::error::GenerateError;

/// Smallest accepted count.
pub const MIN_USERS: u32 = 0;
/// Largest accepted count.
pub const MAX_USERS: u32 = 1000;

/// Parse and bound-check the raw count input.
///
/// The input is trimmed and read as a decimal number. Anything that is not a
/// number, or is a number with a fractional part, fails with
/// [`GenerateError::InvalidNumber`]; numbers outside `[MIN_USERS, MAX_USERS]`
/// fail with [`GenerateError::OutOfRange`]. Zero is a valid count: the caller
/// decides what an empty generate means.
pub fn validate_count(raw: &str) -> Result<u32, GenerateError> {
    let t = raw.trim();
    // f64 parsing also accepts "inf" and "nan"; only numerals count.
    if !t.bytes().any(|b| b.is_ascii_digit()) {
        return Err(GenerateError::InvalidNumber);
    }
    let n: f64 = t.parse().map_err(|_| GenerateError::InvalidNumber)?;
    if n.is_nan() {
        return Err(GenerateError::InvalidNumber);
    }
    if n < f64::from(MIN_USERS) || n > f64::from(MAX_USERS) {
        return Err(GenerateError::out_of_range());
    }
    if n.fract() != 0.0 {
        return Err(GenerateError::InvalidNumber);
    }
    Ok(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_whitespace() {
        assert_eq!(validate_count("0"), Ok(0));
        assert_eq!(validate_count(" 1000 "), Ok(1000));
        assert_eq!(validate_count("\t5\n"), Ok(5));
        assert_eq!(validate_count("5.0"), Ok(5));
    }

    #[test]
    fn rejects_non_numbers() {
        for raw in ["", "   ", "abc", "5a", "NaN", "1.5", "inf", "-Infinity", "+inf"] {
            assert_eq!(validate_count(raw), Err(GenerateError::InvalidNumber), "{raw:?}");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for raw in ["-1", "1001", "1e9", "-0.5"] {
            assert_eq!(validate_count(raw), Err(GenerateError::out_of_range()), "{raw:?}");
        }
    }
}
