//! # Numeric Span Extraction
//!
//! Finds the longest prefix of a token that reads as a numeric literal.
//!
//! A numeral starts with an ASCII digit and continues with:
//! - more digits;
//! - at most one `-`, when a digit follows it (`3-4`, the sign in `5e-3`);
//! - at most one `e`/`E` exponent marker, when a digit or `-digit` follows it (`10e12`);
//! - for [`scan_numeral`] only, at most one `.` before the exponent, when a digit follows it (`10.22`).
//!
//! Markers are only taken when they are interior, so `20m`, `10e` and `4.`
//! yield `20`, `10` and `4`. Both entry points run the same scanner and differ
//! only in whether a decimal point is accepted, so they always agree on the
//! digits they share.

/// Longest numeric prefix without a decimal point. Empty if `token` does not start with a digit.
pub fn extract_numeric_span(token: &str) -> &str {
    scan(token, false)
}

/// Longest numeric prefix, decimal point included. Empty if `token` does not start with a digit.
pub fn scan_numeral(token: &str) -> &str {
    scan(token, true)
}

/// Maximal run of ASCII digits at the start of `s`.
pub fn digit_run(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}

/// Returns `true` if the token starts with an ASCII digit.
pub fn starts_with_digit(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn scan(token: &str, allow_decimal: bool) -> &str {
    if !starts_with_digit(token) {
        return "";
    }

    // digits and the markers are all ASCII, so byte positions are char positions
    let bytes = token.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut seen_sign = false;
    let mut seen_exponent = false;
    let mut seen_point = false;
    let mut end = 1;

    while end < bytes.len() {
        let accepted = match bytes[end] {
            b'0'..=b'9' => true,
            b'-' if !seen_sign && digit_at(end + 1) => {
                seen_sign = true;
                true
            }
            b'e' | b'E'
                if !seen_exponent
                    && (digit_at(end + 1)
                        || (!seen_sign && bytes.get(end + 1) == Some(&b'-') && digit_at(end + 2))) =>
            {
                seen_exponent = true;
                true
            }
            b'.' if allow_decimal && !seen_point && !seen_exponent && digit_at(end + 1) => {
                seen_point = true;
                true
            }
            _ => false,
        };
        if !accepted {
            break;
        }
        end += 1;
    }

    &token[..end]
}
