//! Parsing of position indices supplied by clients.
//!
//! Positions arrive either as query text or as a JSON body value. Parsing is
//! lenient: leading whitespace is skipped and only the leading run of digits
//! counts, so `"2abc"` addresses position 2. Anything that does not yield a
//! non-negative integer is `None`, which callers treat as out of bounds.

use serde_json::Value;

/// Parse a position from text.
pub fn parse_position(raw: &str) -> Option<usize> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    if negative {
        // "-0" is still position zero
        return digits.bytes().all(|b| b == b'0').then_some(0);
    }
    digits.parse::<usize>().ok()
}

/// Parse a position from a JSON value: a number or numeric text.
pub fn position_from_value(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::Number(n) => match n.as_u64() {
            Some(u) => usize::try_from(u).ok(),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < usize::MAX as f64)
                .map(|f| f.trunc() as usize),
        },
        Value::String(s) => parse_position(s),
        _ => None,
    }
}
