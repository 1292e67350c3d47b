//! Typed conversion of raw INI values
//!
//! The getter surface is a small closed set of types dispatched through
//! [`IniValue`]: strings come back verbatim, numbers use prefix parsing in
//! the style of `strtol`/`strtod` (consume what looks numeric, stop at the
//! first character that doesn't), and booleans match a fixed token set.

/// A type that can be produced from a raw INI value string.
///
/// `parse_ini` returns `None` when the value cannot be converted, which
/// the getters translate into the caller-supplied default (or, for array
/// elements, into `T::default()`).
pub trait IniValue: Sized {
    fn parse_ini(raw: &str) -> Option<Self>;
}

impl IniValue for String {
    fn parse_ini(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl IniValue for i64 {
    /// Accepts decimal and `0x`-prefixed hexadecimal, with an optional
    /// sign, and stops at the first non-numeric character. Fails only when
    /// no digits were consumed at all.
    fn parse_ini(raw: &str) -> Option<Self> {
        parse_long_prefix(raw)
    }
}

impl IniValue for i32 {
    /// Parses as `i64` and truncates with `as`. Out-of-range values wrap
    /// silently; this matches the historical behavior of the original
    /// reader and is kept as-is, not recommended as a pattern.
    fn parse_ini(raw: &str) -> Option<Self> {
        parse_long_prefix(raw).map(|n| n as i32)
    }
}

impl IniValue for f64 {
    fn parse_ini(raw: &str) -> Option<Self> {
        parse_double_prefix(raw)
    }
}

impl IniValue for f32 {
    fn parse_ini(raw: &str) -> Option<Self> {
        parse_double_prefix(raw).map(|n| n as f32)
    }
}

impl IniValue for bool {
    fn parse_ini(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

/// `strtol(value, _, 0)`-style prefix parse, minus the octal special case:
/// optional leading whitespace and sign, then decimal digits or `0x`/`0X`
/// followed by hex digits. Saturates instead of clamping with errno.
fn parse_long_prefix(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut pos = 0;
    let mut negative = false;
    match bytes.first() {
        Some(b'+') => pos = 1,
        Some(b'-') => {
            negative = true;
            pos = 1;
        }
        _ => {}
    }

    // "0x" only switches to hex when a hex digit follows; a bare "0x"
    // parses as the decimal 0 with the 'x' left unconsumed.
    let radix: u32 = if bytes.len() >= pos + 3
        && bytes[pos] == b'0'
        && (bytes[pos + 1] == b'x' || bytes[pos + 1] == b'X')
        && bytes[pos + 2].is_ascii_hexdigit()
    {
        pos += 2;
        16
    } else {
        10
    };

    let mut value: i64 = 0;
    let mut consumed = false;
    while pos < bytes.len() {
        let digit = match (bytes[pos] as char).to_digit(radix) {
            Some(d) => d as i64,
            None => break,
        };
        value = if negative {
            value.saturating_mul(radix as i64).saturating_sub(digit)
        } else {
            value.saturating_mul(radix as i64).saturating_add(digit)
        };
        consumed = true;
        pos += 1;
    }

    consumed.then_some(value)
}

/// `strtod`-style prefix parse, locale-independent: optional sign, digits
/// with an optional fraction, optional exponent. The exponent marker is
/// only consumed when at least one exponent digit follows it.
fn parse_double_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut pos = 0;
    if let Some(b'+' | b'-') = bytes.first() {
        pos = 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits + frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if let Some(b'e' | b'E') = bytes.get(pos) {
        let mut exp_pos = pos + 1;
        if let Some(b'+' | b'-') = bytes.get(exp_pos) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos..]);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    t[..pos].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
