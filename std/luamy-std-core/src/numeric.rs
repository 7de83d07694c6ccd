//!
//! Lenient Numeric Parsing
//!
//! Column text is turned into numbers the way the C library's `strtoll` and
//! `strtod` do it: skip leading whitespace, read the longest numeric prefix,
//! ignore whatever follows. Text with no numeric prefix yields zero. These
//! functions never fail.
//!

fn skip_c_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
        .count()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the leading integer of `bytes` (`"12abc"` -> 12, `"abc"` -> 0).
/// Values outside the i64 range saturate.
pub fn parse_int_prefix(bytes: &[u8]) -> i64 {
    let mut pos = skip_c_whitespace(bytes);
    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut acc: i64 = 0;
    for &b in &bytes[pos..pos + count_digits(&bytes[pos..])] {
        let digit = (b - b'0') as i64;
        acc = if negative {
            match acc.checked_mul(10).and_then(|v| v.checked_sub(digit)) {
                Some(v) => v,
                None => return i64::MIN,
            }
        } else {
            match acc.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => return i64::MAX,
            }
        };
    }
    acc
}

/// Length of the leading float literal in `bytes`, starting at `start`
fn float_prefix_len(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let rest = &bytes[pos..];
    for word in [&b"infinity"[..], b"inf", b"nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word) {
            return pos + word.len() - start;
        }
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }
    pos - start
}

/// Parse the leading floating-point number of `bytes` (`"3.5kg"` -> 3.5, `"kg"` -> 0.0).
pub fn parse_float_prefix(bytes: &[u8]) -> f64 {
    let start = skip_c_whitespace(bytes);
    let len = float_prefix_len(bytes, start);
    if len == 0 {
        return 0.0;
    }
    std::str::from_utf8(&bytes[start..start + len])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}
