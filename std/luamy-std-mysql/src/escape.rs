///
/// String literal escaping.
///
/// Matches the native client's rules. In the default SQL mode special bytes
/// get a backslash; under `NO_BACKSLASH_ESCAPES` only single quotes are
/// doubled. The scratch buffer is sized for the worst case (every byte
/// escaped, plus one) and is owned by the call, so it is released on every
/// exit path.
///

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    #[default]
    Backslash,
    QuoteDoubling,
}

pub fn escape_bytes(input: &[u8], mode: EscapeMode) -> Vec<u8> {
    let mut scratch = Vec::with_capacity(input.len() * 2 + 1);
    match mode {
        EscapeMode::Backslash => {
            for &b in input {
                let escaped = match b {
                    0 => Some(b'0'),
                    b'\n' => Some(b'n'),
                    b'\r' => Some(b'r'),
                    b'\\' => Some(b'\\'),
                    b'\'' => Some(b'\''),
                    b'"' => Some(b'"'),
                    0x1a => Some(b'Z'),
                    _ => None,
                };
                match escaped {
                    Some(c) => scratch.extend_from_slice(&[b'\\', c]),
                    None => scratch.push(b),
                }
            }
        }
        EscapeMode::QuoteDoubling => {
            for &b in input {
                if b == b'\'' {
                    scratch.push(b'\'');
                }
                scratch.push(b);
            }
        }
    }
    scratch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(escape_bytes(b"O'Brien", EscapeMode::Backslash), b"O\\'Brien");
        assert_eq!(escape_bytes(b"say \"hi\"", EscapeMode::Backslash), b"say \\\"hi\\\"");
        assert_eq!(escape_bytes(b"a\\b", EscapeMode::Backslash), b"a\\\\b");
        assert_eq!(escape_bytes(b"l1\nl2\r", EscapeMode::Backslash), b"l1\\nl2\\r");
        assert_eq!(escape_bytes(b"x\0y\x1a", EscapeMode::Backslash), b"x\\0y\\Z");
        assert_eq!(escape_bytes(b"plain", EscapeMode::Backslash), b"plain");
        assert_eq!(escape_bytes(b"", EscapeMode::Backslash), b"");
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(escape_bytes(b"O'Brien", EscapeMode::QuoteDoubling), b"O''Brien");
        assert_eq!(escape_bytes(b"a\\b\n", EscapeMode::QuoteDoubling), b"a\\b\n");
    }

    #[test]
    fn test_worst_case_fits_scratch() {
        let input = vec![b'\''; 64];
        let out = escape_bytes(&input, EscapeMode::Backslash);
        assert_eq!(out.len(), 128);
        assert!(out.capacity() >= input.len() * 2 + 1);
    }
}
