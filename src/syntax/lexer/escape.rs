//! Escape sequence handling for string literals
//!
//! Supported: `\b \t \n \f \r \0 \" \' \\`, `\uXXXX` (four hex digits, no
//! surrogates) and `\xXX` (two hex digits).

/// An escape sequence that could not be decoded. `offset` and `len` are in
/// code points, relative to the string body passed to [`unescape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeError {
    pub offset: usize,
    pub len: usize,
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unescaped {
    pub value: String,
    pub errors: Vec<EscapeError>,
}

/// Decode the escapes in a string body (quotes already removed). Invalid
/// sequences are copied through verbatim and reported.
pub fn unescape(body: &str) -> Unescaped {
    let chars: Vec<char> = body.chars().collect();
    let mut out = Unescaped {
        value: String::with_capacity(body.len()),
        errors: Vec::new(),
    };
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch != '\\' {
            out.value.push(ch);
            idx += 1;
            continue;
        }

        let (decoded, len) = decode_escape(&chars[idx..]);
        match decoded {
            Some(c) => out.value.push(c),
            None => {
                let sequence: String = chars[idx..idx + len].iter().collect();
                out.value.push_str(&sequence);
                out.errors.push(EscapeError {
                    offset: idx,
                    len,
                    sequence,
                });
            }
        }
        idx += len;
    }

    out
}

/// Decode one escape starting at `chars[0] == '\\'`. Returns the character
/// (if valid) and the number of code points the sequence spans.
fn decode_escape(chars: &[char]) -> (Option<char>, usize) {
    debug_assert_eq!(chars.first(), Some(&'\\'));
    let Some(&kind) = chars.get(1) else {
        return (None, 1);
    };

    let simple = match kind {
        'b' => Some('\u{8}'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'f' => Some('\u{c}'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        _ => None,
    };
    if simple.is_some() {
        return (simple, 2);
    }

    match kind {
        'u' => hex_escape(chars, 4),
        'x' => hex_escape(chars, 2),
        _ => (None, 2),
    }
}

fn hex_escape(chars: &[char], digits: usize) -> (Option<char>, usize) {
    let available = chars[2..]
        .iter()
        .take(digits)
        .take_while(|c| c.is_ascii_hexdigit())
        .count();
    if available < digits {
        return (None, 2 + available);
    }
    let hex: String = chars[2..2 + digits].iter().collect();
    let decoded = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32);
    (decoded, 2 + digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_escapes() {
        let out = unescape(r#"a\tb\n\"q\" \'s\' \\ \0 \b \f \r"#);
        assert!(out.errors.is_empty());
        assert_eq!(out.value, "a\tb\n\"q\" 's' \\ \0 \u{8} \u{c} \r");
    }

    #[test]
    fn hex_and_unicode_escapes() {
        let out = unescape(r"\x41\u00e9\u65e5");
        assert!(out.errors.is_empty());
        assert_eq!(out.value, "Aé日");
    }

    #[test]
    fn invalid_escapes_are_reported_and_kept() {
        let out = unescape(r"a\qb\u12zz\uD800");
        assert_eq!(out.value, r"a\qb\u12zz\uD800");
        let sequences: Vec<_> = out.errors.iter().map(|e| e.sequence.as_str()).collect();
        assert_eq!(sequences, vec![r"\q", r"\u12", r"\uD800"]);
        assert_eq!(out.errors[0].offset, 1);
        assert_eq!(out.errors[1].offset, 4);
    }

    #[test]
    fn trailing_backslash_is_invalid() {
        let out = unescape("abc\\");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].sequence, "\\");
    }
}
