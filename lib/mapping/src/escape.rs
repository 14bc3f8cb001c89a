use crate::EscapingError;
use std::borrow::Cow;
use std::ops::Range;
use svcrdf_model::NamedNode;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes the characters of `value` that may not appear at their position in an IRI
/// reference.
///
/// - Template placeholders such as `{geo:box}` become `%7Bgeo:box%7D`.
/// - `[` and `]` are only kept inside the authority.
/// - A `%` not starting a percent-encoded octet becomes `%25`.
/// - Every `#` after the first one becomes `%23`.
///
/// Values without such characters are returned unchanged.
pub fn escape_iri(value: &str) -> Cow<'_, str> {
    let authority = authority(value);
    let mut in_fragment = false;
    let mut escaped: Option<String> = None;
    for (i, c) in value.char_indices() {
        let keep = match c {
            '%' => is_percent_encoded(&value.as_bytes()[i..]),
            '#' => !std::mem::replace(&mut in_fragment, true),
            '[' | ']' => authority.contains(&i),
            _ => is_iri_char(c),
        };
        match escaped {
            Some(ref mut escaped) if keep => escaped.push(c),
            Some(ref mut escaped) => percent_encode(escaped, c),
            None if keep => {}
            None => {
                let mut buffer = String::with_capacity(value.len() + 8);
                buffer.push_str(&value[..i]);
                percent_encode(&mut buffer, c);
                escaped = Some(buffer);
            }
        }
    }
    escaped.map_or(Cow::Borrowed(value), Cow::Owned)
}

/// Escapes `value` and checks that the result is an absolute IRI.
pub fn escaped_named_node(value: &str) -> Result<NamedNode, EscapingError> {
    let escaped = escape_iri(value).into_owned();
    NamedNode::new(escaped.as_str()).map_err(|error| EscapingError {
        value: escaped,
        error,
    })
}

/// The byte range of the authority of `value`, empty if it has none.
fn authority(value: &str) -> Range<usize> {
    let Some(scheme_end) = value.find([':', '/', '?', '#']) else {
        return 0..0;
    };
    let scheme = &value[..scheme_end];
    let has_scheme = value[scheme_end..].starts_with(':')
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !has_scheme || !value[scheme_end + 1..].starts_with("//") {
        return 0..0;
    }
    let start = scheme_end + 3;
    let end = value[start..]
        .find(['/', '?', '#'])
        .map_or(value.len(), |end| start + end);
    start..end
}

fn is_percent_encoded(bytes: &[u8]) -> bool {
    bytes
        .get(1..3)
        .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit))
}

/// Unreserved characters, sub-delimiters and the general delimiters allowed anywhere.
fn is_iri_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '-' | '.'
                    | '_'
                    | '~'
                    | '!'
                    | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | ';'
                    | '='
                    | ':'
                    | '@'
                    | '/'
                    | '?'
            )
    } else {
        is_ucs_char(c)
    }
}

fn is_ucs_char(c: char) -> bool {
    matches!(
        u32::from(c),
        0xA0..=0xD7FF
            | 0xF900..=0xFDCF
            | 0xFDF0..=0xFFEF
            | 0x10000..=0x1FFFD
            | 0x20000..=0x2FFFD
            | 0x30000..=0x3FFFD
            | 0x40000..=0x4FFFD
            | 0x50000..=0x5FFFD
            | 0x60000..=0x6FFFD
            | 0x70000..=0x7FFFD
            | 0x80000..=0x8FFFD
            | 0x90000..=0x9FFFD
            | 0xA0000..=0xAFFFD
            | 0xB0000..=0xBFFFD
            | 0xC0000..=0xCFFFD
            | 0xD0000..=0xDFFFD
            | 0xE1000..=0xEFFFD
    )
}

fn percent_encode(buffer: &mut String, c: char) {
    let mut bytes = [0; 4];
    for byte in c.encode_utf8(&mut bytes).bytes() {
        buffer.push('%');
        buffer.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        buffer.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
}
