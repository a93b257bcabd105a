//! Character reference decoding for text and attribute values.
//!
//! Only semicolon-terminated references decode. Unknown names, missing
//! semicolons, malformed numerics and invalid scalar values pass through
//! unchanged, so decoding is idempotent on its own output for every input
//! that contains no decodable `&amp;`-style sequence.

use memchr::memchr;

const MAX_NAME_LEN: usize = 8;
const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("hellip", '\u{2026}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("middot", '\u{00B7}'),
    ("bull", '\u{2022}'),
    ("times", '\u{00D7}'),
];

pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            // Copy up to the next '&' in one go; '&' is ASCII so this is a char boundary.
            let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            out.push_str(&s[i..next]);
            i = next;
            continue;
        }

        match decode_reference(s, i) {
            Some((ch, end)) => {
                out.push(ch);
                i = end;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }

    out
}

/// Decodes the reference starting at `start` (which holds `&`). Returns the
/// decoded char and the index just past the terminating `;`.
fn decode_reference(s: &str, start: usize) -> Option<(char, usize)> {
    let bytes = s.as_bytes();
    let body = start + 1;

    if bytes.get(body) == Some(&b'#') {
        let (digits_start, radix, max_digits) = match bytes.get(body + 1) {
            Some(b'x' | b'X') => (body + 2, 16, MAX_HEX_DIGITS),
            _ => (body + 1, 10, MAX_DEC_DIGITS),
        };
        let end = scan_digits(bytes, digits_start, radix, max_digits)?;
        let ch = u32::from_str_radix(&s[digits_start..end], radix)
            .ok()
            .and_then(char::from_u32)?;
        return Some((ch, end + 1));
    }

    let window = &bytes[body..bytes.len().min(body + MAX_NAME_LEN + 1)];
    let semi = memchr(b';', window)?;
    let name = &s[body..body + semi];
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    NAMED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, ch)| (ch, body + semi + 1))
}

// Bounded so adversarial digit runs stay linear.
fn scan_digits(bytes: &[u8], start: usize, radix: u32, max_digits: usize) -> Option<usize> {
    let mut j = start;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b';' {
            return (j > start).then_some(j);
        }
        if j - start == max_digits || !(b as char).is_digit(radix) {
            return None;
        }
        j += 1;
    }
    None
}
