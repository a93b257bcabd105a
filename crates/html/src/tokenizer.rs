//! Forgiving markup tokenizer.
//!
//! Produces a flat token stream; tree shape (implied end tags, void elements,
//! dropped rawtext elements) is decided by the tree builder.
//!
//! Known limitations:
//! - No HTML5 parse-error recovery state machine; malformed markup is scanned
//!   greedily and never rejected.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

// Close-tag matching only starts at ASCII '<', which never appears inside a
// UTF-8 continuation byte.
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay = haystack.as_bytes();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= hay.len() {
        i += memchr(b'<', &hay[i..])?;
        if starts_with_ignore_ascii_case_at(hay, i, close_tag) {
            let mut k = i + n;
            while k < hay.len() && hay[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < hay.len() && hay[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_attr_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'/' | b'>' | b'=' | b'"' | b'\'' | b'<')
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    // Slices are only cut at ASCII structural bytes or after ASCII-only runs,
    // so every slice endpoint is a char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            push_text(&mut out, &input[i..end]);
            i = end;
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body = i + COMMENT_START.len();
            match input[body..].find(COMMENT_END) {
                Some(rel) => {
                    out.push(Token::Comment(input[body..body + rel].to_string()));
                    i = body + rel + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body..].to_string()));
                    i = len;
                }
            }
            continue;
        }

        if i + 1 < len && (bytes[i + 1] == b'!' || bytes[i + 1] == b'?') {
            // Doctype or bogus declaration: runs to the next '>'.
            let end = memchr(b'>', &bytes[i..]).map_or(len, |rel| i + rel);
            if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
                out.push(Token::Doctype(input[i + 2..end].trim().to_string()));
            }
            i = (end + 1).min(len);
            continue;
        }

        if i + 1 < len && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_tag_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            let end = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = end;
            continue;
        }

        if i + 1 < len && bytes[i + 1].is_ascii_alphabetic() {
            i = scan_start_tag(input, i, &mut out);
            continue;
        }

        // A lone '<' is literal text.
        push_text(&mut out, "<");
        i += 1;
    }

    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    out
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = decode_entities(raw);
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

/// Scans `<name attr=value ...>` starting at `lt`; returns the index after the tag
/// (and after any rawtext body for `script`/`style`).
fn scan_start_tag(input: &str, lt: usize, out: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut k = lt + 1;
    while k < len && is_tag_name_byte(bytes[k]) {
        k += 1;
    }
    let name = input[lt + 1..k].to_ascii_lowercase();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        match bytes[k] {
            b'>' => {
                k += 1;
                break;
            }
            b'/' => {
                if bytes.get(k + 1) == Some(&b'>') {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            _ => {}
        }

        let name_start = k;
        while k < len && is_attr_name_byte(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            // Stray quote or '=' with no name: skip it.
            k += 1;
            continue;
        }
        let attr_name = input[name_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            Some(scan_attr_value(input, &mut k))
        } else {
            None
        };
        attributes.push((attr_name, value));
    }

    let rawtext_close = match name.as_str() {
        "script" => Some(SCRIPT_CLOSE_TAG),
        "style" => Some(STYLE_CLOSE_TAG),
        _ => None,
    };

    out.push(Token::StartTag {
        name: name.clone(),
        attributes,
        self_closing,
    });

    let Some(close_tag) = rawtext_close.filter(|_| !self_closing) else {
        return k;
    };

    // A missing close tag turns the remainder into rawtext.
    let (body_end, resume) = match find_rawtext_close_tag(&input[k..], close_tag) {
        Some((rel_start, rel_end)) => (k + rel_start, k + rel_end),
        None => (len, len),
    };
    if body_end > k {
        out.push(Token::Text(input[k..body_end].to_string()));
    }
    out.push(Token::EndTag(name));
    resume
}

fn scan_attr_value(input: &str, k: &mut usize) -> String {
    let bytes = input.as_bytes();
    let len = bytes.len();
    if *k < len && (bytes[*k] == b'"' || bytes[*k] == b'\'') {
        let quote = bytes[*k];
        let start = *k + 1;
        let end = memchr(quote, &bytes[start..]).map_or(len, |rel| start + rel);
        *k = (end + 1).min(len);
        return decode_entities(&input[start..end]);
    }
    let start = *k;
    while *k < len && !bytes[*k].is_ascii_whitespace() && bytes[*k] != b'>' {
        if bytes[*k] == b'/' && bytes.get(*k + 1) == Some(&b'>') {
            break;
        }
        *k += 1;
    }
    decode_entities(&input[start..*k])
}
