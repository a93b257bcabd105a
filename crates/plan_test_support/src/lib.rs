pub mod plan_snapshot;
pub mod scenarios;

pub use plan_snapshot::format_plan;
pub use scenarios::{Scenario, load_scenarios};

/// Append `text` as a double-quoted snapshot literal.
///
/// Whitespace that would be invisible or ambiguous in a dump line (line
/// breaks, tabs, no-break and zero-width spaces) is spelled out.
pub fn push_quoted(out: &mut String, text: &str) {
    use std::fmt::Write;

    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{A0}' | '\u{200B}' => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
}

pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    push_quoted(&mut out, text);
    out
}

fn line_at(lines: &[String], i: usize) -> &str {
    lines.get(i).map_or("<missing>", String::as_str)
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let max = expected.len().max(actual.len());
    let mut out = String::new();

    let mismatch = (0..max).find(|&i| line_at(expected, i) != line_at(actual, i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for idx in start..end {
            let marker = if idx == i { ">" } else { " " };
            let (want, got) = (line_at(expected, idx), line_at(actual, idx));
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {want}", idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {got}", idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Panics with a readable diff when the plan lines differ.
pub fn assert_plan_lines(case: &str, expected: &[String], actual: &[String]) {
    if expected != actual {
        panic!(
            "plan mismatch for '{case}'\n{}\nactual plan:\n{}",
            diff_lines(expected, actual),
            actual.join("\n")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_spells_out_hidden_characters() {
        assert_eq!(quoted("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quoted("x\n\ty"), r#""x\n\ty""#);
        assert_eq!(quoted("a\u{A0}b\u{200B}\u{1}"), r#""a\u{A0}b\u{200B}\u{1}""#);
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string(), "d".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.contains("first mismatch at line 2"));
        assert!(diff.contains("expected 2 lines, actual 3 lines"));
    }
}
