//! Rendering parse failures for the terminal.

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use libsjson::ParseError;

type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

/// One-line form: `<name>:<line>:<column>: <detail>`.
pub fn format_short(name: &str, err: &ParseError) -> String {
    format!("{}:{}:{}: {}", name, err.line(), err.column(), err.detail())
}

/// Char offset of a 1-based line and column, clamped to the end of `text`.
pub fn char_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.chars().count())
        .sum();
    (line_start + column.saturating_sub(1)).min(text.chars().count())
}

/// A source excerpt with the failing position underlined.
pub fn build<'a>(
    path: &'a String,
    text: &str,
    err: &ParseError,
    color: bool,
) -> DiagnosticReport<'a> {
    let start = char_offset(text, err.line(), err.column());
    let end = (start + 1).min(text.chars().count()).max(start);

    Report::build(ReportKind::Error, path, start)
        .with_config(Config::default().with_color(color))
        .with_message("Malformed JSON")
        .with_label(
            Label::new((path, start..end))
                .with_message(err.detail())
                .with_color(Color::Red),
        )
        .finish()
}

/// Print the excerpt for `err` to stderr.
pub fn eprint(path: &String, text: &str, err: &ParseError) -> io::Result<()> {
    build(path, text, err, true).eprint((path, Source::from(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsjson::parse;

    #[test]
    fn test_format_short() {
        let err = parse("{\"a\":1,\"a\":2}").unwrap_err();
        assert_eq!(
            format_short("doc.json", &err),
            "doc.json:1:8: Duplicate key 'a' found in object"
        );
    }

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("[1, 2]", 1, 1), 0);
        assert_eq!(char_offset("[1, 2]", 1, 5), 4);
        assert_eq!(char_offset("[\n  1,\n]", 2, 3), 4);
        assert_eq!(char_offset("[\n  1,\n]", 3, 1), 7);
        // Columns count chars, not bytes
        assert_eq!(char_offset("\"\u{e9}\u{e9}\" x", 1, 6), 5);
    }

    #[test]
    fn test_char_offset_clamps_to_end() {
        assert_eq!(char_offset("[", 1, 2), 1);
        assert_eq!(char_offset("", 1, 1), 0);
        assert_eq!(char_offset("[1]", 9, 9), 3);
    }

    #[test]
    fn test_report_mentions_detail() {
        let text = "[1,\n 2,\n]";
        let err = parse(text).unwrap_err();
        let path = "list.json".to_string();

        let mut out = Vec::new();
        build(&path, text, &err, false)
            .write((&path, Source::from(text)), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Malformed JSON"), "{}", out);
        assert!(out.contains("Trailing comma not allowed in array"), "{}", out);
        assert!(out.contains("list.json"), "{}", out);
    }
}
