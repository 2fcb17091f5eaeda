//! Renders a [`ResolvedProgram`]'s diagnostics to a writer, as plain text or
//! as a JSON array.

use sema_common::{Diagnostic, Level};
use std::io::Write;

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Hint => "hint",
        Level::Info => "info",
        Level::Warning => "warning",
        Level::Error => "error",
    }
}

pub fn report_text(diagnostics: &[Diagnostic], mut out: impl Write) -> std::io::Result<()> {
    for d in diagnostics {
        writeln!(
            out,
            "{}:{}:{}: {} [{}] {}",
            d.span.filename(),
            d.span.start.line,
            d.span.start.column,
            level_label(d.level),
            d.code,
            d.message
        )?;
        for related in &d.related_info {
            writeln!(
                out,
                "    {}:{}:{}: note: {}",
                related.span.filename(),
                related.span.start.line,
                related.span.start.column,
                related.message
            )?;
        }
    }
    Ok(())
}

pub fn report_json(diagnostics: &[Diagnostic], out: impl Write) -> serde_json::Result<()> {
    let entries: Vec<_> = diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "level": level_label(d.level),
                "code": d.code,
                "title": d.title,
                "message": d.message,
                "file": d.span.filename().to_string(),
                "line": d.span.start.line,
                "column": d.span.start.column,
            })
        })
        .collect();
    serde_json::to_writer_pretty(out, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sema_common::{Category, Position, Span};

    fn span() -> Span {
        let p = Position::new("Main.json", 3, 5, 0);
        Span::new(p.clone(), p)
    }

    #[test]
    fn text_report_includes_location_and_code() {
        let diagnostics = vec![Diagnostic::error("E1601", "mismatch", "expected Int", span())];
        let mut buf = Vec::new();
        report_text(&diagnostics, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Main.json:3:5"));
        assert!(text.contains("E1601"));
    }

    #[test]
    fn json_report_is_valid_json() {
        let diagnostics = vec![
            Diagnostic::new(Level::Warning, Category::Style, "W1", "t", "m", span()),
        ];
        let mut buf = Vec::new();
        report_json(&diagnostics, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["code"], "W1");
    }
}
