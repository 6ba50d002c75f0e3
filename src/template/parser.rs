use super::syntax::Syntax;
use super::{Placeholder, Segment};
use crate::error::{Error, Result};

/// Splits `source` into literal and placeholder segments in a single left to right pass.
///
/// # Errors
/// Returns `Error::MalformedTemplate` pointing at the offending delimiter when
/// delimiters are unbalanced or nested, or when a name is empty or rejected by
/// the name rule.
pub(crate) fn parse_segments(source: &str, syntax: &Syntax) -> Result<Vec<Segment>> {
    let open = syntax.delimiters.open.as_str();
    let close = syntax.delimiters.close.as_str();
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < source.len() {
        let rest = &source[cursor..];
        let next_open = rest.find(open);
        let next_close = rest.find(close);

        let open_at = match (next_open, next_close) {
            (None, None) => {
                segments.push(Segment::Literal(rest.to_string()));
                break;
            }
            (None, Some(close_at)) => {
                return Err(malformed(source, cursor + close_at, format!(
                    "closing '{close}' without a matching '{open}'"
                )));
            }
            (Some(open_at), Some(close_at)) if close_at < open_at => {
                return Err(malformed(source, cursor + close_at, format!(
                    "closing '{close}' without a matching '{open}'"
                )));
            }
            (Some(open_at), _) => open_at,
        };

        if open_at > 0 {
            segments.push(Segment::Literal(rest[..open_at].to_string()));
        }

        let start = cursor + open_at;
        let inner_start = start + open.len();
        let Some(inner_len) = source[inner_start..].find(close) else {
            return Err(malformed(source, start, format!(
                "'{open}' is never closed by '{close}'"
            )));
        };
        let inner = &source[inner_start..inner_start + inner_len];

        if let Some(nested_at) = inner.find(open) {
            return Err(malformed(source, inner_start + nested_at, format!(
                "'{open}' opened inside another placeholder"
            )));
        }

        let name = inner.trim();
        if name.is_empty() {
            return Err(malformed(source, start, "empty placeholder name".to_string()));
        }
        if !syntax.name_rule.accepts(name) {
            return Err(malformed(source, start, format!(
                "placeholder name '{name}' does not match {}",
                syntax.name_rule.describe()
            )));
        }

        let end = inner_start + inner_len + close.len();
        log::trace!("Found placeholder '{name}' at byte {start}");
        segments.push(Segment::Placeholder(Placeholder {
            name: name.to_string(),
            raw: source[start..end].to_string(),
            offset: start,
        }));
        cursor = end;
    }

    Ok(segments)
}

fn malformed(source: &str, position: usize, reason: String) -> Error {
    let (line, column) = line_and_column(source, position);
    Error::MalformedTemplate { position, line, column, reason }
}

/// 1-based line and character column of a byte offset.
fn line_and_column(source: &str, position: usize) -> (usize, usize) {
    let before = &source[..position];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::syntax::{Delimiters, NameRule};

    fn parse(source: &str) -> Result<Vec<Segment>> {
        parse_segments(source, &Syntax::default())
    }

    fn position_of(err: Error) -> (usize, usize, usize) {
        match err {
            Error::MalformedTemplate { position, line, column, .. } => {
                (position, line, column)
            }
            other => panic!("expected MalformedTemplate, got {other:?}"),
        }
    }

    #[test]
    fn splits_literals_and_placeholders() {
        let segments = parse("Fee: {{AMOUNT}} due in {{DAYS}} days.").unwrap();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Literal("Fee: ".into()));
        assert_eq!(
            segments[1],
            Segment::Placeholder(Placeholder {
                name: "AMOUNT".into(),
                raw: "{{AMOUNT}}".into(),
                offset: 5,
            })
        );
        assert_eq!(segments[4], Segment::Literal(" days.".into()));
    }

    #[test]
    fn trims_whitespace_but_keeps_raw_marker() {
        let segments = parse("{{ NAME }}").unwrap();
        assert_eq!(
            segments,
            vec![Segment::Placeholder(Placeholder {
                name: "NAME".into(),
                raw: "{{ NAME }}".into(),
                offset: 0,
            })]
        );
    }

    #[test]
    fn empty_source_has_no_segments() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn unterminated_marker_points_at_opening() {
        let err = parse("Fee: {{AMOUNT").unwrap_err();
        assert_eq!(position_of(err), (5, 1, 6));
    }

    #[test]
    fn stray_closing_delimiter() {
        let err = parse("line one\nbad }} here").unwrap_err();
        assert_eq!(position_of(err), (13, 2, 5));
    }

    #[test]
    fn nested_opening_delimiter() {
        let err = parse("{{OUTER {{INNER}}").unwrap_err();
        assert_eq!(position_of(err), (8, 1, 9));
    }

    #[test]
    fn empty_name() {
        assert!(parse("a {{ }} b").is_err());
        assert!(parse("a {{}} b").is_err());
    }

    #[test]
    fn name_rule_violation() {
        let syntax = Syntax::new(Delimiters::default(), NameRule::Upper).unwrap();
        assert!(parse_segments("{{EFFECTIVE_DATE}}", &syntax).is_ok());
        let err = parse_segments("Dear {{name}}", &syntax).unwrap_err();
        assert_eq!(position_of(err), (5, 1, 6));
    }

    #[test]
    fn custom_delimiters_leave_braces_literal() {
        let syntax = Syntax::new(Delimiters::new("[[", "]]").unwrap(), NameRule::Any).unwrap();
        let segments = parse_segments("{{KEEP}} [[NAME]]", &syntax).unwrap();
        assert_eq!(segments[0], Segment::Literal("{{KEEP}} ".into()));
        assert!(matches!(&segments[1], Segment::Placeholder(p) if p.name == "NAME"));
    }

    #[test]
    fn column_counts_characters_not_bytes() {
        let err = parse("§§ {{X").unwrap_err();
        assert_eq!(position_of(err), (5, 1, 4));
    }
}
