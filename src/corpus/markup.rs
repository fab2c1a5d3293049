//! Inline emphasis markers for record paragraphs.
//!
//! `**bold**`, `*italic*`, and `__underline__` become flat styled spans.
//! Markers do not nest, and an unclosed marker stays literal text. At any
//! position `**` is tried before `*`, so bold never half-parses as italic.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Bold,
    Italic,
    Underline,
}

/// A run of paragraph text under a single emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

/// Split one paragraph into emphasis spans.
pub fn parse_spans(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some((marker, emphasis)) = open_marker(rest)
            && let Some(close) = rest[marker.len()..].find(marker)
        {
            let body = &rest[marker.len()..marker.len() + close];
            if !plain.is_empty() {
                spans.push(Span::new(std::mem::take(&mut plain), Emphasis::Plain));
            }
            if !body.is_empty() {
                spans.push(Span::new(body, emphasis));
            }
            rest = &rest[marker.len() + close + marker.len()..];
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !plain.is_empty() {
        spans.push(Span::new(plain, Emphasis::Plain));
    }
    spans
}

fn open_marker(rest: &str) -> Option<(&'static str, Emphasis)> {
    if rest.starts_with("**") {
        Some(("**", Emphasis::Bold))
    } else if rest.starts_with("__") {
        Some(("__", Emphasis::Underline))
    } else if rest.starts_with('*') {
        Some(("*", Emphasis::Italic))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, emphasis: Emphasis) -> Span {
        Span::new(text, emphasis)
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            parse_spans("just words"),
            vec![span("just words", Emphasis::Plain)]
        );
    }

    #[test]
    fn empty_paragraph_yields_no_spans() {
        assert!(parse_spans("").is_empty());
    }

    #[test]
    fn bold_italic_underline_each_parse() {
        assert_eq!(parse_spans("**b**"), vec![span("b", Emphasis::Bold)]);
        assert_eq!(parse_spans("*i*"), vec![span("i", Emphasis::Italic)]);
        assert_eq!(parse_spans("__u__"), vec![span("u", Emphasis::Underline)]);
    }

    #[test]
    fn emphasis_embeds_in_plain_text() {
        assert_eq!(
            parse_spans("a **b** c"),
            vec![
                span("a ", Emphasis::Plain),
                span("b", Emphasis::Bold),
                span(" c", Emphasis::Plain),
            ]
        );
    }

    #[test]
    fn double_star_wins_over_single() {
        // Never parsed as an empty italic pair.
        assert_eq!(parse_spans("**bold**"), vec![span("bold", Emphasis::Bold)]);
    }

    #[test]
    fn unclosed_marker_stays_literal() {
        assert_eq!(
            parse_spans("*half open"),
            vec![span("*half open", Emphasis::Plain)]
        );
        assert_eq!(parse_spans("a **"), vec![span("a **", Emphasis::Plain)]);
    }

    #[test]
    fn empty_emphasis_body_is_dropped() {
        assert!(parse_spans("****").is_empty());
    }

    #[test]
    fn adjacent_markers_parse_in_sequence() {
        assert_eq!(
            parse_spans("**a**__b__*c*"),
            vec![
                span("a", Emphasis::Bold),
                span("b", Emphasis::Underline),
                span("c", Emphasis::Italic),
            ]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            parse_spans("naïve **café**"),
            vec![
                span("naïve ", Emphasis::Plain),
                span("café", Emphasis::Bold),
            ]
        );
    }
}
