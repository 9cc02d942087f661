use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

/// A span of rich text.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link { text: Vec<Inline>, url: String },
}

/// Rich text as written in the deck file, parsed once at load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub struct RichText {
    pub source: String,
    pub inlines: Vec<Inline>,
}

impl From<String> for RichText {
    fn from(source: String) -> Self {
        let inlines = parse(&source);
        Self { source, inlines }
    }
}

impl From<&str> for RichText {
    fn from(source: &str) -> Self {
        Self::from(source.to_string())
    }
}

fn markup() -> &'static Regex {
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    MARKUP.get_or_init(|| {
        Regex::new(concat!(
            r"\*\*(?P<bold>\S(?:.*?\S)?)\*\*",
            r"|~~(?P<strike>\S(?:.*?\S)?)~~",
            r"|\*(?P<italic>[^*\s](?:[^*]*[^*\s])?)\*",
            r"|`(?P<code>[^`]+)`",
            r"|\[(?P<label>[^\]]+)\]\((?P<url>[^)\s]+)\)",
        ))
        .expect("inline markup pattern is valid")
    })
}

/// Parse inline markup: `**bold**`, `*italic*`, `~~strike~~`, `` `code` ``
/// and `[label](url)`. Anything else is literal text.
pub fn parse(src: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in markup().captures_iter(src) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Inline::Text(src[last..whole.start()].to_string()));
        }
        out.push(span_from(&caps));
        last = whole.end();
    }

    if last < src.len() {
        out.push(Inline::Text(src[last..].to_string()));
    }
    out
}

fn span_from(caps: &Captures<'_>) -> Inline {
    if let Some(m) = caps.name("bold") {
        Inline::Bold(parse(m.as_str()))
    } else if let Some(m) = caps.name("strike") {
        Inline::Strikethrough(parse(m.as_str()))
    } else if let Some(m) = caps.name("italic") {
        Inline::Italic(parse(m.as_str()))
    } else if let Some(m) = caps.name("code") {
        Inline::Code(m.as_str().to_string())
    } else {
        let label = caps.name("label").map_or("", |m| m.as_str());
        let url = caps.name("url").map_or("", |m| m.as_str());
        Inline::Link {
            text: parse(label),
            url: url.to_string(),
        }
    }
}

/// Flatten inline spans back to plain text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => text.push_str(s),
            Inline::Bold(children) | Inline::Italic(children) | Inline::Strikethrough(children) => {
                text.push_str(&plain_text(children));
            }
            Inline::Link { text: t, .. } => text.push_str(&plain_text(t)),
        }
    }
    text
}

/// The first link target in reading order.
pub fn first_link(inlines: &[Inline]) -> Option<&str> {
    inlines.iter().find_map(|inline| match inline {
        Inline::Link { url, .. } => Some(url.as_str()),
        Inline::Bold(children) | Inline::Italic(children) | Inline::Strikethrough(children) => {
            first_link(children)
        }
        Inline::Text(_) | Inline::Code(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(parse("just words"), vec![text("just words")]);
    }

    #[test]
    fn test_bold_and_italic() {
        let inlines = parse("a **strong** and *soft* claim");
        assert_eq!(
            inlines,
            vec![
                text("a "),
                Inline::Bold(vec![text("strong")]),
                text(" and "),
                Inline::Italic(vec![text("soft")]),
                text(" claim"),
            ]
        );
    }

    #[test]
    fn test_code_is_not_reparsed() {
        let inlines = parse("call `use**State**` here");
        assert_eq!(inlines[1], Inline::Code("use**State**".to_string()));
    }

    #[test]
    fn test_link_and_strikethrough() {
        let inlines = parse("~~old~~ see [docs](https://example.com)");
        assert_eq!(inlines[0], Inline::Strikethrough(vec![text("old")]));
        assert_eq!(
            inlines[2],
            Inline::Link {
                text: vec![text("docs")],
                url: "https://example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_bold_italic() {
        let inlines = parse("**very *nested* text**");
        assert_eq!(
            inlines,
            vec![Inline::Bold(vec![
                text("very "),
                Inline::Italic(vec![text("nested")]),
                text(" text"),
            ])]
        );
    }

    #[test]
    fn test_unclosed_markers_stay_literal() {
        assert_eq!(parse("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
    }

    #[test]
    fn test_spaced_markers_stay_literal() {
        assert_eq!(parse("a * b * c"), vec![text("a * b * c")]);
        assert_eq!(parse("x ** y ** z"), vec![text("x ** y ** z")]);
        assert_eq!(parse("keep ~~ this ~~ too"), vec![text("keep ~~ this ~~ too")]);
        assert_eq!(parse("rm *.tmp *.bak"), vec![text("rm *.tmp *.bak")]);
    }

    #[test]
    fn test_plain_text_round_trip() {
        let rich = RichText::from("Keep **state** near `use`");
        assert_eq!(plain_text(&rich.inlines), "Keep state near use");
    }

    #[test]
    fn test_first_link_searches_nested_spans() {
        let inlines = parse("see **[the docs](https://docs.example)** and [more](https://more.example)");
        assert_eq!(first_link(&inlines), Some("https://docs.example"));
        assert_eq!(first_link(&parse("no links here")), None);
    }
}
