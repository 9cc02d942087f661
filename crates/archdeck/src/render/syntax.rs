use std::sync::OnceLock;

use eframe::egui::{self, Color32, FontFamily, FontId};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

fn syntax_set() -> &'static SyntaxSet {
    static SET: OnceLock<SyntaxSet> = OnceLock::new();
    SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static SET: OnceLock<ThemeSet> = OnceLock::new();
    SET.get_or_init(ThemeSet::load_defaults)
}

/// The bundled syntaxes have no TypeScript or JSX grammar; those fall back
/// to JavaScript.
fn syntax_token(language: &str) -> &str {
    match language {
        "ts" | "tsx" | "typescript" | "jsx" | "mjs" => "js",
        "shell" | "bash" | "zsh" => "sh",
        other => other,
    }
}

fn find_syntax(language: Option<&str>) -> &'static SyntaxReference {
    let ss = syntax_set();
    language
        .and_then(|lang| ss.find_syntax_by_token(syntax_token(lang)))
        .unwrap_or_else(|| ss.find_syntax_plain_text())
}

/// Lay out `code` with syntax colors. Falls back to a single plain run when
/// highlighting fails.
pub fn highlight(
    code: &str,
    language: Option<&str>,
    theme_name: &str,
    font_size: f32,
    fallback_color: Color32,
) -> egui::text::LayoutJob {
    let font_id = FontId::new(font_size, FontFamily::Monospace);
    let mut job = egui::text::LayoutJob::default();

    let Some(theme) = theme_set().themes.get(theme_name) else {
        job.append(code, 0.0, plain_format(&font_id, fallback_color));
        return job;
    };

    let mut highlighter = HighlightLines::new(find_syntax(language), theme);
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, syntax_set()) {
            Ok(ranges) => {
                for (style, text) in ranges {
                    let fg = style.foreground;
                    let color = Color32::from_rgba_unmultiplied(fg.r, fg.g, fg.b, fg.a);
                    job.append(text, 0.0, plain_format(&font_id, color));
                }
            }
            Err(e) => {
                tracing::debug!("highlighting failed: {e}");
                job.append(line, 0.0, plain_format(&font_id, fallback_color));
            }
        }
    }
    job
}

fn plain_format(font_id: &FontId, color: Color32) -> egui::text::TextFormat {
    egui::text::TextFormat {
        font_id: font_id.clone(),
        color,
        ..Default::default()
    }
}
