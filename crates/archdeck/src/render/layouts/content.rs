use eframe::egui::{self, Pos2};

use crate::deck::{SlideRecord, Variant};
use crate::render::{SlidePaint, SlideResponse, text};
use crate::theme::Theme;

/// Heading across the top with an underline, content blocks below.
/// Code slides get the full width; others keep a reading measure.
pub fn render(paint: &SlidePaint<'_>, slide: &SlideRecord) -> SlideResponse {
    let mut response = SlideResponse::default();
    let theme = paint.theme;
    let scale = paint.scale;
    let padding = 80.0 * scale;
    let content_rect = paint.rect.shrink(padding);
    // Room for the chrome along the bottom edge
    let bottom = content_rect.bottom() - 20.0 * scale;

    let mut y = content_rect.top();
    y += text::draw_heading(
        paint.ui,
        &slide.title,
        theme.heading_size * scale,
        Theme::with_opacity(theme.heading_color, paint.opacity),
        Pos2::new(content_rect.left(), y),
        content_rect.width(),
        false,
    );

    y += 16.0 * scale;
    let underline = egui::Rect::from_min_size(
        egui::pos2(content_rect.left(), y),
        egui::vec2(80.0 * scale, 4.0 * scale),
    );
    paint.ui.painter().rect_filled(
        underline,
        2.0 * scale,
        Theme::with_opacity(theme.accent, paint.opacity),
    );
    y += 44.0 * scale;

    let width = match slide.variant {
        Variant::Code | Variant::Diagram => content_rect.width(),
        _ => content_rect.width() * 0.85,
    };
    paint.blocks(
        &slide.content,
        Pos2::new(content_rect.left(), y),
        width,
        bottom,
        &mut response,
    );
    response
}
