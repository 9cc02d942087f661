use eframe::egui::{self, Pos2};

use crate::deck::SlideRecord;
use crate::render::{SlidePaint, SlideResponse, text};
use crate::theme::Theme;

/// Section divider: a small accent label over a large title, left-aligned
/// at the vertical center.
pub fn render(paint: &SlidePaint<'_>, slide: &SlideRecord) -> SlideResponse {
    let mut response = SlideResponse::default();
    let theme = paint.theme;
    let scale = paint.scale;
    let content_rect = paint.rect.shrink(160.0 * scale);
    let accent = Theme::with_opacity(theme.accent, paint.opacity);

    let bar = egui::Rect::from_min_size(
        egui::pos2(content_rect.left() - 40.0 * scale, content_rect.top()),
        egui::vec2(8.0 * scale, content_rect.height()),
    );
    paint.ui.painter().rect_filled(bar, 4.0 * scale, accent);

    let mut y = content_rect.center().y - theme.section_size * scale;
    if !slide.section.is_empty() {
        y += text::draw_heading(
            paint.ui,
            &slide.section.to_uppercase(),
            theme.body_size * 0.7 * scale,
            accent,
            Pos2::new(content_rect.left(), y),
            content_rect.width(),
            false,
        );
        y += 16.0 * scale;
    }
    y += text::draw_heading(
        paint.ui,
        &slide.title,
        theme.section_size * scale,
        Theme::with_opacity(theme.heading_color, paint.opacity),
        Pos2::new(content_rect.left(), y),
        content_rect.width(),
        false,
    );

    y += 40.0 * scale;
    paint.blocks(
        &slide.content,
        Pos2::new(content_rect.left(), y),
        content_rect.width() * 0.8,
        content_rect.bottom(),
        &mut response,
    );
    response
}
