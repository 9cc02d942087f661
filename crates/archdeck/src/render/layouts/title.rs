use eframe::egui::{self, Pos2};

use crate::deck::SlideRecord;
use crate::render::{SlidePaint, SlideResponse, text};
use crate::theme::Theme;

pub fn render(paint: &SlidePaint<'_>, slide: &SlideRecord) -> SlideResponse {
    let mut response = SlideResponse::default();
    let theme = paint.theme;
    let scale = paint.scale;
    let content_rect = paint.rect.shrink(120.0 * scale);

    let mut y = content_rect.top() + content_rect.height() * 0.28;
    y += text::draw_heading(
        paint.ui,
        &slide.title,
        theme.title_size * scale,
        Theme::with_opacity(theme.heading_color, paint.opacity),
        Pos2::new(content_rect.left(), y),
        content_rect.width(),
        true,
    );

    if !slide.section.is_empty() {
        y += 24.0 * scale;
        y += text::draw_heading(
            paint.ui,
            &slide.section,
            theme.body_size * 1.1 * scale,
            Theme::with_opacity(theme.accent, paint.opacity),
            Pos2::new(content_rect.left(), y),
            content_rect.width(),
            true,
        );
    }

    // Short rule between the title and whatever follows
    y += 40.0 * scale;
    let rule = egui::Rect::from_center_size(
        egui::pos2(content_rect.center().x, y),
        egui::vec2(120.0 * scale, 4.0 * scale),
    );
    paint.ui.painter().rect_filled(
        rule,
        2.0 * scale,
        Theme::with_opacity(theme.accent, paint.opacity),
    );
    y += 48.0 * scale;

    let width = content_rect.width() * 0.7;
    let x = content_rect.center().x - width / 2.0;
    paint.blocks(
        &slide.content,
        Pos2::new(x, y),
        width,
        content_rect.bottom(),
        &mut response,
    );

    if let Some(author) = &paint.store.meta().author {
        let size = theme.body_size * 0.7 * scale;
        text::draw_heading(
            paint.ui,
            author,
            size,
            Theme::with_opacity(theme.muted, paint.opacity),
            Pos2::new(content_rect.left(), content_rect.bottom() - size * 1.5),
            content_rect.width(),
            true,
        );
    }
    response
}
