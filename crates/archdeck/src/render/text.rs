use crate::deck::inline::{self, Inline, RichText};
use crate::render::syntax;
use crate::theme::Theme;
use eframe::egui::{self, Color32, FontFamily, FontId, Pos2, Stroke};

/// Create a LayoutJob from inline elements.
pub fn inlines_to_job(
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    link_color: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    append_inlines(&mut job, inlines, font_size, color, link_color, false, false);
    job
}

#[allow(clippy::too_many_arguments)]
fn append_inlines(
    job: &mut egui::text::LayoutJob,
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    link_color: Color32,
    bold: bool,
    italic: bool,
) {
    for inline in inlines {
        match inline {
            Inline::Text(s) => {
                // egui's default fonts have no bold face; a brighter, slightly
                // larger run stands in for it.
                let (size, color) = if bold {
                    (font_size + 1.0, brighten(color))
                } else {
                    (font_size, color)
                };
                let format = egui::text::TextFormat {
                    font_id: FontId::new(size, FontFamily::Proportional),
                    color,
                    italics: italic,
                    ..Default::default()
                };
                job.append(s, 0.0, format);
            }
            Inline::Bold(children) => {
                append_inlines(job, children, font_size, color, link_color, true, italic);
            }
            Inline::Italic(children) => {
                append_inlines(job, children, font_size, color, link_color, bold, true);
            }
            Inline::Strikethrough(children) => {
                let mut inner_job = egui::text::LayoutJob::default();
                append_inlines(
                    &mut inner_job,
                    children,
                    font_size,
                    color,
                    link_color,
                    bold,
                    italic,
                );
                for section in &inner_job.sections {
                    let mut format = section.format.clone();
                    format.strikethrough = Stroke::new(1.0, color);
                    job.append(&inner_job.text[section.byte_range.clone()], 0.0, format);
                }
            }
            Inline::Code(s) => {
                let format = egui::text::TextFormat {
                    font_id: FontId::new(font_size * 0.85, FontFamily::Monospace),
                    color,
                    background: Color32::from_rgba_unmultiplied(128, 128, 128, 30),
                    ..Default::default()
                };
                job.append(s, 0.0, format);
            }
            Inline::Link { text, .. } => {
                append_inlines(job, text, font_size, link_color, link_color, bold, italic);
            }
        }
    }
}

fn brighten(color: Color32) -> Color32 {
    let lift = |c: u8| c.saturating_add(((255 - c as u16) / 4) as u8);
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(lift(r), lift(g), lift(b), a)
}

/// Layout and paint inlines, returning the height used.
pub fn draw_rich_text(
    ui: &egui::Ui,
    text: &RichText,
    theme: &Theme,
    pos: Pos2,
    font_size: f32,
    max_width: f32,
    opacity: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.foreground, opacity);
    let link = Theme::with_opacity(theme.accent, opacity);
    let job = inlines_to_job(&text.inlines, font_size, color, link, max_width);
    let galley = ui.painter().layout_job(job);
    let rect = galley.rect.translate(pos.to_vec2());
    ui.painter().galley(pos, galley, color);

    // The whole paragraph opens its first link
    if let Some(url) = inline::first_link(&text.inlines) {
        let id = ui.id().with(("link", &text.source, pos.y as i32));
        let response = ui
            .interact(rect, id, egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            ui.ctx().open_url(egui::OpenUrl::new_tab(url));
        }
    }
    rect.height()
}

/// Draw a plain heading. Returns height used.
pub fn draw_heading(
    ui: &egui::Ui,
    text: &str,
    size: f32,
    color: Color32,
    pos: Pos2,
    max_width: f32,
    centered: bool,
) -> f32 {
    let galley = ui.painter().layout(
        text.to_string(),
        FontId::proportional(size),
        color,
        max_width,
    );
    let height = galley.rect.height();
    let x = if centered {
        pos.x + (max_width - galley.rect.width()) / 2.0
    } else {
        pos.x
    };
    ui.painter().galley(egui::pos2(x, pos.y), galley, color);
    height
}

/// Draw a bulleted list. Returns height used.
pub fn draw_list(
    ui: &egui::Ui,
    items: &[RichText],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let font_size = theme.body_size * scale;
    let indent = font_size * 1.1;
    let gap = 14.0 * scale;
    let bullet_color = Theme::with_opacity(theme.accent, opacity);

    let mut y = pos.y;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            y += gap;
        }
        let dot = egui::pos2(pos.x + font_size * 0.35, y + font_size * 0.62);
        ui.painter()
            .circle_filled(dot, font_size * 0.13, bullet_color);
        y += draw_rich_text(
            ui,
            item,
            theme,
            egui::pos2(pos.x + indent, y),
            font_size,
            max_width - indent,
            opacity,
        );
    }
    y - pos.y
}

/// Relative column widths from the longest cell text in each column.
pub fn column_weights(headers: &[RichText], rows: &[Vec<RichText>]) -> Vec<f32> {
    let cols = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut weights = vec![4.0_f32; cols];
    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (col, cell) in row.iter().enumerate() {
            let len = inline::plain_text(&cell.inlines).chars().count() as f32;
            weights[col] = weights[col].max(len.min(40.0));
        }
    }
    let total: f32 = weights.iter().sum();
    if total > 0.0 {
        weights.iter_mut().for_each(|w| *w /= total);
    }
    weights
}

/// Draw a table with a tinted header row. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_table(
    ui: &egui::Ui,
    headers: &[RichText],
    rows: &[Vec<RichText>],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let weights = column_weights(headers, rows);
    if weights.is_empty() {
        return 0.0;
    }
    let font_size = theme.body_size * 0.72 * scale;
    let cell_pad = 12.0 * scale;
    let text_color = Theme::with_opacity(theme.foreground, opacity);
    let head_color = Theme::with_opacity(theme.heading_color, opacity);
    let link_color = Theme::with_opacity(theme.accent, opacity);
    let rule = Stroke::new(1.0 * scale, Theme::with_opacity(theme.muted, 0.5 * opacity));

    let mut y = pos.y;
    let all_rows = std::iter::once((true, headers)).chain(rows.iter().map(|r| (false, r.as_slice())));
    for (is_header, row) in all_rows {
        let color = if is_header { head_color } else { text_color };
        let mut galleys = Vec::with_capacity(row.len());
        let mut x = pos.x;
        for (col, weight) in weights.iter().enumerate() {
            let col_width = max_width * weight;
            if let Some(cell) = row.get(col) {
                let inlines = if is_header {
                    vec![Inline::Bold(cell.inlines.clone())]
                } else {
                    cell.inlines.clone()
                };
                let job = inlines_to_job(
                    &inlines,
                    font_size,
                    color,
                    link_color,
                    col_width - cell_pad * 2.0,
                );
                galleys.push((x, ui.painter().layout_job(job)));
            }
            x += col_width;
        }

        let row_height = galleys
            .iter()
            .map(|(_, g)| g.rect.height())
            .fold(font_size, f32::max)
            + cell_pad * 2.0;
        let row_rect = egui::Rect::from_min_size(
            egui::pos2(pos.x, y),
            egui::vec2(max_width, row_height),
        );
        if is_header {
            ui.painter().rect_filled(
                row_rect,
                4.0 * scale,
                Theme::with_opacity(theme.panel_background, opacity),
            );
        }
        for (x, galley) in galleys {
            ui.painter()
                .galley(egui::pos2(x + cell_pad, y + cell_pad), galley, color);
        }
        ui.painter().line_segment(
            [row_rect.left_bottom(), row_rect.right_bottom()],
            rule,
        );
        y += row_height;
    }
    y - pos.y
}

pub struct CodeBlockResponse {
    pub height: f32,
    pub copy_clicked: bool,
}

/// Draw a highlighted code block with a copy button in its corner.
#[allow(clippy::too_many_arguments)]
pub fn draw_code_block(
    ui: &egui::Ui,
    id: egui::Id,
    code: &str,
    language: Option<&str>,
    caption: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> CodeBlockResponse {
    let padding = 24.0 * scale;
    let font_size = theme.code_size * scale;

    let mut job = syntax::highlight(
        code.trim_end_matches('\n'),
        language,
        theme.syntect_theme_name(),
        font_size,
        theme.code_foreground,
    );
    job.wrap.max_width = max_width - padding * 2.0;
    for section in &mut job.sections {
        section.format.color = Theme::with_opacity(section.format.color, opacity);
    }
    let galley = ui.painter().layout_job(job);

    let box_rect = egui::Rect::from_min_size(
        pos,
        egui::vec2(max_width, galley.rect.height() + padding * 2.0),
    );
    ui.painter().rect_filled(
        box_rect,
        10.0 * scale,
        Theme::with_opacity(theme.code_background, opacity),
    );
    let text_color = Theme::with_opacity(theme.code_foreground, opacity);
    ui.painter().galley(
        egui::pos2(pos.x + padding, pos.y + padding),
        galley,
        text_color,
    );

    if let Some(lang) = language {
        let tag = ui.painter().layout_no_wrap(
            lang.to_string(),
            FontId::monospace(14.0 * scale),
            Theme::with_opacity(theme.muted, opacity),
        );
        let tag_pos = egui::pos2(
            box_rect.right() - tag.rect.width() - 90.0 * scale,
            box_rect.top() + 10.0 * scale,
        );
        ui.painter().galley(tag_pos, tag, text_color);
    }

    let copy_clicked = draw_copy_button(ui, id, box_rect, theme, opacity, scale);

    let mut height = box_rect.height();
    if let Some(caption) = caption {
        let color = Theme::with_opacity(theme.muted, opacity);
        let galley = ui.painter().layout(
            caption.to_string(),
            FontId::proportional(theme.body_size * 0.55 * scale),
            color,
            max_width,
        );
        let caption_gap = 10.0 * scale;
        let caption_height = galley.rect.height();
        ui.painter().galley(
            egui::pos2(pos.x, box_rect.bottom() + caption_gap),
            galley,
            color,
        );
        height += caption_gap + caption_height;
    }

    CodeBlockResponse {
        height,
        copy_clicked,
    }
}

fn draw_copy_button(
    ui: &egui::Ui,
    id: egui::Id,
    box_rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) -> bool {
    let size = egui::vec2(70.0 * scale, 28.0 * scale);
    let rect = egui::Rect::from_min_size(
        egui::pos2(
            box_rect.right() - size.x - 10.0 * scale,
            box_rect.top() + 8.0 * scale,
        ),
        size,
    );
    let response = ui.interact(rect, id, egui::Sense::click());
    let fill = if response.hovered() {
        Theme::with_opacity(theme.accent, 0.25 * opacity)
    } else {
        Theme::with_opacity(theme.panel_background, 0.8 * opacity)
    };
    ui.painter().rect_filled(rect, 6.0 * scale, fill);
    let label_color = Theme::with_opacity(theme.foreground, 0.8 * opacity);
    let label = ui.painter().layout_no_wrap(
        "Copy".to_string(),
        FontId::proportional(14.0 * scale),
        label_color,
    );
    let label_pos = rect.center() - label.rect.size() / 2.0;
    ui.painter().galley(label_pos, label, label_color);
    response.clicked()
}
