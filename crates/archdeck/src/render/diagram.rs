use std::time::Duration;

use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::deck::{Diagram, DiagramBox};
use crate::theme::Theme;

const ENTRANCE: Duration = Duration::from_millis(350);

/// Opacity of an element whose entrance starts `delay` after mount.
pub fn entrance_opacity(since_mount: Duration, delay: Duration) -> f32 {
    match since_mount.checked_sub(delay) {
        Some(t) => (t.as_secs_f32() / ENTRANCE.as_secs_f32()).min(1.0),
        None => 0.0,
    }
}

/// Whether any element is still fading in.
pub fn is_animating(diagram: &Diagram, since_mount: Duration) -> bool {
    diagram
        .boxes
        .iter()
        .any(|b| since_mount < Duration::from_millis(b.delay_ms) + ENTRANCE)
}

fn box_rect(area: egui::Rect, b: &DiagramBox) -> egui::Rect {
    let pct = |v: f32| v.clamp(0.0, 100.0) / 100.0;
    egui::Rect::from_min_size(
        egui::pos2(
            area.left() + area.width() * pct(b.x),
            area.top() + area.height() * pct(b.y),
        ),
        egui::vec2(area.width() * pct(b.w), area.height() * pct(b.h)),
    )
}

/// Draw a diagram into `area`, entrances keyed to `since_mount`.
pub fn draw_diagram(
    ui: &egui::Ui,
    diagram: &Diagram,
    theme: &Theme,
    area: egui::Rect,
    since_mount: Duration,
    opacity: f32,
    scale: f32,
) {
    let box_opacity = |b: &DiagramBox| {
        entrance_opacity(since_mount, Duration::from_millis(b.delay_ms)) * opacity
    };

    // Links under boxes, visible once both ends are
    for link in &diagram.links {
        let (Some(from), Some(to)) = (diagram.find_box(&link.from), diagram.find_box(&link.to))
        else {
            continue;
        };
        let alpha = box_opacity(from).min(box_opacity(to));
        if alpha < 0.01 {
            continue;
        }
        let (a, b) = edge_points(box_rect(area, from), box_rect(area, to));
        let color = Theme::with_opacity(theme.muted, alpha);
        draw_arrow(ui, a, b, 2.5 * scale, 14.0 * scale, color);

        if let Some(label) = &link.label {
            let galley = ui.painter().layout_no_wrap(
                label.clone(),
                FontId::proportional(16.0 * scale),
                Theme::with_opacity(theme.foreground, alpha * 0.8),
            );
            let mid = a + (b - a) / 2.0;
            let pos = mid - galley.rect.size() / 2.0 - egui::vec2(0.0, 12.0 * scale);
            ui.painter().galley(pos, galley, color);
        }
    }

    for b in &diagram.boxes {
        let alpha = box_opacity(b);
        if alpha < 0.01 {
            continue;
        }
        // Rise into place while fading in
        let rise = (1.0 - alpha / opacity.max(0.01)) * 12.0 * scale;
        let rect = box_rect(area, b).translate(egui::vec2(0.0, rise));
        let (fill, stroke) = theme.tone_colors(b.tone);
        ui.painter()
            .rect_filled(rect, 10.0 * scale, Theme::with_opacity(fill, alpha));
        ui.painter().rect_stroke(
            rect,
            10.0 * scale,
            Stroke::new(2.0 * scale, Theme::with_opacity(stroke, alpha)),
            egui::StrokeKind::Inside,
        );

        let label_color = Theme::with_opacity(theme.heading_color, alpha);
        let label = ui.painter().layout(
            b.label.clone(),
            FontId::proportional(24.0 * scale),
            label_color,
            rect.width() - 16.0 * scale,
        );
        let detail = b.detail.as_ref().map(|d| {
            ui.painter().layout(
                d.clone(),
                FontId::proportional(16.0 * scale),
                Theme::with_opacity(theme.foreground, alpha * 0.8),
                rect.width() - 16.0 * scale,
            )
        });
        let gap = 4.0 * scale;
        let total = label.rect.height() + detail.as_ref().map_or(0.0, |d| d.rect.height() + gap);
        let mut y = rect.center().y - total / 2.0;
        let label_height = label.rect.height();
        ui.painter().galley(
            egui::pos2(rect.center().x - label.rect.width() / 2.0, y),
            label,
            label_color,
        );
        y += label_height + gap;
        if let Some(detail) = detail {
            ui.painter().galley(
                egui::pos2(rect.center().x - detail.rect.width() / 2.0, y),
                detail,
                label_color,
            );
        }
    }

    if let Some(caption) = &diagram.caption {
        let color = Theme::with_opacity(theme.muted, opacity);
        let galley = ui.painter().layout_no_wrap(
            caption.clone(),
            FontId::proportional(18.0 * scale),
            color,
        );
        let pos = egui::pos2(
            area.center().x - galley.rect.width() / 2.0,
            area.bottom() + 8.0 * scale,
        );
        ui.painter().galley(pos, galley, color);
    }
}

/// Points where the segment between two box centers leaves each box.
fn edge_points(a: egui::Rect, b: egui::Rect) -> (Pos2, Pos2) {
    (
        clip_to_rect(a, b.center()),
        clip_to_rect(b, a.center()),
    )
}

fn clip_to_rect(rect: egui::Rect, toward: Pos2) -> Pos2 {
    let c = rect.center();
    let d = toward - c;
    if d.x.abs() < f32::EPSILON && d.y.abs() < f32::EPSILON {
        return c;
    }
    let half = rect.size() / 2.0;
    let tx = if d.x.abs() > f32::EPSILON {
        half.x / d.x.abs()
    } else {
        f32::INFINITY
    };
    let ty = if d.y.abs() > f32::EPSILON {
        half.y / d.y.abs()
    } else {
        f32::INFINITY
    };
    c + d * tx.min(ty).min(1.0)
}

/// Draw an arrow from `from` to `to` with a filled triangular arrowhead
fn draw_arrow(
    ui: &egui::Ui,
    from: Pos2,
    to: Pos2,
    stroke_width: f32,
    arrow_size: f32,
    color: egui::Color32,
) {
    let delta = to - from;
    let len = delta.length();
    if len < 1.0 {
        return;
    }
    let dir = delta / len;
    let perp = egui::vec2(-dir.y, dir.x);

    let p1 = to - dir * arrow_size + perp * arrow_size * 0.45;
    let p2 = to - dir * arrow_size - perp * arrow_size * 0.45;

    ui.painter().line_segment(
        [from, to - dir * arrow_size * 0.7],
        Stroke::new(stroke_width, color),
    );
    ui.painter().add(egui::Shape::convex_polygon(
        vec![to, p1, p2],
        color,
        Stroke::NONE,
    ));
}
