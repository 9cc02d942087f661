use std::time::Duration;

use eframe::egui;

use crate::deck::SlideStore;
use crate::render::{self, SlidePaint};
use crate::theme::Theme;

/// Thumbnails render as if mounted long ago, so diagrams are fully drawn.
const SETTLED: Duration = Duration::from_secs(60);

/// Smallest fraction of the natural thumbnail size that still counts as
/// fitting on one screen.
const MIN_FIT: f32 = 0.75;

pub fn grid_columns(count: usize) -> usize {
    if count <= 4 {
        2
    } else if count <= 9 {
        3
    } else {
        4
    }
}

struct GridMetrics {
    padding: f32,
    inset: f32,
    gap: f32,
    grid_top: f32,
    grid_bottom: f32,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
}

impl GridMetrics {
    fn new(count: usize, rect: egui::Rect, scale: f32) -> Self {
        let cols = grid_columns(count);
        let rows = count.div_ceil(cols);
        let padding = 24.0 * scale;
        let gap = 12.0 * scale;
        let grid_top = rect.top() + padding + 40.0 * scale;
        let grid_bottom = rect.bottom() - padding - 24.0 * scale;
        let grid_width = rect.width() - padding * 2.0;
        let grid_height = grid_bottom - grid_top;

        let natural_width = (grid_width - gap * (cols as f32 - 1.0)) / cols as f32;
        let natural_height = natural_width * 9.0 / 16.0;
        let fit_height = (grid_height - gap * (rows as f32 - 1.0)) / rows as f32;

        // Shrink 16:9 cells to fit one screen when that costs little,
        // otherwise keep the natural size and scroll
        let (cell_width, cell_height) = if fit_height >= natural_height * MIN_FIT {
            let height = fit_height.min(natural_height);
            (height * 16.0 / 9.0, height)
        } else {
            (natural_width, natural_height)
        };
        let used_width = cols as f32 * cell_width + (cols as f32 - 1.0) * gap;
        let inset = ((grid_width - used_width) / 2.0).max(0.0);

        Self {
            padding,
            inset,
            gap,
            grid_top,
            grid_bottom,
            cols,
            cell_width,
            cell_height,
        }
    }

    fn cell_rect(&self, index: usize, rect: egui::Rect, scroll_offset: f32) -> egui::Rect {
        let col = index % self.cols;
        let row = index / self.cols;
        let left = rect.left() + self.padding + self.inset;
        let x = left + col as f32 * (self.cell_width + self.gap);
        let y = self.grid_top + row as f32 * (self.cell_height + self.gap) - scroll_offset;
        egui::Rect::from_min_size(
            egui::pos2(x, y),
            egui::vec2(self.cell_width, self.cell_height),
        )
    }

    /// How far the grid can scroll.
    fn overflow(&self, count: usize) -> f32 {
        let rows = count.div_ceil(self.cols) as f32;
        let content = rows * self.cell_height + (rows - 1.0) * self.gap;
        (content - (self.grid_bottom - self.grid_top)).max(0.0)
    }
}

/// Overview of every slide as a thumbnail.
#[derive(Debug, Default)]
pub struct GridView {
    scroll_offset: f32,
    scroll_target: f32,
}

impl GridView {
    /// Scroll so that `current` is in view the next time the grid opens.
    pub fn reveal(&mut self, count: usize, current: usize, rect: egui::Rect, scale: f32) {
        let metrics = GridMetrics::new(count, rect, scale);
        let cell = metrics.cell_rect(current, rect, 0.0);
        let target = (cell.bottom() - metrics.grid_bottom + metrics.padding).max(0.0);
        self.scroll_target = target.min(metrics.overflow(count));
        self.scroll_offset = self.scroll_target;
    }

    /// Draw the grid. Returns the slide the presenter clicked, if any.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        store: &SlideStore,
        theme: &Theme,
        current: usize,
        rect: egui::Rect,
        scale: f32,
    ) -> Option<usize> {
        let count = store.slide_count();
        let metrics = GridMetrics::new(count, rect, scale);
        let overflow = metrics.overflow(count);

        let scroll_delta = ui.ctx().input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 {
            self.scroll_target -= scroll_delta;
        }
        self.scroll_target = self.scroll_target.clamp(0.0, overflow);

        let diff = self.scroll_target - self.scroll_offset;
        if diff.abs() < 0.5 {
            self.scroll_offset = self.scroll_target;
        } else {
            self.scroll_offset += diff * 0.15;
            ui.ctx().request_repaint();
        }
        let scroll = self.scroll_offset;

        let title_color = Theme::with_opacity(theme.heading_color, 0.9);
        let title_galley = ui.painter().layout_no_wrap(
            store.title().to_string(),
            egui::FontId::proportional(24.0 * scale),
            title_color,
        );
        let title_pos = egui::pos2(rect.left() + metrics.padding, rect.top() + metrics.padding);
        ui.painter().galley(title_pos, title_galley, title_color);

        let clip_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left(), metrics.grid_top),
            egui::pos2(rect.right(), metrics.grid_bottom),
        );
        let mut grid_child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(clip_rect)
                .id_salt("grid_clip"),
        );

        let mut clicked = None;
        for (i, slide) in store.slides().iter().enumerate() {
            let cell_rect = metrics.cell_rect(i, rect, scroll);
            if !cell_rect.intersects(clip_rect) {
                continue;
            }

            grid_child
                .painter()
                .rect_filled(cell_rect, 4.0 * scale, theme.background);

            let cell_ui = grid_child.new_child(
                egui::UiBuilder::new()
                    .max_rect(cell_rect)
                    .id_salt(("grid_cell", i)),
            );
            let paint = SlidePaint {
                ui: &cell_ui,
                store,
                theme,
                rect: cell_rect,
                opacity: 1.0,
                scale: render::compute_scale(cell_rect),
                id: egui::Id::new(("grid_slide", i)),
                since_mount: SETTLED,
            };
            render::render_slide(&paint, slide);
            draw_slide_badge(&grid_child, theme, cell_rect, i, scale);

            // Registered after the thumbnail so it takes the click
            let response = grid_child.interact(
                cell_rect.intersect(clip_rect),
                egui::Id::new(("grid_pick", i)),
                egui::Sense::click(),
            );
            if response.hovered() && i != current {
                grid_child.painter().rect_stroke(
                    cell_rect.expand(2.0 * scale),
                    4.0 * scale,
                    egui::Stroke::new(2.0 * scale, Theme::with_opacity(theme.accent, 0.5)),
                    egui::StrokeKind::Outside,
                );
            }
            if i == current {
                grid_child.painter().rect_stroke(
                    cell_rect,
                    4.0 * scale,
                    egui::Stroke::new(3.0 * scale, theme.accent),
                    egui::StrokeKind::Outside,
                );
            }
            if response.clicked() {
                clicked = Some(i);
            }
        }

        let hint = "Click: open slide  |  G / Esc: back  |  Q: quit";
        let hint_color = Theme::with_opacity(theme.foreground, 0.4);
        let hint_galley = ui.painter().layout_no_wrap(
            hint.to_string(),
            egui::FontId::proportional(14.0 * scale.max(0.6)),
            hint_color,
        );
        let hint_pos = egui::pos2(
            rect.center().x - hint_galley.rect.width() / 2.0,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(hint_pos, hint_galley, hint_color);

        clicked
    }
}

fn draw_slide_badge(ui: &egui::Ui, theme: &Theme, cell_rect: egui::Rect, index: usize, scale: f32) {
    let badge_bg = Theme::with_opacity(theme.code_background, 0.7);
    let badge_text_color = Theme::with_opacity(theme.foreground, 0.9);
    let badge_galley = ui.painter().layout_no_wrap(
        format!(" {} ", index + 1),
        egui::FontId::monospace(12.0 * scale.max(0.6)),
        badge_text_color,
    );
    let badge_rect = egui::Rect::from_min_size(
        cell_rect.min + egui::vec2(4.0 * scale, 4.0 * scale),
        badge_galley.rect.size() + egui::vec2(4.0 * scale, 2.0 * scale),
    );
    ui.painter().rect_filled(badge_rect, 3.0 * scale, badge_bg);
    ui.painter().galley(
        badge_rect.min + egui::vec2(2.0 * scale, 1.0 * scale),
        badge_galley,
        badge_text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0))
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(3), 2);
        assert_eq!(grid_columns(9), 3);
        assert_eq!(grid_columns(24), 4);
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let metrics = GridMetrics::new(24, screen(), 1.0);
        let a = metrics.cell_rect(0, screen(), 0.0);
        let b = metrics.cell_rect(1, screen(), 0.0);
        let below = metrics.cell_rect(4, screen(), 0.0);
        assert!(a.right() < b.left());
        assert!(a.bottom() < below.top());
        assert!((a.left() - below.left()).abs() < 1e-3);
    }

    #[test]
    fn test_small_deck_fits_without_scrolling() {
        let metrics = GridMetrics::new(4, screen(), 1.0);
        assert_eq!(metrics.overflow(4), 0.0);

        let last = metrics.cell_rect(3, screen(), 0.0);
        assert!(last.bottom() <= metrics.grid_bottom + 1e-3);
        assert!((last.width() / last.height() - 16.0 / 9.0).abs() < 1e-3);

        // Centered horizontally
        let first = metrics.cell_rect(0, screen(), 0.0);
        assert!((first.left() - (1920.0 - last.right())).abs() < 1e-3);
    }

    #[test]
    fn test_large_deck_keeps_natural_size_and_scrolls() {
        let metrics = GridMetrics::new(24, screen(), 1.0);
        assert!(metrics.overflow(24) > 0.0);
        assert_eq!(metrics.inset, 0.0);
    }

    #[test]
    fn test_reveal_brings_last_slide_into_view() {
        let mut grid = GridView::default();
        grid.reveal(24, 23, screen(), 1.0);
        let metrics = GridMetrics::new(24, screen(), 1.0);
        let cell = metrics.cell_rect(23, screen(), grid.scroll_offset);
        assert!(cell.bottom() <= metrics.grid_bottom + 1e-3);
    }
}
