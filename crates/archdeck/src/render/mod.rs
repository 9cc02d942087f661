pub mod diagram;
pub mod layouts;
pub mod syntax;
pub mod text;
pub mod transition;

use std::time::{Duration, Instant};

use eframe::egui;

use crate::deck::{ContentBlock, SlideRecord, SlideStore, Variant};
use crate::theme::Theme;

use transition::{ActiveTransition, Pose, TransitionKind};

/// One mount of a slide. Returning to a slide creates a new mount, so ids
/// and entrance timers start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mount {
    pub generation: u64,
    pub at: Instant,
}

impl Mount {
    fn id(self, index: usize) -> egui::Id {
        egui::Id::new(("slide", index, self.generation))
    }
}

/// What a slide asked of the app while it was drawn.
#[derive(Debug, Default)]
pub struct SlideResponse {
    pub copy: Option<String>,
    pub animating: bool,
}

/// Everything a layout needs to paint one slide.
pub struct SlidePaint<'a> {
    pub ui: &'a egui::Ui,
    pub store: &'a SlideStore,
    pub theme: &'a Theme,
    pub rect: egui::Rect,
    pub opacity: f32,
    pub scale: f32,
    pub id: egui::Id,
    pub since_mount: Duration,
}

impl SlidePaint<'_> {
    /// Draw content blocks top to bottom from `pos`. Returns the height used.
    pub fn blocks(
        &self,
        blocks: &[ContentBlock],
        pos: egui::Pos2,
        width: f32,
        bottom: f32,
        response: &mut SlideResponse,
    ) -> f32 {
        let gap = 28.0 * self.scale;
        let body = self.theme.body_size * self.scale;
        let mut y = pos.y;

        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                y += gap;
            }
            let at = egui::pos2(pos.x, y);
            y += match block {
                ContentBlock::Text { text } => {
                    text::draw_rich_text(self.ui, text, self.theme, at, body, width, self.opacity)
                }
                ContentBlock::List { items } => text::draw_list(
                    self.ui,
                    items,
                    self.theme,
                    at,
                    width,
                    self.opacity,
                    self.scale,
                ),
                ContentBlock::Table { headers, rows } => text::draw_table(
                    self.ui,
                    headers,
                    rows,
                    self.theme,
                    at,
                    width,
                    self.opacity,
                    self.scale,
                ),
                ContentBlock::Code {
                    language,
                    code,
                    caption,
                } => {
                    let drawn = text::draw_code_block(
                        self.ui,
                        self.id.with(("code", i)),
                        code,
                        language.as_deref(),
                        caption.as_deref(),
                        self.theme,
                        at,
                        width,
                        self.opacity,
                        self.scale,
                    );
                    if drawn.copy_clicked {
                        response.copy = Some(code.clone());
                    }
                    drawn.height
                }
                ContentBlock::Diagram { name } => {
                    let height = (bottom - y - 40.0 * self.scale).max(200.0 * self.scale);
                    let area = egui::Rect::from_min_size(at, egui::vec2(width, height));
                    match self.store.diagram(name) {
                        Some(d) => {
                            diagram::draw_diagram(
                                self.ui,
                                d,
                                self.theme,
                                area,
                                self.since_mount,
                                self.opacity,
                                self.scale,
                            );
                            response.animating |= diagram::is_animating(d, self.since_mount);
                        }
                        None => self.missing_diagram(name, area),
                    }
                    height
                }
            };
        }
        y - pos.y
    }

    fn missing_diagram(&self, name: &str, area: egui::Rect) {
        let color = Theme::with_opacity(self.theme.muted, self.opacity);
        self.ui.painter().rect_stroke(
            area,
            8.0 * self.scale,
            egui::Stroke::new(2.0 * self.scale, color),
            egui::StrokeKind::Inside,
        );
        self.ui.painter().text(
            area.center(),
            egui::Align2::CENTER_CENTER,
            format!("diagram '{name}' not found"),
            egui::FontId::proportional(20.0 * self.scale),
            color,
        );
    }
}

/// Render a single slide using its variant's layout.
pub fn render_slide(paint: &SlidePaint<'_>, slide: &SlideRecord) -> SlideResponse {
    match slide.variant {
        Variant::Title => layouts::title::render(paint, slide),
        Variant::Section => layouts::section::render(paint, slide),
        Variant::Default | Variant::Code | Variant::Diagram => {
            layouts::content::render(paint, slide)
        }
    }
}

/// The slide area: the current slide at rest, or two slides mid-transition.
pub struct SlideView {
    kind: TransitionKind,
    transition: Option<ActiveTransition>,
    mount: Mount,
    outgoing_mount: Mount,
    next_generation: u64,
}

impl SlideView {
    pub fn new(kind: TransitionKind) -> Self {
        let now = Instant::now();
        let first = Mount {
            generation: 0,
            at: now,
        };
        Self {
            kind,
            transition: None,
            mount: first,
            outgoing_mount: first,
            next_generation: 1,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// The controller moved from `from` to `to`. A transition already in
    /// flight is replaced; its target becomes the outgoing slide.
    pub fn on_slide_changed(&mut self, from: usize, to: usize, now: Instant) {
        self.outgoing_mount = self.mount;
        self.mount = Mount {
            generation: self.next_generation,
            at: now,
        };
        self.next_generation += 1;
        self.transition = Some(ActiveTransition::starting_at(from, to, self.kind, now));
    }

    /// Drop a finished transition.
    pub fn tick(&mut self, now: Instant) {
        if self.transition.is_some_and(|t| t.is_complete_at(now)) {
            self.transition = None;
        }
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        store: &SlideStore,
        theme: &Theme,
        current: usize,
        rect: egui::Rect,
        scale: f32,
        now: Instant,
    ) -> SlideResponse {
        let mut response = SlideResponse::default();
        for layer in self.layers(current, now) {
            response = self.draw_posed(ui, store, theme, layer, rect, scale, now);
        }
        response.animating |= self.is_transitioning();
        response
    }

    /// Slides to draw at `now`, back to front.
    fn layers(&self, current: usize, now: Instant) -> Vec<(usize, Mount, Pose)> {
        match self.transition {
            Some(t) => {
                let (out_pose, in_pose) = t.poses_at(now);
                vec![
                    (t.from, self.outgoing_mount, out_pose),
                    (t.to, self.mount, in_pose),
                ]
            }
            None => vec![(current, self.mount, Pose::REST)],
        }
    }

    fn draw_posed(
        &self,
        ui: &mut egui::Ui,
        store: &SlideStore,
        theme: &Theme,
        (index, mount, pose): (usize, Mount, Pose),
        rect: egui::Rect,
        scale: f32,
        now: Instant,
    ) -> SlideResponse {
        let Some(slide) = store.get(index) else {
            return SlideResponse::default();
        };
        if pose.opacity < 0.01 {
            return SlideResponse::default();
        }
        let slide_rect = rect.translate(egui::vec2(pose.offset * rect.width(), 0.0));
        let child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .id_salt(mount.id(index)),
        );
        let paint = SlidePaint {
            ui: &child,
            store,
            theme,
            rect: slide_rect,
            opacity: pose.opacity,
            scale,
            id: mount.id(index),
            since_mount: now.saturating_duration_since(mount.at),
        };
        render_slide(&paint, slide)
    }
}

/// Slide counter, section name and footer along the bottom edge.
pub fn draw_chrome(
    ui: &egui::Ui,
    store: &SlideStore,
    theme: &Theme,
    current: usize,
    rect: egui::Rect,
    scale: f32,
) {
    let baseline = rect.bottom() - 30.0 * scale;
    let faint = Theme::with_opacity(theme.foreground, 0.35);

    if let Some(slide) = store.get(current) {
        let galley = ui.painter().layout_no_wrap(
            slide.section.clone(),
            egui::FontId::proportional(14.0 * scale),
            faint,
        );
        ui.painter()
            .galley(egui::pos2(rect.left() + 16.0 * scale, baseline), galley, faint);
    }

    if let Some(footer) = &store.meta().footer {
        let galley = ui.painter().layout_no_wrap(
            footer.clone(),
            egui::FontId::proportional(14.0 * scale),
            faint,
        );
        let pos = egui::pos2(rect.center().x - galley.rect.width() / 2.0, baseline);
        ui.painter().galley(pos, galley, faint);
    }

    let counter = ui.painter().layout_no_wrap(
        format!("{} / {}", current + 1, store.slide_count()),
        egui::FontId::monospace(14.0 * scale),
        faint,
    );
    let pos = egui::pos2(
        rect.right() - counter.rect.width() - 16.0 * scale,
        baseline,
    );
    ui.painter().galley(pos, counter, faint);
}

pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_change_is_a_fresh_mount() {
        let mut view = SlideView::new(TransitionKind::Slide);
        let t0 = Instant::now();
        view.on_slide_changed(0, 1, t0);
        let first = view.mount;
        view.on_slide_changed(1, 0, t0);
        view.on_slide_changed(0, 1, t0);
        assert_ne!(view.mount.generation, first.generation);
        assert_ne!(view.mount.id(1), first.id(1));
    }

    #[test]
    fn test_transition_ends_after_tick() {
        let mut view = SlideView::new(TransitionKind::Fade);
        let t0 = Instant::now();
        view.on_slide_changed(2, 3, t0);
        assert!(view.is_transitioning());
        view.tick(t0 + Duration::from_millis(100));
        assert!(view.is_transitioning());
        view.tick(t0 + Duration::from_secs(1));
        assert!(!view.is_transitioning());
    }

    #[test]
    fn test_interrupted_transition_restarts_from_previous_target() {
        let mut view = SlideView::new(TransitionKind::Push);
        let t0 = Instant::now();
        view.on_slide_changed(0, 1, t0);
        view.on_slide_changed(1, 2, t0 + Duration::from_millis(50));
        let t = view.transition.unwrap();
        assert_eq!((t.from, t.to), (1, 2));
    }

    #[test]
    fn test_layers_sample_the_given_instant() {
        let mut view = SlideView::new(TransitionKind::Push);
        let t0 = Instant::now();
        view.on_slide_changed(3, 4, t0);
        let mid = t0 + Duration::from_millis(200);
        let (out_pose, in_pose) = view.transition.unwrap().poses_at(mid);

        let layers = view.layers(4, mid);
        assert_eq!(layers.len(), 2);
        assert_eq!((layers[0].0, layers[0].2), (3, out_pose));
        assert_eq!((layers[1].0, layers[1].2), (4, in_pose));

        view.tick(t0 + Duration::from_secs(1));
        assert_eq!(view.layers(4, mid), vec![(4, view.mount, Pose::REST)]);
    }

    #[test]
    fn test_compute_scale() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(rect), 0.5);
    }
}
