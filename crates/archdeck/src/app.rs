use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{debug, info, warn};

use crate::config::{Config, StartMode};
use crate::controller::{Controller, PlatformRequest, StateChange};
use crate::deck::SlideStore;
use crate::keymap::{self, NavAction};
use crate::render::transition::TransitionKind;
use crate::render::{self, SlideView};
use crate::theme::Theme;
use crate::toc::TocIndex;
use crate::ui::grid::GridView;
use crate::ui::nav_bar::{self, IdleTimer};
use crate::ui::toast::Toast;
use crate::ui::toc_overlay::{self, TocOutcome};

const COPY_TOAST: Duration = Duration::from_secs(2);

/// Command-line choices for a presentation run.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed
    pub slide: Option<usize>,
    pub overview: bool,
    pub transition: Option<String>,
}

struct PresentationApp {
    store: SlideStore,
    toc: TocIndex,
    controller: Controller,
    view: SlideView,
    theme: Theme,
    applied_dark: Option<bool>,
    grid_open: bool,
    grid: GridView,
    grid_needs_reveal: bool,
    toast: Option<Toast>,
    idle: IdleTimer,
    last_pointer: Option<egui::Pos2>,
}

impl PresentationApp {
    fn new(
        store: SlideStore,
        theme: Theme,
        transition: TransitionKind,
        start: usize,
        overview: bool,
    ) -> Self {
        let toc = TocIndex::build(store.slides());
        let controller = Controller::new(store.slide_count(), start);
        Self {
            store,
            toc,
            controller,
            view: SlideView::new(transition),
            theme,
            applied_dark: None,
            grid_open: overview,
            grid: GridView::default(),
            grid_needs_reveal: overview,
            toast: None,
            idle: IdleTimer::new(Instant::now()),
            last_pointer: None,
        }
    }

    /// Apply one presenter action. Returns a viewport command when the
    /// action needs the window itself.
    fn handle_action(&mut self, action: NavAction) -> Option<egui::ViewportCommand> {
        debug!(?action, "action");
        match action {
            NavAction::Next => {
                self.controller.next();
            }
            NavAction::Previous => {
                self.controller.previous();
            }
            NavAction::First => {
                self.controller.first();
            }
            NavAction::Last => {
                self.controller.last();
            }
            NavAction::GoTo(index) => {
                self.controller.navigate_to(index);
                self.grid_open = false;
            }
            NavAction::ToggleFullscreen => self.controller.toggle_fullscreen(),
            NavAction::Escape => {
                self.controller.close_toc();
                self.grid_open = false;
                self.controller.exit_fullscreen();
            }
            NavAction::ToggleToc => self.controller.toggle_toc(),
            NavAction::OpenToc => self.controller.open_toc(),
            NavAction::ToggleGrid => {
                self.grid_open = !self.grid_open;
                if self.grid_open {
                    self.controller.close_toc();
                    self.grid_needs_reveal = true;
                }
            }
            NavAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                let message = format!("Theme: {}", self.theme.name);
                self.show_toast(Toast::new(message, Toast::DEFAULT_DURATION));
            }
            NavAction::Quit => return Some(egui::ViewportCommand::Close),
        }
        None
    }

    fn show_toast(&mut self, toast: Toast) {
        debug!(text = toast.message(), "toast");
        self.toast = Some(toast);
    }

    /// Acknowledge a copied code block. Returns the text for the clipboard.
    fn on_code_copied(&mut self, code: String, now: Instant) -> String {
        info!(bytes = code.len(), "code block copied");
        self.show_toast(Toast::started_at("Copied to clipboard", COPY_TOAST, now));
        code
    }

    /// Forward queued changes to the views and platform requests to the
    /// window.
    fn flush(&mut self, now: Instant, viewport_cmds: &mut Vec<egui::ViewportCommand>) {
        for change in self.controller.drain_changes() {
            match change {
                StateChange::SlideChanged { from, to } => {
                    self.view.on_slide_changed(from, to, now);
                }
                StateChange::FullscreenChanged(active) => info!(active, "fullscreen"),
                StateChange::TocChanged(open) => debug!(open, "contents overlay"),
            }
        }
        for request in self.controller.drain_requests() {
            viewport_cmds.push(egui::ViewportCommand::Fullscreen(matches!(
                request,
                PlatformRequest::EnterFullscreen
            )));
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        let dark = self.theme.is_dark();
        if self.applied_dark != Some(dark) {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.applied_dark = Some(dark);
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.apply_visuals(ctx);

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        // Mapped keys are consumed so no widget sees them as well
        let keyed = ctx.input_mut(|i| {
            let mut actions = Vec::new();
            i.events.retain(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => match keymap::action_for(*key, *modifiers) {
                    Some(action) => {
                        actions.push(action);
                        false
                    }
                    None => true,
                },
                _ => true,
            });
            actions
        });

        let (fullscreen, pointer, pressed) = ctx.input(|i| {
            (
                i.viewport().fullscreen,
                i.pointer.latest_pos(),
                i.pointer.any_pressed(),
            )
        });
        if let Some(active) = fullscreen {
            self.controller.on_fullscreen_changed(active);
        }
        if pressed || (pointer.is_some() && pointer != self.last_pointer) {
            self.idle.touch(now);
        }
        self.last_pointer = pointer;

        for action in keyed {
            viewport_cmds.extend(self.handle_action(action));
        }
        self.flush(now, &mut viewport_cmds);
        self.view.tick(now);

        let current = self.controller.current_index();
        let mut copied = None;
        let mut picked = None;
        let mut animating = self.view.is_transitioning();
        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);

                if self.grid_open {
                    if std::mem::take(&mut self.grid_needs_reveal) {
                        self.grid
                            .reveal(self.store.slide_count(), current, rect, scale);
                    }
                    picked = self
                        .grid
                        .show(ui, &self.store, &self.theme, current, rect, scale);
                } else {
                    let response =
                        self.view
                            .show(ui, &self.store, &self.theme, current, rect, scale, now);
                    copied = response.copy;
                    animating |= response.animating;
                    render::draw_chrome(ui, &self.store, &self.theme, current, rect, scale);
                }

                if let Some(toast) = &self.toast {
                    toast.draw(ui, &self.theme, rect, scale, now);
                }
            });

        let mut clicked = Vec::new();
        if !self.grid_open {
            clicked = nav_bar::show(ctx, &self.theme, &self.controller, self.idle.opacity(now));
        }
        if let Some(index) = picked {
            clicked.push(NavAction::GoTo(index));
        }
        if self.controller.state().is_toc_open {
            match toc_overlay::show(ctx, &self.toc, &self.theme, current) {
                TocOutcome::Select(entry) => self.controller.select_toc_entry(&entry),
                TocOutcome::Close => self.controller.close_toc(),
                TocOutcome::Open => {}
            }
        }
        for action in clicked {
            viewport_cmds.extend(self.handle_action(action));
        }

        if let Some(code) = copied {
            ctx.copy_text(self.on_code_copied(code, now));
        }

        self.flush(now, &mut viewport_cmds);

        // Send collected viewport commands outside the input closure
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
        if self.controller.state().is_fullscreen && self.idle.is_idle(now) {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        if animating || self.toast.is_some() || self.view.is_transitioning() {
            ctx.request_repaint();
        } else if let Some(wait) = self.idle.next_change(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// CLI flag, then deck file, then user config, then the default. Names that
/// do not parse are skipped.
fn resolve_transition(layers: [Option<&str>; 3]) -> TransitionKind {
    for name in layers.into_iter().flatten() {
        match TransitionKind::from_name(name) {
            Some(kind) => return kind,
            None => warn!("unknown transition '{name}', ignoring"),
        }
    }
    TransitionKind::Slide
}

/// 0-based start slide and whether to open in the grid.
fn resolve_start(options: &LaunchOptions, config: Option<StartMode>, count: usize) -> (usize, bool) {
    let (slide, overview) = if options.overview {
        (options.slide.map(|s| s.saturating_sub(1)).unwrap_or(0), true)
    } else if let Some(s) = options.slide {
        (s.saturating_sub(1), false)
    } else {
        match config {
            Some(StartMode::Overview) => (0, true),
            Some(StartMode::Slide(n)) => (n.saturating_sub(1), false),
            Some(StartMode::First) | None => (0, false),
        }
    };
    (slide.min(count.saturating_sub(1)), overview)
}

pub fn run(store: SlideStore, options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();

    let transition = resolve_transition([
        options.transition.as_deref(),
        store.meta().transition.as_deref(),
        config.transition(),
    ]);
    let theme_name = store
        .meta()
        .theme
        .as_deref()
        .or(config.theme())
        .unwrap_or("dark");
    let theme = Theme::from_name(theme_name);
    let (start, overview) = resolve_start(&options, config.start_mode(), store.slide_count());

    let title = store.title().to_string();
    info!(
        slides = store.slide_count(),
        transition = transition.name(),
        theme = theme.name.as_str(),
        "starting presentation"
    );

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(PresentationApp::new(
                store, theme, transition, start, overview,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PresentationApp {
        let store = SlideStore::builtin().unwrap();
        PresentationApp::new(store, Theme::dark(), TransitionKind::Slide, 0, false)
    }

    #[test]
    fn test_escape_closes_everything() {
        let mut app = app();
        app.controller.open_toc();
        app.grid_open = true;
        app.controller.on_fullscreen_changed(true);
        app.controller.drain_changes();

        assert!(app.handle_action(NavAction::Escape).is_none());
        assert!(!app.controller.state().is_toc_open);
        assert!(!app.grid_open);
        assert_eq!(
            app.controller.drain_requests(),
            vec![PlatformRequest::ExitFullscreen]
        );
    }

    #[test]
    fn test_grid_pick_navigates_and_closes() {
        let mut app = app();
        app.handle_action(NavAction::ToggleGrid);
        assert!(app.grid_open);
        app.handle_action(NavAction::GoTo(5));
        assert!(!app.grid_open);
        assert_eq!(app.controller.current_index(), 5);
    }

    #[test]
    fn test_opening_grid_closes_contents() {
        let mut app = app();
        app.handle_action(NavAction::ToggleToc);
        app.handle_action(NavAction::ToggleGrid);
        assert!(!app.controller.state().is_toc_open);
    }

    #[test]
    fn test_slide_change_starts_transition() {
        let mut app = app();
        let mut cmds = Vec::new();
        app.handle_action(NavAction::Next);
        app.flush(Instant::now(), &mut cmds);
        assert!(app.view.is_transitioning());
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_fullscreen_request_becomes_viewport_command() {
        let mut app = app();
        let mut cmds = Vec::new();
        app.handle_action(NavAction::ToggleFullscreen);
        app.flush(Instant::now(), &mut cmds);
        assert_eq!(cmds, vec![egui::ViewportCommand::Fullscreen(true)]);
        // The flag waits for the platform
        assert!(!app.controller.state().is_fullscreen);
    }

    #[test]
    fn test_theme_toggle_shows_toast() {
        let mut app = app();
        app.handle_action(NavAction::ToggleTheme);
        assert!(!app.theme.is_dark());
        assert_eq!(app.toast.as_ref().map(Toast::message), Some("Theme: light"));
    }

    #[test]
    fn test_copy_acknowledged_for_two_seconds() {
        let mut app = app();
        let shown = Instant::now();
        let code = app.on_code_copied("let x = 1;".to_string(), shown);
        assert_eq!(code, "let x = 1;");

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message(), "Copied to clipboard");
        assert!(!toast.is_expired_at(shown + Duration::from_millis(1900)));
        assert!(toast.is_expired_at(shown + Duration::from_secs(2)));
    }

    #[test]
    fn test_quit_closes_viewport() {
        let mut app = app();
        assert_eq!(
            app.handle_action(NavAction::Quit),
            Some(egui::ViewportCommand::Close)
        );
    }

    #[test]
    fn test_transition_precedence() {
        assert_eq!(
            resolve_transition([Some("push"), Some("fade"), Some("none")]),
            TransitionKind::Push
        );
        assert_eq!(
            resolve_transition([None, Some("fade"), Some("none")]),
            TransitionKind::Fade
        );
        assert_eq!(
            resolve_transition([Some("spin"), None, Some("none")]),
            TransitionKind::None
        );
        assert_eq!(resolve_transition([None, None, None]), TransitionKind::Slide);
    }

    #[test]
    fn test_start_precedence() {
        let cli = LaunchOptions {
            slide: Some(3),
            ..Default::default()
        };
        assert_eq!(resolve_start(&cli, Some(StartMode::Overview), 10), (2, false));

        let none = LaunchOptions::default();
        assert_eq!(resolve_start(&none, Some(StartMode::Overview), 10), (0, true));
        assert_eq!(resolve_start(&none, Some(StartMode::Slide(99)), 10), (9, false));
        assert_eq!(resolve_start(&none, None, 10), (0, false));

        let overview = LaunchOptions {
            overview: true,
            slide: Some(4),
            ..Default::default()
        };
        assert_eq!(resolve_start(&overview, None, 10), (3, true));
    }
}
