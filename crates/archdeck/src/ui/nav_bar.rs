use std::time::{Duration, Instant};

use eframe::egui::{self, Button, RichText};

use crate::controller::Controller;
use crate::keymap::NavAction;
use crate::theme::Theme;

const FADE: Duration = Duration::from_millis(300);

/// Hides the nav bar after a stretch without pointer activity.
#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    last_activity: Instant,
    timeout: Duration,
}

impl IdleTimer {
    pub const TIMEOUT: Duration = Duration::from_secs(4);

    pub fn new(now: Instant) -> Self {
        Self {
            last_activity: now,
            timeout: Self::TIMEOUT,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn is_idle(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_activity) >= self.timeout
    }

    /// 1.0 while active, fading to 0.0 once the timeout passes.
    pub fn opacity(&self, now: Instant) -> f32 {
        let idle_for = now.saturating_duration_since(self.last_activity);
        match idle_for.checked_sub(self.timeout) {
            None => 1.0,
            Some(over) => (1.0 - over.as_secs_f32() / FADE.as_secs_f32()).max(0.0),
        }
    }

    /// How long until the bar's opacity next changes. Zero while fading,
    /// `None` once hidden.
    pub fn next_change(&self, now: Instant) -> Option<Duration> {
        let idle_for = now.saturating_duration_since(self.last_activity);
        if idle_for < self.timeout {
            Some(self.timeout - idle_for)
        } else if idle_for < self.timeout + FADE {
            Some(Duration::ZERO)
        } else {
            None
        }
    }
}

/// Bottom-center navigation bar. Returns the actions clicked this frame.
pub fn show(
    ctx: &egui::Context,
    theme: &Theme,
    controller: &Controller,
    opacity: f32,
) -> Vec<NavAction> {
    let mut actions = Vec::new();
    if opacity <= 0.0 {
        return actions;
    }
    let state = controller.state();
    let fg = theme.foreground;

    egui::Area::new(egui::Id::new("nav_bar"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.multiply_opacity(opacity);
            egui::Frame::new()
                .fill(Theme::with_opacity(theme.panel_background, 0.92))
                .corner_radius(12.0)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let icon = |s: &str| RichText::new(s).size(18.0).color(fg);
                        let mut button = |ui: &mut egui::Ui,
                                          enabled: bool,
                                          label: &str,
                                          hint: &str,
                                          action: NavAction| {
                            let clicked = ui
                                .add_enabled(enabled, Button::new(icon(label)).frame(false))
                                .on_hover_text(hint)
                                .clicked();
                            if clicked {
                                actions.push(action);
                            }
                        };

                        button(ui, !controller.is_first(), "\u{23EE}", "First slide", NavAction::First);
                        button(ui, !controller.is_first(), "\u{25C0}", "Previous", NavAction::Previous);
                        ui.label(
                            RichText::new(format!(
                                "{} / {}",
                                state.current_index + 1,
                                controller.slide_count()
                            ))
                            .monospace()
                            .color(fg),
                        );
                        button(ui, !controller.is_last(), "\u{25B6}", "Next", NavAction::Next);
                        button(ui, !controller.is_last(), "\u{23ED}", "Last slide", NavAction::Last);
                        ui.separator();
                        button(ui, true, "\u{2630}", "Contents (T)", NavAction::OpenToc);
                        button(ui, true, "\u{25A6}", "Overview (G)", NavAction::ToggleGrid);
                        let (label, hint) = if state.is_fullscreen {
                            ("\u{2199}", "Exit fullscreen (F)")
                        } else {
                            ("\u{2197}", "Fullscreen (F)")
                        };
                        button(ui, true, label, hint, NavAction::ToggleFullscreen);
                    });
                });
        });
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_after_timeout() {
        let t0 = Instant::now();
        let timer = IdleTimer::new(t0);
        assert!(!timer.is_idle(t0 + Duration::from_millis(3999)));
        assert!(timer.is_idle(t0 + IdleTimer::TIMEOUT));
    }

    #[test]
    fn test_touch_resets() {
        let t0 = Instant::now();
        let mut timer = IdleTimer::new(t0);
        timer.touch(t0 + Duration::from_secs(3));
        assert!(!timer.is_idle(t0 + Duration::from_secs(5)));
        assert_eq!(timer.opacity(t0 + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_opacity_fades_after_timeout() {
        let t0 = Instant::now();
        let timer = IdleTimer::new(t0);
        let mid = timer.opacity(t0 + IdleTimer::TIMEOUT + Duration::from_millis(150));
        assert!(mid > 0.4 && mid < 0.6);
        assert_eq!(timer.opacity(t0 + Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn test_next_change_stops_when_hidden() {
        let t0 = Instant::now();
        let timer = IdleTimer::new(t0);
        assert_eq!(
            timer.next_change(t0 + Duration::from_secs(1)),
            Some(Duration::from_secs(3))
        );
        let fading = t0 + IdleTimer::TIMEOUT + Duration::from_millis(100);
        assert_eq!(timer.next_change(fading), Some(Duration::ZERO));
        assert!(timer.next_change(t0 + Duration::from_secs(10)).is_none());
    }
}
