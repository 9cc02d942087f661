use std::time::{Duration, Instant};

use eframe::egui;

use crate::theme::Theme;

const FADE: Duration = Duration::from_millis(500);

/// A short message near the bottom edge that fades out on its own.
pub struct Toast {
    message: String,
    start: Instant,
    duration: Duration,
}

impl Toast {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self::started_at(message, duration, Instant::now())
    }

    pub fn started_at(message: impl Into<String>, duration: Duration, start: Instant) -> Self {
        Self {
            message: message.into(),
            start,
            duration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Fully opaque until the last half second, then linear to zero.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let fade_start = self.duration.saturating_sub(FADE);
        if elapsed < fade_start {
            1.0
        } else if elapsed < self.duration {
            let into_fade = (elapsed - fade_start).as_secs_f32();
            let fade_len = (self.duration - fade_start).as_secs_f32();
            1.0 - into_fade / fade_len
        } else {
            0.0
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn draw(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32, now: Instant) {
        let opacity = self.opacity_at(now);
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(theme.code_background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            self.message.clone(),
            egui::FontId::proportional(20.0 * scale.max(0.6)),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 160.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_holds_then_fades() {
        let t0 = Instant::now();
        let toast = Toast::started_at("Copied", Duration::from_secs(2), t0);
        assert_eq!(toast.opacity_at(t0 + Duration::from_millis(1000)), 1.0);
        let fading = toast.opacity_at(t0 + Duration::from_millis(1750));
        assert!(fading > 0.4 && fading < 0.6);
        assert_eq!(toast.opacity_at(t0 + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn test_expiry_follows_duration() {
        let t0 = Instant::now();
        let toast = Toast::started_at("Copied", Duration::from_secs(2), t0);
        assert!(!toast.is_expired_at(t0 + Duration::from_millis(1999)));
        assert!(toast.is_expired_at(t0 + Duration::from_secs(2)));
        assert_eq!(toast.message(), "Copied");
    }

    #[test]
    fn test_short_toast_fades_over_whole_life() {
        let t0 = Instant::now();
        let toast = Toast::started_at("x", Duration::from_millis(200), t0);
        assert!(toast.opacity_at(t0 + Duration::from_millis(100)) < 1.0);
    }
}
