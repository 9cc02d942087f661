use eframe::egui::Color32;

use crate::deck::Tone;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub code_background: Color32,
    pub code_foreground: Color32,
    pub panel_background: Color32,
    pub title_size: f32,
    pub heading_size: f32,
    pub section_size: f32,
    pub body_size: f32,
    pub code_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x14, 0x1C),
            foreground: Color32::from_rgb(0xC9, 0xCE, 0xDA),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x61, 0xDA, 0xFB),
            muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            code_background: Color32::from_rgb(0x1E, 0x22, 0x2D),
            code_foreground: Color32::from_rgb(0xD4, 0xD4, 0xD4),
            panel_background: Color32::from_rgb(0x1A, 0x1D, 0x27),
            title_size: 104.0,
            heading_size: 64.0,
            section_size: 88.0,
            body_size: 38.0,
            code_size: 26.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1F, 0x29, 0x37),
            heading_color: Color32::from_rgb(0x11, 0x18, 0x27),
            accent: Color32::from_rgb(0x08, 0x7E, 0xA4),
            muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            code_background: Color32::from_rgb(0xF6, 0xF8, 0xFA),
            code_foreground: Color32::from_rgb(0x33, 0x33, 0x33),
            panel_background: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            title_size: 104.0,
            heading_size: 64.0,
            section_size: 88.0,
            body_size: 38.0,
            code_size: 26.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)) as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    /// Return the syntect theme name that matches this presentation theme.
    pub fn syntect_theme_name(&self) -> &str {
        if self.is_dark() {
            "base16-ocean.dark"
        } else {
            "InspiredGitHub"
        }
    }

    /// Fill and stroke colors for a diagram box.
    pub fn tone_colors(&self, tone: Tone) -> (Color32, Color32) {
        match tone {
            Tone::Neutral => (self.panel_background, self.muted),
            Tone::Accent => (Theme::with_opacity(self.accent, 0.18), self.accent),
            Tone::Muted => (self.background, Theme::with_opacity(self.muted, 0.6)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_defaults_to_light() {
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("solarized").name, "light");
    }

    #[test]
    fn test_toggled() {
        assert!(Theme::light().toggled().is_dark());
        assert!(!Theme::dark().toggled().is_dark());
    }

    #[test]
    fn test_with_opacity_scales_alpha() {
        let c = Theme::with_opacity(Color32::from_rgb(10, 20, 30), 0.5);
        assert_eq!(c.a(), 127);
        assert_eq!(Theme::with_opacity(Color32::WHITE, 2.0).a(), 255);
    }
}
