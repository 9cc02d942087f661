use eframe::egui::{Key, Modifiers};

/// Something the presenter asked for, from a key or a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    ToggleFullscreen,
    /// Close the TOC and grid, leave fullscreen if active.
    Escape,
    ToggleToc,
    OpenToc,
    ToggleGrid,
    ToggleTheme,
    Quit,
}

/// Map a key press to an action. Keys pressed with Ctrl or Cmd are left to
/// the platform.
pub fn action_for(key: Key, modifiers: Modifiers) -> Option<NavAction> {
    if modifiers.ctrl || modifiers.command || modifiers.mac_cmd {
        return None;
    }
    let action = match key {
        Key::ArrowRight | Key::PageDown => NavAction::Next,
        Key::Space if !modifiers.shift => NavAction::Next,
        Key::ArrowLeft | Key::PageUp => NavAction::Previous,
        Key::Home => NavAction::First,
        Key::End => NavAction::Last,
        Key::F => NavAction::ToggleFullscreen,
        Key::Escape => NavAction::Escape,
        Key::T => NavAction::ToggleToc,
        Key::G => NavAction::ToggleGrid,
        Key::D => NavAction::ToggleTheme,
        Key::Q => NavAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Shortcut legend shown in the TOC overlay footer.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192} / Space / PgDn", "Next slide"),
    ("\u{2190} / PgUp", "Previous slide"),
    ("Home / End", "First / last slide"),
    ("T", "Table of contents"),
    ("G", "Grid overview"),
    ("F", "Toggle fullscreen"),
    ("D", "Toggle theme"),
    ("Esc", "Close overlays / exit fullscreen"),
    ("Q", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: Key) -> Option<NavAction> {
        action_for(key, Modifiers::NONE)
    }

    #[test]
    fn test_forward_keys() {
        assert_eq!(plain(Key::ArrowRight), Some(NavAction::Next));
        assert_eq!(plain(Key::PageDown), Some(NavAction::Next));
        assert_eq!(plain(Key::Space), Some(NavAction::Next));
    }

    #[test]
    fn test_shift_space_is_not_next() {
        assert_eq!(action_for(Key::Space, Modifiers::SHIFT), None);
    }

    #[test]
    fn test_backward_and_jump_keys() {
        assert_eq!(plain(Key::ArrowLeft), Some(NavAction::Previous));
        assert_eq!(plain(Key::PageUp), Some(NavAction::Previous));
        assert_eq!(plain(Key::Home), Some(NavAction::First));
        assert_eq!(plain(Key::End), Some(NavAction::Last));
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(plain(Key::F), Some(NavAction::ToggleFullscreen));
        assert_eq!(plain(Key::T), Some(NavAction::ToggleToc));
        assert_eq!(plain(Key::G), Some(NavAction::ToggleGrid));
        assert_eq!(plain(Key::Escape), Some(NavAction::Escape));
    }

    #[test]
    fn test_ctrl_and_cmd_defer_to_platform() {
        assert_eq!(action_for(Key::ArrowRight, Modifiers::CTRL), None);
        assert_eq!(action_for(Key::F, Modifiers::COMMAND), None);
        assert_eq!(action_for(Key::Q, Modifiers::MAC_CMD), None);
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(plain(Key::A), None);
        assert_eq!(plain(Key::ArrowUp), None);
    }
}
