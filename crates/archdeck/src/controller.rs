//! Presentation state and the operations that change it.
//!
//! The controller is the only writer of [`PresentationState`]. Every applied
//! mutation queues a [`StateChange`] that the owning app drains once per frame
//! and hands to the views that care. Requests that need the platform
//! (fullscreen) are queued separately as [`PlatformRequest`]s; their outcome
//! comes back through [`Controller::on_fullscreen_changed`].

use tracing::debug;

use crate::toc::TocEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationState {
    pub current_index: usize,
    pub is_fullscreen: bool,
    pub is_toc_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    SlideChanged { from: usize, to: usize },
    FullscreenChanged(bool),
    TocChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    EnterFullscreen,
    ExitFullscreen,
}

#[derive(Debug)]
pub struct Controller {
    state: PresentationState,
    slide_count: usize,
    changes: Vec<StateChange>,
    requests: Vec<PlatformRequest>,
}

impl Controller {
    /// `slide_count` must be non-zero; `start` is clamped into range.
    pub fn new(slide_count: usize, start: usize) -> Self {
        debug_assert!(slide_count > 0, "controller needs at least one slide");
        Self {
            state: PresentationState {
                current_index: start.min(slide_count.saturating_sub(1)),
                is_fullscreen: false,
                is_toc_open: false,
            },
            slide_count,
            changes: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_first(&self) -> bool {
        self.state.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.state.current_index + 1 >= self.slide_count
    }

    /// Move to `index` if it is in range. Out-of-range targets are ignored.
    /// Returns whether the current slide changed.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        if index >= self.slide_count || index == self.state.current_index {
            return false;
        }
        let from = self.state.current_index;
        self.state.current_index = index;
        debug!(from, to = index, "navigate");
        self.changes.push(StateChange::SlideChanged { from, to: index });
        true
    }

    pub fn next(&mut self) -> bool {
        self.navigate_to(self.state.current_index + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.state.current_index.checked_sub(1) {
            Some(prev) => self.navigate_to(prev),
            None => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.navigate_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.navigate_to(self.slide_count.saturating_sub(1))
    }

    /// Ask the platform to enter or leave fullscreen. The flag itself only
    /// moves when the platform reports back.
    pub fn toggle_fullscreen(&mut self) {
        let request = if self.state.is_fullscreen {
            PlatformRequest::ExitFullscreen
        } else {
            PlatformRequest::EnterFullscreen
        };
        debug!(?request, "fullscreen requested");
        self.requests.push(request);
    }

    pub fn exit_fullscreen(&mut self) {
        if self.state.is_fullscreen {
            self.requests.push(PlatformRequest::ExitFullscreen);
        }
    }

    /// Platform notification: fullscreen is now `active`.
    pub fn on_fullscreen_changed(&mut self, active: bool) {
        if self.state.is_fullscreen == active {
            return;
        }
        self.state.is_fullscreen = active;
        debug!(active, "fullscreen changed");
        self.changes.push(StateChange::FullscreenChanged(active));
    }

    pub fn toggle_toc(&mut self) {
        self.set_toc_open(!self.state.is_toc_open);
    }

    pub fn open_toc(&mut self) {
        self.set_toc_open(true);
    }

    pub fn close_toc(&mut self) {
        self.set_toc_open(false);
    }

    /// Jump to the entry's slide and close the TOC in one step.
    pub fn select_toc_entry(&mut self, entry: &TocEntry) {
        debug!(section = %entry.section, index = entry.slide_index, "toc entry selected");
        self.navigate_to(entry.slide_index);
        self.close_toc();
    }

    fn set_toc_open(&mut self, open: bool) {
        if self.state.is_toc_open == open {
            return;
        }
        self.state.is_toc_open = open;
        debug!(open, "toc");
        self.changes.push(StateChange::TocChanged(open));
    }

    /// Changes applied since the last call, oldest first.
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    /// Platform requests issued since the last call, oldest first.
    pub fn drain_requests(&mut self) -> Vec<PlatformRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(slide_index: usize) -> TocEntry {
        TocEntry {
            title: format!("Slide {slide_index}"),
            slide_index,
            section: "S".to_string(),
        }
    }

    #[test]
    fn test_start_is_clamped() {
        assert_eq!(Controller::new(3, 10).current_index(), 2);
        assert_eq!(Controller::new(3, 1).current_index(), 1);
    }

    #[test]
    fn test_arrow_scenario() {
        let mut c = Controller::new(5, 0);
        for _ in 0..4 {
            assert!(c.next());
        }
        assert_eq!(c.current_index(), 4);
        assert!(!c.next());
        assert_eq!(c.current_index(), 4);
        c.first();
        assert_eq!(c.current_index(), 0);
        c.last();
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut c = Controller::new(5, 0);
        assert!(!c.previous());
        assert_eq!(c.current_index(), 0);
        assert!(c.drain_changes().is_empty());
    }

    #[test]
    fn test_single_slide_deck() {
        let mut c = Controller::new(1, 0);
        assert!(c.is_first() && c.is_last());
        assert!(!c.next());
        assert!(!c.previous());
        assert!(!c.last());
    }

    #[test]
    fn test_changes_are_queued_in_order() {
        let mut c = Controller::new(5, 0);
        c.next();
        c.navigate_to(3);
        c.toggle_toc();
        assert_eq!(
            c.drain_changes(),
            vec![
                StateChange::SlideChanged { from: 0, to: 1 },
                StateChange::SlideChanged { from: 1, to: 3 },
                StateChange::TocChanged(true),
            ]
        );
        assert!(c.drain_changes().is_empty());
    }

    #[test]
    fn test_toc_scenario() {
        let mut c = Controller::new(5, 0);
        assert!(!c.state().is_toc_open);
        c.toggle_toc();
        assert!(c.state().is_toc_open);
        c.close_toc();
        assert!(!c.state().is_toc_open);
        c.toggle_toc();
        assert!(c.state().is_toc_open);
        c.toggle_toc();
        assert!(!c.state().is_toc_open);
    }

    #[test]
    fn test_close_toc_when_closed_is_quiet() {
        let mut c = Controller::new(2, 0);
        c.close_toc();
        assert!(c.drain_changes().is_empty());
        c.open_toc();
        c.open_toc();
        assert_eq!(c.drain_changes(), vec![StateChange::TocChanged(true)]);
    }

    #[test]
    fn test_select_toc_entry_navigates_and_closes() {
        let mut c = Controller::new(5, 0);
        c.open_toc();
        c.drain_changes();
        c.select_toc_entry(&entry(3));
        let state = c.state();
        assert_eq!(state.current_index, 3);
        assert!(!state.is_toc_open);
        assert_eq!(
            c.drain_changes(),
            vec![
                StateChange::SlideChanged { from: 0, to: 3 },
                StateChange::TocChanged(false),
            ]
        );
    }

    #[test]
    fn test_select_current_entry_still_closes() {
        let mut c = Controller::new(5, 2);
        c.open_toc();
        c.select_toc_entry(&entry(2));
        assert_eq!(c.current_index(), 2);
        assert!(!c.state().is_toc_open);
    }

    #[test]
    fn test_fullscreen_follows_platform_not_request() {
        let mut c = Controller::new(3, 0);
        c.toggle_fullscreen();
        assert!(!c.state().is_fullscreen);
        assert_eq!(c.drain_requests(), vec![PlatformRequest::EnterFullscreen]);

        c.on_fullscreen_changed(true);
        assert!(c.state().is_fullscreen);

        // User leaves fullscreen through the window manager
        c.on_fullscreen_changed(false);
        assert!(!c.state().is_fullscreen);
        assert!(c.drain_requests().is_empty());
        assert_eq!(
            c.drain_changes(),
            vec![
                StateChange::FullscreenChanged(true),
                StateChange::FullscreenChanged(false),
            ]
        );
    }

    #[test]
    fn test_refused_fullscreen_leaves_flag() {
        let mut c = Controller::new(3, 0);
        c.toggle_fullscreen();
        c.drain_requests();
        // No notification arrives
        assert!(!c.state().is_fullscreen);
        c.toggle_fullscreen();
        assert_eq!(c.drain_requests(), vec![PlatformRequest::EnterFullscreen]);
    }

    #[test]
    fn test_toggle_while_fullscreen_requests_exit() {
        let mut c = Controller::new(3, 0);
        c.on_fullscreen_changed(true);
        c.toggle_fullscreen();
        assert_eq!(c.drain_requests(), vec![PlatformRequest::ExitFullscreen]);
    }

    #[test]
    fn test_exit_fullscreen_only_when_active() {
        let mut c = Controller::new(3, 0);
        c.exit_fullscreen();
        assert!(c.drain_requests().is_empty());
        c.on_fullscreen_changed(true);
        c.exit_fullscreen();
        assert_eq!(c.drain_requests(), vec![PlatformRequest::ExitFullscreen]);
    }

    proptest! {
        #[test]
        fn navigate_to_applies_only_in_range(n in 1usize..50, start in 0usize..50, target in 0usize..100) {
            let mut c = Controller::new(n, start);
            let before = c.current_index();
            c.navigate_to(target);
            if target < n {
                prop_assert_eq!(c.current_index(), target);
            } else {
                prop_assert_eq!(c.current_index(), before);
            }
        }

        #[test]
        fn navigate_to_is_idempotent(n in 1usize..50, target in 0usize..50) {
            let mut once = Controller::new(n, 0);
            once.navigate_to(target);
            let mut twice = Controller::new(n, 0);
            twice.navigate_to(target);
            twice.navigate_to(target);
            prop_assert_eq!(once.state(), twice.state());
        }

        #[test]
        fn index_stays_in_range(n in 1usize..20, ops in proptest::collection::vec(0u8..5, 0..60)) {
            let mut c = Controller::new(n, 0);
            for op in ops {
                match op {
                    0 => { c.next(); }
                    1 => { c.previous(); }
                    2 => { c.first(); }
                    3 => { c.last(); }
                    _ => { c.navigate_to(n + 3); }
                }
                prop_assert!(c.current_index() < n);
            }
        }
    }
}
