//! Slide transitions as data.
//!
//! An [`ActiveTransition`] describes one change of slide. It yields two
//! [`Motion`]s, one for the slide leaving and one for the slide entering, and
//! the renderer samples them each frame. Nothing here knows about egui.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Cross-fade with a short drift in the direction of travel.
    Slide,
    /// Full-width push.
    Push,
    Fade,
    None,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "slide" => Some(Self::Slide),
            "push" => Some(Self::Push),
            "fade" => Some(Self::Fade),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Push => "push",
            Self::Fade => "fade",
            Self::None => "none",
        }
    }

    fn duration(self) -> Duration {
        match self {
            Self::Slide => Duration::from_millis(400),
            Self::Push => Duration::from_millis(450),
            Self::Fade => Duration::from_millis(350),
            Self::None => Duration::ZERO,
        }
    }

    fn easing(self) -> Easing {
        match self {
            Self::Slide => Easing::EaseOut,
            Self::Push | Self::Fade => Easing::EaseInOut,
            Self::None => Easing::Linear,
        }
    }

    /// Horizontal travel in slide widths, and whether opacity fades.
    fn travel(self) -> (f32, bool) {
        match self {
            Self::Slide => (0.12, true),
            Self::Push => (1.0, false),
            Self::Fade | Self::None => (0.0, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Forward,
    Backward,
}

impl TransitionDirection {
    pub fn between(from: usize, to: usize) -> Self {
        if to >= from {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// +1 toward the trailing edge for forward travel.
    fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => ease_in_out(t),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Cubic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Where a slide sits: horizontal offset in slide widths (positive toward
/// the trailing edge) and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: f32,
    pub opacity: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        offset: 0.0,
        opacity: 1.0,
    };

    fn lerp(self, other: Pose, t: f32) -> Pose {
        Pose {
            offset: self.offset + (other.offset - self.offset) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub from: Pose,
    pub to: Pose,
    pub duration: Duration,
    pub easing: Easing,
}

impl Motion {
    pub fn sample(&self, elapsed: Duration) -> Pose {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, self.easing.apply(t))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub kind: TransitionKind,
    pub direction: TransitionDirection,
    start: Instant,
}

impl ActiveTransition {
    pub fn starting_at(from: usize, to: usize, kind: TransitionKind, start: Instant) -> Self {
        Self {
            from,
            to,
            kind,
            direction: TransitionDirection::between(from, to),
            start,
        }
    }

    pub fn outgoing(&self) -> Motion {
        let (travel, fades) = self.kind.travel();
        Motion {
            from: Pose::REST,
            to: Pose {
                offset: -self.direction.sign() * travel,
                opacity: if fades { 0.0 } else { 1.0 },
            },
            duration: self.kind.duration(),
            easing: self.kind.easing(),
        }
    }

    pub fn incoming(&self) -> Motion {
        let (travel, fades) = self.kind.travel();
        Motion {
            from: Pose {
                offset: self.direction.sign() * travel,
                opacity: if fades { 0.0 } else { 1.0 },
            },
            to: Pose::REST,
            duration: self.kind.duration(),
            easing: self.kind.easing(),
        }
    }

    /// Outgoing and incoming poses at `now`.
    pub fn poses_at(&self, now: Instant) -> (Pose, Pose) {
        let elapsed = now.saturating_duration_since(self.start);
        (
            self.outgoing().sample(elapsed),
            self.incoming().sample(elapsed),
        )
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.kind.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            TransitionKind::Slide,
            TransitionKind::Push,
            TransitionKind::Fade,
            TransitionKind::None,
        ] {
            assert_eq!(TransitionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TransitionKind::from_name("spin"), None);
    }

    #[test]
    fn test_direction_from_index_sign() {
        assert_eq!(
            TransitionDirection::between(2, 3),
            TransitionDirection::Forward
        );
        assert_eq!(
            TransitionDirection::between(3, 0),
            TransitionDirection::Backward
        );
    }

    #[test]
    fn test_forward_push_enters_from_trailing_edge() {
        let t0 = Instant::now();
        let t = ActiveTransition::starting_at(1, 2, TransitionKind::Push, t0);
        let (out, inc) = t.poses_at(t0);
        assert!(approx(out.offset, 0.0));
        assert!(approx(inc.offset, 1.0));

        let (out, inc) = t.poses_at(t0 + Duration::from_secs(1));
        assert!(approx(out.offset, -1.0));
        assert_eq!(inc, Pose::REST);
    }

    #[test]
    fn test_backward_push_is_mirrored() {
        let t0 = Instant::now();
        let t = ActiveTransition::starting_at(2, 1, TransitionKind::Push, t0);
        let (_, inc) = t.poses_at(t0);
        assert!(approx(inc.offset, -1.0));
        assert!(approx(t.outgoing().to.offset, 1.0));
    }

    #[test]
    fn test_slide_cross_fades() {
        let t0 = Instant::now();
        let t = ActiveTransition::starting_at(0, 1, TransitionKind::Slide, t0);
        let (out, inc) = t.poses_at(t0 + Duration::from_millis(200));
        assert!(out.opacity > 0.0 && out.opacity < 1.0);
        assert!(inc.opacity > 0.0 && inc.opacity < 1.0);
        assert!(out.offset < 0.0);
        assert!(inc.offset > 0.0);
    }

    #[test]
    fn test_completion() {
        let t0 = Instant::now();
        let t = ActiveTransition::starting_at(0, 1, TransitionKind::Fade, t0);
        assert!(!t.is_complete_at(t0 + Duration::from_millis(100)));
        assert!(t.is_complete_at(t0 + Duration::from_millis(350)));
    }

    #[test]
    fn test_none_is_immediate() {
        let t0 = Instant::now();
        let t = ActiveTransition::starting_at(0, 1, TransitionKind::None, t0);
        assert!(t.is_complete_at(t0));
        assert_eq!(t.poses_at(t0).1, Pose::REST);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EaseOut] {
            assert!(approx(easing.apply(0.0), 0.0));
            assert!(approx(easing.apply(1.0), 1.0));
            assert!(approx(easing.apply(2.0), 1.0));
        }
        assert!(approx(ease_in_out(0.5), 0.5));
    }
}
