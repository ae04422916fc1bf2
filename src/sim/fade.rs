//! Level fade state machine
//!
//! A level fades in once when it starts, holds, and fades out when the
//! player escapes or finishes. Fade progress drives the theme volumes and the
//! black overlay. Fading in and fading out are variants of one enum, so both
//! can never be active at once.

/// Why the level is fading out; reported to the parent application when
/// the fade completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOutcome {
    /// Escape was requested
    ReturnToMenu,
    /// The level was finished
    LevelComplete,
}

/// Current fade phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadePhase {
    In { elapsed: f32 },
    Hold,
    Out { elapsed: f32, outcome: SceneOutcome },
    Done(SceneOutcome),
}

/// Fade timer with a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    phase: FadePhase,
    duration: f32,
}

impl Fade {
    /// Start a level: fading in from black
    pub fn new(duration: f32) -> Self {
        Self {
            phase: FadePhase::In { elapsed: 0.0 },
            duration,
        }
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_holding(&self) -> bool {
        self.phase == FadePhase::Hold
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.phase, FadePhase::Out { .. })
    }

    fn ratio(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Level presence: 0 at black, 1 fully faded in
    pub fn progress(&self) -> f32 {
        match self.phase {
            FadePhase::In { elapsed } => self.ratio(elapsed),
            FadePhase::Hold => 1.0,
            FadePhase::Out { elapsed, .. } => 1.0 - self.ratio(elapsed),
            FadePhase::Done(_) => 0.0,
        }
    }

    /// Opacity of the black overlay drawn over the level
    pub fn overlay_alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Begin fading out. A fade-in still running turns around from its
    /// current progress; later requests are ignored.
    pub fn request_out(&mut self, outcome: SceneOutcome) -> bool {
        let elapsed = match self.phase {
            FadePhase::In { elapsed } => self.duration - elapsed.min(self.duration),
            FadePhase::Hold => 0.0,
            FadePhase::Out { .. } | FadePhase::Done(_) => {
                log::debug!("Fade-out already running, ignoring {:?}", outcome);
                return false;
            }
        };
        self.phase = FadePhase::Out { elapsed, outcome };
        true
    }

    /// Advance by `dt`. Returns the outcome on the frame the fade-out
    /// completes, exactly once.
    pub fn advance(&mut self, dt: f32) -> Option<SceneOutcome> {
        match self.phase {
            FadePhase::In { elapsed } => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed >= self.duration {
                    FadePhase::Hold
                } else {
                    FadePhase::In { elapsed }
                };
                None
            }
            FadePhase::Out { elapsed, outcome } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.duration {
                    self.phase = FadePhase::Done(outcome);
                    Some(outcome)
                } else {
                    self.phase = FadePhase::Out { elapsed, outcome };
                    None
                }
            }
            FadePhase::Hold | FadePhase::Done(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fade_in_then_hold() {
        let mut fade = Fade::new(0.75);
        assert_eq!(fade.progress(), 0.0);
        assert_eq!(fade.overlay_alpha(), 1.0);
        fade.advance(0.375);
        assert!((fade.progress() - 0.5).abs() < 1e-6);
        fade.advance(0.5);
        assert!(fade.is_holding());
        assert_eq!(fade.progress(), 1.0);
        assert_eq!(fade.overlay_alpha(), 0.0);
    }

    #[test]
    fn test_fade_out_reports_once() {
        let mut fade = Fade::new(1.0);
        fade.advance(1.0);
        assert!(fade.request_out(SceneOutcome::LevelComplete));
        // Second request does not restart or retarget
        assert!(!fade.request_out(SceneOutcome::ReturnToMenu));

        assert_eq!(fade.advance(0.5), None);
        assert!((fade.progress() - 0.5).abs() < 1e-6);
        assert_eq!(fade.advance(0.5), Some(SceneOutcome::LevelComplete));
        assert_eq!(fade.advance(0.5), None);
        assert_eq!(fade.phase(), FadePhase::Done(SceneOutcome::LevelComplete));
        assert_eq!(fade.progress(), 0.0);
    }

    #[test]
    fn test_fade_out_during_fade_in_is_continuous() {
        let mut fade = Fade::new(1.0);
        fade.advance(0.3);
        let before = fade.progress();
        fade.request_out(SceneOutcome::ReturnToMenu);
        assert!(fade.is_fading_out());
        assert!((fade.progress() - before).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_fade_in_monotonic(steps in proptest::collection::vec(0.0f32..0.2, 1..64)) {
            let mut fade = Fade::new(0.75);
            let mut last = fade.progress();
            let mut total = 0.0;
            for dt in steps {
                fade.advance(dt);
                total += dt;
                let p = fade.progress();
                prop_assert!(p >= last);
                prop_assert!(p <= 1.0);
                if total >= 0.75 {
                    prop_assert_eq!(p, 1.0);
                }
                last = p;
            }
        }

        #[test]
        fn prop_fade_out_monotonic(steps in proptest::collection::vec(0.0f32..0.2, 1..64)) {
            let mut fade = Fade::new(0.75);
            fade.advance(1.0);
            fade.request_out(SceneOutcome::LevelComplete);
            let mut last = fade.progress();
            for dt in steps {
                fade.advance(dt);
                let p = fade.progress();
                prop_assert!(p <= last);
                prop_assert!(p >= 0.0);
                last = p;
            }
        }
    }
}
