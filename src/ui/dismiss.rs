//! Swipe-to-delete gesture state machine
//!
//! A dismissible item tracks one horizontal drag at a time. Moves set the
//! offset to the cumulative translation, unclamped so the item can rubber-band
//! past its resting position. On release the item either commits (dragged
//! left past half the viewport width, strictly) and settles off-screen, or
//! snaps back to rest. The commit signal fires exactly once per instance.

/// One input event of a drag gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// Cumulative horizontal translation since the drag started
    Move(f32),
    /// The gesture ended
    Release,
}

/// Where the item currently is in its gesture lifecycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    /// At rest, ready for a new drag
    Resting,
    /// Finger down, tracking translation
    Dragging,
    /// Animating toward a target offset
    Settling { target: f32 },
}

/// Gesture state for one dismissible item
///
/// Events are applied by value, producing the next state; `committed` is
/// terminal and the item is expected to be removed from its list once the
/// commit signal fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissState {
    offset: f32,
    phase: DragPhase,
    committed: bool,
}

impl Default for DismissState {
    fn default() -> Self {
        Self::new()
    }
}

impl DismissState {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            phase: DragPhase::Resting,
            committed: false,
        }
    }

    /// Current horizontal displacement
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether the dismiss threshold was crossed and the commit fired
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, DragPhase::Settling { .. })
    }

    /// Apply one gesture event, returning the next state and whether the
    /// commit fired on this event. The commit fires at most once per
    /// instance; events after commit are ignored.
    #[must_use]
    pub fn apply(mut self, event: DragEvent, viewport_width: f32) -> (Self, bool) {
        if self.committed {
            return (self, false);
        }

        match event {
            DragEvent::Move(translation) => {
                self.offset = translation;
                self.phase = DragPhase::Dragging;
                (self, false)
            }
            DragEvent::Release => {
                // Strictly past half the viewport, leftward only.
                let should_commit = -self.offset > viewport_width / 2.0;
                if should_commit {
                    self.committed = true;
                    self.phase = DragPhase::Settling {
                        target: -viewport_width,
                    };
                    (self, true)
                } else {
                    self.phase = DragPhase::Settling { target: 0.0 };
                    (self, false)
                }
            }
        }
    }

    /// Advance the settle animation by `dt` seconds (exponential approach).
    /// Reaching the target returns the state to rest, or leaves it parked
    /// off-screen after a commit.
    pub fn tick(&mut self, dt: f32) {
        const SETTLE_RATE: f32 = 14.0;
        const SNAP_EPSILON: f32 = 0.5;

        if let DragPhase::Settling { target } = self.phase {
            let blend = 1.0 - (-dt * SETTLE_RATE).exp();
            self.offset += (target - self.offset) * blend;

            if (self.offset - target).abs() < SNAP_EPSILON {
                self.offset = target;
                self.phase = DragPhase::Resting;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 400.0;

    fn released(events: &[f32]) -> (DismissState, bool) {
        let mut state = DismissState::new();
        let mut fired = false;
        for &tx in events {
            let (next, f) = state.apply(DragEvent::Move(tx), WIDTH);
            state = next;
            fired |= f;
        }
        let (state, f) = state.apply(DragEvent::Release, WIDTH);
        (state, fired || f)
    }

    #[test]
    fn test_past_half_width_commits() {
        let (state, fired) = released(&[-50.0, -150.0, -201.0]);
        assert!(fired);
        assert!(state.is_committed());
        assert_eq!(state.phase(), DragPhase::Settling { target: -WIDTH });
    }

    #[test]
    fn test_exactly_half_width_does_not_commit() {
        let (state, fired) = released(&[-200.0]);
        assert!(!fired, "threshold is strict, half width must not commit");
        assert!(!state.is_committed());
        assert_eq!(state.phase(), DragPhase::Settling { target: 0.0 });
    }

    #[test]
    fn test_one_past_half_width_commits() {
        let (_, fired) = released(&[-201.0]);
        assert!(fired);
    }

    #[test]
    fn test_rightward_drag_never_commits() {
        let (state, fired) = released(&[150.0, 300.0]);
        assert!(!fired);
        assert_eq!(state.phase(), DragPhase::Settling { target: 0.0 });
    }

    #[test]
    fn test_insufficient_drag_snaps_back() {
        let (mut state, fired) = released(&[-120.0]);
        assert!(!fired);

        // Settle animation returns to rest at zero.
        for _ in 0..120 {
            state.tick(1.0 / 60.0);
        }
        assert_eq!(state.offset(), 0.0);
        assert_eq!(state.phase(), DragPhase::Resting);
    }

    #[test]
    fn test_commit_fires_exactly_once() {
        let (state, fired) = released(&[-300.0]);
        assert!(fired);

        // Any further events are ignored and never re-fire.
        let (state, fired_again) = state.apply(DragEvent::Move(-10.0), WIDTH);
        assert!(!fired_again);
        let (state, fired_again) = state.apply(DragEvent::Release, WIDTH);
        assert!(!fired_again);
        assert!(state.is_committed());
    }

    #[test]
    fn test_moves_are_unclamped_during_drag() {
        let mut state = DismissState::new();
        let (next, _) = state.apply(DragEvent::Move(-900.0), WIDTH);
        state = next;
        assert_eq!(state.offset(), -900.0);

        // Dragging back inside the threshold before release avoids commit.
        let (state, fired) = state.apply(DragEvent::Move(-40.0), WIDTH);
        let (state, fired2) = state.apply(DragEvent::Release, WIDTH);
        assert!(!fired && !fired2);
        assert!(!state.is_committed());
    }

    #[test]
    fn test_committed_settle_parks_off_screen() {
        let (mut state, _) = released(&[-250.0]);
        for _ in 0..120 {
            state.tick(1.0 / 60.0);
        }
        assert_eq!(state.offset(), -WIDTH);
        assert!(state.is_committed());
    }

    #[test]
    fn test_release_without_moves_snaps_back() {
        let state = DismissState::new();
        let (state, fired) = state.apply(DragEvent::Release, WIDTH);
        assert!(!fired);
        assert_eq!(state.phase(), DragPhase::Settling { target: 0.0 });
    }
}
