//! Per-tick input signals
//!
//! The core only sees booleans. `move_left`, `move_right` and `fire` are
//! level-triggered; the rest are edges, true only on the tick the button
//! went down. `InputTracker` derives the edges from held-button snapshots.

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire held (auto-repeat limited by the fire cooldown)
    pub fire: bool,
    pub fire_just_pressed: bool,
    /// Start a game from Attract or GameOver
    pub start: bool,
    pub super_zapper: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// -1, 0 or 1 from the held move buttons
    pub fn move_direction(&self) -> i32 {
        i32::from(self.move_right) - i32::from(self.move_left)
    }
}

/// Buttons currently held, as polled by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub start: bool,
    pub super_zapper: bool,
    pub pause: bool,
}

/// Turns successive `HeldButtons` snapshots into `TickInput`s
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: HeldButtons,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, held: HeldButtons) -> TickInput {
        let prev = self.previous;
        self.previous = held;
        TickInput {
            move_left: held.left,
            move_right: held.right,
            fire: held.fire,
            fire_just_pressed: held.fire && !prev.fire,
            start: held.start && !prev.start,
            super_zapper: held.super_zapper && !prev.super_zapper,
            pause: held.pause && !prev.pause,
            idle_mode: false,
        }
    }

    /// Forget held state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.previous = HeldButtons::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_fire_once_per_press() {
        let mut tracker = InputTracker::new();
        let held = HeldButtons {
            fire: true,
            start: true,
            ..Default::default()
        };

        let first = tracker.update(held);
        assert!(first.fire && first.fire_just_pressed && first.start);

        let second = tracker.update(held);
        assert!(second.fire);
        assert!(!second.fire_just_pressed && !second.start);

        tracker.update(HeldButtons::default());
        assert!(tracker.update(held).start);
    }

    #[test]
    fn test_move_direction() {
        let mut tracker = InputTracker::new();
        let both = tracker.update(HeldButtons {
            left: true,
            right: true,
            ..Default::default()
        });
        assert_eq!(both.move_direction(), 0);
        let left = tracker.update(HeldButtons {
            left: true,
            ..Default::default()
        });
        assert_eq!(left.move_direction(), -1);
        assert!(!left.pause);
    }

    #[test]
    fn test_reset_rearms_edges() {
        let mut tracker = InputTracker::new();
        let held = HeldButtons {
            pause: true,
            ..Default::default()
        };
        assert!(tracker.update(held).pause);
        tracker.reset();
        assert!(tracker.update(held).pause);
    }
}
