//! Audio system
//!
//! Sound effects are procedurally generated with the Web Audio API - no
//! external files needed. The mapping from game events to effects is plain
//! Rust so it can be tested off the browser.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bubble leaves the shooter
    Launch,
    /// Projectile bounces off a side wall
    WallBounce,
    /// Projectile snaps into the grid without popping anything
    Land,
    /// Same-color cluster pops
    Pop,
    /// Disconnected bubbles fall away
    Drop,
    /// Grid emptied
    Cleared,
    /// Overflow
    GameOver,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    ///
    /// `Landed` is always followed by `Popped` when something pops, so the
    /// front end plays at most one of `Land`/`Pop` per shot by preferring
    /// the later event; see [`effects_for`].
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Launched { .. } => Some(SoundEffect::Launch),
            GameEvent::WallBounce => Some(SoundEffect::WallBounce),
            GameEvent::Landed { .. } => Some(SoundEffect::Land),
            GameEvent::Popped { .. } => Some(SoundEffect::Pop),
            GameEvent::Dropped { .. } => Some(SoundEffect::Drop),
            GameEvent::Cleared => Some(SoundEffect::Cleared),
            GameEvent::Overflowed => Some(SoundEffect::GameOver),
            GameEvent::Reset => None,
        }
    }
}

/// Effects to play for one batch of drained events
///
/// A land thud is skipped when the same batch also pops.
pub fn effects_for(events: &[GameEvent]) -> Vec<SoundEffect> {
    let pops = events
        .iter()
        .any(|e| matches!(e, GameEvent::Popped { .. }));
    events
        .iter()
        .filter_map(SoundEffect::for_event)
        .filter(|effect| !(pops && *effect == SoundEffect::Land))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BubbleColor, Cell};

    #[test]
    fn test_reset_is_silent() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Reset), None);
    }

    #[test]
    fn test_overflow_plays_game_over() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Overflowed),
            Some(SoundEffect::GameOver)
        );
    }

    #[test]
    fn test_pop_replaces_land_thud() {
        let landed = GameEvent::Landed {
            cell: Cell::new(1, 2),
            color: BubbleColor::Red,
        };
        let popped = GameEvent::Popped {
            count: 3,
            points: 300,
        };

        assert_eq!(effects_for(&[landed]), vec![SoundEffect::Land]);
        assert_eq!(
            effects_for(&[landed, popped, GameEvent::Cleared]),
            vec![SoundEffect::Pop, SoundEffect::Cleared]
        );
    }
}
