//! Game state and core simulation types
//!
//! One `GameState` owns everything a running game needs. Nothing here is
//! global, so any number of games can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{BubbleColor, Cell, Grid};
use crate::tuning::{PaletteRule, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Grid emptied - the player won
    Cleared,
    /// Bubbles reached the shooter line, or a shot escaped downward
    Overflowed,
}

impl GamePhase {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// Message shown on the game-over overlay
    pub fn end_message(&self) -> Option<&'static str> {
        match self {
            GamePhase::Playing => None,
            GamePhase::Cleared => Some("Board cleared! Press Enter to play again"),
            GamePhase::Overflowed => Some("Game over! Press Enter to try again"),
        }
    }
}

/// Observable things that happened during a tick
///
/// Drained by the front end for sound and HUD; not part of gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { color: BubbleColor },
    WallBounce,
    Landed { cell: Cell, color: BubbleColor },
    Popped { count: usize, points: u64 },
    Dropped { count: usize, points: u64 },
    Cleared,
    Overflowed,
    Reset,
}

/// The bubble in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
}

/// Aim and the two loaded colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shooter {
    /// Aim angle in radians (0 = right, π/2 = up)
    pub aim_angle: f32,
    pub current_color: BubbleColor,
    pub next_color: BubbleColor,
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            aim_angle: std::f32::consts::FRAC_PI_2,
            current_color: BubbleColor::Red,
            next_color: BubbleColor::Red,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG stream, advanced by grid generation and color draws
    rng: Pcg32,
    /// Balance and geometry this game was built with
    pub tuning: Tuning,
    /// Score
    pub score: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Shots fired this game
    pub shots: u32,
    pub grid: Grid,
    pub shooter: Shooter,
    /// At most one bubble in flight
    pub projectile: Option<Projectile>,
    /// Events raised since the front end last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game with an empty grid; call `generate_grid` to fill it
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let grid = Grid::new(tuning.columns, tuning.bubble_radius);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            shots: 0,
            grid,
            shooter: Shooter::default(),
            projectile: None,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn end_message(&self) -> Option<&'static str> {
        self.phase.end_message()
    }

    /// Shooter center in playfield pixels
    pub fn shooter_position(&self) -> Vec2 {
        self.tuning.shooter_position()
    }

    /// Colors the shooter may load right now
    pub fn loadable_colors(&self) -> Vec<BubbleColor> {
        match self.tuning.palette_rule {
            PaletteRule::InPlay => {
                let in_play = self.grid.colors_in_play();
                if in_play.is_empty() {
                    self.tuning.palette().to_vec()
                } else {
                    in_play
                }
            }
            PaletteRule::Full => self.tuning.palette().to_vec(),
        }
    }

    /// Draw a color according to the palette rule
    pub fn draw_color(&mut self) -> BubbleColor {
        let choices = self.loadable_colors();
        choices
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(BubbleColor::Red)
    }

    /// Draw any color from the full palette (grid generation)
    pub fn draw_palette_color(&mut self) -> BubbleColor {
        self.tuning
            .palette()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(BubbleColor::Red)
    }

    /// Set the aim angle, clamped to the allowed range
    pub fn set_aim(&mut self, angle: f32) {
        let (min, max) = self.tuning.aim_range();
        self.shooter.aim_angle = angle.clamp(min, max);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
