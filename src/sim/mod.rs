//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major over the grid)
//! - No rendering or platform dependencies

pub mod grid;
pub mod matching;
pub mod projectile;
pub mod state;
pub mod tick;

pub use grid::{Bubble, BubbleColor, Cell, Grid};
pub use matching::{Resolution, find_cluster, find_floating, resolve_landing};
pub use projectile::{ProjectileStep, reflect_velocity, step_projectile, touches_grid};
pub use state::{GameEvent, GamePhase, GameState, Projectile, Shooter};
pub use tick::{TickInput, generate_grid, launch, pointer_aim_angle, reset, tick};
