//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::grid::Cell;
use super::matching::resolve_landing;
use super::projectile::{ProjectileStep, step_projectile};
use super::state::{GameEvent, GamePhase, GameState, Projectile, Shooter};
use crate::angle_toward;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in playfield pixels; the shooter aims at it
    pub aim_at: Option<Vec2>,
    /// Held rotation: +1 turns the aim left, -1 turns it right
    pub rotate: f32,
    /// Fire the loaded bubble (click/space)
    pub launch: bool,
    /// Start over once the game has ended (Enter)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_over() {
        if input.restart {
            reset(state);
        }
        return;
    }

    state.time_ticks += 1;

    if let Some(target) = input.aim_at {
        let angle = pointer_aim_angle(state.shooter_position(), target, state.tuning.aim_range());
        state.set_aim(angle);
    }
    if input.rotate != 0.0 {
        let delta = input.rotate.clamp(-1.0, 1.0) * state.tuning.aim_rotate_speed * dt;
        state.set_aim(state.shooter.aim_angle + delta);
    }

    if input.launch {
        launch(state);
    }

    advance_projectile(state, dt);
}

/// Aim angle toward a pointer, clamped to `range`
///
/// Pointers below the shooter clamp to whichever bound is on their side.
pub fn pointer_aim_angle(shooter: Vec2, pointer: Vec2, range: (f32, f32)) -> f32 {
    let (min, max) = range;
    let angle = angle_toward(shooter, pointer);
    if angle < 0.0 {
        return if angle < -FRAC_PI_2 { max } else { min };
    }
    angle.clamp(min, max)
}

/// Fire the loaded color if nothing is in flight
///
/// Returns whether a projectile was spawned.
pub fn launch(state: &mut GameState) -> bool {
    if state.projectile.is_some() || state.is_over() {
        return false;
    }

    let color = state.shooter.current_color;
    state.projectile = Some(Projectile::launch(
        state.shooter_position(),
        state.shooter.aim_angle,
        state.tuning.projectile_speed,
        color,
    ));
    state.shooter.current_color = state.shooter.next_color;
    state.shooter.next_color = state.draw_color();
    state.shots += 1;

    log::debug!(
        "Shot {}: {} at {:.1}°",
        state.shots,
        color.as_str(),
        state.shooter.aim_angle.to_degrees()
    );
    state.emit(GameEvent::Launched { color });
    true
}

fn advance_projectile(state: &mut GameState, dt: f32) {
    let Some(mut projectile) = state.projectile.take() else {
        return;
    };

    let step = step_projectile(
        &mut projectile,
        &state.grid,
        state.tuning.field_width(),
        state.shooter_position().y,
        dt,
    );

    match step {
        ProjectileStep::Flying => state.projectile = Some(projectile),
        ProjectileStep::Bounced => {
            state.projectile = Some(projectile);
            state.emit(GameEvent::WallBounce);
        }
        ProjectileStep::Landed => land(state, projectile),
        ProjectileStep::Escaped => {
            log::info!("Shot escaped below the shooter line");
            overflow(state);
        }
    }
}

/// Snap a stopped projectile into the grid and resolve matches
fn land(state: &mut GameState, projectile: Projectile) {
    let cell = state.grid.find_closest_slot(projectile.pos);
    state.grid.place(cell, projectile.color);
    state.emit(GameEvent::Landed {
        cell,
        color: projectile.color,
    });

    let resolution = resolve_landing(&mut state.grid, cell);
    state.score += resolution.points();

    if !resolution.popped.is_empty() {
        state.emit(GameEvent::Popped {
            count: resolution.popped.len(),
            points: resolution.pop_points(),
        });
    }
    if !resolution.dropped.is_empty() {
        state.emit(GameEvent::Dropped {
            count: resolution.dropped.len(),
            points: resolution.drop_points(),
        });
    }
    log::debug!(
        "Landed at ({}, {}): popped {}, dropped {}, score {}",
        cell.row,
        cell.col,
        resolution.popped.len(),
        resolution.dropped.len(),
        state.score
    );

    if state.grid.is_empty() {
        state.phase = GamePhase::Cleared;
        log::info!("Board cleared in {} shots, score {}", state.shots, state.score);
        state.emit(GameEvent::Cleared);
        return;
    }

    let line = state.tuning.overflow_line();
    if state.grid.bubbles().any(|b| b.pos.y > line) {
        log::info!("Bubbles crossed the overflow line");
        overflow(state);
    }
}

fn overflow(state: &mut GameState) {
    state.projectile = None;
    state.phase = GamePhase::Overflowed;
    log::info!("Game over after {} shots, score {}", state.shots, state.score);
    state.emit(GameEvent::Overflowed);
}

/// Fill the starting rows and load the shooter
pub fn generate_grid(state: &mut GameState) {
    state.grid.clear();
    let rows = state.tuning.initial_rows;
    let columns = state.tuning.columns;
    for row in 0..rows {
        for col in 0..columns {
            let color = state.draw_palette_color();
            state.grid.place(Cell::new(row, col), color);
        }
    }

    state.shooter = Shooter::default();
    state.shooter.current_color = state.draw_color();
    state.shooter.next_color = state.draw_color();

    log::info!(
        "Generated {} rows x {} columns, {} colors ({} rule)",
        rows,
        columns,
        state.tuning.color_count,
        state.tuning.palette_rule.as_str()
    );
}

/// Start a fresh game in place, continuing the RNG stream
pub fn reset(state: &mut GameState) {
    state.score = 0;
    state.shots = 0;
    state.time_ticks = 0;
    state.projectile = None;
    state.phase = GamePhase::Playing;
    generate_grid(state);
    log::info!("Game reset");
    state.emit(GameEvent::Reset);
}
