//! Per-frame scene building
//!
//! Turns a `GameState` into a triangle list in playfield pixels. Reads the
//! state only; calling it twice on the same state yields the same vertices.

use glam::Vec2;

use super::shapes::{circle, rect, ring, segment};
use super::vertex::{Vertex, colors};
use crate::aim_direction;
use crate::sim::{BubbleColor, GamePhase, GameState};

const BUBBLE_SEGMENTS: u32 = 20;
/// Spacing between aim guide dots, in bubble radii
const GUIDE_STEP: f32 = 1.5;
const GUIDE_DOTS: usize = 8;

/// Build every vertex for one frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let tuning = &state.tuning;
    let r = tuning.bubble_radius;
    let width = tuning.field_width();
    let height = tuning.playfield_height;

    let mut vertices = Vec::with_capacity(
        (state.grid.bubble_count() + 4) * (BUBBLE_SEGMENTS as usize * 6) + 64,
    );

    // Playfield and overflow line
    vertices.extend(rect(Vec2::ZERO, Vec2::new(width, height), colors::PLAYFIELD));
    let line = tuning.overflow_line();
    vertices.extend(rect(
        Vec2::new(0.0, line - 1.0),
        Vec2::new(width, line + 1.0),
        colors::DANGER_LINE,
    ));

    for bubble in state.grid.bubbles() {
        push_bubble(&mut vertices, bubble.pos, r, bubble.color);
    }

    if let Some(projectile) = &state.projectile {
        push_bubble(&mut vertices, projectile.pos, r, projectile.color);
    }

    push_shooter(&mut vertices, state);

    if state.is_over() {
        push_overlay(&mut vertices, state.phase, width, height);
    }

    vertices
}

fn push_bubble(vertices: &mut Vec<Vertex>, center: Vec2, radius: f32, color: BubbleColor) {
    vertices.extend(circle(center, radius - 1.0, colors::bubble(color), BUBBLE_SEGMENTS));
    vertices.extend(circle(
        center - Vec2::splat(radius / 3.0),
        radius / 3.0,
        colors::HIGHLIGHT,
        8,
    ));
}

fn push_shooter(vertices: &mut Vec<Vertex>, state: &GameState) {
    let r = state.tuning.bubble_radius;
    let origin = state.shooter_position();
    let dir = aim_direction(state.shooter.aim_angle);

    // Dotted aim guide
    for i in 1..=GUIDE_DOTS {
        let p = origin + dir * (r * (1.0 + GUIDE_STEP * i as f32));
        vertices.extend(circle(p, r / 6.0, colors::AIM_GUIDE, 6));
    }
    vertices.extend(segment(origin, origin + dir * (r * 1.8), r / 3.0, colors::SHOOTER_RING));
    vertices.extend(ring(origin, r + 2.0, r + 5.0, colors::SHOOTER_RING, BUBBLE_SEGMENTS));

    // Loaded color sits in the shooter, the next one waits beside it
    if state.projectile.is_none() {
        push_bubble(vertices, origin, r, state.shooter.current_color);
    }
    let preview = origin + Vec2::new(-3.5 * r, r / 2.0);
    vertices.extend(circle(
        preview,
        r * 0.7,
        colors::bubble(state.shooter.next_color),
        BUBBLE_SEGMENTS,
    ));
}

fn push_overlay(vertices: &mut Vec<Vertex>, phase: GamePhase, width: f32, height: f32) {
    vertices.extend(rect(Vec2::ZERO, Vec2::new(width, height), colors::OVERLAY));
    let banner = match phase {
        GamePhase::Cleared => colors::BANNER_CLEARED,
        _ => colors::BANNER_OVERFLOWED,
    };
    let mid = height / 2.0;
    vertices.extend(rect(
        Vec2::new(0.0, mid - 40.0),
        Vec2::new(width, mid + 40.0),
        banner,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate_grid;
    use crate::tuning::Tuning;

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_scene_is_idempotent() {
        let mut state = GameState::new(4, Tuning::default());
        generate_grid(&mut state);
        let before = state.grid.bubble_count();

        let first = build_scene(&state);
        let second = build_scene(&state);
        assert_eq!(first, second);
        assert_eq!(state.grid.bubble_count(), before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_overlay_only_when_over() {
        let mut state = GameState::new(4, Tuning::default());
        generate_grid(&mut state);
        assert!(!has_color(&build_scene(&state), colors::OVERLAY));

        state.phase = GamePhase::Overflowed;
        let vertices = build_scene(&state);
        assert!(has_color(&vertices, colors::OVERLAY));
        assert!(has_color(&vertices, colors::BANNER_OVERFLOWED));

        state.phase = GamePhase::Cleared;
        assert!(has_color(&build_scene(&state), colors::BANNER_CLEARED));
    }

    #[test]
    fn test_every_bubble_color_is_drawn() {
        let mut state = GameState::new(4, Tuning::default());
        generate_grid(&mut state);
        let vertices = build_scene(&state);
        for color in state.grid.colors_in_play() {
            assert!(has_color(&vertices, colors::bubble(color)));
        }
    }
}
