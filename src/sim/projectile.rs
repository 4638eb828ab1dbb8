//! Projectile motion against the side walls, the ceiling and the grid
//!
//! The projectile moves in a straight line at constant speed. Side walls
//! reflect it; touching the ceiling or any grid bubble stops it so it can be
//! snapped into the grid.

use glam::Vec2;

use super::grid::{BubbleColor, Grid};
use super::state::Projectile;
use crate::aim_direction;
use crate::consts::CONTACT_EPSILON;

/// What one step of motion did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    /// Still moving freely
    Flying,
    /// Still moving, reflected off a side wall this step
    Bounced,
    /// Stopped against the ceiling or a grid bubble
    Landed,
    /// Passed below the shooter line without landing
    Escaped,
}

impl Projectile {
    /// Fire from `origin` along the aim angle
    pub fn launch(origin: Vec2, angle: f32, speed: f32, color: BubbleColor) -> Self {
        Self {
            pos: origin,
            vel: aim_direction(angle) * speed,
            color,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Whether a bubble centered at `pos` touches any grid bubble
pub fn touches_grid(pos: Vec2, grid: &Grid) -> bool {
    let reach = 2.0 * grid.radius() - CONTACT_EPSILON;
    let reach_sq = reach * reach;
    grid.bubbles()
        .any(|bubble| bubble.pos.distance_squared(pos) <= reach_sq)
}

/// Advance the projectile by `dt` seconds
///
/// `field_width` bounds the side walls; `shooter_y` is the line below which
/// a shot counts as lost. The move is split into pieces no longer than one
/// bubble radius so contact is never stepped over.
pub fn step_projectile(
    projectile: &mut Projectile,
    grid: &Grid,
    field_width: f32,
    shooter_y: f32,
    dt: f32,
) -> ProjectileStep {
    let r = grid.radius();
    let pieces = ((projectile.vel.length() * dt) / r).ceil().max(1.0) as u32;
    let piece_dt = dt / pieces as f32;

    let mut bounced = false;
    for _ in 0..pieces {
        match move_piece(projectile, grid, field_width, shooter_y, piece_dt) {
            ProjectileStep::Flying => {}
            ProjectileStep::Bounced => bounced = true,
            done => return done,
        }
    }

    if bounced {
        ProjectileStep::Bounced
    } else {
        ProjectileStep::Flying
    }
}

fn move_piece(
    projectile: &mut Projectile,
    grid: &Grid,
    field_width: f32,
    shooter_y: f32,
    dt: f32,
) -> ProjectileStep {
    let r = grid.radius();
    projectile.pos += projectile.vel * dt;

    let mut bounced = false;
    if projectile.pos.x - r < 0.0 {
        projectile.pos.x = r;
        if projectile.vel.x < 0.0 {
            projectile.vel = reflect_velocity(projectile.vel, Vec2::X);
        }
        bounced = true;
    } else if projectile.pos.x + r > field_width {
        projectile.pos.x = field_width - r;
        if projectile.vel.x > 0.0 {
            projectile.vel = reflect_velocity(projectile.vel, Vec2::NEG_X);
        }
        bounced = true;
    }

    if projectile.pos.y - r <= 0.0 || touches_grid(projectile.pos, grid) {
        return ProjectileStep::Landed;
    }

    if projectile.pos.y > shooter_y {
        return ProjectileStep::Escaped;
    }

    if bounced {
        ProjectileStep::Bounced
    } else {
        ProjectileStep::Flying
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Cell;

    const WIDTH: f32 = 400.0;
    const SHOOTER_Y: f32 = 520.0;
    const DT: f32 = 1.0 / 120.0;

    fn empty_grid() -> Grid {
        Grid::new(12, 16.0)
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(-100.0, -50.0), Vec2::X);
        assert!((reflected.x - 100.0).abs() < 0.001);
        assert!((reflected.y + 50.0).abs() < 0.001);
    }

    #[test]
    fn test_launch_straight_up() {
        let p = Projectile::launch(
            Vec2::new(200.0, SHOOTER_Y),
            std::f32::consts::FRAC_PI_2,
            900.0,
            BubbleColor::Red,
        );
        assert!(p.vel.x.abs() < 1e-3);
        assert!((p.vel.y + 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_left_wall_bounce() {
        let grid = empty_grid();
        let mut p = Projectile {
            pos: Vec2::new(18.0, 300.0),
            vel: Vec2::new(-600.0, -600.0),
            color: BubbleColor::Red,
        };
        let step = step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT);
        assert_eq!(step, ProjectileStep::Bounced);
        assert_eq!(p.pos.x, 16.0);
        assert!(p.vel.x > 0.0);
        assert!(p.vel.y < 0.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let grid = empty_grid();
        let mut p = Projectile {
            pos: Vec2::new(WIDTH - 18.0, 300.0),
            vel: Vec2::new(600.0, -600.0),
            color: BubbleColor::Red,
        };
        assert_eq!(
            step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT),
            ProjectileStep::Bounced
        );
        assert_eq!(p.pos.x, WIDTH - 16.0);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_speed_is_constant() {
        let grid = empty_grid();
        let mut p = Projectile::launch(Vec2::new(200.0, SHOOTER_Y), 0.5, 900.0, BubbleColor::Blue);
        for _ in 0..200 {
            if step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT) == ProjectileStep::Landed {
                break;
            }
            assert!((p.vel.length() - 900.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_lands_on_ceiling() {
        let grid = empty_grid();
        let mut p = Projectile {
            pos: Vec2::new(200.0, 20.0),
            vel: Vec2::new(0.0, -900.0),
            color: BubbleColor::Red,
        };
        assert_eq!(
            step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT),
            ProjectileStep::Landed
        );
    }

    #[test]
    fn test_lands_on_grid_bubble() {
        let mut grid = empty_grid();
        let bubble = grid.place(Cell::new(3, 5), BubbleColor::Green);
        let mut p = Projectile {
            pos: bubble.pos + Vec2::new(0.0, 36.0),
            vel: Vec2::new(0.0, -900.0),
            color: BubbleColor::Red,
        };
        assert_eq!(
            step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT),
            ProjectileStep::Landed
        );
        assert!(touches_grid(p.pos, &grid));
    }

    #[test]
    fn test_escapes_below_shooter() {
        let grid = empty_grid();
        let mut p = Projectile {
            pos: Vec2::new(200.0, SHOOTER_Y - 1.0),
            vel: Vec2::new(0.0, 900.0),
            color: BubbleColor::Red,
        };
        assert_eq!(
            step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT),
            ProjectileStep::Escaped
        );
    }

    #[test]
    fn test_fast_shot_stops_at_first_bubble() {
        let mut grid = empty_grid();
        let blocker = grid.place(Cell::new(3, 5), BubbleColor::Green);
        let mut p = Projectile {
            pos: blocker.pos + Vec2::new(0.0, 31.0),
            vel: Vec2::new(0.0, -8000.0),
            color: BubbleColor::Red,
        };
        assert_eq!(
            step_projectile(&mut p, &grid, WIDTH, SHOOTER_Y, DT),
            ProjectileStep::Landed
        );
        assert!(touches_grid(p.pos, &grid));
        assert!(p.pos.y > blocker.pos.y, "passed the blocker: {:?}", p.pos);
    }
}
