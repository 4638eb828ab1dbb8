//! Game balance and playfield geometry
//!
//! Loaded from JSON (all fields optional, missing ones take the shipped
//! defaults) and validated before a game is built from it.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::BubbleColor;

/// Which colors the shooter may load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaletteRule {
    /// Only colors still present in the grid; full palette once the grid is empty
    #[default]
    InPlay,
    /// Any palette color, regardless of what is left in the grid
    Full,
}

impl PaletteRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteRule::InPlay => "in_play",
            PaletteRule::Full => "full",
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Grid needs at least one column")]
    NoColumns,
    #[error("Bubble radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("Color count must be between 1 and {max}, got {got}")]
    InvalidColorCount { got: usize, max: usize },
    #[error("Projectile speed must be positive, got {0}")]
    InvalidSpeed(f32),
    #[error("Aim range [{min}°, {max}°] must lie inside (0°, 180°) with min < max")]
    InvalidAimRange { min: f32, max: f32 },
    #[error("Aim rotate speed must not be negative, got {0}")]
    InvalidRotateSpeed(f32),
    #[error("Overflow margin must not be negative, got {0}")]
    InvalidOverflowMargin(f32),
    #[error("Initial rows reach the overflow line ({rows} rows)")]
    InitialRowsOverflow { rows: usize },
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    /// Cells per row
    pub columns: usize,
    /// Full rows generated at the start of a game
    pub initial_rows: usize,
    /// Bubble radius in pixels
    pub bubble_radius: f32,
    /// How many of `BubbleColor::ALL` are in use
    pub color_count: usize,
    /// Where the shooter draws its colors from
    pub palette_rule: PaletteRule,

    // === Shooter ===
    /// Projectile speed (pixels/s)
    pub projectile_speed: f32,
    /// Lowest aim angle in degrees (0° = right, 90° = up)
    pub aim_min_deg: f32,
    /// Highest aim angle in degrees
    pub aim_max_deg: f32,
    /// Arrow-key rotation speed (radians/s)
    pub aim_rotate_speed: f32,

    // === Playfield ===
    /// Total playfield height in pixels
    pub playfield_height: f32,
    /// Distance from the bottom edge up to the shooter center
    pub shooter_offset: f32,
    /// Distance above the shooter where grid bubbles cause a loss
    pub overflow_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            columns: 12,
            initial_rows: 6,
            bubble_radius: 16.0,
            color_count: 5,
            palette_rule: PaletteRule::InPlay,

            projectile_speed: 900.0,
            aim_min_deg: 20.0,
            aim_max_deg: 160.0,
            aim_rotate_speed: 2.0,

            playfield_height: 560.0,
            shooter_offset: 40.0,
            overflow_margin: 48.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value a game relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.columns == 0 {
            return Err(TuningError::NoColumns);
        }
        if !(self.bubble_radius > 0.0) {
            return Err(TuningError::InvalidRadius(self.bubble_radius));
        }
        let max = BubbleColor::ALL.len();
        if self.color_count == 0 || self.color_count > max {
            return Err(TuningError::InvalidColorCount {
                got: self.color_count,
                max,
            });
        }
        if !(self.projectile_speed > 0.0) {
            return Err(TuningError::InvalidSpeed(self.projectile_speed));
        }
        if !(self.aim_min_deg > 0.0 && self.aim_min_deg < self.aim_max_deg && self.aim_max_deg < 180.0)
        {
            return Err(TuningError::InvalidAimRange {
                min: self.aim_min_deg,
                max: self.aim_max_deg,
            });
        }
        if !(self.aim_rotate_speed >= 0.0) {
            return Err(TuningError::InvalidRotateSpeed(self.aim_rotate_speed));
        }
        if !(self.overflow_margin >= 0.0) {
            return Err(TuningError::InvalidOverflowMargin(self.overflow_margin));
        }
        if self.initial_rows > 0 {
            let last_row_y = self.bubble_radius + (self.initial_rows - 1) as f32 * self.row_height();
            if last_row_y >= self.overflow_line() {
                return Err(TuningError::InitialRowsOverflow {
                    rows: self.initial_rows,
                });
            }
        }
        Ok(())
    }

    /// Colors in use this game
    pub fn palette(&self) -> &'static [BubbleColor] {
        &BubbleColor::ALL[..self.color_count.clamp(1, BubbleColor::ALL.len())]
    }

    /// Vertical distance between row centers (tight hex packing)
    #[inline]
    pub fn row_height(&self) -> f32 {
        self.bubble_radius * 3.0_f32.sqrt()
    }

    /// Playfield width: one extra radius so shifted odd rows fit
    #[inline]
    pub fn field_width(&self) -> f32 {
        (2 * self.columns + 1) as f32 * self.bubble_radius
    }

    /// Shooter center in playfield pixels
    pub fn shooter_position(&self) -> Vec2 {
        Vec2::new(
            self.field_width() / 2.0,
            self.playfield_height - self.shooter_offset,
        )
    }

    /// Grid bubbles whose centers pass below this line end the game
    pub fn overflow_line(&self) -> f32 {
        self.shooter_position().y - self.overflow_margin
    }

    /// Aim bounds in radians
    pub fn aim_range(&self) -> (f32, f32) {
        (self.aim_min_deg.to_radians(), self.aim_max_deg.to_radians())
    }
}
