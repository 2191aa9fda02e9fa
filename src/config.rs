//! Gameplay tunables.
//!
//! Defaults reproduce the classic page: a 400x600 canvas, 50px squares, a
//! 100 second budget and five squares per bucket to win. With the `serde_json`
//! feature a host page can override any subset of fields from JSON.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All knobs the game core and the web shell read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Squares are always square; width == height.
    pub square_size: f64,
    /// Fall speed in pixels per second (classic: 5px per frame at 60 fps).
    pub fall_speed: f64,
    /// Frames longer than this (seconds) are clamped, e.g. after a hidden tab resumes.
    pub max_frame_dt: f64,
    /// Horizontal shift applied per arrow key press.
    pub nudge_step: f64,
    /// Height of the catch band at the bottom of the canvas.
    pub bucket_height: f64,
    pub target_per_bucket: u32,
    pub time_limit_secs: u32,
    pub intro_delay_ms: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 600.0,
            square_size: 50.0,
            fall_speed: 300.0,
            max_frame_dt: 0.1,
            nudge_step: 10.0,
            bucket_height: 100.0,
            target_per_bucket: 5,
            time_limit_secs: 100,
            intro_delay_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::GameError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        Ok(cfg.validated())
    }

    /// Replace values the game cannot run with by the defaults (or clamp them).
    pub fn validated(mut self) -> Self {
        let d = GameConfig::default();
        self.canvas_width = positive_or(self.canvas_width, d.canvas_width);
        self.canvas_height = positive_or(self.canvas_height, d.canvas_height);
        self.square_size = positive_or(self.square_size, d.square_size)
            .min(self.canvas_width)
            .min(self.canvas_height);
        self.fall_speed = positive_or(self.fall_speed, d.fall_speed);
        self.max_frame_dt = positive_or(self.max_frame_dt, d.max_frame_dt);
        if !(self.nudge_step.is_finite() && self.nudge_step >= 0.0) {
            self.nudge_step = d.nudge_step;
        }
        if !self.bucket_height.is_finite() {
            self.bucket_height = d.bucket_height;
        }
        self.bucket_height = self.bucket_height.clamp(0.0, self.canvas_height);
        self.target_per_bucket = self.target_per_bucket.max(1);
        self.time_limit_secs = self.time_limit_secs.max(1);
        self.intro_delay_ms = self.intro_delay_ms.max(0);
        self
    }

    /// Largest x a square may take while staying fully on the canvas.
    pub fn max_square_x(&self) -> f64 {
        (self.canvas_width - self.square_size).max(0.0)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}
