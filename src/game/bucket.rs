use super::BUCKET_COUNT;
use super::square::{FallingSquare, SquareColor};
use crate::config::GameConfig;

/// Catch zone at the bottom of the canvas. Bucket `i` spans the i-th quarter
/// of the canvas width and accepts squares of color index `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bucket {
    pub fn layout(cfg: &GameConfig) -> [Bucket; BUCKET_COUNT] {
        let width = cfg.canvas_width / BUCKET_COUNT as f64;
        let y = cfg.canvas_height - cfg.bucket_height;
        std::array::from_fn(|index| Bucket {
            index,
            x: index as f64 * width,
            y,
            width,
            height: cfg.bucket_height,
        })
    }

    pub fn color(&self) -> SquareColor {
        // layout never produces more buckets than colors
        SquareColor::ALL[self.index % BUCKET_COUNT]
    }

    /// Horizontal extents overlap (half-open) and the square reached the band.
    pub fn overlaps(&self, sq: &FallingSquare) -> bool {
        sq.right() > self.x && sq.x < self.x + self.width && sq.bottom() >= self.y
    }

    pub fn accepts(&self, sq: &FallingSquare) -> bool {
        self.overlaps(sq) && sq.color() == self.color()
    }
}
