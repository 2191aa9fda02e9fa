// Falling squares and their colors.

/// The four square colors; the discriminant is the index of the matching bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SquareColor {
    Red = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
}

impl SquareColor {
    pub const ALL: [SquareColor; 4] = [
        SquareColor::Red,
        SquareColor::Blue,
        SquareColor::Green,
        SquareColor::Yellow,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// CSS color used for the square body and its bucket.
    pub fn css(self) -> &'static str {
        match self {
            SquareColor::Red => "red",
            SquareColor::Blue => "blue",
            SquareColor::Green => "green",
            SquareColor::Yellow => "yellow",
        }
    }
}

/// A square on its way down. Color is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingSquare {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    color: SquareColor,
}

impl FallingSquare {
    pub fn new(x: f64, y: f64, size: f64, color: SquareColor) -> Self {
        Self { x, y, width: size, height: size, color }
    }

    pub fn color(&self) -> SquareColor {
        self.color
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Move down by `speed` px/s over `dt` seconds.
    pub fn advance(&mut self, speed: f64, dt: f64) {
        self.y += speed * dt;
    }

    /// Shift horizontally, keeping the square within `[0, max_x]`.
    pub fn shift(&mut self, dx: f64, max_x: f64) {
        self.x = (self.x + dx).clamp(0.0, max_x);
    }
}
