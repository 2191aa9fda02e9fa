use super::square::FallingSquare;

const SHADOW_OFFSET: f64 = 5.0;
const HIGHLIGHT_THICKNESS: f64 = 5.0;
const SHADOW_FILL: &str = "rgba(0, 0, 0, 0.3)";
const HIGHLIGHT_FILL: &str = "rgba(255, 255, 255, 0.5)";

/// One filled rectangle of a square's pseudo-3D look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub fill: &'static str,
}

/// Layers in paint order: drop shadow, body, top highlight, left highlight.
pub fn layers(sq: &FallingSquare) -> [Layer; 4] {
    [
        Layer { x: sq.x + SHADOW_OFFSET, y: sq.y + SHADOW_OFFSET, w: sq.width, h: sq.height, fill: SHADOW_FILL },
        Layer { x: sq.x, y: sq.y, w: sq.width, h: sq.height, fill: sq.color().css() },
        Layer { x: sq.x, y: sq.y, w: sq.width, h: HIGHLIGHT_THICKNESS, fill: HIGHLIGHT_FILL },
        Layer { x: sq.x, y: sq.y, w: HIGHLIGHT_THICKNESS, h: sq.height, fill: HIGHLIGHT_FILL },
    ]
}
