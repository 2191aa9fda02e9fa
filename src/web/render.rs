use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::GameConfig;
use crate::game::rng::RandomSource;
use crate::game::{GameState, Outcome, shading};

const RESTART_HINT: &str = "Press Enter to play again";

/// Clear the canvas and paint every falling square. Read-only on the state.
pub fn draw_frame<R: RandomSource>(ctx: &CanvasRenderingContext2d, game: &GameState<R>) {
    let cfg = game.config();
    ctx.clear_rect(0.0, 0.0, cfg.canvas_width, cfg.canvas_height);
    draw_bucket_guides(ctx, game);
    for sq in game.squares() {
        for layer in shading::layers(sq) {
            ctx.set_fill_style(&JsValue::from_str(layer.fill));
            ctx.fill_rect(layer.x, layer.y, layer.w, layer.h);
        }
    }
}

// Faint tint over each catch band so the target zones are visible.
fn draw_bucket_guides<R: RandomSource>(ctx: &CanvasRenderingContext2d, game: &GameState<R>) {
    ctx.set_global_alpha(0.15);
    for b in game.buckets() {
        ctx.set_fill_style(&JsValue::from_str(b.color().css()));
        ctx.fill_rect(b.x, b.y, b.width, b.height);
    }
    ctx.set_global_alpha(1.0);
}

pub fn draw_end_overlay(ctx: &CanvasRenderingContext2d, cfg: &GameConfig, outcome: Outcome) {
    let (w, h) = (cfg.canvas_width, cfg.canvas_height);
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style(&JsValue::from_str("rgba(0, 0, 0, 0.7)"));
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style(&JsValue::from_str("white"));
    ctx.set_text_align("center");
    ctx.set_font("48px Arial");
    ctx.fill_text(outcome.title(), w / 2.0, h / 2.0 - 30.0).ok();
    ctx.set_font("24px Arial");
    ctx.fill_text(outcome.message(), w / 2.0, h / 2.0 + 20.0).ok();
    ctx.set_font("16px Arial");
    ctx.fill_text(RESTART_HINT, w / 2.0, h / 2.0 + 60.0).ok();
}
