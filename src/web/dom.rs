// Page elements: reuse what the host page provides, create the rest.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::BUCKET_COUNT;
use crate::game::square::SquareColor;

pub const CANVAS_ID: &str = "gameCanvas";
pub const TIME_BAR_ID: &str = "timeBar";
pub const INTRO_ID: &str = "intro";

pub fn bucket_id(idx: usize) -> String {
    format!("bucket{}", idx + 1)
}

/// HUD elements mirrored from `GameState` after every change.
pub struct Hud {
    pub buckets: [HtmlElement; BUCKET_COUNT],
    pub time_bar: HtmlElement,
    pub intro: HtmlElement,
}

impl Hud {
    pub fn bind(doc: &Document, cfg: &GameConfig) -> Result<Self, GameError> {
        let bucket_w = cfg.canvas_width / BUCKET_COUNT as f64;
        let mut buckets = Vec::with_capacity(BUCKET_COUNT);
        for (idx, color) in SquareColor::ALL.iter().enumerate() {
            let style = format!(
                "position:fixed; top:{top}px; left:calc(50% - {half}px + {left}px); width:{bucket_w}px; text-align:center; font-family:'Fira Code', monospace; font-size:20px; color:#fff; background:{css}; opacity:0.85; border-radius:0 0 6px 6px; z-index:30;",
                top = 24.0 + cfg.canvas_height,
                half = cfg.canvas_width / 2.0,
                left = idx as f64 * bucket_w,
                css = color.css(),
            );
            let el = ensure_element(doc, &bucket_id(idx), "div", &style)?;
            el.set_class_name("bucket");
            buckets.push(el);
        }
        let buckets: [HtmlElement; BUCKET_COUNT] = buckets
            .try_into()
            .map_err(|_| GameError::Js("bucket count mismatch".into()))?;

        let time_bar = ensure_element(
            doc,
            TIME_BAR_ID,
            "div",
            &format!(
                "position:fixed; top:8px; left:calc(50% - {half}px); width:100%; max-width:{w}px; height:10px; background:#4caf50; border-radius:5px; z-index:30;",
                half = cfg.canvas_width / 2.0,
                w = cfg.canvas_width,
            ),
        )?;
        let intro = ensure_element(
            doc,
            INTRO_ID,
            "div",
            "position:fixed; left:50%; top:40%; transform:translate(-50%,-50%); padding:24px 32px; background:rgba(0,0,0,0.8); color:#fff; font-family:Arial, sans-serif; font-size:20px; text-align:center; border-radius:12px; z-index:50; display:none;",
        )?;
        if intro.inner_html().is_empty() {
            intro.set_inner_html(
                "<h2 style='margin:0 0 8px 0;'>Bucket Drop</h2>Steer each square with &larr; &rarr; into the bucket of its color.<br>Fill every bucket before the time runs out!",
            );
        }
        Ok(Self { buckets, time_bar, intro })
    }

    pub fn set_count(&self, idx: usize, count: u32) {
        if let Some(el) = self.buckets.get(idx) {
            el.set_inner_text(&count.to_string());
        }
    }

    pub fn set_counts(&self, counts: &[u32; BUCKET_COUNT]) {
        for (idx, count) in counts.iter().enumerate() {
            self.set_count(idx, *count);
        }
    }

    pub fn set_time_bar(&self, width: &str) {
        set_style(&self.time_bar, "width", width);
    }

    pub fn show_intro(&self, visible: bool) {
        set_style(&self.intro, "display", if visible { "block" } else { "none" });
    }
}

/// Find or create the game canvas sized to the config, plus its 2d context.
pub fn bind_canvas(
    doc: &Document,
    cfg: &GameConfig,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), GameError> {
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| GameError::WrongElement(CANVAS_ID.into(), "canvas"))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into()
                .map_err(|_| GameError::WrongElement(CANVAS_ID.into(), "canvas"))?;
            c.set_id(CANVAS_ID);
            c.set_attribute(
                "style",
                "position:fixed; left:50%; top:24px; transform:translateX(-50%); background:#181818; border:2px solid #222; z-index:20;",
            )?;
            doc.body().ok_or(GameError::NoBody)?.append_child(&c)?;
            c
        }
    };
    canvas.set_width(cfg.canvas_width as u32);
    canvas.set_height(cfg.canvas_height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| GameError::NoContext(CANVAS_ID.into()))?
        .dyn_into()
        .map_err(|_| GameError::NoContext(CANVAS_ID.into()))?;
    Ok((canvas, ctx))
}

fn ensure_element(doc: &Document, id: &str, tag: &str, style: &str) -> Result<HtmlElement, GameError> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into()
            .map_err(|_| GameError::WrongElement(id.into(), "html element"));
    }
    let el: HtmlElement = doc
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| GameError::WrongElement(id.into(), "html element"))?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    doc.body().ok_or(GameError::NoBody)?.append_child(&el)?;
    Ok(el)
}

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(err) = el.style().set_property(prop, value) {
        log::warn!("could not set {prop}: {err:?}");
    }
}
