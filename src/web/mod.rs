//! Browser shell around the game core.
//!
//! One `Session` lives in a thread-local and is touched only from browser
//! callbacks: the intro timeout, the animation frame, the one-second timer
//! interval and the keydown listener. They never run concurrently.

mod dom;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, KeyboardEvent, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::rng::SplitMix64;
use crate::game::{Direction, GameState, Outcome, Phase};
use dom::Hud;

const TIMER_PERIOD_MS: i32 = 1000;

struct Session {
    ctx: CanvasRenderingContext2d,
    hud: Hud,
    game: GameState,
    timer_handle: Option<i32>,
    frame_loop: FrameLoop,
    last_frame_ms: Option<f64>,
}

/// Tracks whether a `requestAnimationFrame` chain is alive, so a restart
/// never starts a second one.
#[derive(Debug, Default)]
struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    /// True if the caller must request the first frame.
    fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

/// What a key press asks of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Nudge(Direction),
    Restart,
}

/// Map a `KeyboardEvent::key` to an action; keys that do nothing in `phase` map to `None`.
pub fn key_action(key: &str, phase: Phase) -> Option<KeyAction> {
    match (key, phase) {
        ("ArrowLeft", Phase::Playing) => Some(KeyAction::Nudge(Direction::Left)),
        ("ArrowRight", Phase::Playing) => Some(KeyAction::Nudge(Direction::Right)),
        ("Enter" | " ", Phase::Ended(_)) => Some(KeyAction::Restart),
        _ => None,
    }
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static TIMER_CALLBACK: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
    static FRAME_CALLBACK: FrameCallback = Rc::new(RefCell::new(None));
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Option<T> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Phase of the running game, `None` before [`launch`].
pub fn phase() -> Option<Phase> {
    with_session(|s| s.game.phase())
}

/// Bind to the page, show the intro and schedule the first round.
pub fn launch(config: GameConfig) -> Result<(), GameError> {
    if SESSION.with(|cell| cell.borrow().is_some()) {
        return Err(GameError::AlreadyStarted);
    }
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;
    let config = config.validated();

    let (_canvas, ctx) = dom::bind_canvas(&doc, &config)?;
    let hud = Hud::bind(&doc, &config)?;
    let game = GameState::new(config, SplitMix64::from_entropy());
    hud.set_counts(&game.collected());
    hud.set_time_bar(&game.time_bar_width());
    hud.show_intro(true);
    let intro_delay = game.config().intro_delay_ms;

    SESSION.with(|cell| {
        cell.replace(Some(Session {
            ctx,
            hud,
            game,
            timer_handle: None,
            frame_loop: FrameLoop::default(),
            last_frame_ms: None,
        }))
    });

    install_callbacks();
    install_key_listener(&doc)?;

    let begin = Closure::once_into_js(move || {
        if let Err(err) = begin_round() {
            log::error!("could not start round: {err}");
        }
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(begin.unchecked_ref(), intro_delay)?;
    log::info!("intro shown, first round in {intro_delay}ms");
    Ok(())
}

/// Intro (or end screen) -> Playing: start the clock and the frame loop.
fn begin_round() -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let start_loop = with_session(|s| -> Result<bool, GameError> {
        s.game.begin();
        s.hud.show_intro(false);
        s.hud.set_counts(&s.game.collected());
        s.hud.set_time_bar(&s.game.time_bar_width());
        s.last_frame_ms = None;

        if let Some(handle) = s.timer_handle.take() {
            win.clear_interval_with_handle(handle);
        }
        let handle = TIMER_CALLBACK.with(|cb| -> Result<Option<i32>, GameError> {
            match cb.borrow().as_ref() {
                Some(cb) => Ok(Some(win.set_interval_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    TIMER_PERIOD_MS,
                )?)),
                None => Ok(None),
            }
        })?;
        s.timer_handle = handle;

        Ok(s.frame_loop.claim())
    })
    .ok_or(GameError::NotStarted)??;

    if start_loop {
        request_frame(&win);
    }
    Ok(())
}

fn install_callbacks() {
    TIMER_CALLBACK.with(|cb| {
        cb.replace(Some(Closure::wrap(Box::new(on_timer) as Box<dyn FnMut()>)));
    });
    FRAME_CALLBACK.with(|f| {
        f.replace(Some(Closure::wrap(Box::new(move |ts: f64| {
            let keep_going = with_session(|s| s.on_frame(ts)).unwrap_or(false);
            if keep_going {
                if let Some(w) = window() {
                    request_frame(&w);
                }
            }
        }) as Box<dyn FnMut(f64)>)));
    });
}

fn request_frame(win: &web_sys::Window) {
    FRAME_CALLBACK.with(|f| {
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    });
}

fn on_timer() {
    with_session(|s| {
        let outcome = s.game.tick_timer();
        s.hud.set_time_bar(&s.game.time_bar_width());
        if let Some(outcome) = outcome {
            s.finish(outcome);
        }
    });
}

fn install_key_listener(doc: &web_sys::Document) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        let Some(action) = phase().and_then(|p| key_action(&evt.key(), p)) else {
            return;
        };
        evt.prevent_default();
        match action {
            KeyAction::Nudge(dir) => {
                with_session(|s| s.game.nudge(dir));
            }
            KeyAction::Restart => {
                if let Err(err) = begin_round() {
                    log::error!("could not restart: {err}");
                }
            }
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

impl Session {
    /// One animation frame. Returns whether the loop should continue.
    fn on_frame(&mut self, ts: f64) -> bool {
        if !self.game.is_playing() {
            self.frame_loop.stop();
            return false;
        }
        let dt = self.last_frame_ms.map_or(0.0, |last| (ts - last).max(0.0) / 1000.0);
        self.last_frame_ms = Some(ts);

        let report = self.game.frame(dt);
        for landing in &report.landings {
            if let Some(idx) = landing.scored {
                self.hud.set_count(idx, self.game.collected()[idx]);
            }
        }
        if let Some(outcome) = report.outcome {
            self.finish(outcome);
            self.frame_loop.stop();
            return false;
        }
        render::draw_frame(&self.ctx, &self.game);
        true
    }

    /// Game has ended (core state already reset): stop the clock, show the result.
    fn finish(&mut self, outcome: Outcome) {
        if let Some(handle) = self.timer_handle.take() {
            if let Some(w) = window() {
                w.clear_interval_with_handle(handle);
            }
        }
        render::draw_end_overlay(&self.ctx, self.game.config(), outcome);
        self.hud.set_counts(&self.game.collected());
        self.hud.set_time_bar(&self.game.time_bar_width());
        log::info!("{}: {}", outcome.title(), outcome.message());
    }
}
