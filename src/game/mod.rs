//! Browser-free game core.
//!
//! `GameState` owns everything that changes during play: the falling squares,
//! per-bucket counts, the countdown and the current phase. The web shell calls
//! [`GameState::frame`] from `requestAnimationFrame`, [`GameState::tick_timer`]
//! from a one-second interval and [`GameState::nudge`] from key events, then
//! mirrors the result into the DOM. Nothing in here touches the browser, so
//! whole rounds can be simulated in native tests.

pub mod bucket;
pub mod rng;
pub mod shading;
pub mod square;

use crate::config::GameConfig;
use bucket::Bucket;
use rng::{RandomSource, SplitMix64};
use square::{FallingSquare, SquareColor};

pub const BUCKET_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn title(self) -> &'static str {
        match self {
            Outcome::Win => "You Win!",
            Outcome::Loss => "Game Over",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Win => "Congratulations! You collected enough squares.",
            Outcome::Loss => "You did not collect enough squares!",
        }
    }
}

/// `Intro -> Playing -> Ended(_) -> Playing -> ...`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Playing,
    Ended(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// What happened to a square that reached the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landing {
    pub color: SquareColor,
    /// Bucket whose count went up, `None` if the square was wasted.
    pub scored: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub spawned: bool,
    pub landings: Vec<Landing>,
    pub outcome: Option<Outcome>,
}

pub struct GameState<R: RandomSource = SplitMix64> {
    config: GameConfig,
    buckets: [Bucket; BUCKET_COUNT],
    squares: Vec<FallingSquare>,
    collected: [u32; BUCKET_COUNT],
    time_left: u32,
    phase: Phase,
    rng: R,
}

impl<R: RandomSource> GameState<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        let config = config.validated();
        Self {
            buckets: Bucket::layout(&config),
            time_left: config.time_limit_secs,
            config,
            squares: Vec::new(),
            collected: [0; BUCKET_COUNT],
            phase: Phase::Intro,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn buckets(&self) -> &[Bucket; BUCKET_COUNT] {
        &self.buckets
    }

    pub fn squares(&self) -> &[FallingSquare] {
        &self.squares
    }

    pub fn collected(&self) -> [u32; BUCKET_COUNT] {
        self.collected
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Leave the intro (or a finished round) and start playing.
    pub fn begin(&mut self) {
        if let Phase::Ended(_) = self.phase {
            self.reset();
        }
        self.phase = Phase::Playing;
        log::info!("round started: {}s on the clock", self.time_left);
    }

    /// Clear counts, falling squares and the clock. Phase is left alone.
    pub fn reset(&mut self) {
        self.collected = [0; BUCKET_COUNT];
        self.time_left = self.config.time_limit_secs;
        self.squares.clear();
    }

    /// Push a new square at the top with random x and color.
    pub fn spawn(&mut self) -> &FallingSquare {
        let x = self.rng.next_f64() * self.config.max_square_x();
        let color = SquareColor::ALL[self.rng.next_below(BUCKET_COUNT)];
        self.spawn_at(x, color)
    }

    /// Push a square at a chosen position; `x` is clamped onto the canvas.
    pub fn spawn_at(&mut self, x: f64, color: SquareColor) -> &FallingSquare {
        let x = x.clamp(0.0, self.config.max_square_x());
        self.squares.push(FallingSquare::new(x, 0.0, self.config.square_size, color));
        log::debug!("spawned {:?} square at x={x:.1}", color);
        &self.squares[self.squares.len() - 1]
    }

    /// Advance one animation frame of `dt` seconds.
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.is_playing() {
            return report;
        }
        if self.squares.is_empty() {
            self.spawn();
            report.spawned = true;
        }
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        let speed = self.config.fall_speed;
        for sq in &mut self.squares {
            sq.advance(speed, dt);
        }

        let floor = self.config.canvas_height;
        let mut i = 0;
        while i < self.squares.len() {
            if self.squares[i].bottom() < floor {
                i += 1;
                continue;
            }
            let sq = self.squares.remove(i);
            let landing = self.check_placement(&sq);
            report.landings.push(landing);
            if landing.scored.is_some() {
                if let Some(outcome) = self.check_win() {
                    report.outcome = Some(outcome);
                    break;
                }
            }
        }
        report
    }

    /// Score a square that reached the bottom. The caller has already taken
    /// it off the falling list.
    pub fn check_placement(&mut self, sq: &FallingSquare) -> Landing {
        let scored = self.buckets.iter().find(|b| b.accepts(sq)).map(|b| b.index);
        if let Some(idx) = scored {
            self.collected[idx] += 1;
            log::debug!("bucket {idx} now holds {}", self.collected[idx]);
        }
        Landing { color: sq.color(), scored }
    }

    pub fn all_buckets_full(&self) -> bool {
        self.collected.iter().all(|&c| c >= self.config.target_per_bucket)
    }

    /// End the round with a win if every bucket reached the target.
    pub fn check_win(&mut self) -> Option<Outcome> {
        if self.is_playing() && self.all_buckets_full() {
            self.end(Outcome::Win);
            return Some(Outcome::Win);
        }
        None
    }

    /// One second elapsed. Running out of time with every bucket full is a win.
    pub fn tick_timer(&mut self) -> Option<Outcome> {
        if !self.is_playing() {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }
        let outcome = if self.all_buckets_full() { Outcome::Win } else { Outcome::Loss };
        self.end(outcome);
        Some(outcome)
    }

    /// Move the newest square one step. Returns whether anything moved.
    pub fn nudge(&mut self, dir: Direction) -> bool {
        if !self.is_playing() {
            return false;
        }
        let step = match dir {
            Direction::Left => -self.config.nudge_step,
            Direction::Right => self.config.nudge_step,
        };
        let max_x = self.config.max_square_x();
        match self.squares.last_mut() {
            Some(sq) => {
                let before = sq.x;
                sq.shift(step, max_x);
                sq.x != before
            }
            None => false,
        }
    }

    /// Fraction of the time budget left, in `[0, 1]`.
    pub fn time_fraction(&self) -> f64 {
        self.time_left as f64 / self.config.time_limit_secs as f64
    }

    /// CSS width for the time bar, e.g. `"42.00%"`.
    pub fn time_bar_width(&self) -> String {
        format!("{:.2}%", self.time_fraction() * 100.0)
    }

    fn end(&mut self, outcome: Outcome) {
        log::info!("round over: {:?} with {:?}", outcome, self.collected);
        self.phase = Phase::Ended(outcome);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of raw values.
    struct Scripted(Vec<u64>, usize);

    impl RandomSource for Scripted {
        fn next_u64(&mut self) -> u64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    fn playing() -> GameState {
        let mut g = GameState::new(GameConfig::default(), SplitMix64::new(1));
        g.begin();
        g
    }

    #[test]
    fn starts_in_intro_and_ignores_frames() {
        let mut g = GameState::new(GameConfig::default(), SplitMix64::new(1));
        assert_eq!(g.phase(), Phase::Intro);
        assert_eq!(g.frame(0.016), FrameReport::default());
        assert!(g.squares().is_empty());
        assert_eq!(g.tick_timer(), None);
        assert_eq!(g.time_left(), 100);
    }

    #[test]
    fn spawn_stays_on_canvas() {
        let mut g = playing();
        for _ in 0..500 {
            let sq = g.spawn();
            assert!(sq.x >= 0.0 && sq.x <= 350.0);
            assert_eq!(sq.y, 0.0);
        }
    }

    #[test]
    fn spawn_uses_full_range() {
        // max u64 maps just below 1.0 and to the last color
        let mut g = GameState::new(GameConfig::default(), Scripted(vec![u64::MAX], 0));
        let sq = g.spawn().clone();
        assert!(sq.x > 349.9 && sq.x <= 350.0);
        assert_eq!(sq.color(), SquareColor::Yellow);
        let mut g = GameState::new(GameConfig::default(), Scripted(vec![0], 0));
        let sq = g.spawn().clone();
        assert_eq!(sq.x, 0.0);
        assert_eq!(sq.color(), SquareColor::Red);
    }

    #[test]
    fn frame_spawns_only_when_empty() {
        let mut g = playing();
        assert!(g.frame(0.016).spawned);
        assert!(!g.frame(0.016).spawned);
        assert_eq!(g.squares().len(), 1);
    }

    #[test]
    fn matching_landing_scores_once() {
        let mut g = playing();
        g.spawn_at(220.0, SquareColor::Green);
        let mut landings = Vec::new();
        for _ in 0..200 {
            let r = g.frame(1.0 / 60.0);
            landings.extend(r.landings);
            if !landings.is_empty() {
                break;
            }
        }
        assert_eq!(landings, vec![Landing { color: SquareColor::Green, scored: Some(2) }]);
        assert_eq!(g.collected(), [0, 0, 1, 0]);
        assert!(g.squares().is_empty());
    }

    #[test]
    fn mismatched_landing_is_wasted() {
        let mut g = playing();
        g.spawn_at(0.0, SquareColor::Blue);
        let sq = FallingSquare::new(0.0, 550.0, 50.0, SquareColor::Blue);
        assert_eq!(g.check_placement(&sq).scored, None);
        assert_eq!(g.collected(), [0; 4]);
    }

    #[test]
    fn large_dt_is_clamped() {
        let mut g = playing();
        g.spawn_at(0.0, SquareColor::Red);
        g.frame(10.0);
        // 0.1s * 300px/s
        assert!((g.squares()[0].y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn win_requires_every_bucket() {
        let mut g = playing();
        for color in [SquareColor::Red, SquareColor::Blue, SquareColor::Green] {
            for _ in 0..5 {
                let x = color.index() as f64 * 100.0 + 25.0;
                g.check_placement(&FallingSquare::new(x, 550.0, 50.0, color));
            }
        }
        for _ in 0..4 {
            g.check_placement(&FallingSquare::new(325.0, 550.0, 50.0, SquareColor::Yellow));
        }
        assert_eq!(g.check_win(), None);
        assert!(g.is_playing());

        g.spawn_at(325.0, SquareColor::Yellow);
        let mut outcome = None;
        for _ in 0..200 {
            if let Some(o) = g.frame(1.0 / 60.0).outcome {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(Outcome::Win));
        assert_eq!(g.phase(), Phase::Ended(Outcome::Win));
        assert_eq!(g.collected(), [0; 4]);
        assert_eq!(g.time_left(), 100);
    }

    #[test]
    fn timer_runs_out_to_loss() {
        let mut g = playing();
        for _ in 0..99 {
            assert_eq!(g.tick_timer(), None);
        }
        assert_eq!(g.time_left(), 1);
        assert_eq!(g.time_bar_width(), "1.00%");
        assert_eq!(g.tick_timer(), Some(Outcome::Loss));
        assert_eq!(g.phase(), Phase::Ended(Outcome::Loss));
        assert_eq!(g.time_left(), 100);
        // stopped after the end
        assert_eq!(g.tick_timer(), None);
    }

    #[test]
    fn full_buckets_at_time_up_win_instead_of_stalling() {
        let cfg = GameConfig { time_limit_secs: 1, ..GameConfig::default() };
        let mut g = GameState::new(cfg, SplitMix64::new(1));
        g.begin();
        for color in SquareColor::ALL {
            let x = color.index() as f64 * 100.0 + 25.0;
            for _ in 0..5 {
                g.check_placement(&FallingSquare::new(x, 550.0, 50.0, color));
            }
        }
        assert!(g.all_buckets_full());
        assert_eq!(g.tick_timer(), Some(Outcome::Win));
        assert_eq!(g.phase(), Phase::Ended(Outcome::Win));
        assert_eq!(g.time_left(), 1);
        assert_eq!(g.tick_timer(), None);
    }

    #[test]
    fn time_bar_width_has_bounded_precision() {
        let cfg = GameConfig { time_limit_secs: 60, ..GameConfig::default() };
        let mut g = GameState::new(cfg, SplitMix64::new(1));
        g.begin();
        assert_eq!(g.time_bar_width(), "100.00%");
        g.tick_timer();
        assert_eq!(g.time_bar_width(), "98.33%");
        assert!((g.time_fraction() - 59.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn nudge_moves_newest_square_only() {
        let mut g = playing();
        assert!(!g.nudge(Direction::Left));
        g.spawn_at(100.0, SquareColor::Red);
        g.spawn_at(200.0, SquareColor::Blue);
        assert!(g.nudge(Direction::Right));
        assert_eq!(g.squares()[0].x, 100.0);
        assert_eq!(g.squares()[1].x, 210.0);
        g.spawn_at(0.0, SquareColor::Green);
        assert!(!g.nudge(Direction::Left));
        assert_eq!(g.squares()[2].x, 0.0);
    }

    #[test]
    fn input_ignored_when_ended() {
        let mut g = playing();
        g.spawn_at(100.0, SquareColor::Red);
        for _ in 0..100 {
            g.tick_timer();
        }
        g.spawn_at(100.0, SquareColor::Red);
        assert!(!g.nudge(Direction::Right));
    }

    #[test]
    fn begin_after_end_starts_fresh_round() {
        let mut g = playing();
        g.spawn_at(100.0, SquareColor::Red);
        for _ in 0..100 {
            g.tick_timer();
        }
        g.begin();
        assert!(g.is_playing());
        assert!(g.squares().is_empty());
        assert_eq!(g.time_bar_width(), "100.00%");
    }
}
