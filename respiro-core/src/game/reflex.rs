//! Target-chasing reflex game
//!
//! The player steers a green cursor with the analog stick and has to land
//! on the red target a fixed number of times before the deadline. Each
//! hit moves the target to another cell.
//!
//! ```text
//! AwaitingStart ──start──► Playing ──hits == target──► Success
//!                            ▲  │
//!                      retry │  └──deadline──► TimedOut
//!                            └─────────────────────┘
//! ```
//!
//! The game is tick-driven: the caller samples the stick and calls
//! [`ReflexGame::tick`] at its polling cadence. Nothing here sleeps.

use smart_leds::RGB8;

use crate::input::{Direction, StickConfig, StickMapper, StickSample};
use crate::matrix::{palette, MatrixError, MatrixRenderer, CELL_COUNT, MATRIX_SIZE};
use crate::traits::LedStrip;
use crate::{Micros, MICROS_PER_MS};

/// Cell coordinate on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Create a position
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Position from a row-major cell index
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % MATRIX_SIZE) as u8,
            y: (index / MATRIX_SIZE) as u8,
        }
    }

    /// Row-major cell index
    pub const fn index(&self) -> usize {
        self.y as usize * MATRIX_SIZE + self.x as usize
    }

    /// Check if the position is on the grid
    pub const fn on_grid(&self) -> bool {
        (self.x as usize) < MATRIX_SIZE && (self.y as usize) < MATRIX_SIZE
    }

    /// Move one step in `direction`, staying on the grid
    pub fn step(self, direction: Direction) -> Self {
        let max = MATRIX_SIZE as i16 - 1;
        let x = (self.x as i16 + direction.dx as i16).clamp(0, max);
        let y = (self.y as i16 + direction.dy as i16).clamp(0, max);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }
}

/// Game parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflexConfig {
    /// Hits needed to win a round
    pub hits_target: u8,
    /// Round length in milliseconds
    pub time_budget_ms: u32,
    /// Seed for target placement
    pub seed: u64,
    /// Player start cell
    pub start: Position,
    /// Target cell color
    pub target_color: RGB8,
    /// Player cursor color
    pub player_color: RGB8,
}

impl Default for ReflexConfig {
    fn default() -> Self {
        Self {
            hits_target: 10,
            time_budget_ms: 30_000,
            seed: 0x5EED_CAFE,
            start: Position::new(2, 2),
            target_color: palette::TARGET,
            player_color: palette::PLAYER,
        }
    }
}

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Not started yet
    AwaitingStart,
    /// Round in progress
    Playing,
    /// Hit target reached in time
    Success,
    /// Deadline passed; waiting for a retry
    TimedOut,
}

/// Live round data, only present while a round is in progress or timed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    pub target: Position,
    pub player: Position,
    pub hits: u8,
    /// Absolute round deadline
    pub deadline: Micros,
}

/// Outcome of a game operation worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameEvent {
    /// Round started
    Started,
    /// Target hit; carries the new hit count
    Hit(u8),
    /// Hit target reached
    Won,
    /// Deadline passed with too few hits
    TimedOut,
    /// Round restarted after a timeout
    Retried,
}

/// Reflex game engine
#[derive(Debug)]
pub struct ReflexGame {
    config: ReflexConfig,
    phase: GamePhase,
    state: Option<GameState>,
    mapper: StickMapper,
    rng: fastrand::Rng,
}

impl ReflexGame {
    /// Create a new game
    pub fn new(config: ReflexConfig, stick: StickConfig) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(config.seed),
            config,
            phase: GamePhase::AwaitingStart,
            state: None,
            mapper: StickMapper::new(stick),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ReflexConfig {
        &self.config
    }

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Live round data
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Hits in the current round (0 when no round is live)
    pub fn hits(&self) -> u8 {
        self.state.map_or(0, |s| s.hits)
    }

    /// Stick mapper used to steer the player
    pub fn mapper(&self) -> &StickMapper {
        &self.mapper
    }

    /// Milliseconds left in the round
    pub fn remaining_ms(&self, now: Micros) -> u32 {
        match (self.phase, self.state) {
            (GamePhase::Playing, Some(state)) => {
                (state.deadline.saturating_sub(now) / MICROS_PER_MS) as u32
            }
            _ => 0,
        }
    }

    /// Start a round
    ///
    /// Only valid from `AwaitingStart` or after a finished round; ignored
    /// while a round is live.
    pub fn start<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<Option<GameEvent>, MatrixError> {
        match self.phase {
            GamePhase::AwaitingStart | GamePhase::Success => {
                self.begin_round(now, renderer, strip)?;
                Ok(Some(GameEvent::Started))
            }
            GamePhase::Playing | GamePhase::TimedOut => Ok(None),
        }
    }

    /// Restart after a timeout
    ///
    /// Hits go back to zero, the player returns to the start cell and the
    /// target moves. Ignored in any phase other than `TimedOut`.
    pub fn retry<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<Option<GameEvent>, MatrixError> {
        if self.phase != GamePhase::TimedOut {
            return Ok(None);
        }
        self.begin_round(now, renderer, strip)?;
        Ok(Some(GameEvent::Retried))
    }

    /// Advance the round by one tick
    pub fn tick<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        sample: StickSample,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<Option<GameEvent>, MatrixError> {
        if self.phase != GamePhase::Playing {
            return Ok(None);
        }
        let Some(mut state) = self.state else {
            return Ok(None);
        };

        if now >= state.deadline {
            self.phase = GamePhase::TimedOut;
            renderer.clear();
            renderer.flush(strip);
            return Ok(Some(GameEvent::TimedOut));
        }

        state.player = state.player.step(self.mapper.direction(sample));

        let mut event = None;
        if state.player == state.target {
            state.hits = state.hits.saturating_add(1);
            if state.hits >= self.config.hits_target {
                self.phase = GamePhase::Success;
                self.state = None;
                renderer.clear();
                renderer.flush(strip);
                return Ok(Some(GameEvent::Won));
            }
            state.target = self.relocate(state.target);
            event = Some(GameEvent::Hit(state.hits));
        }

        self.state = Some(state);
        self.render(&state, renderer, strip)?;
        Ok(event)
    }

    /// Drop any live round and blank the matrix
    pub fn abandon<S: LedStrip + ?Sized>(&mut self, renderer: &mut MatrixRenderer, strip: &mut S) {
        self.state = None;
        self.phase = GamePhase::AwaitingStart;
        renderer.clear();
        renderer.flush(strip);
    }

    fn begin_round<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<(), MatrixError> {
        let start = self.config.start;
        if !start.on_grid() {
            return Err(MatrixError::OutOfRange {
                x: start.x,
                y: start.y,
            });
        }

        // The target never spawns under the player
        let state = GameState {
            target: self.relocate(start),
            player: start,
            hits: 0,
            deadline: now + self.config.time_budget_ms as Micros * MICROS_PER_MS,
        };
        self.state = Some(state);
        self.phase = GamePhase::Playing;
        self.render(&state, renderer, strip)
    }

    /// Pick a cell uniformly among the 24 cells other than `current`
    fn relocate(&mut self, current: Position) -> Position {
        let pick = self.rng.usize(0..CELL_COUNT - 1);
        let index = if pick >= current.index() { pick + 1 } else { pick };
        Position::from_index(index)
    }

    fn render<S: LedStrip + ?Sized>(
        &self,
        state: &GameState,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<(), MatrixError> {
        renderer.clear();
        renderer.set_cell(state.target.x, state.target.y, self.config.target_color)?;
        renderer.set_cell(state.player.x, state.player.y, self.config.player_color)?;
        renderer.flush(strip);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::stick::ADC_CENTER;

    const MS: Micros = MICROS_PER_MS;

    struct NullStrip {
        bytes: usize,
    }

    impl LedStrip for NullStrip {
        fn send(&mut self, _value: u8) {
            self.bytes += 1;
        }
    }

    fn setup() -> (ReflexGame, MatrixRenderer, NullStrip) {
        (
            ReflexGame::new(ReflexConfig::default(), StickConfig::default()),
            MatrixRenderer::new(),
            NullStrip { bytes: 0 },
        )
    }

    const REST: StickSample = StickSample::new(ADC_CENTER, ADC_CENTER);

    /// Raw sample that steps the player one cell toward `to`
    fn toward(from: Position, to: Position) -> StickSample {
        let x_raw = match to.x.cmp(&from.x) {
            core::cmp::Ordering::Greater => 4095,
            core::cmp::Ordering::Less => 0,
            core::cmp::Ordering::Equal => ADC_CENTER,
        };
        // Y axis is inverted: high raw moves toward row 0
        let y_raw = match to.y.cmp(&from.y) {
            core::cmp::Ordering::Greater => 0,
            core::cmp::Ordering::Less => 4095,
            core::cmp::Ordering::Equal => ADC_CENTER,
        };
        StickSample::new(x_raw, y_raw)
    }

    /// Steer to the target, returning the event of the hitting tick
    fn chase(
        game: &mut ReflexGame,
        now: &mut Micros,
        renderer: &mut MatrixRenderer,
        strip: &mut NullStrip,
    ) -> Option<GameEvent> {
        for _ in 0..8 {
            let state = *game.state().unwrap();
            *now += 100 * MS;
            let event = game
                .tick(*now, toward(state.player, state.target), renderer, strip)
                .unwrap();
            if event.is_some() {
                return event;
            }
        }
        None
    }

    #[test]
    fn test_position_step_clamps() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction { dx: -1, dy: -1 }), corner);
        let far = Position::new(4, 4);
        assert_eq!(far.step(Direction { dx: 1, dy: 1 }), far);
        assert_eq!(
            Position::new(2, 2).step(Direction { dx: 1, dy: -1 }),
            Position::new(3, 1)
        );
    }

    #[test]
    fn test_position_index_roundtrip() {
        for i in 0..CELL_COUNT {
            assert_eq!(Position::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_start_places_player_and_target() {
        let (mut game, mut renderer, mut strip) = setup();
        assert_eq!(game.phase(), GamePhase::AwaitingStart);
        assert!(game.state().is_none());

        let event = game.start(0, &mut renderer, &mut strip).unwrap();
        assert_eq!(event, Some(GameEvent::Started));
        assert_eq!(game.phase(), GamePhase::Playing);

        let state = *game.state().unwrap();
        assert_eq!(state.player, Position::new(2, 2));
        assert_ne!(state.target, state.player);
        assert_eq!(state.hits, 0);
        assert_eq!(state.deadline, 30_000 * MS);

        assert_eq!(renderer.lit_count(), 2);
        assert_eq!(
            renderer.cell(state.target.x, state.target.y).unwrap(),
            palette::TARGET
        );
        assert_eq!(renderer.cell(2, 2).unwrap(), palette::PLAYER);
        assert_eq!(strip.bytes, 75);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let (mut game, mut renderer, mut strip) = setup();
        game.start(0, &mut renderer, &mut strip).unwrap();
        let state = *game.state().unwrap();
        assert_eq!(game.start(10, &mut renderer, &mut strip).unwrap(), None);
        assert_eq!(*game.state().unwrap(), state);
    }

    #[test]
    fn test_rest_keeps_player_still() {
        let (mut game, mut renderer, mut strip) = setup();
        game.start(0, &mut renderer, &mut strip).unwrap();
        let event = game.tick(100 * MS, REST, &mut renderer, &mut strip).unwrap();
        assert_eq!(event, None);
        assert_eq!(game.state().unwrap().player, Position::new(2, 2));
    }

    #[test]
    fn test_stick_moves_player() {
        let (mut game, mut renderer, mut strip) = setup();
        game.start(0, &mut renderer, &mut strip).unwrap();
        // Right and up
        game.tick(100 * MS, StickSample::new(4095, 4095), &mut renderer, &mut strip)
            .unwrap();
        assert_eq!(game.state().unwrap().player, Position::new(3, 1));
    }

    #[test]
    fn test_hit_increments_and_relocates() {
        let (mut game, mut renderer, mut strip) = setup();
        let mut now = 0;
        game.start(now, &mut renderer, &mut strip).unwrap();
        let before = *game.state().unwrap();

        let event = chase(&mut game, &mut now, &mut renderer, &mut strip);
        assert_eq!(event, Some(GameEvent::Hit(1)));

        let after = *game.state().unwrap();
        assert_eq!(after.hits, 1);
        assert_eq!(after.player, before.target);
        assert_ne!(after.target, after.player);
        assert_eq!(renderer.lit_count(), 2);
    }

    #[test]
    fn test_reaching_hit_target_wins() {
        let (mut game, mut renderer, mut strip) = setup();
        let mut now = 0;
        game.start(now, &mut renderer, &mut strip).unwrap();

        // Each hit takes at most 4 ticks (400 ms), well inside 30 s
        for hit in 1..10u8 {
            let event = chase(&mut game, &mut now, &mut renderer, &mut strip);
            assert_eq!(event, Some(GameEvent::Hit(hit)));
        }
        let event = chase(&mut game, &mut now, &mut renderer, &mut strip);
        assert_eq!(event, Some(GameEvent::Won));
        assert_eq!(game.phase(), GamePhase::Success);
        assert!(game.state().is_none());
        assert_eq!(renderer.lit_count(), 0);
        assert!(now < 30_000 * MS);
    }

    #[test]
    fn test_deadline_times_out() {
        let (mut game, mut renderer, mut strip) = setup();
        game.start(0, &mut renderer, &mut strip).unwrap();

        let event = game
            .tick(29_999 * MS, REST, &mut renderer, &mut strip)
            .unwrap();
        assert_eq!(event, None);
        assert_eq!(game.remaining_ms(29_999 * MS), 1);

        let event = game
            .tick(30_000 * MS, REST, &mut renderer, &mut strip)
            .unwrap();
        assert_eq!(event, Some(GameEvent::TimedOut));
        assert_eq!(game.phase(), GamePhase::TimedOut);
        assert_eq!(game.remaining_ms(30_000 * MS), 0);

        // No automatic retry
        let event = game
            .tick(40_000 * MS, REST, &mut renderer, &mut strip)
            .unwrap();
        assert_eq!(event, None);
        assert_eq!(game.phase(), GamePhase::TimedOut);
    }

    #[test]
    fn test_retry_resets_round() {
        let (mut game, mut renderer, mut strip) = setup();
        let mut now = 0;
        game.start(now, &mut renderer, &mut strip).unwrap();
        chase(&mut game, &mut now, &mut renderer, &mut strip);
        assert_eq!(game.hits(), 1);

        now = 31_000 * MS;
        game.tick(now, REST, &mut renderer, &mut strip).unwrap();
        assert_eq!(game.phase(), GamePhase::TimedOut);

        let event = game.retry(now, &mut renderer, &mut strip).unwrap();
        assert_eq!(event, Some(GameEvent::Retried));
        assert_eq!(game.phase(), GamePhase::Playing);

        let state = *game.state().unwrap();
        assert_eq!(state.hits, 0);
        assert_eq!(state.player, Position::new(2, 2));
        assert_eq!(state.deadline, now + 30_000 * MS);
        assert_ne!(state.target, state.player);
    }

    #[test]
    fn test_retry_ignored_unless_timed_out() {
        let (mut game, mut renderer, mut strip) = setup();
        assert_eq!(game.retry(0, &mut renderer, &mut strip).unwrap(), None);
        game.start(0, &mut renderer, &mut strip).unwrap();
        assert_eq!(game.retry(0, &mut renderer, &mut strip).unwrap(), None);
    }

    #[test]
    fn test_relocation_never_repeats_cell() {
        let (mut game, _, _) = setup();
        for i in 0..CELL_COUNT {
            let current = Position::from_index(i);
            for _ in 0..50 {
                let next = game.relocate(current);
                assert_ne!(next, current);
                assert!(next.on_grid());
            }
        }
    }

    #[test]
    fn test_same_seed_same_targets() {
        let (mut a, mut ra, mut sa) = setup();
        let (mut b, mut rb, mut sb) = setup();
        a.start(0, &mut ra, &mut sa).unwrap();
        b.start(0, &mut rb, &mut sb).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_off_grid_start_reported() {
        let config = ReflexConfig {
            start: Position::new(7, 0),
            ..ReflexConfig::default()
        };
        let mut game = ReflexGame::new(config, StickConfig::default());
        let mut renderer = MatrixRenderer::new();
        let mut strip = NullStrip { bytes: 0 };
        assert_eq!(
            game.start(0, &mut renderer, &mut strip),
            Err(MatrixError::OutOfRange { x: 7, y: 0 })
        );
    }

    #[test]
    fn test_abandon_clears() {
        let (mut game, mut renderer, mut strip) = setup();
        game.start(0, &mut renderer, &mut strip).unwrap();
        game.abandon(&mut renderer, &mut strip);
        assert_eq!(game.phase(), GamePhase::AwaitingStart);
        assert!(game.state().is_none());
        assert_eq!(renderer.lit_count(), 0);
    }
}
