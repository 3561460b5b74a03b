//! A play session: simulation state plus everything the host drives it with
//!
//! The host owns the pulse. It forwards input events as they arrive and calls
//! `tick` once per period; pausing makes `tick` a no-op. When the last ball is
//! lost the final score goes to the ledger before `tick` returns.

use crate::highscores::{HighScores, ScoreLedger};
use crate::platform::InputEvent;
use crate::sim::{self, GameEvent, GamePhase, GameState, Sprite, TickInput};

pub struct Session<L: ScoreLedger> {
    state: GameState,
    intent: TickInput,
    paused: bool,
    ledger: L,
}

impl<L: ScoreLedger> Session<L> {
    /// Fresh session waiting for the first serve
    pub fn new(ledger: L) -> Self {
        Self {
            state: GameState::new(),
            intent: TickInput::default(),
            paused: false,
            ledger,
        }
    }

    /// Session over a prepared state, for scripted play
    pub fn with_state(state: GameState, ledger: L) -> Self {
        Self {
            state,
            intent: TickInput::default(),
            paused: false,
            ledger,
        }
    }

    /// Start over. The ledger keeps its contents.
    pub fn new_game(&mut self) {
        self.state = GameState::new();
        self.intent = TickInput::default();
        self.paused = false;
        log::info!("New game");
    }

    /// Advance one pulse
    pub fn tick(&mut self) {
        if self.paused || self.state.is_game_over() {
            return;
        }
        sim::tick(&mut self.state, &self.intent);
        if self.state.is_game_over() {
            self.record_final_score();
        }
    }

    /// Serve the next ball. Ignored unless awaiting a serve. A ball served
    /// while paused stays put until the session is unpaused.
    pub fn launch(&mut self) -> bool {
        sim::launch(&mut self.state)
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.intent.left = pressed;
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.intent.right = pressed;
    }

    /// Forward one host input event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::LeftPressed => self.set_left(true),
            InputEvent::LeftReleased => self.set_left(false),
            InputEvent::RightPressed => self.set_right(true),
            InputEvent::RightReleased => self.set_right(false),
            InputEvent::Launch => {
                self.launch();
            }
            InputEvent::TogglePause => self.toggle_pause(),
        }
    }

    pub fn pause(&mut self) {
        if !self.paused && !self.state.is_game_over() {
            self.paused = true;
            log::debug!("Paused");
        }
    }

    pub fn unpause(&mut self) {
        if self.paused {
            self.paused = false;
            log::debug!("Unpaused");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.unpause();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn balls_remaining(&self) -> u32 {
        self.state.balls_remaining
    }

    pub fn awaiting_serve(&self) -> bool {
        self.state.awaiting_serve()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn bricks_remaining(&self) -> usize {
        self.state.bricks.len()
    }

    pub fn intent(&self) -> TickInput {
        self.intent
    }

    pub fn ball_snapshot(&self) -> Sprite {
        self.state.ball.sprite()
    }

    pub fn shield_snapshot(&self) -> Sprite {
        self.state.shield.sprite()
    }

    pub fn brick_snapshots(&self) -> Vec<Sprite> {
        self.state.brick_sprites()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Every recorded score, best first
    pub fn high_scores(&self) -> HighScores {
        HighScores::load(&self.ledger)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn record_final_score(&mut self) {
        // Losing the ledger must not stop the game-over sequence
        if let Err(e) = self.ledger.append(self.state.score) {
            log::error!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::error::LedgerError;
    use crate::highscores::{FileLedger, MemoryLedger};
    use crate::sim::Brick;

    struct BrokenLedger;

    impl ScoreLedger for BrokenLedger {
        fn read_all(&self) -> Result<Vec<u32>, LedgerError> {
            Err(LedgerError::Read {
                path: "broken".into(),
                source: std::io::Error::other("unreadable"),
            })
        }

        fn append(&mut self, _score: u32) -> Result<(), LedgerError> {
            Err(LedgerError::Write {
                path: "broken".into(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    /// Drop the ball straight onto the floor
    fn lose_ball<L: ScoreLedger>(session: &mut Session<L>) {
        session.state.ball.set_position(200, ARENA_HEIGHT - BALL_SIZE);
        session.state.ball.set_velocity(4, 4);
        session.tick();
    }

    #[test]
    fn test_fresh_session() {
        let session = Session::new(MemoryLedger::default());
        assert_eq!(session.balls_remaining(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.bricks_remaining(), 36);
        assert!(session.awaiting_serve());
        assert!(!session.is_paused());
        let ball = session.ball_snapshot();
        assert_eq!((ball.x, ball.y, ball.width, ball.height), (100, 200, 20, 20));
        assert_eq!(session.state().ball.vel, glam::IVec2::ZERO);
    }

    #[test]
    fn test_launch_event() {
        let mut session = Session::new(MemoryLedger::default());
        session.apply(InputEvent::Launch);
        assert_eq!(session.balls_remaining(), 2);
        assert_eq!(session.phase(), GamePhase::Active);
        assert_eq!(session.shield_snapshot().x, 353);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Launched { balls_remaining: 2 }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_intent_flags() {
        let mut session = Session::new(MemoryLedger::default());
        session.apply(InputEvent::LeftPressed);
        session.apply(InputEvent::RightPressed);
        assert_eq!(
            session.intent(),
            TickInput {
                left: true,
                right: true
            }
        );
        session.tick();
        assert_eq!(session.shield_snapshot().x, 353);

        session.apply(InputEvent::LeftReleased);
        session.tick();
        assert_eq!(session.shield_snapshot().x, 358);
    }

    #[test]
    fn test_pause_suspends_ticks() {
        let mut session = Session::new(MemoryLedger::default());
        session.launch();
        session.apply(InputEvent::TogglePause);
        assert!(session.is_paused());

        let before = session.ball_snapshot();
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.ball_snapshot(), before);

        session.apply(InputEvent::TogglePause);
        session.tick();
        assert_eq!(session.ball_snapshot().x, before.x + 4);
    }

    #[test]
    fn test_launch_while_paused_serves_without_moving() {
        let mut session = Session::new(MemoryLedger::default());
        session.pause();
        session.apply(InputEvent::Launch);
        assert_eq!(session.balls_remaining(), 2);
        assert_eq!(session.phase(), GamePhase::Active);
        assert_eq!(session.state().ball.vel, glam::IVec2::new(4, 4));

        for _ in 0..5 {
            session.tick();
        }
        let ball = session.ball_snapshot();
        assert_eq!((ball.x, ball.y), (SERVE_X, SERVE_Y));

        // Already in play: a second launch is ignored
        assert!(!session.launch());
        assert_eq!(session.balls_remaining(), 2);

        session.unpause();
        session.tick();
        let ball = session.ball_snapshot();
        assert_eq!((ball.x, ball.y), (SERVE_X + 4, SERVE_Y + 4));
    }

    #[test]
    fn test_game_over_records_score() {
        let mut session = Session::with_state(
            GameState::with_bricks(vec![Brick::new(1, 748, 95, 10)]),
            MemoryLedger::default(),
        );
        session.launch();
        session.state.ball.set_position(730, 100);
        session.tick();
        assert_eq!(session.score(), 10);

        lose_ball(&mut session);
        session.launch();
        lose_ball(&mut session);
        session.launch();
        assert_eq!(session.balls_remaining(), 0);
        assert!(!session.is_game_over());

        lose_ball(&mut session);
        assert!(session.is_game_over());
        assert_eq!(session.ledger().scores, vec![10]);
        assert!(session
            .drain_events()
            .contains(&GameEvent::GameOver { final_score: 10 }));

        // Terminal: nothing moves and nothing more is recorded
        session.apply(InputEvent::RightPressed);
        session.tick();
        session.tick();
        assert_eq!(session.ledger().scores, vec![10]);
        assert_eq!(session.shield_snapshot().x, 353);
        session.pause();
        assert!(!session.is_paused());
    }

    #[test]
    fn test_ledger_failure_still_ends_game() {
        let mut state = GameState::new();
        state.balls_remaining = 1;
        let mut session = Session::with_state(state, BrokenLedger);
        session.launch();
        lose_ball(&mut session);
        assert!(session.is_game_over());
        assert!(session.high_scores().is_empty());
    }

    #[test]
    fn test_high_scores_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HighScores.txt");
        std::fs::write(&path, "50\n").unwrap();

        let mut state = GameState::with_bricks(Vec::new());
        state.balls_remaining = 1;
        state.score = 80;
        let mut session = Session::with_state(state, FileLedger::new(&path));
        session.launch();
        lose_ball(&mut session);

        assert_eq!(session.high_scores().entries, vec![80, 50]);
    }

    #[test]
    fn test_new_game_resets() {
        let mut ledger = MemoryLedger::default();
        ledger.scores.push(5);
        let mut session = Session::new(ledger);
        session.launch();
        session.set_right(true);
        session.pause();
        session.new_game();

        assert_eq!(session.balls_remaining(), 3);
        assert!(session.awaiting_serve());
        assert!(!session.is_paused());
        assert_eq!(session.intent(), TickInput::default());
        assert_eq!(session.ledger().scores, vec![5]);
    }
}
