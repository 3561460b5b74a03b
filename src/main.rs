//! Brickyard entry point
//!
//! Runs the game in a terminal: crossterm supplies raw key events and
//! drawing, and the loop below is the fixed-rate pulse that drives the
//! session.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, Stdout, Write, stdout};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    use crossterm::{
        cursor::{Hide, MoveTo, Show},
        event::{
            self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
            PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
        },
        execute, queue,
        style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
        terminal::{
            Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
            enable_raw_mode, supports_keyboard_enhancement,
        },
    };

    use brickyard::platform::{InputEvent, KeyHold};
    use brickyard::renderer::{Cell, Frame, Scene};
    use brickyard::sim::{Color, GameEvent};
    use brickyard::{FileLedger, Session, Settings};

    /// Log sink used while the alternate screen owns the terminal.
    ///
    /// Records are held in memory and written to stderr once the terminal is
    /// restored; anything written to stderr during play is wiped on exit.
    #[derive(Clone, Default)]
    pub struct HeldLog(Arc<Mutex<Vec<u8>>>);

    impl HeldLog {
        /// Write everything held so far to `out` and clear the buffer
        pub fn release_to(&self, out: &mut impl Write) -> io::Result<()> {
            let mut held = self
                .0
                .lock()
                .map_err(|_| io::Error::other("log buffer poisoned"))?;
            out.write_all(&held)?;
            held.clear();
            out.flush()
        }
    }

    impl Write for HeldLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::other("log buffer poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// What a key event asks for
    enum Command {
        Input(InputEvent),
        Quit,
        Ignore,
    }

    /// Raw mode and alternate screen for the lifetime of the value
    struct TerminalGuard {
        /// Terminal reports key releases
        enhanced: bool,
    }

    impl TerminalGuard {
        fn enter() -> io::Result<Self> {
            let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
            enable_raw_mode()?;
            let mut out = stdout();
            execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
            if enhanced {
                execute!(
                    out,
                    PushKeyboardEnhancementFlags(
                        KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                            | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    )
                )?;
            }
            log::debug!("Terminal ready (key releases reported: {enhanced})");
            Ok(Self { enhanced })
        }
    }

    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let mut out = stdout();
            if self.enhanced {
                let _ = execute!(out, PopKeyboardEnhancementFlags);
            }
            let _ = execute!(out, ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }

    pub fn run() -> io::Result<()> {
        let settings = Settings::load();
        let mut session = Session::new(FileLedger::new(&settings.high_score_path));

        let final_score = {
            let guard = TerminalGuard::enter()?;
            game_loop(&mut session, &settings, guard.enhanced)?
        };

        if let Some(score) = final_score {
            let board = session.high_scores();
            println!("GAME OVER\n");
            print!("{}", board.summary(score, settings.top_scores_shown));
        }
        Ok(())
    }

    /// Returns the final score, or None if the player quit
    fn game_loop(
        session: &mut Session<FileLedger>,
        settings: &Settings,
        enhanced: bool,
    ) -> io::Result<Option<u32>> {
        let mut out = stdout();
        let mut frame = Frame::new();
        let mut hold = (!enhanced).then(|| KeyHold::new(settings.key_hold_ticks));
        let period = settings.tick_period();
        let mut next_tick = Instant::now() + period;

        frame.draw(&Scene::capture(session));
        present(&mut out, &frame)?;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    match translate(key) {
                        Command::Quit => return Ok(None),
                        Command::Input(input) => forward(session, hold.as_mut(), input),
                        Command::Ignore => {}
                    }
                }
                continue;
            }

            // Skip pulses we fell behind on rather than bursting to catch up
            next_tick += period;
            let now = Instant::now();
            if next_tick < now {
                next_tick = now + period;
            }

            if let Some(hold) = hold.as_mut() {
                for release in hold.expire() {
                    session.apply(release);
                }
            }
            session.tick();

            frame.draw(&Scene::capture(session));
            present(&mut out, &frame)?;

            let game_over = session.drain_events().into_iter().find_map(|e| match e {
                GameEvent::GameOver { final_score } => Some(final_score),
                _ => None,
            });
            if game_over.is_some() {
                return Ok(game_over);
            }
        }
    }

    fn forward(session: &mut Session<FileLedger>, hold: Option<&mut KeyHold>, input: InputEvent) {
        match (hold, input) {
            (Some(hold), InputEvent::LeftPressed | InputEvent::RightPressed) => {
                for event in hold.press(input) {
                    session.apply(event);
                }
            }
            (_, input) => session.apply(input),
        }
    }

    fn translate(key: KeyEvent) -> Command {
        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        let first_press = key.kind == KeyEventKind::Press;

        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Input(if pressed {
                InputEvent::LeftPressed
            } else {
                InputEvent::LeftReleased
            }),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Command::Input(if pressed {
                    InputEvent::RightPressed
                } else {
                    InputEvent::RightReleased
                })
            }
            KeyCode::Char(' ') if first_press => Command::Input(InputEvent::Launch),
            KeyCode::Char('p') | KeyCode::Char('P') if first_press => {
                Command::Input(InputEvent::TogglePause)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if first_press => Command::Quit,
            _ => Command::Ignore,
        }
    }

    fn term_color(color: Color) -> TermColor {
        TermColor::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    fn present(out: &mut Stdout, frame: &Frame) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, 0),
            SetForegroundColor(TermColor::White),
            Print(&frame.hud)
        )?;

        for (row, cells) in frame.lines().enumerate() {
            queue!(out, MoveTo(0, row as u16 + 1))?;
            // One color change per run of same-colored cells
            for run in cells.chunk_by(|a: &Cell, b: &Cell| a.color == b.color) {
                let text: String = run.iter().map(|c| c.glyph).collect();
                queue!(out, SetForegroundColor(term_color(run[0].color)), Print(text))?;
            }
        }

        let status_row = frame.rows() as u16 + 1;
        queue!(
            out,
            MoveTo(0, status_row),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(TermColor::White),
            Print(&frame.status),
            ResetColor
        )?;
        out.flush()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    let held = terminal::HeldLog::default();
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(held.clone())))
        .init();
    log::info!("Brickyard starting...");

    let result = terminal::run();
    // The terminal is restored by now; surface anything logged during play
    held.release_to(&mut std::io::stderr())?;
    result
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No terminal on wasm; embed the library and drive `Session` from the host page
}
