use crate::command::command_for_key;
use crate::menu::MenuScreen;
use crate::play::PlayScreen;
use crate::util::tick_period;
use crossterm::event::{poll, read, Event};
use powersnake::{GameSession, Phase};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    session: GameSession<R>,
    next_tick: Option<Instant>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(session: GameSession<R>) -> App<R> {
        App {
            session,
            next_tick: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.session.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let snapshot = self.session.snapshot();
        match snapshot.phase {
            Phase::Menu => frame.render_widget(
                MenuScreen {
                    high_scores: snapshot.high_scores,
                },
                frame.area(),
            ),
            Phase::Playing | Phase::GameOver => {
                frame.render_widget(PlayScreen { snapshot }, frame.area());
            }
            Phase::Quit => (),
        }
    }

    /// Wait for a key press or, while a round is in play, for the next tick,
    /// whichever comes first
    fn process_input(&mut self) -> io::Result<()> {
        if self.session.phase() == Phase::Playing {
            let pacing = self.session.pacing();
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + tick_period(pacing));
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                let _ = self.session.tick();
                self.next_tick = None;
                return Ok(());
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let phase = self.session.phase();
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(|ev| command_for_key(phase, ev))
        else {
            return;
        };
        if self.session.apply_command(cmd) && self.session.phase() != phase {
            self.next_tick = None;
        }
    }
}
