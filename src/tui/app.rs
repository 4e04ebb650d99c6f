//! Application loop.
//!
//! The loop owns the screen and is the only thing that mutates it. Each
//! submission runs on its own worker thread with a snapshot of the input and
//! reports back over a channel, which the loop drains between input polls.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::model::FormInput;
use crate::predict::{PredictError, Predictor};

use super::screens::PredictionScreen;

/// How long to wait for a key before checking for settled requests.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Settled = Result<String, PredictError>;

/// Runs the form until the user quits.
pub fn run(predictor: Arc<dyn Predictor>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &predictor);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, predictor: &Arc<dyn Predictor>) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<Settled>();
    let mut screen = PredictionScreen::new();

    loop {
        drain_settled(&rx, &mut screen);

        terminal.draw(|frame| screen.render(frame))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('q') if !screen.is_editing_year() => return Ok(()),
                KeyCode::Up | KeyCode::BackTab => screen.focus_prev(),
                KeyCode::Down | KeyCode::Tab => screen.focus_next(),
                KeyCode::Left => screen.cycle_option(false),
                KeyCode::Right => screen.cycle_option(true),
                KeyCode::Backspace => screen.on_backspace(),
                KeyCode::Char(c) => screen.on_char(c),
                KeyCode::Enter => {
                    if let Some(input) = screen.on_enter() {
                        spawn_prediction(Arc::clone(predictor), input, tx.clone());
                    }
                }
                _ => {}
            }
        }
    }
}

/// Apply every round trip that has come back since the last pass.
fn drain_settled(rx: &Receiver<Settled>, screen: &mut PredictionScreen) {
    while let Ok(result) = rx.try_recv() {
        screen.settle(result);
    }
}

fn spawn_prediction(predictor: Arc<dyn Predictor>, input: FormInput, tx: Sender<Settled>) {
    thread::spawn(move || {
        let result = predictor.predict(&input);
        // The loop may have exited; nobody is left to show the result.
        if tx.send(result).is_err() {
            debug!("prediction settled after the form closed");
        }
    });
}
