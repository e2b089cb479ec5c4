//! Terminal frontend.
//!
//! Single-threaded and event-driven: key presses map to actions through
//! [`keymap`], the reducer applies them synchronously, and the screen is
//! redrawn. The only asynchronous work (the advanced-mode request)
//! happens on the worker thread and is drained here between events, so a
//! closed prompt never aborts an in-flight call.

mod keymap;
mod markdown;
mod view;

pub use keymap::{UiEvent, map_key};
pub use markdown::render_markdown;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::advanced::{
    AdvancedRequest, AdvancedWorker, CONNECTION_FAILED_MESSAGE, data_url_from_file,
};
use crate::state::{Action, AppState, reduce};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the interactive calculator until the user quits.
pub fn run(mut state: AppState, worker: &AdvancedWorker) -> Result<()> {
    enable_raw_mode().context("enabling raw terminal mode")?;
    let result = event_loop(&mut state, worker);
    disable_raw_mode().ok();
    result
}

fn event_loop(state: &mut AppState, worker: &AdvancedWorker) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut dirty = true;

    loop {
        if dirty {
            view::draw(&mut stdout, state)?;
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match keymap::map_key(key) {
                    Some(UiEvent::Quit) => break,
                    Some(UiEvent::ToggleAngleUnit) => {
                        reduce(state, Action::SetAngleUnit(state.angle_unit.toggled()));
                        dirty = true;
                    }
                    Some(UiEvent::OpenAdvanced) => {
                        open_advanced(state, worker)?;
                        dirty = true;
                    }
                    Some(UiEvent::InsertRandom) => {
                        reduce(state, Action::Insert(random_literal()));
                        dirty = true;
                    }
                    Some(UiEvent::Dispatch(action)) => {
                        reduce(state, action);
                        dirty = true;
                    }
                    None => {}
                }
            }
        }

        while let Some(outcome) = worker.try_recv() {
            reduce(
                state,
                Action::AdvancedCompleted {
                    input: outcome.input,
                    output: outcome.output,
                },
            );
            dirty = true;
        }
    }

    Ok(())
}

/// Prompt for an advanced query and hand it to the worker.
///
/// The prompt runs in cooked mode; submission is refused while a request
/// is already in flight.
fn open_advanced(state: &mut AppState, worker: &AdvancedWorker) -> Result<()> {
    reduce(state, Action::OpenAdvanced);
    if !state.advanced_open {
        return Ok(());
    }

    disable_raw_mode()?;
    println!();
    let text = view::prompt_line("query> ")?;
    let image_path = view::prompt_line("image file (optional)> ")?;
    enable_raw_mode()?;

    let image = if image_path.is_empty() {
        None
    } else {
        match data_url_from_file(Path::new(&image_path)) {
            Ok(url) => Some(url),
            Err(err) => {
                // Treat like any other settled failure: record and move on.
                reduce(
                    state,
                    Action::AdvancedCompleted {
                        input: "System Message".to_string(),
                        output: err.user_message(),
                    },
                );
                reduce(state, Action::CloseAdvanced);
                return Ok(());
            }
        }
    };

    let request = AdvancedRequest { text, image };
    if worker.submit(request) {
        reduce(state, Action::AdvancedSubmitted);
    } else {
        reduce(
            state,
            Action::AdvancedCompleted {
                input: "System Message".to_string(),
                output: CONNECTION_FAILED_MESSAGE.to_string(),
            },
        );
        reduce(state, Action::CloseAdvanced);
    }
    Ok(())
}

fn random_literal() -> String {
    format!("{:.4}", rand::random::<f64>())
}
