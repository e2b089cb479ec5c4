//! Screen drawing.
//!
//! Full-redraw rendering: clear, then print the calculator face and,
//! when open, the history panel. Layout is deliberately plain; the
//! interesting state all lives in [`AppState`].

use std::io::Write;

use anyhow::Result;
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};

use crate::calculator::AngleUnit;
use crate::history::RecordKind;
use crate::state::AppState;

use super::markdown::render_markdown;

/// Records shown in the history panel.
const PANEL_LIMIT: usize = 6;

const HELP: &str = "enter = | esc clear | F1 deg/rad | F2 ask | F3 history | F5/F6/F7 M+/M-/MR\nalt+s/c/t trig (shift: inverse) | alt+l/g/r ln/log/√ | alt+p/e/a π/e/Ans | ctrl+r rnd | ctrl+q quit";

pub fn draw(out: &mut impl Write, state: &AppState) -> Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let mode = match state.angle_unit {
        AngleUnit::Degrees => "DEG",
        AngleUnit::Radians => "RAD",
    };
    let memory = if state.memory != 0.0 { "  M" } else { "" };
    let busy = if state.processing { "  thinking…" } else { "" };
    line(out, format!("scicalc  [{mode}]{memory}{busy}").dim().to_string())?;
    line(out, String::new())?;

    line(out, format!("  {}", state.equation).dim().to_string())?;
    line(out, format!("  {}", state.display).bold().to_string())?;
    line(out, String::new())?;

    if state.panel_open {
        draw_panel(out, state)?;
    }

    for help in HELP.lines() {
        line(out, help.dim().to_string())?;
    }
    out.flush()?;
    Ok(())
}

fn draw_panel(out: &mut impl Write, state: &AppState) -> Result<()> {
    line(
        out,
        format!("history  ({} total)", state.history.len())
            .bold()
            .to_string(),
    )?;
    if state.history.is_empty() {
        line(out, "  (empty)".dim().to_string())?;
    }
    for record in state.history.newest_first().take(PANEL_LIMIT) {
        let kind = match record.kind {
            RecordKind::Arithmetic => "calc",
            RecordKind::Advanced => "ask",
        };
        let stamp = record.timestamp.format("%H:%M:%S");
        line(
            out,
            format!("  #{} [{stamp}] {kind}  {}", record.id, record.input)
                .dim()
                .to_string(),
        )?;
        let output = match record.kind {
            RecordKind::Arithmetic => record.output.clone(),
            RecordKind::Advanced => render_markdown(&record.output),
        };
        for text in output.lines() {
            line(out, format!("    {text}"))?;
        }
    }
    line(out, String::new())?;
    Ok(())
}

/// Print one line; raw mode needs an explicit carriage return.
fn line(out: &mut impl Write, text: String) -> Result<()> {
    queue!(out, Print(text), Print("\r\n"))?;
    Ok(())
}

/// Read one line of input in cooked mode (caller disables raw mode).
pub fn prompt_line(prompt: &str) -> Result<String> {
    use std::io::{self, BufRead};

    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
