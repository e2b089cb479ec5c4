//! State transitions.

use tracing::debug;

use crate::calculator::{CalcResult, evaluate_expression, format_number};
use crate::history::RecordKind;

use super::{Action, AppState, ERROR_DISPLAY, MemoryOp};

/// Apply one action to the state.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::Insert(text) => insert(state, &text),
        Action::Function(name) => {
            let text = format!("{name}(");
            insert_symbol(state, &text);
        }
        Action::Constant(name) => insert_symbol(state, &name),
        Action::Evaluate => evaluate(state),
        Action::Backspace => backspace(state),
        Action::Clear => clear(state),
        Action::Memory(op) => memory(state, op),
        Action::SetAngleUnit(unit) => state.angle_unit = unit,
        Action::OpenAdvanced => {
            // One request in flight at a time.
            if !state.processing {
                state.advanced_open = true;
            }
        }
        Action::CloseAdvanced => state.advanced_open = false,
        Action::TogglePanel => state.panel_open = !state.panel_open,
        Action::AdvancedSubmitted => {
            state.processing = true;
            state.advanced_open = false;
        }
        Action::AdvancedCompleted { input, output } => {
            state.history.push(RecordKind::Advanced, input, output);
            state.processing = false;
            state.advanced_open = false;
            state.panel_open = true;
        }
    }
}

fn insert(state: &mut AppState, text: &str) {
    if state.is_error() {
        state.display = text.to_string();
        return;
    }
    if state.display == "0" && text != "." {
        state.display = text.to_string();
    } else {
        state.display.push_str(text);
    }
}

/// Function/constant insertion: like [`insert`], without the decimal-point
/// exception.
fn insert_symbol(state: &mut AppState, text: &str) {
    if state.is_error() || state.display == "0" {
        state.display = text.to_string();
    } else {
        state.display.push_str(text);
    }
}

fn evaluate(state: &mut AppState) {
    let input = state.display.clone();
    match evaluate_expression(&input, &state.eval_context()) {
        CalcResult::Success { formatted, .. } => {
            debug!(%input, result = %formatted, "evaluation succeeded");
            state.last_answer = formatted.clone();
            state.equation = format!("{input} =");
            state.display = formatted.clone();
            state.history.push(RecordKind::Arithmetic, input, formatted);
        }
        CalcResult::Error { .. } => {
            // Last answer, equation trace and history stay untouched.
            state.display = ERROR_DISPLAY.to_string();
        }
    }
}

fn backspace(state: &mut AppState) {
    if state.is_error() {
        clear(state);
        return;
    }
    if state.display.chars().count() > 1 {
        state.display.pop();
    } else {
        state.display = "0".to_string();
    }
}

fn clear(state: &mut AppState) {
    state.display = "0".to_string();
    state.equation.clear();
}

fn memory(state: &mut AppState, op: MemoryOp) {
    // The whole display must be a plain number; anything else is a no-op.
    let Ok(current) = state.display.parse::<f64>() else {
        return;
    };
    match op {
        MemoryOp::Add => state.memory += current,
        MemoryOp::Subtract => state.memory -= current,
        MemoryOp::Recall => state.display = format_number(state.memory),
    }
}
