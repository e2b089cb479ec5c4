//! Pure key-to-event mapping for the keyboard surface.
//!
//! Kept free of terminal state so the whole surface is testable: the
//! event loop feeds `KeyEvent`s in and dispatches whatever comes out.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::{Action, MemoryOp};

/// Events the keyboard surface can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Dispatch(Action),
    /// Flip Deg/Rad; the loop resolves the target unit from the state.
    ToggleAngleUnit,
    OpenAdvanced,
    /// Insert a fresh four-decimal random literal.
    InsertRandom,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('a') => Some(UiEvent::OpenAdvanced),
            KeyCode::Char('h') => Some(UiEvent::Dispatch(Action::TogglePanel)),
            KeyCode::Char('r') => Some(UiEvent::InsertRandom),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return map_alt_key(key.code);
    }

    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            Some(UiEvent::Dispatch(Action::Insert(c.to_string())))
        }
        // The visual glyphs stand in for the typed operators.
        KeyCode::Char('*') => Some(UiEvent::Dispatch(Action::Insert("×".to_string()))),
        KeyCode::Char('/') => Some(UiEvent::Dispatch(Action::Insert("÷".to_string()))),
        KeyCode::Char(c @ ('+' | '-' | '(' | ')' | '.' | '%' | '^' | '!')) => {
            Some(UiEvent::Dispatch(Action::Insert(c.to_string())))
        }
        KeyCode::Char('=') | KeyCode::Enter => Some(UiEvent::Dispatch(Action::Evaluate)),
        KeyCode::Backspace => Some(UiEvent::Dispatch(Action::Backspace)),
        KeyCode::Esc => Some(UiEvent::Dispatch(Action::Clear)),
        // Letters build function names and `Ans` directly; nonsense
        // resolves to the Error state on evaluate.
        KeyCode::Char(c) if c.is_ascii_alphabetic() || c == 'π' || c == '√' => {
            Some(UiEvent::Dispatch(Action::Insert(c.to_string())))
        }
        KeyCode::F(1) => Some(UiEvent::ToggleAngleUnit),
        KeyCode::F(2) => Some(UiEvent::OpenAdvanced),
        KeyCode::F(3) => Some(UiEvent::Dispatch(Action::TogglePanel)),
        KeyCode::F(5) => Some(UiEvent::Dispatch(Action::Memory(MemoryOp::Add))),
        KeyCode::F(6) => Some(UiEvent::Dispatch(Action::Memory(MemoryOp::Subtract))),
        KeyCode::F(7) => Some(UiEvent::Dispatch(Action::Memory(MemoryOp::Recall))),
        _ => None,
    }
}

/// Alt chords insert the keypad's named functions and constants.
fn map_alt_key(code: KeyCode) -> Option<UiEvent> {
    let action = match code {
        KeyCode::Char('s') => Action::Function("sin".to_string()),
        KeyCode::Char('c') => Action::Function("cos".to_string()),
        KeyCode::Char('t') => Action::Function("tan".to_string()),
        KeyCode::Char('S') => Action::Function("sin⁻¹".to_string()),
        KeyCode::Char('C') => Action::Function("cos⁻¹".to_string()),
        KeyCode::Char('T') => Action::Function("tan⁻¹".to_string()),
        KeyCode::Char('l') => Action::Function("ln".to_string()),
        KeyCode::Char('g') => Action::Function("log".to_string()),
        KeyCode::Char('r') => Action::Function("√".to_string()),
        KeyCode::Char('p') => Action::Constant("π".to_string()),
        KeyCode::Char('e') => Action::Constant("e".to_string()),
        KeyCode::Char('a') => Action::Constant("Ans".to_string()),
        _ => return None,
    };
    Some(UiEvent::Dispatch(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn digits_insert_themselves() {
        assert_eq!(
            map_key(press(KeyCode::Char('7'))),
            Some(UiEvent::Dispatch(Action::Insert("7".to_string())))
        );
    }

    #[test]
    fn typed_operators_become_display_glyphs() {
        assert_eq!(
            map_key(press(KeyCode::Char('*'))),
            Some(UiEvent::Dispatch(Action::Insert("×".to_string())))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('/'))),
            Some(UiEvent::Dispatch(Action::Insert("÷".to_string())))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('+'))),
            Some(UiEvent::Dispatch(Action::Insert("+".to_string())))
        );
    }

    #[test]
    fn enter_and_equals_evaluate() {
        assert_eq!(
            map_key(press(KeyCode::Enter)),
            Some(UiEvent::Dispatch(Action::Evaluate))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('='))),
            Some(UiEvent::Dispatch(Action::Evaluate))
        );
    }

    #[test]
    fn backspace_and_escape() {
        assert_eq!(
            map_key(press(KeyCode::Backspace)),
            Some(UiEvent::Dispatch(Action::Backspace))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc)),
            Some(UiEvent::Dispatch(Action::Clear))
        );
    }

    #[test]
    fn control_chords() {
        assert_eq!(
            map_key(press_with(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(UiEvent::Quit)
        );
        assert_eq!(
            map_key(press_with(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            Some(UiEvent::OpenAdvanced)
        );
    }

    #[test]
    fn alt_chords_insert_functions_and_constants() {
        assert_eq!(
            map_key(press_with(KeyCode::Char('s'), KeyModifiers::ALT)),
            Some(UiEvent::Dispatch(Action::Function("sin".to_string())))
        );
        assert_eq!(
            map_key(press_with(KeyCode::Char('p'), KeyModifiers::ALT)),
            Some(UiEvent::Dispatch(Action::Constant("π".to_string())))
        );
        assert_eq!(
            map_key(press_with(KeyCode::Char('a'), KeyModifiers::ALT)),
            Some(UiEvent::Dispatch(Action::Constant("Ans".to_string())))
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Char('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        assert_eq!(map_key(press(KeyCode::Home)), None);
        assert_eq!(map_key(press(KeyCode::F(12))), None);
    }
}
