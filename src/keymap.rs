//! Console key actions for accepted key presses, US layout, letters upper-cased.

use pc_keyboard::{KeyCode, ScancodeSet, ScancodeSet1};

use crate::keyboard::Scancode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Erase,
    Space,
    Char(u8),
}

/// Extended keys and anything outside letters, digits, space, enter and
/// backspace map to `None`.
pub fn translate(scancode: Scancode) -> Option<KeyAction> {
    if scancode.extended {
        return None;
    }
    // A fresh set holds no prefix state, so a lone make code maps directly.
    let event = ScancodeSet1::new().advance_state(scancode.code).ok()??;
    action(event.code)
}

fn action(code: KeyCode) -> Option<KeyAction> {
    let ch = match code {
        KeyCode::Return => return Some(KeyAction::Submit),
        KeyCode::Backspace => return Some(KeyAction::Erase),
        KeyCode::Spacebar => return Some(KeyAction::Space),
        KeyCode::Key0 => b'0',
        KeyCode::Key1 => b'1',
        KeyCode::Key2 => b'2',
        KeyCode::Key3 => b'3',
        KeyCode::Key4 => b'4',
        KeyCode::Key5 => b'5',
        KeyCode::Key6 => b'6',
        KeyCode::Key7 => b'7',
        KeyCode::Key8 => b'8',
        KeyCode::Key9 => b'9',
        KeyCode::A => b'A',
        KeyCode::B => b'B',
        KeyCode::C => b'C',
        KeyCode::D => b'D',
        KeyCode::E => b'E',
        KeyCode::F => b'F',
        KeyCode::G => b'G',
        KeyCode::H => b'H',
        KeyCode::I => b'I',
        KeyCode::J => b'J',
        KeyCode::K => b'K',
        KeyCode::L => b'L',
        KeyCode::M => b'M',
        KeyCode::N => b'N',
        KeyCode::O => b'O',
        KeyCode::P => b'P',
        KeyCode::Q => b'Q',
        KeyCode::R => b'R',
        KeyCode::S => b'S',
        KeyCode::T => b'T',
        KeyCode::U => b'U',
        KeyCode::V => b'V',
        KeyCode::W => b'W',
        KeyCode::X => b'X',
        KeyCode::Y => b'Y',
        KeyCode::Z => b'Z',
        _ => return None,
    };
    Some(KeyAction::Char(ch))
}
