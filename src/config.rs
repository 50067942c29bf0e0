use crate::color::Color;

pub const VGA_ADDRESS: usize = 0xb8000;
pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;

/// Rows kept free below the last line `new_line` will start.
pub const SCROLL_MARGIN_ROWS: usize = 3;
pub const PROMPT: &str = "> ";
/// Columns occupied by the prompt at the start of an input line.
pub const PROMPT_MARGIN: usize = PROMPT.len();

pub const LINE_CAPACITY: usize = 128;

/// Colours `erase_last_char` blanks with, regardless of the active pair.
pub const ERASE_FOREGROUND: Color = Color::White;
pub const ERASE_BACKGROUND: Color = Color::Blue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub foreground: Color,
    pub background: Color,
    /// Spin iterations while no key is waiting.
    pub idle_spins: u32,
    /// Spin iterations after a handled key.
    pub settle_spins: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            foreground: Color::White,
            background: Color::Blue,
            idle_spins: 0xFFFF,
            settle_spins: 0x00FF_FFFF,
        }
    }
}
