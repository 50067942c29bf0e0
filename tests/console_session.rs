use std::collections::VecDeque;

use kconsole::{
    Color, ColorCode, Console, ConsoleConfig, CursorControl, ScancodeDecoder, ScancodeSource,
    ScreenChar, Writer,
};
use volatile::Volatile;

struct Keys(VecDeque<u8>);

impl ScancodeSource for Keys {
    fn read_scancode(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

#[derive(Default)]
struct Caret(Vec<u16>);

impl CursorControl for Caret {
    fn set_position(&mut self, offset: u16) {
        self.0.push(offset);
    }
}

fn surface() -> Vec<Volatile<ScreenChar>> {
    (0..2000)
        .map(|_| Volatile::new(ScreenChar::new(0, ColorCode::new(Color::Black, Color::Black))))
        .collect()
}

fn boot<'a>(cells: &'a mut [Volatile<ScreenChar>], bytes: &[u8]) -> Console<'a, Keys, Caret> {
    let writer = Writer::new(cells, 80, Caret::default(), Color::White, Color::Blue)
        .expect("80x25 surface");
    let keys = Keys(bytes.iter().copied().collect());
    let mut console = Console::new(ScancodeDecoder::new(keys), writer, ConsoleConfig::default());
    console.start();
    for _ in 0..bytes.len() {
        console.step();
    }
    console
}

fn row(console: &Console<'_, Keys, Caret>, row: usize) -> String {
    let w = console.writer();
    let text: String = (0..80)
        .map(|col| w.cell(row * 80 + col).unwrap().ascii_character as char)
        .collect();
    text.trim_end().to_string()
}

/// Press and release for each make code.
fn typed(codes: &[u8]) -> Vec<u8> {
    codes.iter().flat_map(|&c| [c, c | 0x80]).collect()
}

const H: u8 = 0x23;
const E: u8 = 0x12;
const L: u8 = 0x26;
const P: u8 = 0x19;
const ENTER: u8 = 0x1C;
const BACKSPACE: u8 = 0x0E;
const SPACE: u8 = 0x39;

#[test]
fn help_lists_commands() {
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[H, E, L, P, ENTER]));
    assert_eq!(row(&console, 2), "HELP");
    assert_eq!(row(&console, 3), "Available commands:");
    assert_eq!(row(&console, 4), "help - Prints this help");
    assert_eq!(row(&console, 5), "time - Display seconds since boot");
    assert_eq!(row(&console, 6), "clear - Clear the screen");
    assert_eq!(row(&console, 7), "");
    assert_eq!(row(&console, 8), ">");
    assert_eq!(console.writer().write_index(), 8 * 80 + 2);
}

#[test]
fn held_key_types_one_character() {
    let mut cells = surface();
    let mut bytes = vec![H; 30];
    bytes.push(H | 0x80);
    let console = boot(&mut cells, &bytes);
    assert_eq!(console.line().as_str(), "H");
    assert_eq!(row(&console, 1), "Type \"HELP\" for help> H");
}

#[test]
fn backspace_edits_line_and_screen() {
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[H, E, BACKSPACE, BACKSPACE, BACKSPACE, P, SPACE]));
    assert_eq!(console.line().as_str(), "P ");
    assert_eq!(row(&console, 1), "Type \"HELP\" for help> P");
    let erased = console.writer().cell(80 + 23).unwrap();
    assert_eq!(erased, ScreenChar::blank(ColorCode::new(Color::White, Color::Blue)));
}

#[test]
fn unknown_command_is_echoed() {
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[P, E, L, ENTER]));
    assert_eq!(row(&console, 2), "PEL");
    assert_eq!(row(&console, 3), ">");
}

#[test]
fn empty_submit_only_reprompts() {
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[ENTER]));
    assert_eq!(row(&console, 2), ">");
    assert_eq!(console.writer().current_line(), 3);
}

#[test]
fn scrolling_past_margin_clears_screen() {
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[ENTER; 21]));
    // rows 2..=22 hold prompts; the 22nd submit overflows and restarts at the top
    assert_eq!(row(&console, 22), ">");
    let mut cells = surface();
    let console = boot(&mut cells, &typed(&[ENTER; 22]));
    assert_eq!(row(&console, 0), ">");
    assert_eq!(row(&console, 1), "");
    assert_eq!(console.writer().current_line(), 1);
    assert_eq!(console.writer().cursor().0.last(), Some(&2));
}

#[test]
fn extended_keys_are_ignored() {
    let mut cells = surface();
    // up arrow press and release, then H
    let console = boot(&mut cells, &[0xE0, 0x48, 0xE0, 0xC8, H]);
    assert_eq!(console.line().as_str(), "H");
}
