//! The console session: one owner for the decoder, the renderer and the line
//! being edited, driven by a caller-owned polling loop.

use log::debug;

use crate::config::{ConsoleConfig, PROMPT};
use crate::keyboard::{ScancodeDecoder, ScancodeSource};
use crate::keymap::{self, KeyAction};
use crate::line::LineBuffer;
use crate::vga_buffer::{CursorControl, Writer};

/// What the loop does between polls.
pub trait Backoff {
    /// Nothing was waiting at the keyboard.
    fn idle(&mut self);
    /// A key was just handled.
    fn settle(&mut self) {
        self.idle();
    }
}

/// Busy-waits; there is no timer to sleep on.
pub struct SpinBackoff {
    idle_spins: u32,
    settle_spins: u32,
}

impl SpinBackoff {
    pub fn new(idle_spins: u32, settle_spins: u32) -> SpinBackoff {
        SpinBackoff { idle_spins, settle_spins }
    }

    pub fn from_config(config: &ConsoleConfig) -> SpinBackoff {
        SpinBackoff::new(config.idle_spins, config.settle_spins)
    }

    fn spin(count: u32) {
        for _ in 0..count {
            core::hint::spin_loop();
        }
    }
}

impl Backoff for SpinBackoff {
    fn idle(&mut self) {
        Self::spin(self.idle_spins);
    }

    fn settle(&mut self) {
        Self::spin(self.settle_spins);
    }
}

/// One loop iteration: poll through `step`, then back off. Returns what
/// `step` returned.
pub fn poll_once<B: Backoff>(step: impl FnOnce() -> bool, backoff: &mut B) -> bool {
    let handled = step();
    if handled {
        backoff.settle();
    } else {
        backoff.idle();
    }
    handled
}

/// The polling loop. `step` is usually `Console::step` behind whatever lock
/// owns the console.
pub fn run<B: Backoff>(mut step: impl FnMut() -> bool, backoff: &mut B) -> ! {
    loop {
        poll_once(&mut step, backoff);
    }
}

pub struct Console<'a, S, C> {
    decoder: ScancodeDecoder<S>,
    writer: Writer<'a, C>,
    line: LineBuffer,
    config: ConsoleConfig,
}

impl<'a, S: ScancodeSource, C: CursorControl> Console<'a, S, C> {
    pub fn new(decoder: ScancodeDecoder<S>, writer: Writer<'a, C>, config: ConsoleConfig) -> Self {
        Console {
            decoder,
            writer,
            line: LineBuffer::new(),
            config,
        }
    }

    /// Greeting on the banner row followed by the first prompt.
    pub fn start(&mut self) {
        self.writer.print_string("Welcome to kconsole");
        self.writer.new_line();
        self.writer.print_string("Type \"HELP\" for help");
        self.writer.print_string(PROMPT);
    }

    /// Polls once and handles at most one key. Returns whether a key press
    /// was decoded.
    pub fn step(&mut self) -> bool {
        let Some(scancode) = self.decoder.poll_key() else {
            return false;
        };
        if let Some(action) = keymap::translate(scancode) {
            self.handle(action);
        }
        true
    }

    pub fn handle(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => self.submit(),
            KeyAction::Erase => {
                if !self.line.is_empty() && self.writer.erase_last_char() {
                    self.line.pop();
                }
            }
            KeyAction::Space => self.accept(b' '),
            KeyAction::Char(byte) => self.accept(byte),
        }
    }

    fn accept(&mut self, byte: u8) {
        if self.line.push(byte) {
            self.writer.print_char(byte);
        }
    }

    fn submit(&mut self) {
        let command = self.line.as_str();
        debug!("submitted {:?}", command);

        if !command.is_empty() {
            self.writer.new_line();
            self.writer.print_string(command);
        }

        match command {
            "TIME" => {
                self.writer.new_line();
                self.writer.print_string("no time available");
            }
            "HELP" => {
                for text in [
                    "Available commands:",
                    "help - Prints this help",
                    "time - Display seconds since boot",
                    "clear - Clear the screen",
                ] {
                    self.writer.new_line();
                    self.writer.print_string(text);
                }
                self.writer.new_line();
            }
            "CLEAR" => self.writer.clear(self.config.foreground, self.config.background),
            _ => {}
        }

        self.line.clear();
        self.writer.new_line();
        self.writer.print_string(PROMPT);
    }

    pub fn writer(&self) -> &Writer<'a, C> {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut Writer<'a, C> {
        &mut self.writer
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn decoder_mut(&mut self) -> &mut ScancodeDecoder<S> {
        &mut self.decoder
    }
}
