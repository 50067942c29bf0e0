//! Input/output core of a bare-metal text console.
//!
//! [`keyboard`] turns raw PS/2 bytes into one event per physical key press,
//! [`vga_buffer`] renders a character grid with a synchronized hardware cursor,
//! and [`console`] composes both into the polling read-eval loop.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod config;
pub mod console;
pub mod keyboard;
pub mod keymap;
pub mod line;
pub mod vga_buffer;

pub use color::{Color, ColorCode, ScreenChar};
pub use config::ConsoleConfig;
pub use console::{poll_once, run, Backoff, Console, SpinBackoff};
pub use keyboard::{KeyState, Scancode, ScancodeDecoder, ScancodeSource};
pub use vga_buffer::{CursorControl, SurfaceError, Writer};
