//! The single owner of the console session, bound to VGA text memory and
//! the PS/2 controller.

use kconsole::config::{BUFFER_HEIGHT, BUFFER_WIDTH, VGA_ADDRESS};
use kconsole::keyboard::Ps2Keyboard;
use kconsole::vga_buffer::CrtcCursor;
use kconsole::{Console, ConsoleConfig, ScancodeDecoder, ScreenChar, SurfaceError, Writer};
use spin::{Mutex, Once};
use volatile::Volatile;

pub type KernelConsole = Console<'static, Ps2Keyboard, CrtcCursor>;

/// Set only once the console is fully built, so a failed build leaves it empty.
pub static CONSOLE: Once<Mutex<KernelConsole>> = Once::new();

pub fn init(config: ConsoleConfig) -> Result<&'static Mutex<KernelConsole>, SurfaceError> {
    let surface = unsafe {
        core::slice::from_raw_parts_mut(
            VGA_ADDRESS as *mut Volatile<ScreenChar>,
            BUFFER_WIDTH * BUFFER_HEIGHT,
        )
    };
    let cursor = unsafe { CrtcCursor::new() };
    let writer = Writer::new(surface, BUFFER_WIDTH, cursor, config.foreground, config.background)?;
    let decoder = ScancodeDecoder::new(unsafe { Ps2Keyboard::new() });
    let console = Console::new(decoder, writer, config);
    Ok(CONSOLE.call_once(|| Mutex::new(console)))
}
