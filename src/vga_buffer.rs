//! Text-mode renderer: a fixed grid of [`ScreenChar`] cells, a linear write
//! position and the hardware cursor that follows it.

use core::fmt;

use log::trace;
use thiserror::Error;
use volatile::Volatile;

use crate::color::{Color, ColorCode, ScreenChar};
use crate::config::{ERASE_BACKGROUND, ERASE_FOREGROUND, PROMPT_MARGIN, SCROLL_MARGIN_ROWS};

/// Moves the visible caret.
pub trait CursorControl {
    fn set_position(&mut self, offset: u16);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface must have at least one column")]
    ZeroColumns,
    #[error("surface has no cells")]
    Empty,
    #[error("surface of {len} cells is not a whole number of {columns}-column rows")]
    RaggedRows { len: usize, columns: usize },
    #[error("surface of {len} cells does not fit a 16-bit cursor offset")]
    TooLarge { len: usize },
}

pub struct Writer<'a, C> {
    buffer: &'a mut [Volatile<ScreenChar>],
    columns: usize,
    write_index: usize,
    current_line: usize,
    foreground: Color,
    background: Color,
    cursor: C,
}

impl<'a, C: CursorControl> Writer<'a, C> {
    /// Takes ownership of the surface, blanks it in the given colours and
    /// makes those colours active.
    pub fn new(
        buffer: &'a mut [Volatile<ScreenChar>],
        columns: usize,
        cursor: C,
        foreground: Color,
        background: Color,
    ) -> Result<Self, SurfaceError> {
        let len = buffer.len();
        if columns == 0 {
            return Err(SurfaceError::ZeroColumns);
        }
        if len == 0 {
            return Err(SurfaceError::Empty);
        }
        if len % columns != 0 {
            return Err(SurfaceError::RaggedRows { len, columns });
        }
        if len > u16::MAX as usize {
            return Err(SurfaceError::TooLarge { len });
        }

        let mut writer = Writer {
            buffer,
            columns,
            write_index: 0,
            current_line: 0,
            foreground,
            background,
            cursor,
        };
        writer.clear(foreground, background);
        Ok(writer)
    }

    /// Blanks every cell. Line 0 is left for a banner: the next `new_line`
    /// starts at line 1.
    pub fn clear(&mut self, foreground: Color, background: Color) {
        let blank = ScreenChar::blank(ColorCode::new(foreground, background));
        for cell in self.buffer.iter_mut() {
            cell.write(blank);
        }
        self.current_line = 1;
        self.write_index = 0;
        self.sync_cursor();
    }

    /// Moves the write position to the start of the next line. Past the
    /// scroll margin the screen is cleared first and output resumes at row 0,
    /// not at the banner-reserving row 1 a plain `clear` leaves.
    pub fn new_line(&mut self) {
        if self.current_line > self.rows().saturating_sub(SCROLL_MARGIN_ROWS) {
            trace!("line {} past scroll margin, clearing", self.current_line);
            self.clear(self.foreground, self.background);
            self.current_line = 0;
        }
        self.write_index = self.columns * self.current_line;
        self.current_line += 1;
        self.sync_cursor();
    }

    /// Writes one cell in the active colours and advances. There is no
    /// wrapping; once the last cell is reached further output overwrites it.
    pub fn print_char(&mut self, byte: u8) {
        let color_code = ColorCode::new(self.foreground, self.background);
        self.buffer[self.write_index].write(ScreenChar::new(byte, color_code));
        if self.write_index + 1 < self.buffer.len() {
            self.write_index += 1;
        }
        self.sync_cursor();
    }

    /// Prints bytes up to the end of `s` or the first NUL.
    pub fn print_string(&mut self, s: &str) {
        for byte in s.bytes().take_while(|&b| b != 0) {
            self.print_char(byte);
        }
    }

    /// Steps back over the last character of the input line. Never moves into
    /// the prompt. Returns whether anything was erased.
    pub fn erase_last_char(&mut self) -> bool {
        let line_start = self.columns * self.current_line.saturating_sub(1);
        if self.write_index <= line_start + PROMPT_MARGIN {
            return false;
        }
        self.write_index -= 1;
        let blank = ScreenChar::blank(ColorCode::new(ERASE_FOREGROUND, ERASE_BACKGROUND));
        self.buffer[self.write_index].write(blank);
        self.sync_cursor();
        true
    }

    pub fn colors(&self) -> (Color, Color) {
        (self.foreground, self.background)
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.buffer.len() / self.columns
    }

    pub fn cell(&self, index: usize) -> Option<ScreenChar> {
        self.buffer.get(index).map(Volatile::read)
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    fn sync_cursor(&mut self) {
        // Bounded by the u16 length check in `new`.
        self.cursor.set_position(self.write_index as u16);
    }
}

impl<C: CursorControl> fmt::Write for Writer<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                b'\n' => self.new_line(),
                0x20..=0x7e => self.print_char(byte),
                _ => self.print_char(0xfe),
            }
        }
        Ok(())
    }
}

/// CRT controller cursor location registers.
#[cfg(target_arch = "x86_64")]
pub struct CrtcCursor {
    index: x86_64::instructions::port::Port<u8>,
    data: x86_64::instructions::port::Port<u8>,
}

#[cfg(target_arch = "x86_64")]
impl CrtcCursor {
    const INDEX_PORT: u16 = 0x3D4;
    const DATA_PORT: u16 = 0x3D5;
    const LOCATION_LOW: u8 = 0x0F;
    const LOCATION_HIGH: u8 = 0x0E;

    /// # Safety
    ///
    /// The caller must be the only user of the CRT controller ports.
    pub unsafe fn new() -> CrtcCursor {
        use x86_64::instructions::port::Port;

        CrtcCursor {
            index: Port::new(Self::INDEX_PORT),
            data: Port::new(Self::DATA_PORT),
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl CursorControl for CrtcCursor {
    fn set_position(&mut self, offset: u16) {
        let [low, high] = offset.to_le_bytes();
        unsafe {
            self.index.write(Self::LOCATION_LOW);
            self.data.write(low);
            self.index.write(Self::LOCATION_HIGH);
            self.data.write(high);
        }
    }
}
