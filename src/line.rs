use crate::config::LINE_CAPACITY;

/// The line being typed at the prompt. One byte of capacity is held back
/// so the contents always fit a NUL-terminated buffer of the same size.
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuffer {
    pub const fn new() -> LineBuffer {
        LineBuffer { bytes: [0; LINE_CAPACITY], len: 0 }
    }

    /// Returns `false` when the line is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len + 1 >= LINE_CAPACITY {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.len = self.len.checked_sub(1)?;
        Some(core::mem::take(&mut self.bytes[self.len]))
    }

    pub fn clear(&mut self) {
        self.bytes = [0; LINE_CAPACITY];
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII ever gets pushed by the console.
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        LineBuffer::new()
    }
}
