//! PS/2 scancode decoding with typematic repeat suppression.

use log::trace;

pub const DATA_PORT: u16 = 0x60;
pub const STATUS_PORT: u16 = 0x64;
const OUTPUT_BUFFER_FULL: u8 = 0x01;

const EXTENDED_PREFIX: u8 = 0xE0;
const RELEASE_BIT: u8 = 0x80;
const KEYCODE_MASK: u8 = 0x7F;

/// Polled source of raw scancode bytes.
pub trait ScancodeSource {
    /// Next waiting byte, or `None` when the controller has nothing for us.
    fn read_scancode(&mut self) -> Option<u8>;
}

/// A make code accepted as a new key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scancode {
    pub code: u8,
    /// Preceded by the `0xE0` prefix.
    pub extended: bool,
}

/// Which keys are currently held, indexed by make code.
pub struct KeyState {
    down: [bool; 128],
}

impl KeyState {
    pub const fn new() -> KeyState {
        KeyState { down: [false; 128] }
    }

    pub fn is_down(&self, code: u8) -> bool {
        self.down.get(code as usize).copied().unwrap_or(false)
    }

    fn set(&mut self, code: u8, held: bool) {
        if let Some(slot) = self.down.get_mut(code as usize) {
            *slot = held;
        }
    }
}

impl Default for KeyState {
    fn default() -> Self {
        KeyState::new()
    }
}

pub struct ScancodeDecoder<S> {
    source: S,
    keys: KeyState,
    extended_pending: bool,
}

impl<S: ScancodeSource> ScancodeDecoder<S> {
    pub fn new(source: S) -> ScancodeDecoder<S> {
        ScancodeDecoder {
            source,
            keys: KeyState::new(),
            extended_pending: false,
        }
    }

    /// Consumes at most one byte and reports a key press if that byte is one.
    ///
    /// Releases, prefixes and auto-repeated make codes of held keys all yield
    /// `None`. Never blocks.
    pub fn poll_key(&mut self) -> Option<Scancode> {
        let byte = self.source.read_scancode()?;

        if byte == EXTENDED_PREFIX {
            self.extended_pending = true;
            return None;
        }

        let extended = core::mem::replace(&mut self.extended_pending, false);

        if byte & RELEASE_BIT != 0 {
            if !extended {
                self.keys.set(byte & KEYCODE_MASK, false);
            }
            return None;
        }

        if !extended {
            if self.keys.is_down(byte) {
                trace!("suppressed typematic repeat of {:#04x}", byte);
                return None;
            }
            self.keys.set(byte, true);
        }

        Some(Scancode { code: byte, extended })
    }

    pub fn key_state(&self) -> &KeyState {
        &self.keys
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

/// The keyboard controller's status and data ports.
#[cfg(target_arch = "x86_64")]
pub struct Ps2Keyboard {
    status: x86_64::instructions::port::PortReadOnly<u8>,
    data: x86_64::instructions::port::PortReadOnly<u8>,
}

#[cfg(target_arch = "x86_64")]
impl Ps2Keyboard {
    /// # Safety
    ///
    /// The caller must own the PS/2 controller ports; nothing else may read
    /// the data port while this value is alive.
    pub unsafe fn new() -> Ps2Keyboard {
        use x86_64::instructions::port::PortReadOnly;

        Ps2Keyboard {
            status: PortReadOnly::new(STATUS_PORT),
            data: PortReadOnly::new(DATA_PORT),
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl ScancodeSource for Ps2Keyboard {
    fn read_scancode(&mut self) -> Option<u8> {
        unsafe {
            if self.status.read() & OUTPUT_BUFFER_FULL == 0 {
                return None;
            }
            Some(self.data.read())
        }
    }
}
