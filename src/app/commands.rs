//! Semantic remote commands and the IR code lookup table.
//!
//! The infrared collaborator hands the core an opaque 32-bit code plus a
//! repeat flag.  [`CodeTable`] maps that code to a [`Command`]; anything
//! not in the table is [`Command::None`] and silently ignored.
//!
//! # Default key layout
//!
//! The default table targets the common 17-key NEC remote (address 0x00).
//! Codes are the raw 32-bit frame, LSB first, as most IR decoders report it:
//! `(!cmd << 24) | (cmd << 16) | (!addr << 8) | addr`.
//!
//! ```text
//!          [ ^ ]          0x18 - Up
//!    [ < ][ OK ][ > ]     0x08 - Left, 0x1C - Ok, 0x5A - Right
//!          [ v ]          0x52 - Down
//!
//!    [ * ]  0x16 - Star        [ # ]  0x0D - Square
//! ```

use heapless::LinearMap;
use serde::{Deserialize, Serialize};

/// Opaque code produced by the IR decoder for one received signal.
pub type RemoteCode = u32;

/// Maximum number of distinct codes a table can hold.
pub const CODE_TABLE_CAPACITY: usize = 16;

/// One detection event from the IR receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrFrame {
    pub code: RemoteCode,
    /// Set when the remote signals "button still held".
    pub is_repeat: bool,
}

impl IrFrame {
    pub const fn press(code: RemoteCode) -> Self {
        Self {
            code,
            is_repeat: false,
        }
    }

    pub const fn repeat(code: RemoteCode) -> Self {
        Self {
            code,
            is_repeat: true,
        }
    }
}

/// Semantic meaning of a remote key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Command {
    /// No actionable input.
    #[default]
    None,
    /// Step the positional servo up.
    Up,
    /// Step the positional servo down.
    Down,
    /// Spin the rotational servo toward 180.
    Left,
    /// Spin the rotational servo toward 0.
    Right,
    Ok,
    Star,
    Square,
}

impl Command {
    /// Commands the scheduler re-applies while the key is held.
    pub fn is_auto_repeat(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Commands that drive the rotational servo.
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Raw NEC frame for address 0x00 and the given command byte.
pub const fn nec_code(command: u8) -> RemoteCode {
    ((!command as u32) << 24) | ((command as u32) << 16) | 0x0000_FF00
}

/// Default key bindings for the 17-key NEC remote.
pub const NEC_17_KEY: [(RemoteCode, Command); 7] = [
    (nec_code(0x18), Command::Up),
    (nec_code(0x52), Command::Down),
    (nec_code(0x08), Command::Left),
    (nec_code(0x5A), Command::Right),
    (nec_code(0x1C), Command::Ok),
    (nec_code(0x16), Command::Star),
    (nec_code(0x0D), Command::Square),
];

/// Fixed-capacity code → command lookup.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: LinearMap<RemoteCode, Command, CODE_TABLE_CAPACITY>,
}

impl CodeTable {
    /// An empty table; every code decodes to [`Command::None`].
    pub fn empty() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// The default 17-key NEC remote bindings.
    pub fn nec_17_key() -> Self {
        let mut table = Self::empty();
        for (code, command) in NEC_17_KEY {
            // Capacity exceeds the default table size.
            let _ = table.insert(code, command);
        }
        table
    }

    /// Bind `code` to `command`, replacing any previous binding.
    ///
    /// Returns `false` if the table is full.
    pub fn insert(&mut self, code: RemoteCode, command: Command) -> bool {
        self.entries.insert(code, command).is_ok()
    }

    pub fn lookup(&self, code: RemoteCode) -> Command {
        self.entries.get(&code).copied().unwrap_or(Command::None)
    }

    /// Reverse lookup, mainly for diagnostics and tests.
    pub fn code_for(&self, command: Command) -> Option<RemoteCode> {
        self.entries
            .iter()
            .find_map(|(code, c)| (*c == command).then_some(*code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::nec_17_key()
    }
}
