//! Command decoder — turns raw IR frames into press classifications.
//!
//! A frame without the repeat flag is a **fresh press**: the held command
//! is replaced by a new lookup (possibly [`Command::None`]).  A repeat
//! frame derives nothing new; the previously decoded command simply
//! stays held.

use log::debug;

use super::commands::{CodeTable, Command, IrFrame, RemoteCode};

/// Classification of one received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// New physical key press.
    Fresh { code: RemoteCode, command: Command },
    /// Continuation of the currently held key.
    Repeat { held: Command },
}

pub struct CommandDecoder {
    table: CodeTable,
    held: Command,
}

impl CommandDecoder {
    pub fn new(table: CodeTable) -> Self {
        Self {
            table,
            held: Command::None,
        }
    }

    pub fn decode(&mut self, frame: IrFrame) -> Decoded {
        if frame.is_repeat {
            debug!("IR | repeat (held={:?})", self.held);
            return Decoded::Repeat { held: self.held };
        }

        let command = self.table.lookup(frame.code);
        debug!("IR | press 0x{:08X} -> {:?}", frame.code, command);
        self.held = command;
        Decoded::Fresh {
            code: frame.code,
            command,
        }
    }

    /// Command most recently derived from a fresh press.
    pub fn held(&self) -> Command {
        self.held
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new(CodeTable::default())
    }
}
