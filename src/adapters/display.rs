//! Console readout adapter.
//!
//! Implements [`DisplayPort`] by composing the status text and writing
//! it to the log.  Pixel work for a real panel would sit behind the same
//! trait; this adapter keeps the last composed frame so it can be
//! inspected.

use log::info;

use crate::app::display::{DisplaySnapshot, StatusFrame, compose};
use crate::app::ports::{DisplayError, DisplayPort};

#[derive(Debug, Default)]
pub struct LogDisplay {
    ready: bool,
    frame: Option<StatusFrame>,
    redraws: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last composed frame, `None` before the first render.
    pub fn frame(&self) -> Option<&StatusFrame> {
        self.frame.as_ref()
    }

    pub fn redraws(&self) -> u32 {
        self.redraws
    }
}

impl DisplayPort for LogDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.ready = true;
        info!("DISPLAY | console readout ready");
        Ok(())
    }

    fn render(&mut self, snapshot: &DisplaySnapshot) {
        if !self.ready {
            return;
        }
        let frame = compose(snapshot);
        info!(
            "DISPLAY | {} | {} | {} | {}",
            frame[0], frame[1], frame[2], frame[3]
        );
        self.frame = Some(frame);
        self.redraws += 1;
    }
}
