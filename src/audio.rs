//! Audio cues through the terminal bell.

use std::io::{self, Write};

use log::debug;
use side_shooter::ports::{AudioCue, Cue};

pub struct TerminalBell {
    muted: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        TerminalBell { muted }
    }
}

impl AudioCue for TerminalBell {
    fn play(&mut self, cue: Cue) {
        debug!("cue {:?}", cue);
        if self.muted {
            return;
        }
        // Bell failures are ignored.
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}
