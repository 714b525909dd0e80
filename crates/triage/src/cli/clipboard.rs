//! Clipboard access through the terminal's OSC 52 escape sequence
//!
//! Works over SSH and inside multiplexers that forward OSC 52, with no
//! display server connection required.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::{self, Stdout, Write};

use crate::error::PanelError;
use crate::view::Clipboard;

/// Many terminals silently drop larger OSC 52 payloads
pub const MAX_OSC52_BYTES: usize = 100_000;

pub struct TerminalClipboard<W: Write = Stdout> {
  out: W,
}

impl TerminalClipboard<Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> TerminalClipboard<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
  fn write_text(&mut self, text: &str) -> Result<(), PanelError> {
    let sequence = osc52_sequence(text);
    if sequence.len() > MAX_OSC52_BYTES {
      return Err(PanelError::clipboard(format!(
        "text is too large for the terminal clipboard ({} bytes encoded, limit {MAX_OSC52_BYTES})",
        sequence.len()
      )));
    }

    self
      .out
      .write_all(sequence.as_bytes())
      .and_then(|_| self.out.flush())
      .map_err(|e| PanelError::clipboard(e.to_string()))
  }
}

pub fn osc52_sequence(text: &str) -> String {
  let encoded = STANDARD.encode(text.as_bytes());
  format!("\x1b]52;c;{encoded}\x1b\\")
}
