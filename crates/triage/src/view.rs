//! Capabilities the results panel renders through
//!
//! The panel never touches a terminal, widget tree or clipboard directly. A
//! front end hands it a [`PanelView`] and a [`Clipboard`] and the panel
//! drives them.

use crate::error::PanelError;
use crate::model::SearchResultRow;

/// User-facing signals that are not part of the panel's persistent state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  /// Modal text was copied to the clipboard
  Copied,
  /// The clipboard rejected the write
  CopyFailed(String),
}

/// Where a click inside the modal landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
  DismissControl,
  Background,
}

/// The surface a [`crate::panel::ResultsPanel`] renders to
#[cfg_attr(test, mockall::automock)]
pub trait PanelView {
  /// Replace the whole table; every row starts unchecked
  fn set_row_data(&mut self, rows: &[SearchResultRow]);

  /// Reflect a single row's checkbox
  fn set_row_checked(&mut self, index: usize, checked: bool);

  /// Show or hide the busy indicator
  fn set_busy(&mut self, busy: bool);

  /// Enable or disable the query text, field selector and submit control together
  fn set_controls_enabled(&mut self, enabled: bool);

  fn set_submit_enabled(&mut self, enabled: bool);

  fn set_insight_visible(&mut self, visible: bool);

  fn set_modal_text(&mut self, text: &str);

  fn set_modal_visible(&mut self, visible: bool);

  fn notify(&mut self, notice: Notice);
}

/// Write access to the system clipboard
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
  fn write_text(&mut self, text: &str) -> Result<(), PanelError>;
}
