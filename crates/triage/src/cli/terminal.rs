//! [`PanelView`] implementation that prints to a terminal

use colored::*;
use std::fmt::Display;
use std::io::{self, Stdout, Write};
use tracing::debug;

use crate::cli::display::{render_modal, render_row, row_summary};
use crate::model::SearchResultRow;
use crate::view::{Notice, PanelView};

/// Prints the panel as a scrolling transcript
///
/// Rows, checkbox changes, the busy indicator and the modal are written as
/// they happen; the view keeps its own copy of the table so it can redraw it.
pub struct TerminalView<W: Write = Stdout> {
  out: W,
  width: usize,
  terms: Vec<String>,
  rows: Vec<SearchResultRow>,
  checked: Vec<bool>,
  busy: bool,
  controls_enabled: bool,
  submit_enabled: bool,
  insight_visible: bool,
  modal_text: String,
  modal_visible: bool,
}

impl TerminalView<Stdout> {
  pub fn stdout(width: usize) -> Self {
    Self::new(io::stdout(), width)
  }
}

impl<W: Write> TerminalView<W> {
  pub fn new(out: W, width: usize) -> Self {
    Self {
      out,
      width,
      terms: Vec::new(),
      rows: Vec::new(),
      checked: Vec::new(),
      busy: false,
      controls_enabled: true,
      submit_enabled: false,
      insight_visible: false,
      modal_text: String::new(),
      modal_visible: false,
    }
  }

  /// Terms to highlight in free-text cells
  pub fn set_highlight(&mut self, query: &str) {
    self.terms = query.split_whitespace().map(str::to_string).collect();
  }

  /// Print the whole table again with current selections
  pub fn redraw(&mut self) {
    if self.rows.is_empty() {
      self.message("No results.");
      return;
    }

    let lines: Vec<String> = self
      .rows
      .iter()
      .enumerate()
      .flat_map(|(index, row)| {
        let mut block = render_row(index, self.checked[index], row, &self.terms, self.width);
        block.push(String::new());
        block
      })
      .collect();
    self.emit(&lines);
  }

  pub fn message(&mut self, text: impl Display) {
    let _ = writeln!(self.out, "{text}");
  }

  pub fn prompt(&mut self) {
    let _ = write!(self.out, "{} ", "triage>".cyan().bold());
    let _ = self.out.flush();
  }

  pub fn busy(&self) -> bool {
    self.busy
  }

  pub fn controls_enabled(&self) -> bool {
    self.controls_enabled
  }

  pub fn submit_enabled(&self) -> bool {
    self.submit_enabled
  }

  pub fn insight_visible(&self) -> bool {
    self.insight_visible
  }

  pub fn modal_visible(&self) -> bool {
    self.modal_visible
  }

  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  pub fn get_ref(&self) -> &W {
    &self.out
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn emit(&mut self, lines: &[String]) {
    for line in lines {
      let _ = writeln!(self.out, "{line}");
    }
    let _ = self.out.flush();
  }
}

impl<W: Write> PanelView for TerminalView<W> {
  fn set_row_data(&mut self, rows: &[SearchResultRow]) {
    self.rows = rows.to_vec();
    self.checked = vec![false; rows.len()];

    if rows.is_empty() {
      let query = self.terms.join(" ");
      self.message(format!("No matches found for: {}", query.yellow()));
      return;
    }

    self.redraw();
    self.message(format!("{} {} results", "✓".green(), rows.len()));
  }

  fn set_row_checked(&mut self, index: usize, checked: bool) {
    if let Some(slot) = self.checked.get_mut(index) {
      *slot = checked;
      let line = row_summary(index, checked, &self.rows[index]);
      self.message(line);
    }
  }

  fn set_busy(&mut self, busy: bool) {
    if busy && !self.busy {
      self.message(format!("{} working...", "⏳".cyan()));
    }
    self.busy = busy;
  }

  fn set_controls_enabled(&mut self, enabled: bool) {
    debug!(enabled, "query controls");
    self.controls_enabled = enabled;
  }

  fn set_submit_enabled(&mut self, enabled: bool) {
    self.submit_enabled = enabled;
  }

  fn set_insight_visible(&mut self, visible: bool) {
    if visible && !self.insight_visible {
      let selected = self.checked.iter().filter(|checked| **checked).count();
      self.message(format!("{} {selected} rows selected, `insight` is available", "💡".yellow()));
    }
    self.insight_visible = visible;
  }

  fn set_modal_text(&mut self, text: &str) {
    self.modal_text = text.to_string();
  }

  fn set_modal_visible(&mut self, visible: bool) {
    if visible {
      let lines = render_modal(&self.modal_text, self.width);
      self.emit(&lines);
    } else if self.modal_visible {
      self.message("Insight closed.".dimmed());
    }
    self.modal_visible = visible;
  }

  fn notify(&mut self, notice: Notice) {
    match notice {
      Notice::Copied => self.message(format!("{} Text copied to clipboard", "✓".green())),
      Notice::CopyFailed(reason) => {
        self.message(format!("{} Failed to copy text: {reason}", "✗".red()))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Field;

  fn output(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).unwrap()
  }

  fn rows() -> Vec<SearchResultRow> {
    vec![
      SearchResultRow::new().with(Field::IncidentId, "INC-1").with(Field::Summary, "Disk full"),
      SearchResultRow::new().with(Field::IncidentId, "INC-2"),
    ]
  }

  #[test]
  fn test_rows_are_printed_in_blocks() {
    colored::control::set_override(false);
    let mut view = TerminalView::new(Vec::new(), 80);
    view.set_row_data(&rows());

    assert_eq!(view.row_count(), 2);
    let out = output(view);
    assert!(out.contains("=== [ ] 1 ==="));
    assert!(out.contains("=== [ ] 2 ==="));
    assert!(out.contains("2 results"));
  }

  #[test]
  fn test_empty_results_message() {
    colored::control::set_override(false);
    let mut view = TerminalView::new(Vec::new(), 80);
    view.set_highlight("  printer   jam ");
    view.set_row_data(&[]);

    assert!(output(view).contains("No matches found for: printer jam"));
  }

  #[test]
  fn test_checkbox_change_prints_summary() {
    colored::control::set_override(false);
    let mut view = TerminalView::new(Vec::new(), 80);
    view.set_row_data(&rows());
    view.set_row_checked(0, true);
    view.set_row_checked(5, true);

    assert!(output(view).contains("[x] 1 INC-1 Disk full"));
  }

  #[test]
  fn test_busy_indicator_prints_once() {
    colored::control::set_override(false);
    let mut view = TerminalView::new(Vec::new(), 80);
    view.set_busy(true);
    view.set_busy(true);
    view.set_busy(false);

    assert!(!view.busy());
    assert_eq!(output(view).matches("working...").count(), 1);
  }

  #[test]
  fn test_modal_and_notices() {
    colored::control::set_override(false);
    let mut view = TerminalView::new(Vec::new(), 80);
    view.set_modal_text("Fixed via patch A");
    view.set_modal_visible(true);
    view.notify(Notice::Copied);
    view.notify(Notice::CopyFailed("no terminal".to_string()));
    view.set_modal_visible(false);

    let out = output(view);
    assert!(out.contains("Fixed via patch A"));
    assert!(out.contains("Text copied to clipboard"));
    assert!(out.contains("Failed to copy text: no terminal"));
    assert!(out.contains("Insight closed."));
  }
}
