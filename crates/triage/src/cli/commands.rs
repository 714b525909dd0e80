use anyhow::{bail, Result};
use colored::*;
use std::io;

use crate::cli::clipboard::TerminalClipboard;
use crate::cli::display::terminal_width;
use crate::cli::session::{field_list, run_session};
use crate::cli::terminal::TerminalView;
use crate::client::{ClientConfig, HttpSearchApi, SearchApi};
use crate::model::Field;
use crate::panel::{ResultsPanel, MIN_INSIGHT_SELECTION};
use crate::view::ClickTarget;

type TerminalPanel = ResultsPanel<HttpSearchApi, TerminalView, TerminalClipboard>;

fn terminal_panel(config: ClientConfig) -> Result<TerminalPanel> {
  let api = HttpSearchApi::with_config(config)?;
  let view = TerminalView::stdout(terminal_width());
  Ok(ResultsPanel::new(api, view, TerminalClipboard::stdout()))
}

/// List the fields a search can be scoped to
pub fn list_fields() -> Result<()> {
  println!("{} Searchable fields:", "📂".cyan());
  println!("{}", field_list());
  Ok(())
}

/// Run a single search, optionally followed by an insight over selected rows
///
/// `select` holds 1-based row numbers.
pub async fn search(
  config: ClientConfig,
  field: Field,
  terms: &[String],
  select: &[usize],
  copy: bool,
) -> Result<()> {
  let mut panel = terminal_panel(config)?;
  let text = terms.join(" ");

  panel.on_field_change(field);
  panel.on_input_change(&text);
  panel.view_mut().set_highlight(&text);

  if !panel.on_search().await? {
    bail!("Search text must not be empty");
  }

  if select.is_empty() {
    return Ok(());
  }

  for n in select {
    if *n == 0 {
      bail!("Rows are numbered from 1");
    }
    panel.on_row_selection_change(n - 1, true)?;
  }

  if !panel.on_insight().await? {
    bail!("Select at least {MIN_INSIGHT_SELECTION} rows to request an insight");
  }

  if copy {
    panel.on_modal_background_click(ClickTarget::Background);
  }

  Ok(())
}

/// Start an interactive session reading commands from stdin
pub async fn interactive(config: ClientConfig, field: Field) -> Result<()> {
  let mut panel = terminal_panel(config)?;
  panel.on_field_change(field);

  let stdin = io::stdin();
  run_session(&mut panel, stdin.lock()).await
}

/// Ask the server to rebuild its search index
pub async fn reindex(config: ClientConfig) -> Result<()> {
  let api = HttpSearchApi::with_config(config)?;

  println!("{} Asking the server to rebuild its index...", "🔄".cyan());
  println!("   This reads the incident spreadsheet and may take some time");

  match api.reindex().await {
    Ok(message) => {
      println!("{} {}", "✓".green(), message);
      Ok(())
    }
    Err(e) => {
      println!("{} Re-indexing failed: {}", "✗".red(), e);
      Err(e.into())
    }
  }
}
