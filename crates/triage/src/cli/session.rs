//! Line-oriented interactive session over a [`ResultsPanel`]
//!
//! Each input line is one user interaction: typing a query, pressing the
//! submit control, ticking a checkbox, or clicking inside the modal.

use anyhow::{anyhow, bail, Result};
use colored::*;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::cli::terminal::TerminalView;
use crate::client::SearchApi;
use crate::error::PanelError;
use crate::model::Field;
use crate::panel::{ResultsPanel, MIN_INSIGHT_SELECTION};
use crate::view::{ClickTarget, Clipboard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
  Field(Field),
  Query(String),
  Go,
  /// 1-based row number
  Check(usize),
  /// 1-based row number
  Uncheck(usize),
  Insight,
  Close,
  Copy,
  Rows,
  Fields,
  Help,
  Quit,
}

pub const HELP: &str = "\
Commands:
  field <name>     choose the field to search (see `fields`)
  query <text>     set the search text
  go               run the search
  check <n>        select row n
  uncheck <n>      deselect row n
  insight          summarise the resolutions of the selected rows
  copy             copy the insight to the clipboard
  close            dismiss the insight
  rows             show the current results again
  fields           list searchable fields
  help             show this help
  quit             leave the session";

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
  let line = line.trim();
  if line.is_empty() {
    return Ok(None);
  }

  let (verb, rest) = match line.split_once(char::is_whitespace) {
    Some((verb, rest)) => (verb, rest.trim()),
    None => (line, ""),
  };

  let command = match verb.to_ascii_lowercase().as_str() {
    "field" => SessionCommand::Field(rest.parse()?),
    // The query keeps inner whitespace; gating on blank text is the panel's job
    "query" | "q" => SessionCommand::Query(rest.to_string()),
    "go" | "search" => SessionCommand::Go,
    "check" | "c" => SessionCommand::Check(row_number(rest)?),
    "uncheck" | "u" => SessionCommand::Uncheck(row_number(rest)?),
    "insight" | "i" => SessionCommand::Insight,
    "close" => SessionCommand::Close,
    "copy" => SessionCommand::Copy,
    "rows" => SessionCommand::Rows,
    "fields" => SessionCommand::Fields,
    "help" | "?" => SessionCommand::Help,
    "quit" | "exit" => SessionCommand::Quit,
    other => bail!("Unknown command '{other}', try `help`"),
  };

  Ok(Some(command))
}

fn row_number(arg: &str) -> Result<usize> {
  let n: usize = arg.parse().map_err(|_| anyhow!("Expected a row number, got '{arg}'"))?;
  if n == 0 {
    bail!("Rows are numbered from 1");
  }
  Ok(n)
}

pub fn field_list() -> String {
  Field::ALL
    .iter()
    .map(|field| format!("  {:<16} ({})", field.label(), field.alias()))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Drive the panel from `input` until `quit` or end of input
pub async fn run_session<A, C, W, R>(
  panel: &mut ResultsPanel<A, TerminalView<W>, C>,
  input: R,
) -> Result<()>
where
  A: SearchApi,
  C: Clipboard,
  W: Write,
  R: BufRead,
{
  let greeting = format!(
    "Searching {} (type `help` for commands)",
    panel.field().label().blue().bold()
  );
  panel.view_mut().message(greeting);

  let mut lines = input.lines();
  loop {
    panel.view_mut().prompt();
    let Some(line) = lines.next() else {
      break;
    };
    let line = line?;

    match parse_command(&line) {
      Ok(Some(SessionCommand::Quit)) => break,
      Ok(Some(command)) => dispatch(panel, command).await,
      Ok(None) => {}
      Err(e) => panel.view_mut().message(format!("{} {e}", "✗".red())),
    }
  }

  Ok(())
}

async fn dispatch<A, C, W>(panel: &mut ResultsPanel<A, TerminalView<W>, C>, command: SessionCommand)
where
  A: SearchApi,
  C: Clipboard,
  W: Write,
{
  debug!(?command, "session command");

  match command {
    SessionCommand::Field(field) => {
      panel.on_field_change(field);
      panel.view_mut().message(format!("Searching {}", field.label().blue().bold()));
    }
    SessionCommand::Query(text) => {
      panel.on_input_change(&text);
      panel.view_mut().set_highlight(&text);
    }
    SessionCommand::Go => {
      if !panel.submit_enabled() {
        panel.view_mut().message("Enter some search text first (`query <text>`).");
        return;
      }
      // Failures are logged by the panel and leave it idle
      let _ = panel.on_search().await;
    }
    SessionCommand::Check(n) => select(panel, n, true),
    SessionCommand::Uncheck(n) => select(panel, n, false),
    SessionCommand::Insight => {
      if !panel.insight_visible() {
        panel
          .view_mut()
          .message(format!("Select at least {MIN_INSIGHT_SELECTION} rows first (`check <n>`)."));
        return;
      }
      let _ = panel.on_insight().await;
    }
    SessionCommand::Close => {
      if panel.modal_visible() {
        panel.on_modal_background_click(ClickTarget::DismissControl);
      }
    }
    SessionCommand::Copy => {
      if panel.modal_visible() {
        panel.on_modal_background_click(ClickTarget::Background);
      } else {
        panel.view_mut().message("No insight to copy.");
      }
    }
    SessionCommand::Rows => panel.view_mut().redraw(),
    SessionCommand::Fields => panel.view_mut().message(field_list()),
    SessionCommand::Help => panel.view_mut().message(HELP),
    SessionCommand::Quit => {}
  }
}

fn select<A, C, W>(panel: &mut ResultsPanel<A, TerminalView<W>, C>, n: usize, checked: bool)
where
  A: SearchApi,
  C: Clipboard,
  W: Write,
{
  let message = match panel.on_row_selection_change(n - 1, checked) {
    Ok(()) => return,
    Err(PanelError::RowOutOfRange { len, .. }) => format!("No row {n}, the table has {len} rows"),
    Err(e) => e.to_string(),
  };
  panel.view_mut().message(format!("{} {message}", "✗".red()));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_basic_commands() {
    assert_eq!(parse_command("go").unwrap(), Some(SessionCommand::Go));
    assert_eq!(parse_command("  QUIT ").unwrap(), Some(SessionCommand::Quit));
    assert_eq!(parse_command("check 3").unwrap(), Some(SessionCommand::Check(3)));
    assert_eq!(parse_command("u 2").unwrap(), Some(SessionCommand::Uncheck(2)));
    assert_eq!(parse_command("").unwrap(), None);
  }

  #[test]
  fn test_parse_query_keeps_inner_spacing() {
    assert_eq!(
      parse_command("query disk  full on /var").unwrap(),
      Some(SessionCommand::Query("disk  full on /var".to_string()))
    );
    assert_eq!(parse_command("query").unwrap(), Some(SessionCommand::Query(String::new())));
  }

  #[test]
  fn test_parse_field_accepts_labels_and_aliases() {
    assert_eq!(
      parse_command("field Assigned Group").unwrap(),
      Some(SessionCommand::Field(Field::AssignedGroup))
    );
    assert_eq!(parse_command("field status").unwrap(), Some(SessionCommand::Field(Field::Status)));
    assert!(parse_command("field Priority").is_err());
  }

  #[test]
  fn test_parse_rejects_bad_row_numbers() {
    assert!(parse_command("check").is_err());
    assert!(parse_command("check zero").is_err());
    assert!(parse_command("check 0").unwrap_err().to_string().contains("numbered from 1"));
  }

  #[test]
  fn test_unknown_command() {
    let err = parse_command("frobnicate").unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
  }

  #[test]
  fn test_field_list_covers_every_field() {
    let list = field_list();
    assert_eq!(list.lines().count(), Field::ALL.len());
    assert!(list.contains("Incident ID"));
    assert!(list.contains("assigned_group"));
  }
}
