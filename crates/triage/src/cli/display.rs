//! Display formatting utilities for CLI output

use colored::*;

use crate::model::{Field, SearchResultRow};

pub const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;

/// Width of the widest field label, so values line up in a column
const LABEL_WIDTH: usize = 14;

/// Current terminal width, or [`DEFAULT_WIDTH`] when stdout is not a terminal
pub fn terminal_width() -> usize {
  console::Term::stdout()
    .size_checked()
    .map(|(_, cols)| cols as usize)
    .filter(|cols| *cols >= MIN_WIDTH)
    .unwrap_or(DEFAULT_WIDTH)
}

/// Highlight search terms in text (ASCII case-insensitive)
pub fn highlight_keywords(text: &str, terms: &[String]) -> String {
  let haystack = text.to_ascii_lowercase();
  let mut ranges: Vec<(usize, usize)> = Vec::new();

  for term in terms.iter().filter(|term| !term.is_empty()) {
    let needle = term.to_ascii_lowercase();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&needle) {
      let abs_pos = start + pos;
      ranges.push((abs_pos, abs_pos + needle.len()));
      start = abs_pos + needle.len();
    }
  }

  if ranges.is_empty() {
    return text.to_string();
  }

  // Overlapping matches from different terms collapse into one highlight
  ranges.sort_unstable();
  let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
  for (start, end) in ranges {
    match merged.last_mut() {
      Some(last) if start <= last.1 => last.1 = last.1.max(end),
      _ => merged.push((start, end)),
    }
  }

  let mut highlighted = String::with_capacity(text.len());
  let mut end = 0;
  for (start, stop) in merged {
    highlighted.push_str(&text[end..start]);
    highlighted.push_str(&text[start..stop].yellow().bold().to_string());
    end = stop;
  }
  highlighted.push_str(&text[end..]);
  highlighted
}

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    let mut current_len = 0;

    for word in paragraph.split_whitespace() {
      let word_len = word.chars().count();
      if current_line.is_empty() {
        current_line = word.to_string();
        current_len = word_len;
      } else if current_len + 1 + word_len <= width {
        current_line.push(' ');
        current_line.push_str(word);
        current_len += 1 + word_len;
      } else {
        lines.push(std::mem::take(&mut current_line));
        current_line = word.to_string();
        current_len = word_len;
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

pub fn checkbox(checked: bool) -> String {
  if checked {
    format!("[{}]", "x".green().bold())
  } else {
    "[ ]".to_string()
  }
}

/// Render one result row as a banner followed by one line per field
///
/// `index` is 0-based; rows are shown to the user numbered from 1.
pub fn render_row(
  index: usize,
  checked: bool,
  row: &SearchResultRow,
  terms: &[String],
  width: usize,
) -> Vec<String> {
  let mut lines = vec![format!("=== {} {} ===", checkbox(checked), (index + 1).to_string().bold())];

  let value_width = width.saturating_sub(LABEL_WIDTH + 2).max(MIN_WIDTH / 2);
  let indent = " ".repeat(LABEL_WIDTH + 2);

  for (field, value) in row.cells() {
    let label = format!("{:<width$}", field.label(), width = LABEL_WIDTH).blue();
    let mut wrapped = wrap_text(value, value_width).into_iter();

    let first = wrapped.next().unwrap_or_default();
    lines.push(format!("{label}  {}", highlight_value(field, &first, terms)));
    for continuation in wrapped {
      lines.push(format!("{indent}{}", highlight_value(field, &continuation, terms)));
    }
  }

  lines
}

/// A one-line summary of a row, used when only its selection changes
pub fn row_summary(index: usize, checked: bool, row: &SearchResultRow) -> String {
  let summary = row.cell(Field::Summary);
  let summary = if summary.chars().count() > 60 {
    format!("{}...", summary.chars().take(57).collect::<String>())
  } else {
    summary.to_string()
  };

  format!(
    "{} {} {} {}",
    checkbox(checked),
    (index + 1).to_string().bold(),
    row.cell(Field::IncidentId).cyan(),
    summary.dimmed()
  )
}

/// Render the insight modal as a framed block
pub fn render_modal(text: &str, width: usize) -> Vec<String> {
  let border = "=".repeat(width.min(DEFAULT_WIDTH));
  let mut lines = vec![border.clone(), format!("{}", "Insight".green().bold()), String::new()];
  lines.extend(wrap_text(text, width.min(DEFAULT_WIDTH)));
  lines.push(String::new());
  lines.push(format!("{}", "copy: copy to clipboard   close: dismiss".dimmed()));
  lines.push(border);
  lines
}

fn highlight_value(field: Field, value: &str, terms: &[String]) -> String {
  // Only free-text columns are matched against the query
  match field {
    Field::WorkDetails | Field::Notes | Field::Summary | Field::Resolution => {
      highlight_keywords(value, terms)
    }
    _ => value.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plain() {
    colored::control::set_override(false);
  }

  #[test]
  fn test_wrap_text_respects_width() {
    let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
    assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
    assert!(lines.iter().all(|line| line.len() <= 10));
  }

  #[test]
  fn test_wrap_text_keeps_blank_paragraphs() {
    let lines = wrap_text("first\n\nsecond", 80);
    assert_eq!(lines, vec!["first", "", "second"]);
  }

  #[test]
  fn test_wrap_text_empty_input() {
    assert_eq!(wrap_text("", 80), vec![String::new()]);
  }

  #[test]
  fn test_highlight_without_matches_is_unchanged() {
    plain();
    let text = "Restarted the queue manager";
    assert_eq!(highlight_keywords(text, &["disk".to_string()]), text);
  }

  #[test]
  fn test_highlight_keeps_text_when_color_is_off() {
    plain();
    let terms = vec!["disk".to_string(), "full".to_string()];
    let highlighted = highlight_keywords("Disk full on DISK2", &terms);

    assert_eq!(highlighted, "Disk full on DISK2");
  }

  #[test]
  fn test_render_row_lists_every_field_in_order() {
    plain();
    let row = SearchResultRow::new()
      .with(Field::IncidentId, "INC-7")
      .with(Field::Resolution, "Fixed via patch A");

    let lines = render_row(2, true, &row, &[], 80);

    assert_eq!(lines[0], "=== [x] 3 ===");
    assert_eq!(lines.len(), 1 + Field::ALL.len());
    assert!(lines[1].starts_with("Incident ID"));
    assert!(lines[1].ends_with("INC-7"));
    assert!(lines[8].starts_with("Resolution"));
    assert!(lines[8].ends_with("Fixed via patch A"));
  }

  #[test]
  fn test_row_summary_truncates_long_summaries() {
    plain();
    let row = SearchResultRow::new()
      .with(Field::IncidentId, "INC-9")
      .with(Field::Summary, "x".repeat(100));

    let summary = row_summary(0, false, &row);
    assert!(summary.starts_with("[ ] 1 INC-9"));
    assert!(summary.ends_with("..."));
  }

  #[test]
  fn test_render_modal_contains_text() {
    plain();
    let lines = render_modal("Fixed via patch A", 120);
    assert!(lines.iter().any(|line| line == "Fixed via patch A"));
    assert_eq!(lines.first(), lines.last());
  }
}
