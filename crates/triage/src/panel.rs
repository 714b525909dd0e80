//! The results panel controller
//!
//! Owns the query inputs, the current result table with its selection, and
//! the insight modal. Every user interaction is an `on_*` method; rendering
//! goes through the injected [`PanelView`] and [`Clipboard`].
//!
//! Each request action is either idle or loading. The transition back to
//! idle happens right after the request resolves, before the outcome is
//! inspected, so a failed request can never leave controls disabled.

use tracing::{debug, error, info, warn};

use crate::client::SearchApi;
use crate::error::PanelError;
use crate::model::{is_submittable, join_resolutions, Field, SearchQuery, SearchResultRow};
use crate::view::{ClickTarget, Clipboard, Notice, PanelView};

/// Checked rows needed before an insight can be requested
pub const MIN_INSIGHT_SELECTION: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
  #[default]
  Idle,
  Loading,
}

impl ActionState {
  pub fn is_loading(self) -> bool {
    self == ActionState::Loading
  }
}

pub struct ResultsPanel<A, V, C> {
  api: A,
  view: V,
  clipboard: C,
  field: Field,
  text: String,
  rows: Vec<SearchResultRow>,
  checked: Vec<bool>,
  insight_visible: bool,
  modal_text: String,
  modal_visible: bool,
  search_state: ActionState,
  insight_state: ActionState,
}

impl<A, V, C> ResultsPanel<A, V, C>
where
  A: SearchApi,
  V: PanelView,
  C: Clipboard,
{
  /// Create a panel with an empty query and table, and bring the view in line with it
  pub fn new(api: A, view: V, clipboard: C) -> Self {
    let mut panel = Self {
      api,
      view,
      clipboard,
      field: Field::default(),
      text: String::new(),
      rows: Vec::new(),
      checked: Vec::new(),
      insight_visible: false,
      modal_text: String::new(),
      modal_visible: false,
      search_state: ActionState::Idle,
      insight_state: ActionState::Idle,
    };

    panel.view.set_busy(false);
    panel.view.set_controls_enabled(true);
    panel.view.set_submit_enabled(false);
    panel.view.set_insight_visible(false);
    panel.view.set_modal_visible(false);
    panel
  }

  pub fn on_input_change(&mut self, text: &str) {
    self.text = text.to_string();
    self.view.set_submit_enabled(self.submit_enabled());
  }

  pub fn on_field_change(&mut self, field: Field) {
    debug!(field = %field, "query field changed");
    self.field = field;
  }

  /// Run the current query and replace the table with its results
  ///
  /// Returns `Ok(false)` without contacting the server when the submit
  /// control is disabled. On failure the table keeps its previous rows.
  pub async fn on_search(&mut self) -> Result<bool, PanelError> {
    if !self.submit_enabled() || self.search_state.is_loading() {
      debug!("search ignored: submit control is disabled");
      return Ok(false);
    }

    let query = SearchQuery::new(self.field, self.text.clone());

    self.search_state = ActionState::Loading;
    self.view.set_busy(true);
    self.view.set_controls_enabled(false);

    let outcome = self.api.search(&query).await;

    self.search_state = ActionState::Idle;
    self.sync_busy();
    self.view.set_controls_enabled(true);
    self.view.set_submit_enabled(self.submit_enabled());

    match outcome {
      Ok(rows) => {
        info!(field = %query.field, count = rows.len(), "search completed");
        self.replace_rows(rows);
        Ok(true)
      }
      Err(e) => {
        log_failure("search", &e);
        Err(e)
      }
    }
  }

  /// Check or uncheck a row (0-based) and re-evaluate the insight action
  pub fn on_row_selection_change(&mut self, index: usize, checked: bool) -> Result<(), PanelError> {
    let len = self.rows.len();
    let slot =
      self.checked.get_mut(index).ok_or(PanelError::RowOutOfRange { index, len })?;

    *slot = checked;
    self.view.set_row_checked(index, checked);
    self.sync_insight_visibility();
    Ok(())
  }

  /// Request an insight over the resolutions of every checked row
  ///
  /// Returns `Ok(false)` without contacting the server while the insight
  /// action is hidden.
  pub async fn on_insight(&mut self) -> Result<bool, PanelError> {
    if !self.insight_visible || self.insight_state.is_loading() {
      debug!("insight ignored: fewer than {MIN_INSIGHT_SELECTION} rows selected");
      return Ok(false);
    }

    let resolutions = join_resolutions(self.checked_rows().map(SearchResultRow::resolution));

    self.insight_state = ActionState::Loading;
    self.view.set_busy(true);

    let outcome = self.api.insight(&resolutions).await;

    self.insight_state = ActionState::Idle;
    self.sync_busy();

    match outcome {
      Ok(insight) => {
        debug!(length = insight.resolutions.len(), "insight received");
        self.modal_text = insight.resolutions;
        self.view.set_modal_text(&self.modal_text);
        self.modal_visible = true;
        self.view.set_modal_visible(true);
        Ok(true)
      }
      Err(e) => {
        log_failure("insight", &e);
        Err(e)
      }
    }
  }

  pub fn on_modal_dismiss(&mut self) {
    self.modal_visible = false;
    self.view.set_modal_visible(false);
  }

  /// A click anywhere on the modal; everything except the dismiss control copies
  pub fn on_modal_background_click(&mut self, target: ClickTarget) {
    if !self.modal_visible {
      return;
    }

    match target {
      ClickTarget::DismissControl => self.on_modal_dismiss(),
      ClickTarget::Background => match self.clipboard.write_text(&self.modal_text) {
        Ok(()) => self.view.notify(Notice::Copied),
        Err(e) => {
          error!(error = %e, "failed to copy insight text");
          self.view.notify(Notice::CopyFailed(e.to_string()));
        }
      },
    }
  }

  pub fn field(&self) -> Field {
    self.field
  }

  pub fn submit_enabled(&self) -> bool {
    is_submittable(&self.text)
  }

  pub fn rows(&self) -> &[SearchResultRow] {
    &self.rows
  }

  pub fn is_checked(&self, index: usize) -> bool {
    self.checked.get(index).copied().unwrap_or(false)
  }

  pub fn checked_count(&self) -> usize {
    self.checked.iter().filter(|checked| **checked).count()
  }

  pub fn insight_visible(&self) -> bool {
    self.insight_visible
  }

  pub fn modal_text(&self) -> &str {
    &self.modal_text
  }

  pub fn modal_visible(&self) -> bool {
    self.modal_visible
  }

  pub fn search_state(&self) -> ActionState {
    self.search_state
  }

  pub fn insight_state(&self) -> ActionState {
    self.insight_state
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  pub fn view(&self) -> &V {
    &self.view
  }

  pub fn view_mut(&mut self) -> &mut V {
    &mut self.view
  }

  pub fn clipboard(&self) -> &C {
    &self.clipboard
  }

  fn checked_rows(&self) -> impl Iterator<Item = &SearchResultRow> + '_ {
    self.rows.iter().zip(&self.checked).filter(|(_, checked)| **checked).map(|(row, _)| row)
  }

  fn replace_rows(&mut self, rows: Vec<SearchResultRow>) {
    self.checked = vec![false; rows.len()];
    self.rows = rows;
    self.view.set_row_data(&self.rows);
    self.sync_insight_visibility();
  }

  fn sync_insight_visibility(&mut self) {
    let visible = self.checked_count() >= MIN_INSIGHT_SELECTION;
    if visible != self.insight_visible {
      self.insight_visible = visible;
      self.view.set_insight_visible(visible);
    }
  }

  fn sync_busy(&mut self) {
    let busy = self.search_state.is_loading() || self.insight_state.is_loading();
    self.view.set_busy(busy);
  }
}

fn log_failure(action: &str, e: &PanelError) {
  if e.is_network() {
    warn!(action, error = %e, "service unreachable");
  } else {
    error!(action, error = %e, "request failed");
  }
}
