#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use triage::{
  Clipboard, Field, InsightResult, Notice, PanelError, PanelView, SearchApi, SearchQuery,
  SearchResultRow,
};

/// In-memory search service that replays queued responses and records requests
#[derive(Default)]
pub struct FakeSearchApi {
  search_responses: Mutex<VecDeque<Result<Vec<SearchResultRow>, PanelError>>>,
  insight_responses: Mutex<VecDeque<Result<InsightResult, PanelError>>>,
  pub queries: Mutex<Vec<SearchQuery>>,
  pub insight_requests: Mutex<Vec<String>>,
}

impl FakeSearchApi {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_search(self, response: Result<Vec<SearchResultRow>, PanelError>) -> Self {
    self.search_responses.lock().unwrap().push_back(response);
    self
  }

  pub fn with_insight(self, response: Result<InsightResult, PanelError>) -> Self {
    self.insight_responses.lock().unwrap().push_back(response);
    self
  }

  pub fn recorded_queries(&self) -> Vec<SearchQuery> {
    self.queries.lock().unwrap().clone()
  }

  pub fn recorded_insights(&self) -> Vec<String> {
    self.insight_requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl SearchApi for FakeSearchApi {
  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>, PanelError> {
    self.queries.lock().unwrap().push(query.clone());
    self
      .search_responses
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(PanelError::server(503, "no search response queued")))
  }

  async fn insight(&self, resolutions: &str) -> Result<InsightResult, PanelError> {
    self.insight_requests.lock().unwrap().push(resolutions.to_string());
    self
      .insight_responses
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(PanelError::server(503, "no insight response queued")))
  }

  async fn reindex(&self) -> Result<String, PanelError> {
    Ok("Data updated successfully".to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
  Rows(usize),
  Checked(usize, bool),
  Busy(bool),
  ControlsEnabled(bool),
  SubmitEnabled(bool),
  InsightVisible(bool),
  ModalText(String),
  ModalVisible(bool),
  Notice(Notice),
}

/// Records every call the panel makes, and tracks the resulting state
#[derive(Default)]
pub struct RecordingView {
  pub events: Vec<ViewEvent>,
  pub rows: Vec<SearchResultRow>,
  pub checked: Vec<bool>,
  pub busy: bool,
  pub controls_enabled: bool,
  pub submit_enabled: bool,
  pub insight_visible: bool,
  pub modal_text: String,
  pub modal_visible: bool,
}

impl RecordingView {
  pub fn clear_events(&mut self) {
    self.events.clear();
  }
}

impl PanelView for RecordingView {
  fn set_row_data(&mut self, rows: &[SearchResultRow]) {
    self.rows = rows.to_vec();
    self.checked = vec![false; rows.len()];
    self.events.push(ViewEvent::Rows(rows.len()));
  }

  fn set_row_checked(&mut self, index: usize, checked: bool) {
    self.checked[index] = checked;
    self.events.push(ViewEvent::Checked(index, checked));
  }

  fn set_busy(&mut self, busy: bool) {
    self.busy = busy;
    self.events.push(ViewEvent::Busy(busy));
  }

  fn set_controls_enabled(&mut self, enabled: bool) {
    self.controls_enabled = enabled;
    self.events.push(ViewEvent::ControlsEnabled(enabled));
  }

  fn set_submit_enabled(&mut self, enabled: bool) {
    self.submit_enabled = enabled;
    self.events.push(ViewEvent::SubmitEnabled(enabled));
  }

  fn set_insight_visible(&mut self, visible: bool) {
    self.insight_visible = visible;
    self.events.push(ViewEvent::InsightVisible(visible));
  }

  fn set_modal_text(&mut self, text: &str) {
    self.modal_text = text.to_string();
    self.events.push(ViewEvent::ModalText(text.to_string()));
  }

  fn set_modal_visible(&mut self, visible: bool) {
    self.modal_visible = visible;
    self.events.push(ViewEvent::ModalVisible(visible));
  }

  fn notify(&mut self, notice: Notice) {
    self.events.push(ViewEvent::Notice(notice));
  }
}

#[derive(Default)]
pub struct MemoryClipboard {
  pub contents: Option<String>,
  pub fail: bool,
}

impl Clipboard for MemoryClipboard {
  fn write_text(&mut self, text: &str) -> Result<(), PanelError> {
    if self.fail {
      return Err(PanelError::clipboard("clipboard unavailable"));
    }
    self.contents = Some(text.to_string());
    Ok(())
  }
}

pub fn incident(id: &str, resolution: &str) -> SearchResultRow {
  SearchResultRow::new()
    .with(Field::IncidentId, id)
    .with(Field::Status, "Closed")
    .with(Field::Resolution, resolution)
}

pub fn incidents(count: usize) -> Vec<SearchResultRow> {
  (1..=count).map(|n| incident(&n.to_string(), &format!("resolution {n}"))).collect()
}
