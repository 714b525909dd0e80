//! Rows, query fields and insight payloads exchanged with the search service

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// A searchable incident field. Variant order is the table's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Field {
  #[default]
  IncidentId,
  JobName,
  WorkDetails,
  Notes,
  Summary,
  ReportedDate,
  ResolvedDate,
  Resolution,
  SubmitDate,
  SubmitterName,
  Submitter,
  Status,
  Assignee,
  AssignedGroup,
  Flag,
  Mq,
  Job,
  Done,
}

impl Field {
  /// Every field, in column order
  pub const ALL: [Field; 18] = [
    Field::IncidentId,
    Field::JobName,
    Field::WorkDetails,
    Field::Notes,
    Field::Summary,
    Field::ReportedDate,
    Field::ResolvedDate,
    Field::Resolution,
    Field::SubmitDate,
    Field::SubmitterName,
    Field::Submitter,
    Field::Status,
    Field::Assignee,
    Field::AssignedGroup,
    Field::Flag,
    Field::Mq,
    Field::Job,
    Field::Done,
  ];

  /// The key used on the wire, both as a query parameter and in result objects
  pub fn label(self) -> &'static str {
    match self {
      Field::IncidentId => "Incident ID",
      Field::JobName => "Job Name",
      Field::WorkDetails => "Work Details",
      Field::Notes => "Notes",
      Field::Summary => "Summary",
      Field::ReportedDate => "Reported Date",
      Field::ResolvedDate => "Resolved Date",
      Field::Resolution => "Resolution",
      Field::SubmitDate => "Submit Date",
      Field::SubmitterName => "Submitter Name",
      Field::Submitter => "Submitter",
      Field::Status => "Status",
      Field::Assignee => "Assignee",
      Field::AssignedGroup => "Assigned Group",
      Field::Flag => "Flag",
      Field::Mq => "MQ",
      Field::Job => "job",
      Field::Done => "done",
    }
  }

  /// Shell-friendly spelling accepted on the command line
  pub fn alias(self) -> &'static str {
    match self {
      Field::IncidentId => "incident_id",
      Field::JobName => "job_name",
      Field::WorkDetails => "work_details",
      Field::Notes => "notes",
      Field::Summary => "summary",
      Field::ReportedDate => "reported_date",
      Field::ResolvedDate => "resolved_date",
      Field::Resolution => "resolution",
      Field::SubmitDate => "submit_date",
      Field::SubmitterName => "submitter_name",
      Field::Submitter => "submitter",
      Field::Status => "status",
      Field::Assignee => "assignee",
      Field::AssignedGroup => "assigned_group",
      Field::Flag => "flag",
      Field::Mq => "mq",
      Field::Job => "job",
      Field::Done => "done",
    }
  }

  fn from_label(label: &str) -> Option<Field> {
    Field::ALL.into_iter().find(|field| field.label() == label)
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Field {
  type Err = PanelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let name = s.trim();
    Field::from_label(name)
      .or_else(|| Field::ALL.into_iter().find(|field| field.label().eq_ignore_ascii_case(name)))
      .or_else(|| Field::ALL.into_iter().find(|field| field.alias().eq_ignore_ascii_case(name)))
      .ok_or_else(|| PanelError::invalid_field(name))
  }
}

/// A single incident record as returned by `/search`
///
/// Cells are keyed by [`Field`]; a cell the server omitted (or sent as `null`)
/// is absent and renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultRow {
  cells: BTreeMap<Field, String>,
}

impl SearchResultRow {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style setter, mostly useful for fixtures
  pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
    self.cells.insert(field, value.into());
    self
  }

  /// Build a row from a decoded JSON object, ignoring unknown keys
  pub fn from_json_object(object: &Map<String, Value>) -> Self {
    let cells = object
      .iter()
      .filter_map(|(key, value)| {
        let field = Field::from_label(key)?;
        display_value(value).map(|text| (field, text))
      })
      .collect();

    Self { cells }
  }

  pub fn get(&self, field: Field) -> Option<&str> {
    self.cells.get(&field).map(String::as_str)
  }

  /// The display text of a cell; absent cells are empty
  pub fn cell(&self, field: Field) -> &str {
    self.get(field).unwrap_or("")
  }

  /// All cells in column order, absent ones included as empty strings
  pub fn cells(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
    Field::ALL.into_iter().map(move |field| (field, self.cell(field)))
  }

  pub fn resolution(&self) -> &str {
    self.cell(Field::Resolution)
  }
}

impl<'de> Deserialize<'de> for SearchResultRow {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let object = Map::<String, Value>::deserialize(deserializer)?;
    Ok(Self::from_json_object(&object))
  }
}

fn display_value(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(text) => Some(text.clone()),
    _ => Some(value.to_string()),
  }
}

/// A search request: which field to match against and the free-text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub field: Field,
  pub text: String,
}

impl SearchQuery {
  pub fn new(field: Field, text: impl Into<String>) -> Self {
    Self { field, text: text.into() }
  }
}

/// Whether query text would be accepted by the submit control
pub fn is_submittable(text: &str) -> bool {
  !text.trim().is_empty()
}

/// Response body of `/insight`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsightResult {
  pub resolutions: String,
}

/// Response body of `/update`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReindexResponse {
  pub message: String,
}

/// Error envelope the service attaches to 4xx/5xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
  pub error: String,
}

/// Join resolutions into the single comma-separated value `/insight` expects
pub fn join_resolutions<'a>(resolutions: impl IntoIterator<Item = &'a str>) -> String {
  resolutions.into_iter().collect::<Vec<_>>().join(",")
}
