//! Triage - Incident Search and Resolution Insights
//!
//! A results panel for the semantic incident search service: search one
//! incident field, pick related incidents from the results, and ask the
//! service to summarise how they were resolved.

pub mod cli;
pub mod client;
pub mod error;
pub mod model;
pub mod panel;
pub mod view;

pub use client::{ClientConfig, HttpSearchApi, SearchApi};
pub use error::PanelError;
pub use model::{Field, InsightResult, SearchQuery, SearchResultRow};
pub use panel::{ActionState, ResultsPanel};
pub use view::{ClickTarget, Clipboard, Notice, PanelView};
