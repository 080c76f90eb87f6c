use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time_utils::lenient_timestamp;

/// Event type string GitHub uses when a label is applied to an issue.
pub const LABELED_EVENT: &str = "labeled";

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    /// Any state string this crate does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single state change recorded on an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// GitHub event type, e.g. `"labeled"`, `"unlabeled"`, `"commented"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_type: String,
    /// Login of the user who caused the event.
    #[serde(default)]
    pub author: Option<String>,
    /// When the event happened.
    #[serde(default, with = "lenient_timestamp")]
    pub event_date: Option<DateTime<Utc>>,
    /// Label involved in the event, for label/unlabel events.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Event {
    /// `true` when this event applied a label.
    pub fn is_labeled(&self) -> bool {
        self.event_type == LABELED_EVENT
    }

    /// Author login, treating an empty string like a missing author.
    pub fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    /// Label name, treating an empty string like a missing label.
    pub fn label(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
    }
}

/// A decoded GitHub issue together with its event history.
///
/// Every field is optional on the wire; absent or `null` collections decode as
/// empty so that one sparse record never fails a whole load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Login of the user who opened the issue.
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: IssueState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignees: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u64,
    #[serde(default, with = "lenient_timestamp")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_date: Option<DateTime<Utc>>,
    /// Chronological event history. Not guaranteed to be sorted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

impl Issue {
    /// Creator login, treating an empty string like a missing creator.
    pub fn creator(&self) -> Option<&str> {
        non_empty(self.creator.as_deref())
    }

    /// `true` when `label` is in this issue's label set.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Events that applied a label.
    pub fn labeled_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_labeled())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Decode `null` as `T::default()` instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
