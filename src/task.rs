//! Task and project records as delivered by the project service.
//!
//! These structs mirror the service's JSON wire shape (camelCase keys).
//! Relations arrive as bare id references; the graph module resolves them
//! into prerequisite, dependent, and child lists after loading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::TaskStatus;

/// A single work item from a project's task payload.
///
/// `depends_on` and `parent_task_id` may name ids that are absent from the
/// payload; such references are dropped during graph enrichment rather than
/// treated as errors. Dates are calendar dates only, no time component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub parent_task_id: Option<u64>,
    #[serde(default)]
    pub depends_on: Vec<u64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Whether the task carries enough dates to be placed on a timeline.
    pub fn has_interval(&self) -> bool {
        self.start_date.is_some() && self.due_date.is_some()
    }
}

/// A project record from the service's project index. Task ownership is
/// external: tasks arrive in a separate per-project payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
}
