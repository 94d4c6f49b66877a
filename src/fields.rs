//! Enumerations shared between the wire records and the CLI.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the project service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Planned,
    #[serde(alias = "in_progress")]
    InProgress,
    Completed,
    Cancelled,
}

/// Available sorting options for task lists.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Start,
    Due,
    Id,
}
