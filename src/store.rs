//! Snapshot store and table display helpers.
//!
//! The project service exports its REST payloads as JSON snapshots: a
//! `projects.json` index plus one `tasks_<id>.json` file per project.
//! This module discovers and decodes those files. A missing or corrupt
//! task file degrades that one project to an empty task list so the rest
//! of the batch still renders; only a broken index is a hard error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::fields::TaskStatus;
use crate::task::{Project, Task};

/// A snapshot directory together with its decoded project index.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub dir: PathBuf,
    pub projects: Vec<Project>,
}

impl Workspace {
    /// Read the project index from `projects.json` in `dir`.
    pub fn discover(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let index = dir.join("projects.json");
        let buf = fs::read_to_string(&index)
            .map_err(|e| format!("cannot read {}: {e}", index.display()))?;
        let projects: Vec<Project> = serde_json::from_str(&buf)
            .map_err(|e| format!("cannot parse {}: {e}", index.display()))?;
        Ok(Workspace {
            dir: dir.to_path_buf(),
            projects,
        })
    }

    /// Look up a project record by id.
    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Path of the task snapshot for one project.
    pub fn task_file(&self, project_id: u64) -> PathBuf {
        self.dir.join(format!("tasks_{project_id}.json"))
    }

    /// Load one project's task list. Missing and unparseable files both
    /// degrade to an empty list; the caller renders zero metrics for that
    /// project and carries on with the others.
    pub fn project_tasks(&self, project_id: u64) -> Vec<Task> {
        let path = self.task_file(project_id);
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|buf| {
            serde_json::from_str::<Vec<Task>>(&buf).map_err(|e| e.to_string())
        }) {
            Ok(tasks) => tasks,
            Err(e) => {
                eprintln!("Skipping tasks for project {project_id}: {e}");
                Vec::new()
            }
        }
    }
}

/// Format an optional calendar date for table display.
pub fn format_date(d: Option<NaiveDate>) -> String {
    match d {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "-".into(),
    }
}

/// Format a task status for display.
pub fn format_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Planned => "Planned",
        TaskStatus::InProgress => "InProgress",
        TaskStatus::Completed => "Completed",
        TaskStatus::Cancelled => "Cancelled",
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let days = (d - today).num_days();
            if days == 0 {
                "today".into()
            } else if days == 1 {
                "tomorrow".into()
            } else if days > 1 {
                format!("in {days}d")
            } else {
                format!("{}d late", -days)
            }
        }
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks in a formatted table with optional tree indentation.
pub fn print_table(tasks: &[&Task], id_to_depth: Option<&HashMap<u64, usize>>) {
    println!(
        "{:<6} {:<11} {:<11} {:<11} {:<10} {}",
        "ID", "Status", "Start", "Due", "Deps", "Name"
    );
    for t in tasks {
        let indent = id_to_depth
            .and_then(|m| m.get(&t.id).copied())
            .unwrap_or(0);
        let deps = if t.depends_on.is_empty() {
            "-".to_string()
        } else {
            t.depends_on
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        println!(
            "{:<6} {:<11} {:<11} {:<11} {:<10} {}{}",
            t.id,
            format_status(t.status),
            format_date(t.start_date),
            format_date(t.due_date),
            truncate(&deps, 10),
            "  ".repeat(indent),
            t.name
        );
    }
}
