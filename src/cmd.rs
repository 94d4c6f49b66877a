//! Command implementations for the CLI interface.
//!
//! Every subcommand is read-only: it loads the relevant snapshots, runs
//! the core engines (graph, metrics, timeline) and prints the result.
//! Mutations belong to the project service, not this tool.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDate};

use crate::fields::{SortKey, TaskStatus};
use crate::graph::TaskGraph;
use crate::metrics::{filter_by_date_range, group_by_date, project_metrics, upcoming_tasks};
use crate::store::{
    format_date, format_due_relative, format_status, print_table, truncate, Workspace,
};
use crate::task::{Project, Task};
use crate::timeline::layout_timeline;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Show every project with derived schedule metrics.
    Projects,

    /// List a project's tasks with optional filters.
    List {
        /// Project id.
        project: u64,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// Range start (YYYY-MM-DD). Requires --to.
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD). Requires --from.
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Only tasks active in the next N days (default 14).
        #[arg(long, value_name = "DAYS", num_args = 0..=1, default_missing_value = "14")]
        upcoming: Option<i64>,
        /// Render as a tree across parent-child relationships.
        #[arg(long)]
        tree: bool,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::Start)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// View a single task with its resolved relations.
    View {
        /// Project id.
        project: u64,
        /// Task id.
        id: u64,
    },

    /// Print every task that must or should precede a task.
    Path {
        /// Project id.
        project: u64,
        /// Task id.
        id: u64,
    },

    /// Print every task affected if a task slips.
    Impact {
        /// Project id.
        project: u64,
        /// Task id.
        id: u64,
    },

    /// Print a project's parent-child task forest.
    Tree {
        /// Project id.
        project: u64,
    },

    /// Group a project's tasks by calendar date.
    Agenda {
        /// Project id.
        project: u64,
    },

    /// Render an ASCII Gantt chart for a project.
    Gantt {
        /// Project id.
        project: u64,
        /// Chart width in columns.
        #[arg(long, default_value_t = 60)]
        width: usize,
    },

    /// Launch the interactive Gantt interface for a project.
    Ui {
        /// Project id.
        project: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve a project id against the workspace index or exit.
fn require_project(ws: &Workspace, project_id: u64) -> Project {
    match ws.project(project_id) {
        Some(p) => p.clone(),
        None => {
            eprintln!("Project {project_id} not found in {}", ws.dir.display());
            std::process::exit(1);
        }
    }
}

/// Show all projects with task counts and schedule bounds.
pub fn cmd_projects(ws: &Workspace) {
    println!(
        "{:<6} {:<24} {:>6} {:<11} {:<11} {:>6}",
        "ID", "Name", "Tasks", "Start", "End", "Days"
    );
    for project in &ws.projects {
        let tasks = ws.project_tasks(project.id);
        let m = project_metrics(project.clone(), &tasks);
        println!(
            "{:<6} {:<24} {:>6} {:<11} {:<11} {:>6}",
            m.project.id,
            truncate(&m.project.name, 24),
            m.task_count,
            format_date(m.earliest_start),
            format_date(m.latest_end),
            m.duration_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        );
    }
}

/// List tasks with optional filtering and sorting.
pub fn cmd_list(
    ws: &Workspace,
    project_id: u64,
    status: Option<TaskStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    upcoming: Option<i64>,
    tree: bool,
    sort: SortKey,
    limit: Option<usize>,
) {
    require_project(ws, project_id);
    let tasks = ws.project_tasks(project_id);

    let mut filtered: Vec<&Task> = match (from, to, upcoming) {
        (Some(from), Some(to), _) => filter_by_date_range(&tasks, from, to),
        (_, _, Some(days)) => upcoming_tasks(&tasks, Local::now().date_naive(), days),
        _ => tasks.iter().collect(),
    };
    if let Some(s) = status {
        filtered.retain(|t| t.status == s);
    }

    match sort {
        SortKey::Start => {
            filtered.sort_by_key(|t| (t.start_date.unwrap_or(NaiveDate::MAX), t.id))
        }
        SortKey::Due => filtered.sort_by_key(|t| (t.due_date.unwrap_or(NaiveDate::MAX), t.id)),
        SortKey::Id => filtered.sort_by_key(|t| t.id),
    }

    if let Some(n) = limit {
        filtered.truncate(n);
    }

    if tree {
        // Depth per task from ancestry in the full payload, so indentation
        // survives filtering.
        let graph = TaskGraph::build(tasks.clone());
        let mut depth_map: HashMap<u64, usize> = HashMap::new();
        for node in graph.tasks() {
            let mut depth = 0usize;
            let mut cur = node.task.parent_task_id;
            while let Some(pid) = cur {
                depth += 1;
                cur = graph.get(pid).and_then(|p| p.task.parent_task_id);
                if depth > 64 {
                    break; // cycle guard
                }
            }
            depth_map.insert(node.task.id, depth);
        }
        print_table(&filtered, Some(&depth_map));
    } else {
        print_table(&filtered, None);
    }
}

/// View one task's record plus its resolved relation lists.
pub fn cmd_view(ws: &Workspace, project_id: u64, id: u64) {
    require_project(ws, project_id);
    let graph = TaskGraph::build(ws.project_tasks(project_id));
    let Some(node) = graph.get(id) else {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    };
    let today = Local::now().date_naive();

    let list = |ids: &[u64]| {
        if ids.is_empty() {
            "-".to_string()
        } else {
            ids.iter()
                .map(|i| match graph.get(*i) {
                    Some(n) => format!("{} ({})", i, truncate(&n.task.name, 24)),
                    None => i.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        }
    };

    println!("ID:            {}", node.task.id);
    println!("Name:          {}", node.task.name);
    println!("Status:        {}", format_status(node.task.status));
    println!("Start:         {}", format_date(node.task.start_date));
    println!(
        "Due:           {}",
        match node.task.due_date {
            Some(d) => format!("{d} ({})", format_due_relative(Some(d), today)),
            None => "-".into(),
        }
    );
    println!(
        "Parent:        {}",
        node.task
            .parent_task_id
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into())
    );
    println!("Prerequisites: {}", list(&node.prerequisites));
    println!("Dependents:    {}", list(&node.dependents));
    println!("Children:      {}", list(&node.children));
}

/// Print the prerequisite path for a task: the task itself, then
/// everything upstream of it.
pub fn cmd_path(ws: &Workspace, project_id: u64, id: u64) {
    require_project(ws, project_id);
    let graph = TaskGraph::build(ws.project_tasks(project_id));
    let path = graph.prerequisite_path(id);
    if path.is_empty() {
        println!("No path: task {id} is not in this project.");
        return;
    }
    let tasks: Vec<&Task> = path.iter().map(|n| &n.task).collect();
    print_table(&tasks, None);
}

/// Print the downstream impact set for a task.
pub fn cmd_impact(ws: &Workspace, project_id: u64, id: u64) {
    require_project(ws, project_id);
    let graph = TaskGraph::build(ws.project_tasks(project_id));
    let affected = graph.dependent_tasks(id);
    if affected.is_empty() {
        println!("Nothing downstream of task {id}.");
        return;
    }
    println!("{} task(s) affected if {id} slips:", affected.len());
    let tasks: Vec<&Task> = affected.iter().map(|n| &n.task).collect();
    print_table(&tasks, None);
}

/// Print the parent-child forest, depth-first.
pub fn cmd_tree(ws: &Workspace, project_id: u64) {
    require_project(ws, project_id);
    let graph = TaskGraph::build(ws.project_tasks(project_id));

    fn dfs(graph: &TaskGraph, id: u64, depth: usize, seen: &mut HashSet<u64>) {
        let Some(node) = graph.get(id) else { return };
        println!(
            "{}- {} [{}] (#{})",
            "  ".repeat(depth),
            node.task.name,
            format_status(node.task.status),
            node.task.id
        );
        for &child in &node.children {
            if seen.insert(child) {
                dfs(graph, child, depth + 1, seen);
            }
        }
    }

    let mut seen = HashSet::new();
    for root in graph.roots() {
        seen.insert(root.task.id);
        dfs(&graph, root.task.id, 0, &mut seen);
    }
}

/// Print tasks grouped by calendar date, start date first, due date as
/// the fallback key.
pub fn cmd_agenda(ws: &Workspace, project_id: u64) {
    require_project(ws, project_id);
    let tasks = ws.project_tasks(project_id);
    let groups = group_by_date(&tasks);
    if groups.is_empty() {
        println!("No dated tasks.");
        return;
    }
    for (date, bucket) in groups {
        println!("{date}");
        for t in bucket {
            println!("  {:<6} {:<11} {}", t.id, format_status(t.status), t.name);
        }
    }
}

/// Render an ASCII Gantt chart from the timeline layout.
pub fn cmd_gantt(ws: &Workspace, project_id: u64, width: usize) {
    let project = require_project(ws, project_id);
    let tasks = ws.project_tasks(project_id);
    let layout = layout_timeline(&tasks);

    let Some((min_date, max_date)) = layout.window else {
        println!("No tasks with both start and due dates to chart.");
        return;
    };
    let width = width.max(10);
    let by_id: HashMap<u64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();

    println!(
        "{} — {} to {} ({} task(s), {} undated)",
        project.name,
        min_date,
        max_date,
        layout.bars.len(),
        layout.skipped
    );
    for bar in &layout.bars {
        let left = (bar.left_pct / 100.0 * width as f64).round() as usize;
        let left = left.min(width - 1);
        let cols = ((bar.width_pct / 100.0 * width as f64).round() as usize).max(1);
        let cols = cols.min(width - left);
        let name = by_id
            .get(&bar.task_id)
            .map(|t| truncate(&t.name, 20))
            .unwrap_or_else(|| bar.task_id.to_string());
        println!(
            "{:<20} |{}{}{}|",
            name,
            " ".repeat(left),
            "█".repeat(cols),
            " ".repeat(width - left - cols)
        );
    }

    // Axis row: a dot per marker tick.
    let span = (max_date - min_date).num_days() as f64;
    let mut axis = vec![' '; width];
    for marker in &layout.markers {
        let col = ((*marker - min_date).num_days() as f64 / span * (width - 1) as f64).round()
            as usize;
        axis[col.min(width - 1)] = '·';
    }
    println!("{:<20} |{}|", "", axis.iter().collect::<String>());
    println!(
        "{:<20}  {}{:>w$}",
        "",
        min_date,
        max_date.to_string(),
        w = width - 10
    );
}

/// Launch the terminal user interface for one project.
pub fn cmd_ui(ws: &Workspace, project_id: u64) {
    let project = require_project(ws, project_id);
    let tasks = ws.project_tasks(project_id);
    if let Err(e) = run_tui(project, tasks) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
