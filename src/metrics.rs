//! Project-level date aggregation and calendar filtering.
//!
//! Everything here is a pure function over borrowed task slices: metrics
//! and groupings are recomputed at read time from the current payload and
//! never stored.

use chrono::{Duration, NaiveDate};

use crate::task::{Project, Task};

/// A project together with schedule metrics derived from its task list.
#[derive(Debug, Clone)]
pub struct ProjectMetrics {
    pub project: Project,
    pub task_count: usize,
    pub earliest_start: Option<NaiveDate>,
    pub latest_end: Option<NaiveDate>,
    pub duration_days: Option<i64>,
}

/// Derive schedule metrics for one project. An empty task list yields a
/// zero count with every date field `None`; `duration_days` is only
/// present when both bounds are.
pub fn project_metrics(project: Project, tasks: &[Task]) -> ProjectMetrics {
    let earliest_start = tasks.iter().filter_map(|t| t.start_date).min();
    let latest_end = tasks.iter().filter_map(|t| t.due_date).max();
    let duration_days = match (earliest_start, latest_end) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    };
    ProjectMetrics {
        project,
        task_count: tasks.len(),
        earliest_start,
        latest_end,
        duration_days,
    }
}

/// Tasks touching the inclusive range `[start, end]`: the start date falls
/// inside it, the due date falls inside it, or the task's interval spans
/// the whole range. Tasks without any date never match.
pub fn filter_by_date_range(tasks: &[Task], start: NaiveDate, end: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| {
            let starts_within = t.start_date.is_some_and(|d| d >= start && d <= end);
            let due_within = t.due_date.is_some_and(|d| d >= start && d <= end);
            let spans = match (t.start_date, t.due_date) {
                (Some(s), Some(d)) => s <= start && d >= end,
                _ => false,
            };
            starts_within || due_within || spans
        })
        .collect()
}

/// Tasks active in the window starting at `today`. Callers pass the
/// current date explicitly so this stays deterministic.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, days: i64) -> Vec<&Task> {
    filter_by_date_range(tasks, today, today + Duration::days(days))
}

/// Group tasks by calendar date, keyed on the start date when present and
/// the due date otherwise. Tasks with neither date are omitted. Keys keep
/// first-seen order and each bucket keeps payload order, so this is a vec
/// of buckets rather than a sorted map.
pub fn group_by_date(tasks: &[Task]) -> Vec<(NaiveDate, Vec<&Task>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Task>)> = Vec::new();
    for task in tasks {
        let Some(key) = task.start_date.or(task.due_date) else {
            continue;
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(task),
            None => groups.push((key, vec![task])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TaskStatus;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(id: u64, start: Option<&str>, due: Option<&str>) -> Task {
        Task {
            id,
            project_id: 1,
            name: format!("task {id}"),
            status: TaskStatus::Planned,
            parent_task_id: None,
            depends_on: Vec::new(),
            start_date: start.map(date),
            due_date: due.map(date),
        }
    }

    fn project() -> Project {
        Project {
            id: 1,
            name: "Release".into(),
        }
    }

    #[test]
    fn test_metrics_empty_task_list() {
        let m = project_metrics(project(), &[]);
        assert_eq!(m.task_count, 0);
        assert_eq!(m.earliest_start, None);
        assert_eq!(m.latest_end, None);
        assert_eq!(m.duration_days, None);
    }

    #[test]
    fn test_metrics_min_max_and_duration() {
        let tasks = vec![
            task(1, Some("2024-03-10"), Some("2024-03-20")),
            task(2, Some("2024-03-05"), Some("2024-03-15")),
        ];
        let m = project_metrics(project(), &tasks);
        assert_eq!(m.task_count, 2);
        assert_eq!(m.earliest_start, Some(date("2024-03-05")));
        assert_eq!(m.latest_end, Some(date("2024-03-20")));
        assert_eq!(m.duration_days, Some(15));
    }

    #[test]
    fn test_metrics_partial_dates_leave_duration_unset() {
        let tasks = vec![task(1, Some("2024-03-10"), None), task(2, None, None)];
        let m = project_metrics(project(), &tasks);
        assert_eq!(m.earliest_start, Some(date("2024-03-10")));
        assert_eq!(m.latest_end, None);
        assert_eq!(m.duration_days, None);
    }

    #[test]
    fn test_range_filter_matches_either_endpoint() {
        let tasks = vec![
            task(1, Some("2024-01-02"), None),
            task(2, None, Some("2024-01-09")),
            task(3, Some("2023-12-01"), Some("2023-12-05")),
        ];
        let kept = filter_by_date_range(&tasks, date("2024-01-01"), date("2024-01-10"));
        let ids: Vec<u64> = kept.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_range_filter_keeps_spanning_interval() {
        // Neither endpoint lies inside the range, but the interval covers it.
        let tasks = vec![task(1, Some("2023-12-01"), Some("2024-02-01"))];
        let kept = filter_by_date_range(&tasks, date("2024-01-01"), date("2024-01-10"));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_range_filter_excludes_dateless_tasks() {
        let tasks = vec![task(1, None, None)];
        assert!(filter_by_date_range(&tasks, date("2024-01-01"), date("2024-01-10")).is_empty());
    }

    #[test]
    fn test_upcoming_uses_inclusive_window() {
        let tasks = vec![
            task(1, None, Some("2024-01-15")),
            task(2, None, Some("2024-01-16")),
        ];
        let kept = upcoming_tasks(&tasks, date("2024-01-01"), 14);
        let ids: Vec<u64> = kept.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_group_by_date_falls_back_to_due_date() {
        let tasks = vec![
            task(1, Some("2024-01-05"), Some("2024-01-20")),
            task(2, None, Some("2024-01-05")),
            task(3, None, None),
        ];
        let groups = group_by_date(&tasks);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, date("2024-01-05"));
        let ids: Vec<u64> = groups[0].1.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_group_by_date_preserves_first_seen_key_order() {
        let tasks = vec![
            task(1, Some("2024-02-01"), None),
            task(2, Some("2024-01-01"), None),
            task(3, Some("2024-02-01"), None),
        ];
        let groups = group_by_date(&tasks);
        let keys: Vec<NaiveDate> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![date("2024-02-01"), date("2024-01-01")]);
        let first_bucket: Vec<u64> = groups[0].1.iter().map(|t| t.id).collect();
        assert_eq!(first_bucket, vec![1, 3]);
    }
}
