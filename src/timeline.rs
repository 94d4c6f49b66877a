//! Gantt timeline layout.
//!
//! Maps task date intervals onto a normalized 0–100% axis so callers can
//! render bars at any width, terminal columns included. Only tasks with
//! both a start and a due date are positioned; the rest are counted so
//! displays can report them.

use chrono::{Duration, NaiveDate};

use crate::task::Task;

/// Outward padding applied to the chart window on each side.
const WINDOW_MARGIN_DAYS: i64 = 2;

/// Smallest rendered bar width, keeping zero-duration tasks visible.
const MIN_BAR_WIDTH_PCT: f64 = 1.0;

/// Upper bound on axis marker count, independent of span length.
const TARGET_MARKER_COUNT: i64 = 10;

/// A positioned bar for one task, as percentages of the chart window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub task_id: u64,
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Computed chart geometry for one task list.
///
/// `window` is `None` when no task qualified for the chart; callers render
/// an empty chart instead of dividing by a zero span.
#[derive(Debug, Clone, Default)]
pub struct TimelineLayout {
    pub window: Option<(NaiveDate, NaiveDate)>,
    pub bars: Vec<TimelineBar>,
    pub markers: Vec<NaiveDate>,
    /// Tasks left off the chart for missing a start or due date.
    pub skipped: usize,
}

/// Lay out every fully dated task on a padded window spanning the earliest
/// start to the latest due date.
pub fn layout_timeline(tasks: &[Task]) -> TimelineLayout {
    let dated: Vec<(&Task, NaiveDate, NaiveDate)> = tasks
        .iter()
        .filter_map(|t| match (t.start_date, t.due_date) {
            (Some(start), Some(due)) => Some((t, start, due)),
            _ => None,
        })
        .collect();
    let skipped = tasks.len() - dated.len();

    let earliest = dated.iter().map(|(_, start, _)| *start).min();
    let latest = dated.iter().map(|(_, _, due)| *due).max();
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return TimelineLayout {
            skipped,
            ..Default::default()
        };
    };

    let min_date = earliest - Duration::days(WINDOW_MARGIN_DAYS);
    let max_date = latest + Duration::days(WINDOW_MARGIN_DAYS);
    // The margins guarantee a positive span even for a single
    // zero-duration task.
    let span_days = (max_date - min_date).num_days();
    let span = span_days as f64;

    let bars = dated
        .iter()
        .map(|(task, start, due)| TimelineBar {
            task_id: task.id,
            left_pct: (*start - min_date).num_days() as f64 / span * 100.0,
            width_pct: ((*due - *start).num_days() as f64 / span * 100.0)
                .max(MIN_BAR_WIDTH_PCT),
        })
        .collect();

    let step = (span_days / TARGET_MARKER_COUNT).max(1);
    let mut markers = Vec::new();
    let mut tick = min_date;
    while tick <= max_date {
        markers.push(tick);
        tick = tick + Duration::days(step);
    }

    TimelineLayout {
        window: Some((min_date, max_date)),
        bars,
        markers,
        skipped,
    }
}
