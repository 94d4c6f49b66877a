//! Interactive Gantt view.
//!
//! One screen: a bar per fully dated task, positioned from the timeline
//! layout percentages, with a detail pane showing the selected task's
//! upstream path and downstream impact. All numbers come from the core
//! engines; this module only draws them.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::graph::TaskGraph;
use crate::store::{format_date, format_status, truncate};
use crate::task::{Project, Task};
use crate::timeline::{layout_timeline, TimelineBar, TimelineLayout};
use crate::tui::colors::status_color;

/// Width of the task name column to the left of the chart.
const NAME_COL: u16 = 22;

/// State for the Gantt screen: the enriched graph, the computed layout,
/// and the current selection.
pub struct App {
    project: Project,
    graph: TaskGraph,
    layout: TimelineLayout,
    selected: usize,
    scroll: usize,
}

impl App {
    pub fn new(project: Project, tasks: Vec<Task>) -> Self {
        let layout = layout_timeline(&tasks);
        App {
            project,
            graph: TaskGraph::build(tasks),
            layout,
            selected: 0,
            scroll: 0,
        }
    }

    /// Event loop: draw, then poll for navigation keys until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if !event::poll(Duration::from_millis(200))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.selected = self.selected.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if self.selected + 1 < self.layout.bars.len() {
                            self.selected += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn selected_bar(&self) -> Option<&TimelineBar> {
        self.layout.bars.get(self.selected)
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_chart(f, chunks[0]);
        self.render_detail(f, chunks[1]);
        f.render_widget(
            Paragraph::new("↑/↓ or j/k select · q quit"),
            chunks[2],
        );
    }

    fn render_chart(&mut self, f: &mut Frame, area: Rect) {
        let title = match self.layout.window {
            Some((min, max)) => format!(" {} — {} to {} ", self.project.name, min, max),
            None => format!(" {} — no dated tasks ", self.project.name),
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chart_width = inner.width.saturating_sub(NAME_COL) as usize;
        if chart_width == 0 {
            return;
        }

        // Keep the selection inside the visible window.
        let visible = inner.height as usize;
        if visible > 0 {
            if self.selected < self.scroll {
                self.scroll = self.selected;
            } else if self.selected >= self.scroll + visible {
                self.scroll = self.selected + 1 - visible;
            }
        }

        let mut lines = Vec::new();
        for (i, bar) in self
            .layout
            .bars
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
        {
            let Some(node) = self.graph.get(bar.task_id) else {
                continue;
            };
            let left = ((bar.left_pct / 100.0) * chart_width as f64).round() as usize;
            let left = left.min(chart_width.saturating_sub(1));
            let cols = (((bar.width_pct / 100.0) * chart_width as f64).round() as usize).max(1);
            let cols = cols.min(chart_width - left);

            let name = format!(
                "{:<width$}",
                truncate(&node.task.name, NAME_COL as usize - 2),
                width = NAME_COL as usize
            );
            let name_style = if i == self.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(name, name_style),
                Span::raw(" ".repeat(left)),
                Span::styled(
                    "█".repeat(cols),
                    Style::default().fg(status_color(node.task.status)),
                ),
            ]));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Task ");
        let mut lines: Vec<Line> = Vec::new();

        if let Some(node) = self.selected_bar().and_then(|b| self.graph.get(b.task_id)) {
            let names = |ids: &[&crate::graph::TaskNode]| {
                if ids.is_empty() {
                    "-".to_string()
                } else {
                    ids.iter()
                        .map(|n| truncate(&n.task.name, 18))
                        .collect::<Vec<_>>()
                        .join(" → ")
                }
            };
            // The path includes the task itself; show only what precedes it.
            let upstream: Vec<_> = self
                .graph
                .prerequisite_path(node.task.id)
                .into_iter()
                .skip(1)
                .collect();
            let impact = self.graph.dependent_tasks(node.task.id);

            lines.push(Line::from(vec![
                Span::styled(
                    format!("#{} {}", node.task.id, node.task.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  [{}]  {} → {}",
                    format_status(node.task.status),
                    format_date(node.task.start_date),
                    format_date(node.task.due_date),
                )),
            ]));
            lines.push(Line::from(format!("Upstream: {}", names(&upstream))));
            lines.push(Line::from(format!(
                "Impact ({}): {}",
                impact.len(),
                names(&impact)
            )));
            if self.layout.skipped > 0 {
                lines.push(Line::from(format!(
                    "{} task(s) without full dates are not charted",
                    self.layout.skipped
                )));
            }
        } else {
            lines.push(Line::from("No chartable tasks in this project."));
        }

        f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
    }
}
