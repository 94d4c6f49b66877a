//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::TaskStatus;

// Bars and status labels are tinted by task status.

/// Used for planned tasks
pub const STEEL_BLUE: Color = Color::Rgb(70, 130, 180);
/// Used for in-progress tasks
pub const AMBER: Color = Color::Rgb(255, 191, 0);
/// Used for completed tasks
pub const DARK_GREEN: Color = Color::Rgb(0, 110, 0);
/// Used for cancelled tasks
pub const DIM_GRAY: Color = Color::Rgb(105, 105, 105);

/// Map a task status to its display color.
pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Planned => STEEL_BLUE,
        TaskStatus::InProgress => AMBER,
        TaskStatus::Completed => DARK_GREEN,
        TaskStatus::Cancelled => DIM_GRAY,
    }
}
