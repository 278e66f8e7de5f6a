use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub list_area: Rect,
    pub thread_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create split-pane layout:
    /// - Conversation list: 35% width (left)
    /// - Message thread: 65% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(vertical_chunks[0]);

        Self {
            list_area: horizontal_chunks[0],
            thread_area: horizontal_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}
