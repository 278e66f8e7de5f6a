use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::layout::AppLayout;
use crate::render::{ChatView, MessageRow, RowKind, plain_text};
use crate::utils::sanitize_for_terminal;

/// Rows each conversation takes in the list: title line and preview line
pub const LIST_ITEM_HEIGHT: u16 = 2;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(0, 132, 255);
const STATUS_BG: Color = Color::Rgb(24, 24, 27);

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Thread,
}

/// Render the entire UI and return the layout it was drawn with
pub fn render_ui(
    frame: &mut Frame,
    view: &ChatView<'_>,
    list_state: &mut ListState,
    focus: Focus,
    thread_scroll: u16,
) -> AppLayout {
    let layout = AppLayout::new(frame.area());

    render_chat_list(frame, layout.list_area, view, list_state, focus == Focus::List);
    render_thread(frame, layout.thread_area, view, thread_scroll, focus == Focus::Thread);
    render_status_bar(frame, layout.status_area, view, focus);
    layout
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn render_chat_list(
    frame: &mut Frame,
    area: Rect,
    view: &ChatView<'_>,
    list_state: &mut ListState,
    focused: bool,
) {
    let items: Vec<ListItem> = view
        .chat_list()
        .iter()
        .map(|item| {
            let title = Line::from(vec![
                Span::styled(
                    format!("[{}] ", sanitize_for_terminal(&item.avatar)),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::raw(sanitize_for_terminal(&item.title)),
            ]);
            let preview = Line::from(Span::styled(
                format!("     {}", sanitize_for_terminal(&item.preview)),
                Style::default().fg(MUTED),
            ));
            ListItem::new(Text::from(vec![title, preview]))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Conversations ".to_string(), focused))
        .highlight_style(
            Style::default()
                .fg(BRIGHT)
                .bg(Color::Rgb(16, 185, 129))
                .add_modifier(Modifier::BOLD),
        );

    list_state.select(view.active());
    frame.render_stateful_widget(list, area, list_state);
}

/// Terminal lines for a thread, one block per message separated by blank lines
pub fn thread_lines(rows: &[MessageRow]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for row in rows {
        let alignment = match row.kind {
            RowKind::Own => Alignment::Right,
            RowKind::Other => Alignment::Left,
        };

        if let Some(author) = row.author.as_deref().filter(|a| !a.is_empty()) {
            lines.push(
                Line::from(Span::styled(
                    sanitize_for_terminal(author),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
                .alignment(alignment),
            );
        }

        let content = sanitize_for_terminal(&plain_text(&row.content));
        for text in content.lines() {
            lines.push(Line::from(text.to_string()).alignment(alignment));
        }

        lines.push(
            Line::from(Span::styled(sanitize_for_terminal(&row.time), Style::default().fg(MUTED)))
                .alignment(alignment),
        );
        lines.push(Line::from(""));
    }
    lines
}

/// The wrapped thread body, without the pane border
fn thread_paragraph(view: &ChatView<'_>) -> Paragraph<'static> {
    let content = if view.chat_list().is_empty() {
        Text::from("No conversations in this archive")
    } else {
        Text::from(thread_lines(view.messages()))
    };
    Paragraph::new(content).wrap(Wrap { trim: false })
}

/// Rows the thread occupies once wrapped inside a pane of `area`
pub fn thread_height(view: &ChatView<'_>, area: Rect) -> usize {
    let inner_width = area.width.saturating_sub(2);
    if inner_width == 0 {
        return thread_lines(view.messages()).len();
    }
    thread_paragraph(view).line_count(inner_width)
}

fn render_thread(
    frame: &mut Frame,
    area: Rect,
    view: &ChatView<'_>,
    scroll: u16,
    focused: bool,
) {
    let title = view
        .active_conversation()
        .map(|c| format!(" {} ", sanitize_for_terminal(c.label())))
        .unwrap_or_else(|| " Messages ".to_string());

    let paragraph = thread_paragraph(view).block(pane_block(title, focused)).scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ChatView<'_>, focus: Focus) {
    let total = view.chat_list().len();
    let mut parts = vec![format!("{total} conversations")];

    if let Some(active) = view.active() {
        parts.push(format!("chat {}/{}", active + 1, total));
        parts.push(format!("{} messages", view.messages().len()));
    }

    parts.push(match focus {
        Focus::List => "↑↓: select".to_string(),
        Focus::Thread => "↑↓: scroll".to_string(),
    });
    parts.push("Tab: switch pane".to_string());
    parts.push("q: quit".to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(BRIGHT).bg(STATUS_BG));

    frame.render_widget(paragraph, area);
}
