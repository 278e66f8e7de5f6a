//! TUI application state and event handling.
//!
//! The terminal viewer is a thin shell around [`ChatView`]: it owns pane focus,
//! thread scrolling and the event loop, and delegates every selection to the view
//! so the list and thread are rebuilt exactly as for the static pages.
//!
//! - **List focus**: navigation keys move the selected conversation
//! - **Thread focus**: navigation keys scroll the message thread
//! - **Mouse**: a left click on a list entry selects it, the wheel scrolls the thread

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Position;
use ratatui::widgets::ListState;

use super::events::{Action, poll_event};
use super::layout::AppLayout;
use super::rendering::{Focus, LIST_ITEM_HEIGHT, render_ui, thread_height};
use crate::render::ChatView;

const PAGE_SIZE: isize = 10;
const WHEEL_STEP: isize = 3;

pub struct App<'a> {
    view: ChatView<'a>,
    list_state: ListState,
    focus: Focus,
    thread_scroll: u16,
    layout: AppLayout,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<'a> App<'a> {
    pub fn new(view: ChatView<'a>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(view.active());
        Self {
            view,
            list_state,
            focus: Focus::List,
            thread_scroll: 0,
            layout: AppLayout::default(),
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn view(&self) -> &ChatView<'a> {
        &self.view
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Redraw when dirty or every 250ms
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(250)
            {
                self.draw(terminal)?;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = &self.view;
        let list_state = &mut self.list_state;
        let (focus, scroll) = (self.focus, self.thread_scroll);
        let mut drawn = None;

        terminal.draw(|f| {
            drawn = Some(render_ui(f, view, list_state, focus, scroll));
        })?;

        if let Some(layout) = drawn {
            self.layout = layout;
        }
        self.needs_redraw = false;
        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.navigate(-1),
            Action::MoveDown => self.navigate(1),
            Action::PageUp => self.navigate(-PAGE_SIZE),
            Action::PageDown => self.navigate(PAGE_SIZE),
            Action::First => match self.focus {
                Focus::List => self.select(0),
                Focus::Thread => self.set_scroll(0),
            },
            Action::Last => match self.focus {
                Focus::List => self.select(self.view.chat_list().len().saturating_sub(1)),
                Focus::Thread => self.set_scroll(self.max_scroll()),
            },
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::List => Focus::Thread,
                    Focus::Thread => Focus::List,
                };
                self.needs_redraw = true;
            }
            Action::ScrollUp => self.scroll_thread(-WHEEL_STEP),
            Action::ScrollDown => self.scroll_thread(WHEEL_STEP),
            Action::Click { column, row } => self.click(column, row),
            Action::Resize => self.needs_redraw = true,
            Action::None => {}
        }
    }

    fn navigate(&mut self, delta: isize) {
        match self.focus {
            Focus::List => self.move_selection(delta),
            Focus::Thread => self.scroll_thread(delta),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.view.chat_list().len();
        if total == 0 {
            return;
        }
        let current = self.view.active().unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, total as isize - 1) as usize;
        self.select(target);
    }

    fn select(&mut self, position: usize) {
        if self.view.active() == Some(position) {
            return;
        }
        if self.view.select(position) {
            self.list_state.select(Some(position));
            self.thread_scroll = 0;
            self.needs_redraw = true;
        }
    }

    /// Last scroll offset that still shows a row, counted after wrapping to the
    /// thread pane last drawn
    fn max_scroll(&self) -> u16 {
        let rows = thread_height(&self.view, self.layout.thread_area);
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn set_scroll(&mut self, scroll: u16) {
        let scroll = scroll.min(self.max_scroll());
        if scroll != self.thread_scroll {
            self.thread_scroll = scroll;
            self.needs_redraw = true;
        }
    }

    fn scroll_thread(&mut self, delta: isize) {
        let target = (self.thread_scroll as isize + delta).clamp(0, u16::MAX as isize) as u16;
        self.set_scroll(target);
    }

    fn click(&mut self, column: u16, row: u16) {
        let point = Position::new(column, row);
        let list = self.layout.list_area;

        if list.contains(point) {
            self.focus = Focus::List;
            self.needs_redraw = true;
            // Skip the border rows of the block
            if row > list.y && row < list.bottom().saturating_sub(1) {
                let line = (row - list.y - 1) / LIST_ITEM_HEIGHT;
                self.select(self.list_state.offset() + line as usize);
            }
        } else if self.layout.thread_area.contains(point) {
            self.focus = Focus::Thread;
            self.needs_redraw = true;
        }
    }
}
