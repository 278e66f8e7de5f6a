// Interactive terminal viewer over a loaded archive
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;

use self::terminal::TerminalManager;
use crate::config::RenderOptions;
use crate::models::ArchiveIndex;
use crate::render::ChatView;

/// Run the interactive viewer until the user quits
pub fn run_interactive(index: &ArchiveIndex, options: RenderOptions) -> Result<()> {
    let mut app = App::new(ChatView::new(index, options));

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
