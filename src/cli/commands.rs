use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::config::{
    ArchiveLayout, DEFAULT_MANIFEST_FILE, DEFAULT_MEDIA_DIR, DEFAULT_ROOT_FILE, LoadOptions,
    MarkupMode, RenderOptions, TimeZoneMode, ViewerConfig,
};
use crate::controller::load_archive;
use crate::models::ArchiveIndex;
use crate::parsers::DirSource;
use crate::render::{write_failure_page, write_site};
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, get_archive_dir, sanitize_for_terminal};

/// Conversations listed by `stats`
const STATS_TOP_CONVERSATIONS: usize = 5;

#[derive(Parser)]
#[command(name = "chat-archive-viewer")]
#[command(version)]
#[command(about = "Browse exported chat archives as static HTML or in the terminal", long_about = None)]
pub struct Cli {
    /// Archive directory (defaults to $CHAT_ARCHIVE_DIR, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub archive: Option<PathBuf>,

    /// Root archive document, relative to the archive directory
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_ROOT_FILE)]
    pub root_file: String,

    /// Optional media manifest, relative to the archive directory
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_MANIFEST_FILE)]
    pub manifest: String,

    /// Directory holding media metadata documents and files
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_MEDIA_DIR)]
    pub media_dir: String,

    /// List the media directory when the manifest is missing
    #[arg(long, global = true)]
    pub scan_media: bool,

    /// Escape message markup except for generated images and links
    #[arg(long, global = true)]
    pub strict_markup: bool,

    /// Show message times in UTC instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the static HTML viewer
    Render {
        /// Output directory (defaults to the archive directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Browse the archive in the terminal
    Browse,
    /// Show statistics about the archive
    Stats,
}

impl Cli {
    /// Resolve the run configuration from the parsed arguments
    pub fn config(&self) -> Result<ViewerConfig> {
        let archive_dir = get_archive_dir(self.archive.clone())?;
        Ok(ViewerConfig {
            archive_dir,
            load: LoadOptions {
                layout: ArchiveLayout {
                    root_file: self.root_file.clone(),
                    manifest_file: self.manifest.clone(),
                    media_dir: self.media_dir.clone(),
                },
                scan_media: self.scan_media,
            },
            render: RenderOptions {
                markup: if self.strict_markup { MarkupMode::Strict } else { MarkupMode::Trusted },
                time_zone: if self.utc { TimeZoneMode::Utc } else { TimeZoneMode::Local },
            },
        })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = cli.config()?;
    tracing::debug!(archive_dir = %config.archive_dir.display(), "resolved archive directory");

    match command {
        Commands::Render { out } => {
            let out_dir = out.clone().unwrap_or_else(|| config.archive_dir.clone());
            render_site(&config, out_dir)?;
        }
        Commands::Browse => {
            let index = load(&config)?;
            run_interactive(&index, config.render)?;
        }
        Commands::Stats => {
            let index = load(&config)?;
            show_stats(&config, &index);
        }
    }

    Ok(())
}

fn load(config: &ViewerConfig) -> Result<ArchiveIndex> {
    let source = DirSource::new(&config.archive_dir);
    load_archive(&source, &config.load).with_context(|| {
        format!("Failed to load archive in {}", format_path_with_tilde(&config.archive_dir))
    })
}

fn render_site(config: &ViewerConfig, out_dir: PathBuf) -> Result<()> {
    let index = match load(config) {
        Ok(index) => index,
        Err(err) => {
            let page = write_failure_page(&out_dir, &config.load.layout.root_file)?;
            tracing::info!(page = %page.display(), "wrote failure page");
            return Err(err);
        }
    };

    let summary = write_site(&index, config.render, &config.archive_dir, &out_dir)?;
    println!(
        "Wrote {} conversation pages to {}",
        summary.pages,
        format_path_with_tilde(&summary.out_dir)
    );
    Ok(())
}

fn show_stats(config: &ViewerConfig, index: &ArchiveIndex) {
    println!("Chat Archive Statistics");
    println!("=======================");
    println!("Conversations: {}", index.len());
    println!("Messages: {}", index.message_count());
    if let Some(user_id) = index.user_id() {
        let own = index
            .conversations()
            .iter()
            .flat_map(|c| &c.messages)
            .filter(|m| m.is_own(Some(user_id)))
            .count();
        println!("  Own messages: {}", own);
        println!("Current user: {}", sanitize_for_terminal(user_id));
    }
    println!("Media files: {}", index.media().len());
    if index.dropped_entries() > 0 {
        println!("Skipped entries: {}", index.dropped_entries());
    }
    println!();
    println!("Archive directory: {}", format_path_with_tilde(&config.archive_dir));

    let mut largest: Vec<_> = index.conversations().iter().collect();
    largest.sort_by(|a, b| b.messages.len().cmp(&a.messages.len()));
    if !largest.is_empty() {
        println!();
        println!("Largest conversations:");
        for conversation in largest.iter().take(STATS_TOP_CONVERSATIONS) {
            println!(
                "  {} ({} messages)",
                sanitize_for_terminal(conversation.label()),
                conversation.messages.len()
            );
        }
    }
}
