//! # CLI Layer
//!
//! Responsibilities:
//!
//! 1. **Argument Parsing**: shell arguments become typed commands via clap
//! 2. **Logging**: `tracing-subscriber` on stderr, level from `-v` unless `RUST_LOG` is set
//! 3. **Context Setup**: data directory, settings and the `ClipApi`
//! 4. **API Dispatch**: one `handle_*` function per command
//! 5. **Output**: command results rendered by `render.rs`
//!
//! Business logic stays in the library's command layer.

use super::render::{
    render_change, render_entry_list, render_full_entry, render_messages, render_paths,
    render_settings,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use clipshelf::api::ClipApi;
use clipshelf::clipboard::SystemClipboard;
use clipshelf::commands::config::ConfigAction;
use clipshelf::commands::list::EntryFilter;
use clipshelf::config::Settings;
use clipshelf::error::{ClipError, Result};
use clipshelf::history::History;
use clipshelf::hotkey::{HotkeyListener, NoHotkeys};
use clipshelf::monitor::Monitor;
use clipshelf::session::{Session, SessionEvent};
use clipshelf::store::fs_backend::FsBackend;
use clipshelf::store::AppPaths;
use std::io::{self, Write};
use std::sync::atomic::AtomicBool;
use tracing::info;

struct AppContext {
    api: ClipApi<FsBackend>,
    settings: Settings,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Watch) => handle_watch(ctx),
        Some(Commands::List { search, limit }) => handle_list(&ctx, search, limit),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Copy { id }) => handle_copy(&ctx, id),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Paths) => handle_paths(&ctx),
        None => handle_list(&ctx, None, None),
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose > 1)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let paths = AppPaths::discover().ok_or_else(|| {
        ClipError::Config("Could not determine a data directory; set CLIPSHELF_HOME".to_string())
    })?;
    info!("Using data directory {}", paths.data_dir.display());

    let settings = Settings::load_or_default(&paths.data_dir);
    let history = History::open(
        FsBackend::new(paths.data_dir.clone()),
        settings.max_entries(),
    );

    Ok(AppContext {
        api: ClipApi::new(history, paths),
        settings,
    })
}

fn handle_watch(ctx: AppContext) -> Result<()> {
    let clipboard = SystemClipboard::new()
        .map_err(|e| ClipError::ClipboardUnavailable(e.to_string()))?;

    let AppContext { api, settings } = ctx;
    let hotkeys = HotkeyListener::new(NoHotkeys, settings.hotkey());
    let mut session = Session::new(api.into_history(), Monitor::new(clipboard), hotkeys)
        .with_poll_interval(settings.poll_interval());

    println!(
        "Watching the clipboard every {}ms (Ctrl-C to stop)",
        settings.poll_interval().as_millis()
    );

    // Stopped by the process being interrupted; every change is already persisted
    let stop = AtomicBool::new(false);
    session.run(&stop, |event| match event {
        SessionEvent::Changed(change) => {
            println!("{}", render_change(&change));
            let _ = io::stdout().flush();
        }
        SessionEvent::TogglePanel => println!("Hotkey {} pressed", settings.hotkey()),
    });
    Ok(())
}

fn handle_list(ctx: &AppContext, search: Option<String>, limit: Option<usize>) -> Result<()> {
    let result = ctx.api.list_entries(&EntryFilter { search, limit })?;
    print!("{}", render_entry_list(&result.listed_entries));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_show(ctx: &AppContext, id: u64) -> Result<()> {
    let result = ctx.api.show_entry(id)?;
    let blob = result.paths.first().map(|(_, path)| path);
    for entry in &result.listed_entries {
        print!("{}", render_full_entry(entry, blob));
    }
    Ok(())
}

fn handle_copy(ctx: &AppContext, id: u64) -> Result<()> {
    let mut clipboard = SystemClipboard::holding()
        .map_err(|e| ClipError::ClipboardUnavailable(e.to_string()))?;
    if clipboard.holds_selection() {
        println!("Holding the clipboard until another application takes it over...");
        let _ = io::stdout().flush();
    }
    let result = ctx.api.copy_entry(id, &mut clipboard)?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<u64>) -> Result<()> {
    let result = ctx.api.delete_entries(&ids)?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let count = ctx.api.history().len();
    if count == 0 {
        println!("History is already empty.");
        return Ok(());
    }

    if !yes {
        print!("This will remove {} entries and their images. [Y] To clear: ", count);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim() != "Y" {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = ctx.api.clear()?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(settings) = &result.settings {
            print!("{}", render_settings(settings));
        }
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_paths(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.paths();
    print!("{}", render_paths(&result.paths));
    Ok(())
}
