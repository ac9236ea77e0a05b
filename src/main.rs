// sortty: step-by-step sorting visualization in the terminal

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use sortty::config::fragment::{self, FileFragmentSink};
use sortty::config::{codec, Configuration};
use sortty::engine::Sorter;
use sortty::session::Session;
use sortty::ui::clipboard::SystemClipboard;
use sortty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("sortty");
        eprintln!("Usage: {} [fragment]", program_name);
        eprintln!();
        eprintln!("  fragment    a shared configuration fragment; without one the");
        eprintln!("              last session's state file is used");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  SORTTY_STATE  state file path (default .sortty)");
        eprintln!("  SORTTY_LOG    append diagnostics to this file");
        return Ok(());
    }

    init_tracing();

    let state_path = env::var_os("SORTTY_STATE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".sortty"));

    // A fragment argument (a shared link's payload) wins over the state file
    let persisted = args.get(1).cloned().or_else(|| fragment::load(&state_path));

    let max_size = max_array_size();
    let config = persisted
        .as_deref()
        .map(codec::decode_or_default)
        .unwrap_or_default()
        .sanitize(max_size);

    let engine = Sorter::new(config.size);
    let session = Session::new(
        engine,
        config,
        max_size,
        Box::new(FileFragmentSink::new(state_path)),
        Box::new(SystemClipboard),
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Largest array the current terminal can usefully display.
fn max_array_size() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns >= 120 => Configuration::MAX_SIZE,
        _ => Configuration::MAX_SIZE_CONSTRAINED,
    }
}

/// Opt-in diagnostics: the TUI owns the screen, so logs go to a file named
/// by SORTTY_LOG, or nowhere.
fn init_tracing() {
    let Some(path) = env::var_os("SORTTY_LOG") else {
        return;
    };

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file {:?}: {}", path, err);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
