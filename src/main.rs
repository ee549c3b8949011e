// ride: a terminal IDE with a tabbed editor, file explorer, and embedded shell

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use ride::config::Settings;
use ride::ui::App;

/// Send tracing output to a log file; stdout belongs to the TUI.
fn setup_logging() {
    let Some(dir) = dirs::config_dir().map(|p| p.join("ride")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("ride.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ride=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    // Optional argument: a file to open or a folder to root the explorer at.
    let mut initial_file: Option<PathBuf> = None;
    let mut root = std::env::current_dir()?;
    if let Some(arg) = args.get(1) {
        let path = Path::new(arg);
        if !path.exists() {
            eprintln!("Error: '{}' not found", arg);
            eprintln!(
                "Usage: {} [file-or-folder]",
                args.first().map(|s| s.as_str()).unwrap_or("ride")
            );
            std::process::exit(1);
        }
        if path.is_dir() {
            root = path.canonicalize()?;
        } else {
            let file = path.canonicalize()?;
            if let Some(parent) = file.parent() {
                root = parent.to_path_buf();
            }
            initial_file = Some(file);
        }
    }

    setup_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ride");

    let settings = Settings::load();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(settings, root);
    if let Some(file) = initial_file {
        app.open_file(&file);
    }
    let res = app.run(&mut terminal);

    // Persist settings before tearing the terminal down; failures are
    // logged, never fatal.
    let size = terminal.size().unwrap_or_default();
    if let Err(e) = app.settings_snapshot(size.width, size.height).save() {
        tracing::error!(error = %e, "failed to save settings");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
