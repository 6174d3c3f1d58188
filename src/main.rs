//! frettui - a terminal scale explorer.
//!
//! Shows the notes of a selected scale/mode on a guitar fretboard (any
//! tuning) and a two-octave piano keyboard, and plays a synthesized tone
//! for the note under the cursor or mouse click.
//!
//! # Usage
//!
//! ```bash
//! cargo run                              # C Major, standard tuning
//! cargo run -- --root A --scale Minor    # A natural minor
//! cargo run -- --tuning DADGAD --frets 12
//! cargo run -- --tables my-tables.json   # extend the built-in tables
//! ```
//!
//! Press `?` for help with keyboard shortcuts.

mod app;
mod audio;
mod board;
mod tables;
mod theory;
mod ui;

use app::{App, MAX_FRETS, MIN_FRETS};
use audio::AudioEngine;
use tables::Tables;
use theory::NOTE_NAMES;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options for the application.
struct CliOptions {
    root: Option<String>,
    scale: Option<String>,
    tuning: Option<String>,
    frets: Option<u32>,
    tables: Option<PathBuf>,
    no_audio: bool,
}

impl CliOptions {
    /// Parses command-line arguments.
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut opts = Self {
            root: None,
            scale: None,
            tuning: None,
            frets: None,
            tables: None,
            no_audio: false,
        };
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--root" | "-r" => opts.root = Some(take_value(&args, &mut i, "--root")?),
                "--scale" | "-s" => opts.scale = Some(take_value(&args, &mut i, "--scale")?),
                "--tuning" | "-t" => opts.tuning = Some(take_value(&args, &mut i, "--tuning")?),
                "--frets" | "-f" => {
                    let value = take_value(&args, &mut i, "--frets")?;
                    let frets: u32 = value
                        .parse()
                        .with_context(|| format!("invalid fret count: {value}"))?;
                    if !(MIN_FRETS..=MAX_FRETS).contains(&frets) {
                        eprintln!("Error: fret count must be {MIN_FRETS}-{MAX_FRETS}");
                        std::process::exit(1);
                    }
                    opts.frets = Some(frets);
                }
                "--tables" => {
                    opts.tables = Some(PathBuf::from(take_value(&args, &mut i, "--tables")?))
                }
                "--no-audio" => opts.no_audio = true,
                "--help" | "-h" => {
                    eprintln!("frettui - Terminal scale explorer");
                    eprintln!();
                    eprintln!(
                        "Usage: {} [OPTIONS]",
                        args.first().unwrap_or(&"frettui".to_string())
                    );
                    eprintln!();
                    eprintln!("Options:");
                    eprintln!("  -r, --root NOTE     Root note (C, C#, D, ... B)");
                    eprintln!("  -s, --scale NAME    Scale or mode (e.g. Major, Dorian, Blues)");
                    eprintln!("  -t, --tuning NAME   Tuning (e.g. Standard, \"Drop D\", DADGAD)");
                    eprintln!("  -f, --frets N       Number of frets shown ({MIN_FRETS}-{MAX_FRETS})");
                    eprintln!("      --tables PATH   JSON file with extra tunings/scales");
                    eprintln!("      --no-audio      Run without opening an audio device");
                    eprintln!("  -h, --help          Print this help message");
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Ok(opts)
    }
}

/// Reads the value following a flag, advancing the index.
fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .with_context(|| format!("{flag} requires a value"))
}

/// Main entry point.
fn main() -> Result<()> {
    // Parse CLI options first (before any terminal setup)
    let cli = CliOptions::parse()?;

    // Initialize logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load tables before touching the terminal so errors print cleanly
    let tables = match &cli.tables {
        Some(path) => Tables::with_user_file(path)?,
        None => Tables::builtin(),
    };

    let audio = if cli.no_audio {
        None
    } else {
        match AudioEngine::new() {
            Ok(engine) => Some(engine),
            Err(e) => {
                tracing::warn!("audio disabled: {e:#}");
                None
            }
        }
    };

    let mut app = App::new(tables, audio);
    apply_cli_selections(&mut app, &cli)?;

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    result
}

/// Applies `--root`, `--scale`, `--tuning`, and `--frets` to a fresh app.
/// A name that matches nothing prints the valid set and exits non-zero.
fn apply_cli_selections(app: &mut App, cli: &CliOptions) -> Result<()> {
    if let Some(root) = &cli.root {
        match NOTE_NAMES.iter().position(|n| n.eq_ignore_ascii_case(root)) {
            Some(index) => app.root_index = index,
            None => {
                eprintln!("Unknown root {:?}. Valid roots: {}", root, NOTE_NAMES.join(", "));
                std::process::exit(1);
            }
        }
    }
    if let Some(scale) = &cli.scale {
        match app.tables.scale_index(scale) {
            Some(index) => app.scale_index = index,
            None => {
                let names: Vec<&str> = app.tables.scales.iter().map(|s| s.name.as_str()).collect();
                eprintln!("Unknown scale {:?}. Valid scales: {}", scale, names.join(", "));
                std::process::exit(1);
            }
        }
    }
    if let Some(tuning) = &cli.tuning {
        match app.tables.tuning_index(tuning) {
            Some(index) => app.tuning_index = index,
            None => {
                let names: Vec<&str> = app.tables.tunings.iter().map(|t| t.name.as_str()).collect();
                eprintln!("Unknown tuning {:?}. Valid tunings: {}", tuning, names.join(", "));
                std::process::exit(1);
            }
        }
    }
    if let Some(frets) = cli.frets {
        app.max_fret = frets;
    }
    // Recompute the grids with the selected parameters
    app.apply_selection();
    Ok(())
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_status();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Nothing animates on its own; a long poll keeps the loop idle
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    if app.show_help {
                        // Help overlay is visible - handle close and scroll
                        match key.code {
                            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                                app.show_help = false;
                                app.help_scroll = 0;
                            }
                            KeyCode::Up | KeyCode::Char('k') => {
                                app.help_scroll = app.help_scroll.saturating_sub(1);
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                app.help_scroll = app.help_scroll.saturating_add(1);
                            }
                            _ => {}
                        }
                        continue;
                    }

                    if handle_key(app, key.code, key.modifiers) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) if !app.show_help => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.handle_mouse_click(mouse.column, mouse.row);
                    }
                    MouseEventKind::ScrollUp => {
                        app.move_cursor(1, 0);
                    }
                    MouseEventKind::ScrollDown => {
                        app.move_cursor(-1, 0);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

/// Handles a key press. Returns true when the app should quit.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    // Ctrl+C always quits
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab => app.cycle_focus(),

        // Selection cycling: lowercase forward, uppercase backward
        KeyCode::Char('r') => app.cycle_root(1),
        KeyCode::Char('R') => app.cycle_root(-1),
        KeyCode::Char('s') => app.cycle_scale(1),
        KeyCode::Char('S') => app.cycle_scale(-1),
        KeyCode::Char('t') => app.cycle_tuning(1),
        KeyCode::Char('T') => app.cycle_tuning(-1),
        KeyCode::Char('[') => app.adjust_frets(-1),
        KeyCode::Char(']') => app.adjust_frets(1),

        // Display toggles
        KeyCode::Char('a') => app.toggle_show_all_notes(),
        KeyCode::Char('n') => app.toggle_show_note_names(),
        KeyCode::Char('m') => app.toggle_mute(),

        // Navigation with hjkl and arrow keys
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(0, 1),
        KeyCode::Home => {
            app.move_cursor(-(MAX_FRETS as i32) - 1, 0);
        }
        KeyCode::End => {
            app.move_cursor(MAX_FRETS as i32 + 1, 0);
        }

        // Play the note under the cursor
        KeyCode::Enter | KeyCode::Char(' ') => app.play_cursor(),

        _ => {}
    }

    false
}
