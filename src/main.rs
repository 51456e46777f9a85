//! cinetui - terminal movie and series browser
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinetui
//!
//! # CLI mode (for automation)
//! cinetui search "inception"
//! cinetui play tt1375666
//! cinetui favorites list --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use cinetui::app::{default_shelves, Action, App, Msg};
use cinetui::cli::{self, Cli, Command, ExitCode, Output};
use cinetui::commands;
use cinetui::config::Config;
use cinetui::controller::{Controller, Services};
use cinetui::download::Downloader;
use cinetui::logging;
use cinetui::player::LocalPlayer;
use cinetui::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_stderr(cli.verbose)?;
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        run_tui(&config, cli.verbose).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    let Some(command) = cli.command else {
        return ExitCode::Success;
    };

    let imdb_id = match &command {
        Command::Info(cmd) => Some(&cmd.imdb_id),
        Command::Streams(cmd) => Some(&cmd.imdb_id),
        Command::Play(cmd) => Some(&cmd.imdb_id),
        Command::Download(cmd) => Some(&cmd.imdb_id),
        _ => None,
    };
    if let Some(Err(e)) = imdb_id.map(|id| cli::validate_imdb_id(id)) {
        return output.error(e, ExitCode::InvalidArgs);
    }

    match command {
        Command::Search(cmd) => commands::search_cmd(cmd, config, &output).await,
        Command::Info(cmd) => commands::info_cmd(cmd, config, &output).await,
        Command::Streams(cmd) => commands::streams_cmd(cmd, config, &output).await,
        Command::Resolve(cmd) => commands::resolve_cmd(cmd, config, &output).await,
        Command::Play(cmd) => commands::play_cmd(cmd, config, &output).await,
        Command::Download(cmd) => commands::download_cmd(cmd, config, &output).await,
        Command::Favorites(cmd) => commands::favorites_cmd(cmd, config, &output).await,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Build the controller from config
fn build_controller(config: &Config) -> Result<Controller> {
    let mut services = Services::new(config.metadata_client()?);
    match config.stream_client() {
        Some(streams) => services = services.with_streams(streams),
        None => tracing::warn!("STREAM_API_BASE_URL not set, playback disabled"),
    }
    services = services.with_downloader(Downloader::new(config.download_dir()));

    let app = App::new().with_shelves(default_shelves(chrono::Local::now().year()));
    let controller = Controller::new(
        app,
        services,
        config.favorites_store(),
        Box::new(LocalPlayer::new(config.player)),
    )
    .with_fullscreen(config.fullscreen);
    Ok(controller)
}

/// Run interactive TUI
async fn run_tui(config: &Config, verbose: u8) -> Result<()> {
    let log_dir = dirs::data_dir()
        .map(|d| d.join("cinetui").join("logs"))
        .unwrap_or_else(std::env::temp_dir);
    let _guard = logging::init_file(&log_dir, verbose)?;

    // Fail before touching the terminal so the error is readable
    let mut controller = build_controller(config)?;

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut controller).await;

    // Always restore terminal, even on error
    controller.shutdown();
    restore_terminal(&mut terminal)?;

    result
}

/// Spawn network work; results come back over the channel
fn spawn_actions(services: &Services, tx: &mpsc::UnboundedSender<Msg>, actions: Vec<Action>) {
    for action in actions {
        tracing::debug!(?action, "spawning");
        let services = services.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let msg = services.run(action).await;
            // Receiver gone means the UI has shut down
            let _ = tx.send(msg);
        });
    }
}

/// Main event loop - handles input, drains finished work, renders UI
async fn run_event_loop(terminal: &mut Tui, controller: &mut Controller) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let services = controller.services().clone();

    let actions = controller.start();
    spawn_actions(&services, &tx, actions);

    while controller.app.running {
        terminal.draw(|frame| ui::render(frame, &controller.app))?;

        while let Ok(msg) = rx.try_recv() {
            let actions = controller.apply(msg);
            spawn_actions(&services, &tx, actions);
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    let actions = controller.handle_key(key);
                    spawn_actions(&services, &tx, actions);
                }
            }
        }
    }

    Ok(())
}
