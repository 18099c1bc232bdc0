use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::AppConfig;
use connect_four::game::GameState;
use connect_four::server::Server;
use connect_four::session::Session;
use connect_four::ui::App;

/// Play Connect Four.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play at a console prompt (default)
    Console,
    /// Play in an interactive terminal UI
    Tui,
    /// Serve the game over HTTP
    Serve {
        /// Override the listen address
        #[arg(long)]
        bind: Option<String>,

        /// Override the directory served under /static/
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Override the page template
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Print a config file with every default value
    DefaultConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Console) {
        Command::Console => {
            let mut state = GameState::initial();
            connect_four::console::run(&mut state, io::stdin().lock(), io::stdout())
                .context("console game")?;
            Ok(())
        }
        Command::Tui => run_tui().context("terminal UI"),
        Command::Serve {
            bind,
            static_dir,
            template,
        } => {
            let mut app_config = AppConfig::load_or_default(&cli.config)
                .with_context(|| format!("loading config from {}", cli.config.display()))?;

            // Apply CLI overrides
            if let Some(bind) = bind {
                app_config.server.bind = bind;
            }
            if let Some(static_dir) = static_dir {
                app_config.server.static_dir = static_dir;
            }
            if template.is_some() {
                app_config.server.template = template;
            }
            app_config.validate()?;

            let session = Arc::new(Session::new());
            let server = Server::bind(&app_config.server, session)
                .context("starting HTTP server")?;
            server.run()?;
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

fn run_tui() -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new();
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
