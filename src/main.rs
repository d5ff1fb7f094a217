mod app;
mod config;
mod error;
mod event;
mod games;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::{App, Tab};
use error::Result;
use event::{Event, EventHandler};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    Tetris,
    Snake,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Start straight in a game instead of the home screen
    #[arg(short, long, value_enum)]
    game: Option<GameArg>,

    /// Seed for piece and food placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write a log to FILE
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Log debug messages too
    #[arg(short, long)]
    debug: bool,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        if let Err(e) = logging::setup(path, cli.debug) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let mut app = App::new(cli.seed);
    match cli.game {
        Some(GameArg::Tetris) => app.open(Tab::Tetris),
        Some(GameArg::Snake) => app.open(Tab::Snake),
        None => {}
    }
    log::info!("started, seed {:?}", cli.seed);

    let result = main_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn main_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(config::FRAME);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick(dt) => app.on_tick(dt),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            log::info!("quit");
            return Ok(());
        }
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
