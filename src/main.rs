use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use connect_four_engine::config::AppConfig;
use connect_four_engine::error::GameError;
use connect_four_engine::game::GameEngine;

/// Play a hot-seat game of Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play a hot-seat game of Connect Four")]
struct Cli {
    /// Name of the first player (moves first)
    player1: String,

    /// Name of the second player
    player2: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override how many chips in a line win
    #[arg(long)]
    win_length: Option<usize>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.log_level);

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        app_config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        app_config.board.cols = cols;
    }
    if let Some(win_length) = cli.win_length {
        app_config.board.win_length = win_length;
    }
    debug!(board = ?app_config.board, "board configured");

    let mut engine =
        GameEngine::with_config(app_config.board).context("invalid board shape")?;
    engine
        .register_players(cli.player1, cli.player2)
        .context("registering players")?;

    play(&mut engine, io::stdin().lock(), io::stdout().lock())
}

/// Run one match to completion, reading 1-based column numbers from `input`.
fn play(engine: &mut GameEngine<String>, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut lines = input.lines();
    let cols = engine.config().cols;

    loop {
        writeln!(out, "\n{}\n", engine.board())?;
        let name = engine.current_player()?.clone();
        write!(out, "{name}, choose a column (1-{cols}): ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            bail!("input closed before the game finished");
        };
        let line = line.context("reading move")?;
        let choice = line.trim();
        let column = match choice.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                writeln!(out, "'{choice}' is not a column number")?;
                continue;
            }
        };

        match engine.place_chip(column) {
            Ok(_) => {}
            Err(GameError::InvalidColumn { .. }) => {
                debug!(column, "move outside the board");
                writeln!(out, "There is no column {choice}, pick 1-{cols}")?;
                continue;
            }
            Err(GameError::ColumnFull { .. }) => {
                debug!(column, "move into full column");
                writeln!(out, "Column {choice} is full, pick another")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if engine.check_win()? {
            writeln!(out, "\n{}\n", engine.board())?;
            writeln!(out, "{name} wins after {} rounds!", engine.round_count())?;
            info!(winner = %name, rounds = engine.round_count(), "game won");
            return Ok(());
        }
        if engine.is_board_full() {
            writeln!(out, "\n{}\n", engine.board())?;
            writeln!(out, "The board is full, it's a draw.")?;
            info!(rounds = engine.round_count(), "game drawn");
            return Ok(());
        }
        engine.set_next_player()?;
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
