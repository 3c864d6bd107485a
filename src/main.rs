//! Strictly Solver - Unified CLI
//!
//! Exact tic-tac-toe engine with analysis, self-play and interactive modes.

#![warn(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, Write};
use strictly_solver::cli::{Cli, Command, Mark};
use strictly_solver::{
    BestMoveReport, Board, PlaySession, Searcher, SolverConfig, VerifyReport, play_out, render,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = SolverConfig::load(cli.config.as_deref())?;
    if cli.parallel {
        config = config.with_parallel_root(true);
    }

    initialize_tracing(config.log_filter());
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Best { board, json } => run_best(&config, &board, json),
        Command::Play { human, start } => run_play(config, human, start.as_deref()),
        Command::SelfPlay { start, json } => run_self_play(&config, start.as_deref(), json),
        Command::Verify { limit } => run_verify(&config, limit),
    }
}

/// Parses a board argument, defaulting to the empty board.
#[instrument]
fn parse_board(board: Option<&str>) -> Result<Board> {
    match board {
        Some(text) => text
            .parse()
            .with_context(|| format!("Invalid board '{}'", text)),
        None => Ok(Board::new()),
    }
}

/// Print the best move for one board
#[instrument(skip(config))]
fn run_best(config: &SolverConfig, board: &str, json: bool) -> Result<()> {
    let board = parse_board(Some(board))?;
    if let Some(outcome) = board.outcome() {
        bail!("Board {} is already finished: {}", board, outcome);
    }

    let mut searcher = Searcher::new(*config.search());
    let report = BestMoveReport::compute(&board, &mut searcher)?;
    info!(action = %report.action(), value = report.value(), "Best move found");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", render::grid(&board));
        println!("{}", report);
    }
    Ok(())
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: SolverConfig, human: Option<Mark>, start: Option<&str>) -> Result<()> {
    let board = parse_board(start)?;
    let config = match human {
        Some(mark) => config.with_human_player(mark.into()),
        None => config,
    };

    let stdin = io::stdin();
    let mut session = PlaySession::new(stdin.lock(), io::stdout(), &config);
    match session.run(board)? {
        Some(outcome) => info!(%outcome, "Interactive game over"),
        None => info!("Interactive game abandoned"),
    }
    Ok(())
}

/// Let the engine play both sides
#[instrument(skip(config))]
fn run_self_play(config: &SolverConfig, start: Option<&str>, json: bool) -> Result<()> {
    let board = parse_board(start)?;
    let mut searcher = Searcher::new(*config.search());
    let playout = play_out(&board, &mut searcher)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playout)?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}\n", render::grid(&playout.start))?;
    for (i, ply) in playout.plies.iter().enumerate() {
        writeln!(out, "{:>2}. {} plays {}", i + 1, ply.player, ply.action)?;
    }
    writeln!(out, "\n{}\n", render::grid(&playout.finish))?;
    writeln!(out, "Result: {}", playout.outcome)?;
    Ok(())
}

/// Cross-check pruned and unpruned values
#[instrument(skip(config))]
fn run_verify(config: &SolverConfig, limit: Option<usize>) -> Result<()> {
    let mut searcher = Searcher::new(*config.search());
    let report = VerifyReport::run(&Board::new(), &mut searcher, limit)?;
    println!("{}", report);

    if !report.passed() {
        bail!(
            "Alpha-beta disagreed with minimax on {} boards",
            report.mismatches().len()
        );
    }
    Ok(())
}

fn initialize_tracing(fallback: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
