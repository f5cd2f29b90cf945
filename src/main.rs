//! Scacchiera driver: engine self-play, or a human playing one side over stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use scacchiera::board::{Board, Color, Move, START_FEN};
use scacchiera::game::game_over;
use scacchiera::notation::parse_legal_move;
use scacchiera::search::{Search, SearchParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// The engine plays both sides
    SelfPlay,
    /// A human plays one side, typing moves like e2e4 or e7e8q
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(long, value_enum, default_value_t = Mode::SelfPlay)]
    mode: Mode,

    /// Side played by the human in human mode
    #[arg(long, value_enum, default_value_t = Side::White)]
    human: Side,

    /// Maximum search depth in plies
    #[arg(short, long, default_value_t = 5)]
    depth: u8,

    /// Time per move in milliseconds (0 = unlimited)
    #[arg(short, long, default_value_t = 5000)]
    time_ms: u64,

    /// Quiescence extension cap in plies
    #[arg(long, default_value_t = 8)]
    qsearch_depth: u8,

    /// Disable the "gives check" bonus in move ordering
    #[arg(long)]
    no_check_bonus: bool,

    /// Enable delta pruning in quiescence
    #[arg(long)]
    delta_pruning: bool,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut board =
        Board::from_fen(&args.fen).with_context(|| format!("invalid FEN '{}'", args.fen))?;
    let params = SearchParams::new()
        .max_depth(args.depth)
        .time_limit(args.time_ms)
        .qsearch_depth(args.qsearch_depth)
        .check_ordering_bonus(!args.no_check_bonus)
        .enable_delta_pruning(args.delta_pruning);
    let mut search = Search::new(params);
    let human = Color::from(args.human);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut plies = 0u32;

    println!("{}", board);
    loop {
        if let Some(outcome) = game_over(&mut board) {
            println!("{}", outcome);
            break;
        }
        if args.max_plies.is_some_and(|max| plies >= max) {
            info!(plies, "ply limit reached");
            break;
        }

        let mv = if args.mode == Mode::Human && board.side_to_move() == human {
            match read_human_move(&mut board, &mut lines)? {
                Some(mv) => mv,
                None => break,
            }
        } else {
            let result = search.search(&mut board);
            let Some(mv) = result.best_move else {
                break;
            };
            info!(mv = %mv, score = result.score, "{}", search.stats());
            mv
        };

        board.make_move(mv);
        plies += 1;
        println!("{}", board);
    }
    Ok(())
}

/// `None` on end of input or "quit"
fn read_human_move<I>(board: &mut Board, lines: &mut I) -> Result<Option<Move>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("Your move: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("failed to read move from stdin")?;
        let text = line.trim();
        match text {
            "" => continue,
            "quit" | "exit" => return Ok(None),
            _ => {}
        }
        match parse_legal_move(board, text) {
            Ok(mv) => return Ok(Some(mv)),
            Err(e) => warn!("{}", e),
        }
    }
}
