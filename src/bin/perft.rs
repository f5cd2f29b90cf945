use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use scacchiera::board::{Board, START_FEN};
use scacchiera::perft::{divide, perft};
use shakmaty::fen::Fen;
use shakmaty::{Chess, Position};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Perft node counter", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count of every root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the count against shakmaty
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut board =
        Board::from_fen(&args.fen).with_context(|| format!("invalid FEN '{}'", args.fen))?;

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = std::time::Instant::now();
    let nodes = if args.divide {
        let split = divide(&mut board, args.depth);
        for (mv, count) in &split {
            println!("{}: {}", mv, count);
        }
        split.iter().map(|(_, count)| count).sum::<u64>()
    } else {
        perft(&mut board, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let fen: Fen = args
            .fen
            .parse()
            .map_err(|e| anyhow!("shakmaty rejected FEN: {e}"))?;
        let pos: Chess = fen
            .into_position(shakmaty::CastlingMode::Standard)
            .map_err(|e| anyhow!("shakmaty rejected position: {e}"))?;
        let expected = perft_shakmaty(&pos, args.depth);
        if expected != nodes {
            bail!("perft mismatch: got {} expected {} (shakmaty)", nodes, expected);
        }
        info!(nodes, "matches shakmaty");
    }
    Ok(())
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
