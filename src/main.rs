use std::fs;
use std::path::PathBuf;
use std::process::exit;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use log::{LevelFilter, error, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use marten_checkers::{Board, Difficulty, Game, Side};

#[derive(Parser)]
#[command(about = "Checkers engine driver")]
struct Cli {
    /// Log at trace level instead of info
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pit two AI tiers against each other
    Selfplay {
        #[arg(long, value_enum, default_value_t = Difficulty::Shallow)]
        red: Difficulty,

        #[arg(long, value_enum, default_value_t = Difficulty::Random)]
        black: Difficulty,

        #[arg(long, default_value_t = 1)]
        games: u32,

        /// Plies before a game is called a draw
        #[arg(long, default_value_t = 200)]
        move_limit: u32,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a piece's legal moves in a position loaded from a layout file
    Moves {
        file: PathBuf,
        row: u8,
        col: u8,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Selfplay {
            red,
            black,
            games,
            move_limit,
            seed,
        } => selfplay(red, black, games, move_limit, seed),
        Command::Moves { file, row, col } => print_moves(&file, row, col),
    }
}

fn setup_logging(verbose: bool) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(if verbose { LevelFilter::Trace } else { LevelFilter::Info })
        .chain(std::io::stderr())
        .apply()
        .expect("logger should only be initialized once");
    log_panics::init();
}

fn selfplay(red: Difficulty, black: Difficulty, games: u32, move_limit: u32, seed: Option<u64>) {
    let base_seed = seed.unwrap_or_else(rand::random);
    info!("selfplay {red:?} (Red) vs {black:?} (Black), {games} games, seed {base_seed}");

    let mut wins = [0u32; 2];
    let mut draws = 0u32;

    for game_number in 0..games {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(game_number as u64));
        let mut game = Game::new();
        let mut plies = 0;

        let result = loop {
            if let Some(winner) = game.outcome() {
                break Some(winner);
            }
            if plies >= move_limit {
                break None;
            }

            let tier = match game.turn() {
                Side::Red => red,
                Side::Black => black,
            };
            if !game.ai_move(tier, &mut rng) {
                // outcome() above should have caught this
                break Some(game.turn().opponent());
            }
            plies += 1;
            trace!("game {game_number} after ply {plies}:\n{}", game.board());
        };

        match result {
            Some(winner) => {
                info!(
                    "game {game_number}: {winner} wins after {plies} plies ({} vs {} pieces left)",
                    game.board().remaining(Side::Red),
                    game.board().remaining(Side::Black)
                );
                wins[match winner {
                    Side::Red => 0,
                    Side::Black => 1,
                }] += 1;
            }
            None => {
                info!("game {game_number}: drawn at the {move_limit}-ply limit");
                draws += 1;
            }
        }
    }

    info!("totals: Red {} / Black {} / drawn {draws}", wins[0], wins[1]);
}

fn print_moves(file: &PathBuf, row: u8, col: u8) {
    let layout = match fs::read_to_string(file) {
        Ok(layout) => layout,
        Err(e) => {
            error!("could not read {}: {e}", file.display());
            exit(1);
        }
    };

    let board = match Board::from_layout(&layout) {
        Ok(board) => board,
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };
    print!("{board}");

    let piece = match board.piece_at(row, col) {
        Ok(Some(piece)) => piece,
        Ok(None) => {
            error!("no piece at ({row}, {col})");
            exit(1);
        }
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };

    let moves = marten_checkers::legal_moves(&board, piece);
    if moves.is_empty() {
        println!("no legal moves for the piece at ({row}, {col})");
        return;
    }

    for (destination, chain) in moves {
        if chain.is_empty() {
            println!("{destination}");
        } else {
            let jumped: Vec<String> = chain.iter().map(|p| p.square().to_string()).collect();
            println!("{destination} capturing {}", jumped.join(", "));
        }
    }
}
