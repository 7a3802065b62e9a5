//! Command-line front end for the engine core.
//!
//! `neural_chess perft 4`, `neural_chess bestmove --fen "<fen>" --depth 4`,
//! `neural_chess selfplay --random-opponent --seed 7`, `neural_chess play`.
//! Set `RUST_LOG=debug` to see per-ply and per-search logging.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use neural_chess::engines::engine_minimax::MinimaxEngine;
use neural_chess::engines::engine_random::RandomEngine;
use neural_chess::engines::engine_trait::Engine;
use neural_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use neural_chess::game_state::chess_types::Color;
use neural_chess::game_state::game_state::GameState;
use neural_chess::move_generation::move_generator::PromotionPolicy;
use neural_chess::move_generation::perft::{perft, perft_divide, perft_multi_threaded};
use neural_chess::search::minimax::SearchConfig;
use neural_chess::session::game_config::GameConfig;
use neural_chess::session::game_session::GameSession;
use neural_chess::utils::long_algebraic::parse_long_algebraic;
use neural_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Parser)]
#[command(name = "neural_chess", version, about = "Chess engine core: perft, search and play")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        depth: u8,

        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Print the count below every root move.
        #[arg(long)]
        divide: bool,

        /// Search each root move on its own thread.
        #[arg(long)]
        threads: bool,

        /// Expand promotions into all four pieces instead of queen only.
        #[arg(long)]
        all_promotions: bool,
    },

    /// Search one position and print the chosen move.
    Bestmove {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        /// Extend the search with captures past the horizon.
        #[arg(short, long)]
        quiescence: bool,
    },

    /// Let the engine play itself and print the game as PGN.
    Selfplay {
        #[arg(short, long, default_value_t = 2)]
        depth: u8,

        #[arg(long, default_value_t = 200)]
        max_plies: u16,

        /// Black plays random moves instead of searching.
        #[arg(long)]
        random_opponent: bool,

        /// Seed for the random opponent.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play against the engine on stdin using long algebraic moves.
    Play {
        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        #[arg(long, value_enum, default_value_t = Side::White)]
        side: Side,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::Light,
            Side::Black => Color::Dark,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Perft {
            depth,
            fen,
            divide,
            threads,
            all_promotions,
        } => run_perft(&fen, depth, divide, threads, all_promotions),
        Command::Bestmove {
            fen,
            depth,
            quiescence,
        } => run_bestmove(&fen, depth, quiescence),
        Command::Selfplay {
            depth,
            max_plies,
            random_opponent,
            seed,
        } => run_selfplay(depth, max_plies, random_opponent, seed),
        Command::Play { depth, side } => run_play(depth, side.into()),
    }
}

fn run_perft(
    fen: &str,
    depth: u8,
    divide: bool,
    threads: bool,
    all_promotions: bool,
) -> Result<(), Box<dyn Error>> {
    let mut game_state = GameState::from_fen(fen)?;
    let policy = if all_promotions {
        PromotionPolicy::AllPieces
    } else {
        PromotionPolicy::AutoQueen
    };

    let started = Instant::now();
    let nodes = if divide {
        let mut total = 0;
        for (mv, count) in perft_divide(&mut game_state, depth, policy) {
            println!("{mv}: {count}");
            total += count;
        }
        total
    } else if threads {
        perft_multi_threaded(&game_state, depth, policy)?
    } else {
        perft(&mut game_state, depth, policy)
    };
    let elapsed = started.elapsed();

    println!(
        "depth {depth} nodes {nodes} time_ms {} nps {:.0}",
        elapsed.as_millis(),
        nodes as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}

fn run_bestmove(fen: &str, depth: u8, quiescence: bool) -> Result<(), Box<dyn Error>> {
    let game_state = GameState::from_fen(fen)?;
    let mut engine = MinimaxEngine::new(SearchConfig {
        depth,
        quiescence,
        ..SearchConfig::default()
    })?;

    let out = engine.choose_move(&game_state)?;
    for line in &out.info_lines {
        println!("info {line}");
    }
    match out.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn run_selfplay(
    depth: u8,
    max_plies: u16,
    random_opponent: bool,
    seed: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let search = SearchConfig {
        depth,
        ..SearchConfig::default()
    };
    let mut white: Box<dyn Engine> = Box::new(MinimaxEngine::new(search)?);
    let mut black: Box<dyn Engine> = match (random_opponent, seed) {
        (true, Some(seed)) => Box::new(RandomEngine::with_seed(seed)),
        (true, None) => Box::new(RandomEngine::new()),
        (false, _) => Box::new(MinimaxEngine::new(search)?),
    };
    white.new_game();
    black.new_game();

    let mut session = GameSession::default();
    for _ in 0..max_plies {
        if session.status().is_over() {
            break;
        }
        let engine = match session.game_state().side_to_move {
            Color::Light => &mut white,
            Color::Dark => &mut black,
        };
        let Some(mv) = engine.choose_move(session.game_state())?.best_move else {
            break;
        };
        let outcome = session.apply_move(mv.from, mv.to, mv.promotion)?;
        eprintln!("{} {}", engine.name(), outcome.notation);
    }

    println!("{}", session.pgn()?);
    println!("{}", session.status());
    Ok(())
}

fn run_play(depth: u8, human: Color) -> Result<(), Box<dyn Error>> {
    let mut session = GameSession::new(GameConfig {
        search: SearchConfig {
            depth,
            ..SearchConfig::default()
        },
        ..GameConfig::default()
    });
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", render_game_state(session.game_state()));
    if session.game_state().side_to_move != human {
        engine_reply(&mut session, depth)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "board" => println!("{}", render_game_state(session.game_state())),
            "fen" => println!("{}", session.fen()),
            "pgn" => println!("{}", session.pgn()?),
            "eval" => println!("{}", session.evaluation()),
            "moves" => {
                let moves: Vec<String> = session.legal_moves(None).iter().map(|mv| mv.to_string()).collect();
                println!("{}", moves.join(" "));
            }
            "undo" => {
                // Take back the engine reply and the player's move.
                for _ in 0..2 {
                    if let Err(err) = session.undo_last_move() {
                        println!("{err}");
                        break;
                    }
                }
                println!("{}", render_game_state(session.game_state()));
            }
            text => match parse_long_algebraic(text)
                .and_then(|(from, to, promotion)| session.apply_move(from, to, promotion))
            {
                Ok(outcome) => {
                    println!("you: {}", outcome.notation);
                    if !outcome.status.is_over() {
                        engine_reply(&mut session, depth)?;
                    } else {
                        println!("{}", render_game_state(session.game_state()));
                    }
                }
                Err(err) => println!("{err}"),
            },
        }

        let status = session.status();
        if status.is_over() {
            println!("{status}");
        }
        stdout.flush()?;
    }

    Ok(())
}

fn engine_reply(session: &mut GameSession, depth: u8) -> Result<(), Box<dyn Error>> {
    let outcome = session.play_best_move(depth)?;
    println!("engine: {}", outcome.notation);
    println!("{}", render_game_state(session.game_state()));
    Ok(())
}
