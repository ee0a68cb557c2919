//! Command-line front end for the checkers engine

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use checkers_core::rules::legal_moves_for_side;
use checkers_core::{
    apply_move, new_game, GameId, GameService, GameState, MemoryStore, MoveRequest, MoveResponse,
    PlayerId, Result,
};

#[derive(Debug, Parser)]
#[command(name = "checkers", about = "Checkers rules engine")]
struct Cli {
    /// Log engine activity to stderr at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a freshly set up game as JSON.
    New {
        #[arg(long)]
        player1: i64,
        #[arg(long)]
        player2: i64,
        #[arg(long, default_value_t = 1)]
        game: i64,
    },

    /// Apply one move to a game stored as JSON.
    Apply {
        /// Game state file, as printed by `new`.
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long, default_value = "")]
        to: String,
        #[arg(long)]
        player: i64,
        /// Overwrite the state file when the move is applied.
        #[arg(long)]
        write: bool,
    },

    /// Play random legal moves until someone is eliminated or stuck.
    Selfplay {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::New {
            player1,
            player2,
            game,
        } => print_new_game(GameId(game), PlayerId(player1), PlayerId(player2)),
        Command::Apply {
            state,
            from,
            to,
            player,
            write,
        } => apply_from_file(&state, MoveRequest::new(PlayerId(player), from, to), write),
        Command::Selfplay { seed, max_plies } => selfplay(seed, max_plies),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_new_game(game: GameId, player1: PlayerId, player2: PlayerId) -> Result<()> {
    let state = new_game(game, player1, player2)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn apply_from_file(path: &Path, request: MoveRequest, write: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let state: GameState = serde_json::from_str(&text)?;

    let (response, next) = match apply_move(&state, &request) {
        Ok(transition) => (MoveResponse::applied(&transition), transition.state),
        Err(error) => (MoveResponse::rejected(error, &state), state),
    };

    if write && response.applied {
        std::fs::write(path, serde_json::to_string_pretty(&next)?)?;
    }

    println!("{}", serde_json::to_string_pretty(&apply_report(&response, &next))?);
    Ok(())
}

fn apply_report(response: &MoveResponse, state: &GameState) -> serde_json::Value {
    json!({
        "response": response,
        "message": response.message(),
        "state": state,
        "outcome": response.outcome,
    })
}

fn selfplay(seed: Option<u64>, max_plies: u32) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let service = GameService::new(MemoryStore::new());
    let id = service.create_game()?;
    service.join_game(id, PlayerId(1))?;
    service.join_game(id, PlayerId(2))?;

    println!("{}", service.state(id)?.render());

    for ply in 1..=max_plies {
        let state = service.state(id)?;
        let side = state.to_move();
        let Some(player) = state.game().player_to_move() else {
            break;
        };

        let moves = legal_moves_for_side(&state, side);
        let Some((from, to)) = moves.choose(&mut rng) else {
            println!("Player {} has no legal move.", side);
            break;
        };

        let request = MoveRequest::new(player, from.to_string(), to.to_string());
        let response = service.play(id, &request)?;

        let mut line = format!("{:>3}. player {}: {}-{}", ply, side, from, to);
        if let Some(captured) = response.captured_piece_id {
            line.push_str(&format!(" x{}", captured));
        }
        if response.promoted {
            line.push_str(" (king)");
        }
        println!("{}", line);
        println!("{}", service.state(id)?.render());

        if response.outcome.is_over() {
            break;
        }
    }

    let outcome = service.outcome(id)?;
    println!("Outcome: {}", outcome.as_str());
    println!("Moves played: {}", service.history(id)?.len());
    Ok(())
}
