//! Fair RPS
//!
//! Rock-paper-scissors over any odd number of moves. The computer's move is
//! committed with HMAC-SHA256 before you choose, and the key is revealed
//! afterwards so the commitment can be checked.

mod game_loop;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fair_rps_core::{Commitment, FairnessProof, GameError, GameSession, RuleEngine};
use game_loop::Finish;
use std::io;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "fair-rps", version, about = "Provably fair rock-paper-scissors")]
struct Cli {
    /// Log filter, in tracing EnvFilter syntax
    #[arg(long, global = true, env = "FAIR_RPS_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game against the computer
    Play {
        /// Also print the fairness proof as JSON when the game resolves
        #[arg(long)]
        json: bool,

        /// Odd number (>= 3) of distinct moves. Each move beats the next half
        /// of the list, wrapping around, so the classic game is
        /// `rock scissors paper`; `rock paper scissors` makes rock beat paper.
        #[arg(required = true, num_args = 1..)]
        moves: Vec<String>,
    },
    /// Print the outcome table for a move list
    Table {
        /// Moves, in the same order as for `play`
        #[arg(required = true, num_args = 1..)]
        moves: Vec<String>,
    },
    /// Check a revealed key against a published HMAC
    Verify {
        /// Revealed key, 64 hex characters
        #[arg(long)]
        key: String,

        /// The move the computer claims to have committed to
        #[arg(long = "move")]
        claimed_move: String,

        /// HMAC published at the start of the game
        #[arg(long)]
        hmac: String,
    },
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn play(moves: Vec<String>, json: bool) -> Result<()> {
    let session = GameSession::from_labels(moves)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let (finish, state) = game_loop::run(&session, stdin.lock(), &mut stdout, json)?;
    match finish {
        Finish::Exited => info!(session = %session.id(), ?state, "exited without playing"),
        Finish::Resolved(resolution) => {
            info!(
                session = %session.id(),
                ?state,
                outcome = %resolution.outcome,
                "game finished"
            )
        }
    }
    Ok(())
}

fn print_table(moves: Vec<String>) -> Result<()> {
    let engine = RuleEngine::from_labels(moves)?;
    println!("{}", table::render(engine.moves(), engine.outcome_matrix()));
    Ok(())
}

fn verify(key: String, claimed_move: String, hmac: String) -> Result<()> {
    let proof = FairnessProof {
        commitment: hmac.parse::<Commitment>()?,
        key,
        claimed_move,
    };
    proof.verify()?;
    println!("proof ok: HMAC matches move {:?}", proof.claimed_move);
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GameError>()
        .map(GameError::exit_code)
        .unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Command::Play { moves, json } => play(moves, json),
        Command::Table { moves } => print_table(moves),
        Command::Verify {
            key,
            claimed_move,
            hmac,
        } => verify(key, claimed_move, hmac),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GameError>() {
                Some(GameError::Configuration(_)) => {
                    eprintln!("Error: {}", err);
                    eprintln!("Example: fair-rps play rock scissors paper");
                }
                Some(GameError::FairnessViolation { .. }) => {
                    warn!("{}", err);
                    eprintln!("PROOF FAILED: {}", err);
                }
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::from(exit_code(&err))
        }
    }
}
