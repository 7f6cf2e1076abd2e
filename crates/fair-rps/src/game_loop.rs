//! Interactive read/print loop around a [`GameSession`].

use crate::table;
use anyhow::{Context, Result};
use fair_rps_core::protocol::{EXIT_TOKEN, HELP_TOKEN};
use fair_rps_core::{Event, GameSession, MoveSet, Outcome, Resolution, SessionState};
use std::io::{BufRead, Write};
use tracing::debug;

/// How the loop ended
#[derive(Debug)]
pub enum Finish {
    Exited,
    Resolved(Resolution),
}

/// Print the commitment, then read lines until the player exits or moves.
///
/// End of input counts as an exit. Lines that are not valid UTF-8 are
/// rejected like any other bad input. With `json` set, the resolution's
/// fairness proof is printed as one extra JSON line. Returns how the loop
/// ended along with the terminal session state.
pub fn run<R: BufRead, W: Write>(
    session: &GameSession,
    mut input: R,
    out: &mut W,
    json: bool,
) -> Result<(Finish, SessionState)> {
    writeln!(out, "HMAC: {}", session.commitment())?;
    write_menu(out, session.moves())?;

    let mut state = SessionState::Committed;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read input")?;
        if read == 0 {
            debug!(session = %session.id(), "input closed");
            writeln!(out, "Exiting...")?;
            return Ok((Finish::Exited, SessionState::Done));
        }
        let line = String::from_utf8_lossy(&buf);

        let transition = session.step(state, &line)?;
        state = transition.state;

        match transition.event {
            Event::Help(matrix) => {
                writeln!(out, "{}", table::render(session.moves(), matrix))?;
                write_menu(out, session.moves())?;
            }
            Event::Rejected(err) => {
                writeln!(out, "Invalid input, please try again. ({})", err)?;
                write_menu(out, session.moves())?;
            }
            Event::Exited => {
                writeln!(out, "Exiting...")?;
                return Ok((Finish::Exited, state));
            }
            Event::Resolved(resolution) => {
                write_resolution(out, &resolution)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string(&resolution.proof())?)?;
                }
                state = state.finish();
                debug!(session = %session.id(), ?state, "game over");
                return Ok((Finish::Resolved(resolution), state));
            }
        }
        out.flush()?;
    }
}

fn write_menu<W: Write>(out: &mut W, moves: &MoveSet) -> Result<()> {
    writeln!(out, "Available moves:")?;
    for (i, label) in moves.iter().enumerate() {
        writeln!(out, "{} - {}", i + 1, label)?;
    }
    writeln!(out, "{} - exit", EXIT_TOKEN)?;
    writeln!(out, "{} - help", HELP_TOKEN)?;
    writeln!(out, "Enter your move: ")?;
    out.flush()?;
    Ok(())
}

fn write_resolution<W: Write>(out: &mut W, resolution: &Resolution) -> Result<()> {
    writeln!(out, "Your move: {}", resolution.player_move)?;
    writeln!(out, "Computer move: {}", resolution.opponent_move)?;
    let verdict = match resolution.outcome {
        Outcome::Win => "You win!",
        Outcome::Lose => "You lose!",
        Outcome::Draw => "Draw",
    };
    writeln!(out, "{}", verdict)?;
    writeln!(out, "HMAC key: {}", resolution.key)?;
    Ok(())
}
