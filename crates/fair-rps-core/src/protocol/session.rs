//! Game session state machine.
//!
//! A [`GameSession`] holds everything fixed at start: the rules, the secret,
//! the opponent's move and the published commitment. The evolving part is a
//! [`SessionState`] value that callers thread through [`GameSession::step`],
//! one input line at a time.

use super::messages::{CommitAnnouncement, Resolution};
use super::types::SessionId;
use crate::crypto::{uniform_index, Commitment, RngSource, Secret, SecureRandomSource};
use crate::error::{GameError, InputError};
use crate::games::{MoveSet, OutcomeMatrix, RuleEngine};
use tracing::{debug, info};

/// Input token that ends the session
pub const EXIT_TOKEN: &str = "0";
/// Input token that requests the help table
pub const HELP_TOKEN: &str = "?";

/// Where the session is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Commitment published, waiting for the player
    #[default]
    Committed,
    /// Help table was requested; behaves like `Committed` on the next input
    HelpShown,
    /// Player's move was judged and the key revealed
    Resolved,
    /// Terminal
    Done,
}

impl SessionState {
    /// Whether the session still accepts input
    pub fn is_open(&self) -> bool {
        matches!(self, SessionState::Committed | SessionState::HelpShown)
    }

    /// Move a resolved session to `Done`
    pub fn finish(self) -> Self {
        match self {
            SessionState::Resolved | SessionState::Done => SessionState::Done,
            other => other,
        }
    }
}

/// A parsed line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    /// Zero-based move index
    Select(usize),
}

impl Command {
    /// Parse a line; move numbers are one-based, `1..=move_count`
    pub fn parse(line: &str, move_count: usize) -> Result<Self, InputError> {
        let line = line.trim();
        match line {
            EXIT_TOKEN => Ok(Command::Exit),
            HELP_TOKEN => Ok(Command::Help),
            _ => {
                let selection: u64 = line
                    .parse()
                    .map_err(|_| InputError::NotANumber(line.to_string()))?;
                if selection == 0 || selection > move_count as u64 {
                    return Err(InputError::OutOfRange {
                        selection,
                        max: move_count,
                    });
                }
                Ok(Command::Select(selection as usize - 1))
            }
        }
    }
}

/// What happened on a step, for the front end to render
#[derive(Debug)]
pub enum Event<'a> {
    Help(&'a OutcomeMatrix),
    Resolved(Resolution),
    Exited,
    Rejected(InputError),
}

/// Result of feeding one line to a session
#[derive(Debug)]
pub struct Transition<'a> {
    pub state: SessionState,
    pub event: Event<'a>,
}

/// One game against the automated opponent
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    engine: RuleEngine,
    secret: Secret,
    opponent_index: usize,
    commitment: Commitment,
}

impl GameSession {
    /// Start a session using the operating system's entropy source
    pub fn new(engine: RuleEngine) -> Result<Self, GameError> {
        Self::with_source(engine, &mut RngSource::os())
    }

    /// Start a session drawing the secret and the opponent's move from `source`
    pub fn with_source<S: SecureRandomSource + ?Sized>(
        engine: RuleEngine,
        source: &mut S,
    ) -> Result<Self, GameError> {
        let secret = Secret::generate(source)?;
        let opponent_index = uniform_index(source, engine.moves().len())?;
        let commitment = Commitment::new(&secret, engine.moves()[opponent_index].as_bytes());
        let id = SessionId::new();

        info!(session = %id, moves = engine.moves().len(), %commitment, "session committed");

        Ok(Self {
            id,
            engine,
            secret,
            opponent_index,
            commitment,
        })
    }

    /// Validate a move list and start a session with OS randomness
    pub fn from_labels<I, S>(labels: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleEngine::from_labels(labels)?)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn moves(&self) -> &MoveSet {
        self.engine.moves()
    }

    pub fn announcement(&self) -> CommitAnnouncement {
        CommitAnnouncement {
            session_id: self.id,
            commitment: self.commitment,
        }
    }

    /// Feed one line of input.
    ///
    /// Invalid input is not an error: it yields [`Event::Rejected`] and the
    /// session stays `Committed`. Stepping a resolved or finished session
    /// fails with [`GameError::SessionFinished`].
    pub fn step(&self, state: SessionState, line: &str) -> Result<Transition<'_>, GameError> {
        if !state.is_open() {
            return Err(GameError::SessionFinished);
        }

        let transition = match Command::parse(line, self.moves().len()) {
            Ok(Command::Exit) => {
                info!(session = %self.id, "player exited before choosing");
                Transition {
                    state: SessionState::Done,
                    event: Event::Exited,
                }
            }
            Ok(Command::Help) => {
                debug!(session = %self.id, "help requested");
                Transition {
                    state: SessionState::HelpShown,
                    event: Event::Help(self.engine.outcome_matrix()),
                }
            }
            Ok(Command::Select(index)) => Transition {
                state: SessionState::Resolved,
                event: Event::Resolved(self.resolve(index)),
            },
            Err(err) => {
                debug!(session = %self.id, error = %err, "input rejected");
                Transition {
                    state: SessionState::Committed,
                    event: Event::Rejected(err),
                }
            }
        };

        Ok(transition)
    }

    fn resolve(&self, player_index: usize) -> Resolution {
        let moves = self.moves();
        let outcome = self
            .engine
            .determine_outcome(player_index, self.opponent_index);

        info!(
            session = %self.id,
            player_move = &moves[player_index],
            opponent_move = &moves[self.opponent_index],
            %outcome,
            "session resolved"
        );

        Resolution {
            player_index,
            player_move: moves[player_index].to_string(),
            opponent_index: self.opponent_index,
            opponent_move: moves[self.opponent_index].to_string(),
            outcome,
            key: self.secret.to_hex(),
            commitment: self.commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Outcome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> GameSession {
        let engine = RuleEngine::from_labels(["rock", "scissors", "paper"]).unwrap();
        GameSession::with_source(engine, &mut RngSource::new(StdRng::seed_from_u64(seed)))
            .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("0", 3), Ok(Command::Exit));
        assert_eq!(Command::parse(" ? \n", 3), Ok(Command::Help));
        assert_eq!(Command::parse("1", 3), Ok(Command::Select(0)));
        assert_eq!(Command::parse("3\n", 3), Ok(Command::Select(2)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            Command::parse("rock", 3),
            Err(InputError::NotANumber("rock".into()))
        );
        assert_eq!(
            Command::parse("", 3),
            Err(InputError::NotANumber(String::new()))
        );
        assert_eq!(
            Command::parse("4", 3),
            Err(InputError::OutOfRange {
                selection: 4,
                max: 3
            })
        );
        assert_eq!(
            Command::parse("00", 3),
            Err(InputError::OutOfRange {
                selection: 0,
                max: 3
            })
        );
        assert!(matches!(
            Command::parse("-1", 3),
            Err(InputError::NotANumber(_))
        ));
    }

    #[test]
    fn test_help_keeps_session_open() {
        let session = session(1);
        let transition = session.step(SessionState::Committed, "?").unwrap();

        assert_eq!(transition.state, SessionState::HelpShown);
        match transition.event {
            Event::Help(matrix) => assert_eq!(matrix.size(), 3),
            other => panic!("expected help, got {:?}", other),
        }

        let again = session.step(SessionState::HelpShown, "?").unwrap();
        assert_eq!(again.state, SessionState::HelpShown);
    }

    #[test]
    fn test_invalid_input_stays_committed() {
        let session = session(2);

        for state in [SessionState::Committed, SessionState::HelpShown] {
            let transition = session.step(state, "banana").unwrap();
            assert_eq!(transition.state, SessionState::Committed);
            assert!(matches!(transition.event, Event::Rejected(_)));
        }
    }

    #[test]
    fn test_exit() {
        let session = session(3);
        let transition = session.step(SessionState::Committed, "0").unwrap();

        assert_eq!(transition.state, SessionState::Done);
        assert!(matches!(transition.event, Event::Exited));
    }

    #[test]
    fn test_resolution_reveals_verifiable_key() {
        let session = session(4);
        let commitment = *session.commitment();

        let transition = session.step(SessionState::HelpShown, "2").unwrap();
        assert_eq!(transition.state, SessionState::Resolved);

        let resolution = match transition.event {
            Event::Resolved(r) => r,
            other => panic!("expected resolution, got {:?}", other),
        };

        assert_eq!(resolution.player_index, 1);
        assert_eq!(resolution.player_move, "scissors");
        assert_eq!(resolution.commitment, commitment);
        assert_eq!(
            resolution.outcome,
            session
                .rules()
                .determine_outcome(1, resolution.opponent_index)
        );
        assert!(resolution.proof().verify().is_ok());

        let secret = Secret::from_hex(&resolution.key).unwrap();
        assert!(commitment.verify(&secret, resolution.opponent_move.as_bytes()));
    }

    #[test]
    fn test_session_resolves_once() {
        let session = session(5);
        let transition = session.step(SessionState::Committed, "1").unwrap();

        assert!(matches!(
            session.step(transition.state, "1"),
            Err(GameError::SessionFinished)
        ));
        assert_eq!(transition.state.finish(), SessionState::Done);
        assert!(matches!(
            session.step(SessionState::Done, "?"),
            Err(GameError::SessionFinished)
        ));
    }

    #[test]
    fn test_same_seed_same_opponent_move() {
        let a = session(6);
        let b = session(6);

        assert_eq!(a.commitment(), b.commitment());
    }

    #[test]
    fn test_every_selection_matches_rules() {
        let session = session(7);

        for (line, index) in [("1", 0), ("2", 1), ("3", 2)] {
            let event = session.step(SessionState::Committed, line).unwrap().event;
            let Event::Resolved(resolution) = event else {
                panic!("expected resolution");
            };
            let expected = session
                .rules()
                .determine_outcome(index, resolution.opponent_index);
            assert_eq!(resolution.outcome, expected);
            if index == resolution.opponent_index {
                assert_eq!(resolution.outcome, Outcome::Draw);
            }
        }
    }
}
