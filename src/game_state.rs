use crate::error::GameError;
use crate::feedback::{GuessReport, evaluate_guess};
use crate::profile::SportProfile;
use crate::schema::Record;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub max_guesses: usize,
    pub team_hint_threshold: usize,
    pub initial_hint_threshold: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_guesses: 8,
            team_hint_threshold: 4,
            initial_hint_threshold: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Team,
    Initial,
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team => f.write_str("team"),
            Self::Initial => f.write_str("initial"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Team(String),
    Initial(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Won,
    Incorrect { remaining: usize },
    Lost,
}

/// One round of the guessing game: a hidden target and the guesses made
/// against it.
#[derive(Debug, Clone)]
pub struct GameSession {
    profile: &'static SportProfile,
    rules: GameRules,
    target: Record,
    guesses: Vec<Record>,
    wrong_guesses: usize,
    team_hint_used: bool,
    initial_hint_used: bool,
    status: GameStatus,
}

impl GameSession {
    /// Start a session with a random target from `players`.
    ///
    /// # Errors
    /// `GameError::NoPlayers` when `players` is empty.
    pub fn new<R: Rng + ?Sized>(
        profile: &'static SportProfile,
        players: &[Record],
        rules: GameRules,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let target = pick_target(players, rng)?;
        Ok(Self::with_target(profile, rules, target))
    }

    #[must_use]
    pub fn with_target(profile: &'static SportProfile, rules: GameRules, target: Record) -> Self {
        debug_log!("Target player: {}", profile.identity(&target));
        Self {
            profile,
            rules,
            target,
            guesses: Vec::new(),
            wrong_guesses: 0,
            team_hint_used: false,
            initial_hint_used: false,
            status: GameStatus::InProgress,
        }
    }

    /// Clear all progress and pick a new target.
    ///
    /// # Errors
    /// `GameError::NoPlayers` when `players` is empty; the session is left untouched.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        players: &[Record],
        rng: &mut R,
    ) -> Result<(), GameError> {
        let target = pick_target(players, rng)?;
        *self = Self::with_target(self.profile, self.rules, target);
        Ok(())
    }

    /// Record a guess.
    ///
    /// # Errors
    /// `GameError::GameOver` once the game is won, lost or out of guesses;
    /// `GameError::DuplicateGuess` for a player already guessed, which does
    /// not count against the limit.
    pub fn add_guess(&mut self, guess: Record) -> Result<GuessOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let identity = self.profile.identity(&guess).to_string();
        if self.is_guess_already_made(&identity) {
            return Err(GameError::DuplicateGuess(identity));
        }

        let correct = identity == self.profile.identity(&self.target);
        self.guesses.push(guess);

        if correct {
            self.status = GameStatus::Won;
            info_log!("Guessed {} in {} tries", identity, self.guesses.len());
            return Ok(GuessOutcome::Won);
        }

        self.wrong_guesses += 1;
        if self.guesses.len() >= self.rules.max_guesses {
            self.status = GameStatus::Lost;
            return Ok(GuessOutcome::Lost);
        }
        Ok(GuessOutcome::Incorrect {
            remaining: self.remaining_guesses(),
        })
    }

    #[must_use]
    pub fn is_guess_already_made(&self, identity: &str) -> bool {
        self.guesses
            .iter()
            .any(|g| self.profile.identity(g) == identity)
    }

    #[must_use]
    pub fn can_use_hint(&self, kind: HintKind) -> bool {
        let (threshold, used) = match kind {
            HintKind::Team => (self.rules.team_hint_threshold, self.team_hint_used),
            HintKind::Initial => (self.rules.initial_hint_threshold, self.initial_hint_used),
        };
        self.status == GameStatus::InProgress && self.wrong_guesses >= threshold && !used
    }

    #[must_use]
    pub fn available_hints(&self) -> Vec<HintKind> {
        [HintKind::Team, HintKind::Initial]
            .into_iter()
            .filter(|&kind| self.can_use_hint(kind))
            .collect()
    }

    /// Reveal a hint and mark it used for the rest of the session.
    ///
    /// # Errors
    /// `GameError::HintUnavailable` below the threshold, after use, or once the game is over.
    pub fn use_hint(&mut self, kind: HintKind) -> Result<Hint, GameError> {
        if !self.can_use_hint(kind) {
            return Err(GameError::HintUnavailable(kind));
        }
        let hint = match kind {
            HintKind::Team => {
                self.team_hint_used = true;
                Hint::Team(self.profile.team(&self.target).to_string())
            }
            HintKind::Initial => {
                self.initial_hint_used = true;
                let initial = self
                    .profile
                    .identity(&self.target)
                    .split_whitespace()
                    .next()
                    .and_then(|first| first.chars().next())
                    .and_then(|c| c.to_uppercase().next())
                    .unwrap_or('?');
                Hint::Initial(initial)
            }
        };
        Ok(hint)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress || self.guesses.len() >= self.rules.max_guesses
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        self.rules.max_guesses.saturating_sub(self.guesses.len())
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn target(&self) -> &Record {
        &self.target
    }

    #[must_use]
    pub fn guesses(&self) -> &[Record] {
        &self.guesses
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> usize {
        self.wrong_guesses
    }

    #[must_use]
    pub fn hint_used(&self, kind: HintKind) -> bool {
        match kind {
            HintKind::Team => self.team_hint_used,
            HintKind::Initial => self.initial_hint_used,
        }
    }

    #[must_use]
    pub fn rules(&self) -> GameRules {
        self.rules
    }

    #[must_use]
    pub fn profile(&self) -> &'static SportProfile {
        self.profile
    }

    /// Feedback for the most recent guess.
    #[must_use]
    pub fn last_report(&self) -> Option<GuessReport> {
        self.guesses
            .last()
            .map(|g| evaluate_guess(self.profile, g, &self.target))
    }
}

fn pick_target<R: Rng + ?Sized>(players: &[Record], rng: &mut R) -> Result<Record, GameError> {
    players.choose(rng).cloned().ok_or(GameError::NoPlayers)
}

// UI seam

#[derive(Debug, Clone)]
pub enum UserAction {
    Guess(String),
    Hint(HintKind),
    NewGame,
    Exit,
}

#[derive(Debug, Clone)]
pub struct NewGameInfo {
    pub sport: &'static str,
    pub player_count: usize,
    pub max_guesses: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub made: usize,
    pub max: usize,
}

/// Everything the game loop needs from a front end. Implemented by the line
/// based CLI and the TUI.
pub trait GameInterface {
    fn display_new_game(&mut self, info: &NewGameInfo);
    /// `None` means the input was not understood and the loop should ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_guess(&mut self, report: &GuessReport, progress: Progress);
    fn display_hints_available(&mut self, hints: &[HintKind]);
    fn display_hint(&mut self, hint: &Hint);
    fn display_error(&mut self, error: &GameError);
    fn display_won(&mut self, answer: &str, guesses: usize);
    fn display_lost(&mut self, answer: &str, details: &str);
    fn display_exit_message(&mut self);
}

/// Play with a thread-local random source until the player exits.
///
/// # Errors
/// `GameError::NoPlayers` when there is nothing to guess.
pub fn game_loop<I: GameInterface>(
    profile: &'static SportProfile,
    players: &[Record],
    rules: GameRules,
    interface: &mut I,
) -> Result<(), GameError> {
    play(profile, players, rules, interface, &mut rand::thread_rng())
}

/// # Errors
/// `GameError::NoPlayers` when there is nothing to guess.
pub fn play<I: GameInterface, R: Rng + ?Sized>(
    profile: &'static SportProfile,
    players: &[Record],
    rules: GameRules,
    interface: &mut I,
    rng: &mut R,
) -> Result<(), GameError> {
    let mut session = GameSession::new(profile, players, rules, rng)?;
    let info = NewGameInfo {
        sport: profile.name,
        player_count: players.len(),
        max_guesses: rules.max_guesses,
    };
    interface.display_new_game(&info);

    loop {
        match interface.read_action() {
            None => {}
            Some(UserAction::Exit) => {
                interface.display_exit_message();
                break;
            }
            Some(UserAction::NewGame) => {
                session.reset(players, rng)?;
                interface.display_new_game(&info);
            }
            Some(UserAction::Hint(kind)) => match session.use_hint(kind) {
                Ok(hint) => interface.display_hint(&hint),
                Err(e) => interface.display_error(&e),
            },
            Some(UserAction::Guess(name)) => {
                if let Err(e) = submit_guess(&mut session, players, &name, interface) {
                    log::debug!("Guess '{name}' rejected: {e}");
                    interface.display_error(&e);
                }
            }
        }
    }
    Ok(())
}

fn submit_guess<I: GameInterface>(
    session: &mut GameSession,
    players: &[Record],
    name: &str,
    interface: &mut I,
) -> Result<(), GameError> {
    if session.is_over() {
        return Err(GameError::GameOver);
    }
    let profile = session.profile();
    let record = profile.find_player(players, name)?;
    let outcome = session.add_guess(record)?;

    if let Some(report) = session.last_report() {
        interface.display_guess(
            &report,
            Progress {
                made: session.guesses().len(),
                max: session.rules().max_guesses,
            },
        );
    }

    let target = session.target();
    match outcome {
        GuessOutcome::Won => {
            interface.display_won(profile.identity(target), session.guesses().len());
        }
        GuessOutcome::Lost => {
            interface.display_lost(profile.identity(target), &profile.format_item(target));
        }
        GuessOutcome::Incorrect { .. } => {
            let hints = session.available_hints();
            if !hints.is_empty() {
                interface.display_hints_available(&hints);
            }
        }
    }
    Ok(())
}
