use crate::schema::ColumnKind;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of a whole CSV parse.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("invalid CSV input: {0}")]
    Input(&'static str),

    #[error("missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("parse error on line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: RowError,
    },
}

/// Failure of a single data row. Recovered locally unless the parse is strict.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("required field missing: {column}")]
    RequiredField { column: String },

    #[error("invalid {kind} in column '{column}': {value}")]
    InvalidValue {
        column: String,
        value: String,
        kind: ColumnKind,
    },

    #[error("value '{value}' in column '{column}' {violation}")]
    Validation {
        column: String,
        value: String,
        violation: Violation,
    },
}

impl RowError {
    pub fn column(&self) -> &str {
        match self {
            Self::RequiredField { column }
            | Self::InvalidValue { column, .. }
            | Self::Validation { column, .. } => column,
        }
    }
}

/// The schema constraint a value broke.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    BelowMinimum(f64),
    AboveMaximum(f64),
    TooShort(usize),
    TooLong(usize),
    PatternMismatch(String),
    NotAllowed(Vec<String>),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum(min) => write!(f, "is below minimum {min}"),
            Self::AboveMaximum(max) => write!(f, "is above maximum {max}"),
            Self::TooShort(len) => write!(f, "is shorter than {len} characters"),
            Self::TooLong(len) => write!(f, "is longer than {len} characters"),
            Self::PatternMismatch(pattern) => write!(f, "doesn't match pattern {pattern}"),
            Self::NotAllowed(allowed) => write!(f, "is not one of [{}]", allowed.join(", ")),
        }
    }
}

/// Failure fetching one player's stats from the external source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("stat service returned HTTP {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Failure of a bulk enrichment load.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("loading player stats timed out after {0:?}")]
    Timeout(Duration),

    #[error("not enough active players found ({found}), need at least {required}")]
    NotEnoughPlayers { found: usize, required: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("no players available to start a game")]
    NoPlayers,

    #[error("the game is already over")]
    GameOver,

    #[error("you already guessed {0}")]
    DuplicateGuess(String),

    #[error("no player matches '{0}'")]
    UnknownPlayer(String),

    #[error("'{query}' matches {count} players, be more specific")]
    AmbiguousPlayer { query: String, count: usize },

    #[error("{0} hint is not available")]
    HintUnavailable(crate::game_state::HintKind),

    #[error("this question was already answered")]
    AlreadyAnswered,
}

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("malformed route: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Failure to load a player data set.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read player data {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {sport} player data: {source}")]
    Parse {
        sport: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("{0} player data has no players")]
    Empty(&'static str),
}
