use crate::profile::SportProfile;
use crate::schema::{Record, Value};

/// Float thresholds such as OPS ±0.050 are not exact in binary.
const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// Which way the target lies from the guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Guess is below the target.
    Up,
    /// Guess is above the target.
    Down,
}

impl Direction {
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Close(Direction),
    Wrong(Option<Direction>),
}

impl Feedback {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Close(_) => "close",
            Self::Wrong(_) => "wrong",
        }
    }

    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Correct => None,
            Self::Close(direction) => Some(direction),
            Self::Wrong(direction) => direction,
        }
    }
}

#[must_use]
pub fn compare_categorical(guess: &Value, target: &Value) -> Feedback {
    if guess == target {
        Feedback::Correct
    } else {
        Feedback::Wrong(None)
    }
}

/// Compare a numeric attribute. Both close and wrong results point toward the target.
#[must_use]
pub fn compare_numeric(guess: f64, target: f64, threshold: f64) -> Feedback {
    if guess == target {
        return Feedback::Correct;
    }
    let direction = if guess < target {
        Direction::Up
    } else {
        Direction::Down
    };
    if (guess - target).abs() <= threshold + THRESHOLD_TOLERANCE {
        Feedback::Close(direction)
    } else {
        Feedback::Wrong(Some(direction))
    }
}

#[must_use]
pub fn format_stat(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// One compared attribute of a guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub label: &'static str,
    pub display: String,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuessReport {
    pub player: String,
    pub cells: Vec<Cell>,
}

impl GuessReport {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.cells.iter().all(|c| c.feedback == Feedback::Correct)
    }
}

/// Compare every attribute the profile shows, in display order.
#[must_use]
pub fn evaluate_guess(profile: &SportProfile, guess: &Record, target: &Record) -> GuessReport {
    let mut cells = Vec::with_capacity(profile.categorical.len() + profile.numeric.len());

    for &column in profile.categorical {
        let guessed = guess.get(column).unwrap_or(&Value::Null);
        let actual = target.get(column).unwrap_or(&Value::Null);
        cells.push(Cell {
            label: column,
            display: guessed.to_string(),
            feedback: compare_categorical(guessed, actual),
        });
    }

    for stat in profile.numeric {
        let cell = match (guess.number(stat.column), target.number(stat.column)) {
            (Some(g), Some(t)) => {
                let feedback = compare_numeric(g, t, stat.threshold);
                let mut display = format_stat(g, stat.precision);
                if let Some(direction) = feedback.direction() {
                    display.push(' ');
                    display.push_str(direction.arrow());
                }
                Cell {
                    label: stat.label,
                    display,
                    feedback,
                }
            }
            (guessed, _) => Cell {
                label: stat.label,
                display: guessed.map_or_else(|| "-".to_string(), |g| format_stat(g, stat.precision)),
                feedback: Feedback::Wrong(None),
            },
        };
        cells.push(cell);
    }

    GuessReport {
        player: profile.identity(guess).to_string(),
        cells,
    }
}
