//! Per-sport data domains: which CSV schema a game reads, which attributes
//! a guess is compared on, and how players are searched and labelled.

use crate::error::GameError;
use crate::schema::{self, Record, Schema};

/// A numeric attribute compared with a closeness threshold.
#[derive(Debug)]
pub struct StatColumn {
    pub column: &'static str,
    pub label: &'static str,
    pub threshold: f64,
    /// Decimal places shown.
    pub precision: usize,
}

#[derive(Debug)]
pub struct SportProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub identity_column: &'static str,
    pub team_column: &'static str,
    /// Compared by exact match, shown before the numeric columns.
    pub categorical: &'static [&'static str],
    pub numeric: &'static [StatColumn],
    /// Columns a search query is matched against.
    pub search_columns: &'static [&'static str],
    /// Columns shown in parentheses after the player name in search results.
    pub label_columns: &'static [&'static str],
    pub embedded_csv: &'static str,
    schema: fn() -> Schema,
}

const fn stat(column: &'static str, threshold: f64, precision: usize) -> StatColumn {
    StatColumn {
        column,
        label: column,
        threshold,
        precision,
    }
}

pub static MLB: SportProfile = SportProfile {
    key: "mlb",
    name: "MLB",
    identity_column: "Player",
    team_column: "Team",
    categorical: &["League", "Team"],
    numeric: &[
        stat("Age", 3.0, 0),
        stat("Runs", 10.0, 0),
        stat("SB", 5.0, 0),
        stat("HR", 5.0, 0),
        stat("OPS", 0.050, 3),
    ],
    search_columns: &["Player", "Team", "League"],
    label_columns: &["Team", "League"],
    embedded_csv: include_str!("resources/mlb_players.csv"),
    schema: schema::mlb_player,
};

pub static NFL: SportProfile = SportProfile {
    key: "nfl",
    name: "NFL",
    identity_column: "Player",
    team_column: "Team",
    categorical: &["Conference", "Team", "Position"],
    numeric: &[
        stat("Age", 3.0, 0),
        stat("Rec Yds", 100.0, 0),
        stat("Rush Yds", 100.0, 0),
        stat("TDs", 3.0, 0),
    ],
    search_columns: &["Player", "Team", "Position"],
    label_columns: &["Team", "Position"],
    embedded_csv: include_str!("resources/nfl_players.csv"),
    schema: schema::nfl_player,
};

pub static NBA: SportProfile = SportProfile {
    key: "nba",
    name: "NBA",
    identity_column: "Player",
    team_column: "Team",
    categorical: &["Conference", "Team", "Position"],
    numeric: &[
        stat("Age", 3.0, 0),
        stat("PTS", 3.0, 1),
        stat("REB", 2.0, 1),
        stat("AST", 1.5, 1),
    ],
    search_columns: &["Player", "Team", "Position"],
    label_columns: &["Team", "Position"],
    embedded_csv: include_str!("resources/nba_players.csv"),
    schema: schema::nba_player,
};

impl SportProfile {
    #[must_use]
    pub fn schema(&self) -> Schema {
        (self.schema)()
    }

    #[must_use]
    pub fn identity<'a>(&self, record: &'a Record) -> &'a str {
        record.text(self.identity_column)
    }

    #[must_use]
    pub fn team<'a>(&self, record: &'a Record) -> &'a str {
        record.text(self.team_column)
    }

    /// Players whose search columns contain `query` (case-insensitive),
    /// sorted by name.
    #[must_use]
    pub fn filter(&self, players: &[Record], query: &str) -> Vec<Record> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Record> = players
            .iter()
            .filter(|p| {
                self.search_columns
                    .iter()
                    .any(|c| p.text(c).to_lowercase().contains(&term))
            })
            .cloned()
            .collect();
        matches.sort_by_cached_key(|p| self.identity(p).to_lowercase());
        matches
    }

    /// Search-result label, e.g. `Aaron Judge (NYY AL)`.
    #[must_use]
    pub fn format_item(&self, record: &Record) -> String {
        let details: Vec<&str> = self
            .label_columns
            .iter()
            .map(|c| record.text(c))
            .collect();
        format!("{} ({})", self.identity(record), details.join(" "))
    }

    /// Resolve typed input to a player: an exact (case-insensitive) name
    /// first, otherwise a single search match.
    ///
    /// # Errors
    /// `GameError::UnknownPlayer` when nothing matches and
    /// `GameError::AmbiguousPlayer` when several players do.
    pub fn find_player(&self, players: &[Record], query: &str) -> Result<Record, GameError> {
        let wanted = query.trim();
        if let Some(exact) = players
            .iter()
            .find(|p| self.identity(p).eq_ignore_ascii_case(wanted))
        {
            return Ok(exact.clone());
        }

        let mut matches = self.filter(players, wanted);
        match matches.len() {
            0 => Err(GameError::UnknownPlayer(wanted.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(GameError::AmbiguousPlayer {
                query: wanted.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_parser::CsvParser;

    fn players() -> Vec<Record> {
        vec![
            Record::new()
                .with("Player", "Shohei Ohtani")
                .with("Team", "LAD")
                .with("League", "NL"),
            Record::new()
                .with("Player", "Aaron Judge")
                .with("Team", "NYY")
                .with("League", "AL"),
            Record::new()
                .with("Player", "Juan Soto")
                .with("Team", "NYM")
                .with("League", "NL"),
        ]
    }

    #[test]
    fn test_embedded_data_parses_strictly() {
        let parser = CsvParser::new(crate::csv_parser::ParseOptions {
            strict: true,
            ..Default::default()
        });
        for profile in [&MLB, &NFL, &NBA] {
            let records = parser
                .parse(profile.embedded_csv, Some(&profile.schema()))
                .unwrap();
            assert!(records.len() >= 10, "{} has too few players", profile.name);
        }
    }

    #[test]
    fn test_filter_matches_any_search_column_sorted() {
        let found = MLB.filter(&players(), "n");
        let names: Vec<&str> = found.iter().map(|p| MLB.identity(p)).collect();
        assert_eq!(names, vec!["Aaron Judge", "Juan Soto", "Shohei Ohtani"]);

        let nl = MLB.filter(&players(), "nl");
        assert_eq!(nl.len(), 2);

        assert!(MLB.filter(&players(), "   ").is_empty());
    }

    #[test]
    fn test_format_item() {
        assert_eq!(MLB.format_item(&players()[1]), "Aaron Judge (NYY AL)");
    }

    #[test]
    fn test_find_player() {
        let all = players();
        assert_eq!(MLB.identity(&MLB.find_player(&all, "aaron judge").unwrap()), "Aaron Judge");
        assert_eq!(MLB.identity(&MLB.find_player(&all, "soto").unwrap()), "Juan Soto");
        assert_eq!(
            MLB.find_player(&all, "Mike Trout"),
            Err(GameError::UnknownPlayer("Mike Trout".to_string()))
        );
        assert_eq!(
            MLB.find_player(&all, "ny"),
            Err(GameError::AmbiguousPlayer {
                query: "ny".to_string(),
                count: 2
            })
        );
    }
}
