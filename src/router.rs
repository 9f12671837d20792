//! Game registry and `#/home/<game-id>` routes.
//!
//! Only ids in [`GAMES`] are ever resolved. Anything else is rejected before
//! it can be used to locate game data.

use crate::error::RouteError;
use crate::profile::{self, SportProfile};

const ROUTE_PREFIX: &str = "#/home/";

#[derive(Debug, Clone, Copy)]
pub enum GameKind {
    PlayerGuess(&'static SportProfile),
    Comparison,
}

#[derive(Debug)]
pub struct GameEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: GameKind,
}

pub static GAMES: [GameEntry; 4] = [
    GameEntry {
        id: "nfl-player-guess",
        name: "Guess the NFL Player",
        description: "Guess the NFL player based on 2024 stats",
        kind: GameKind::PlayerGuess(&profile::NFL),
    },
    GameEntry {
        id: "mlb-player-guess",
        name: "Guess the MLB Player",
        description: "Guess the MLB player based on 2025 stats",
        kind: GameKind::PlayerGuess(&profile::MLB),
    },
    GameEntry {
        id: "nba-player-guess",
        name: "Guess the NBA Player",
        description: "Guess the NBA player based on 2024 stats",
        kind: GameKind::PlayerGuess(&profile::NBA),
    },
    GameEntry {
        id: "mlb-player-comparison",
        name: "MLB Player Comparison",
        description: "Head-to-head stat comparisons between MLB players",
        kind: GameKind::Comparison,
    },
];

#[derive(Debug, Clone, Copy)]
pub enum Route {
    Home,
    Game(&'static GameEntry),
}

#[must_use]
pub fn find_game(id: &str) -> Option<&'static GameEntry> {
    GAMES.iter().find(|g| g.id == id)
}

#[must_use]
pub fn is_valid_game(id: &str) -> bool {
    find_game(id).is_some()
}

/// Resolve a hash fragment.
///
/// # Errors
/// `RouteError::UnknownGame` for ids outside the allow-list and
/// `RouteError::Malformed` for anything that is not a home or game route.
pub fn parse_route(hash: &str) -> Result<Route, RouteError> {
    match hash {
        "" | "#" | "#/" => Ok(Route::Home),
        _ => match hash.strip_prefix(ROUTE_PREFIX) {
            Some("") | None => Err(RouteError::Malformed(hash.to_string())),
            Some(id) => find_game(id)
                .map(Route::Game)
                .ok_or_else(|| RouteError::UnknownGame(id.to_string())),
        },
    }
}

/// Resolve either a bare game id or a full `#/home/<id>` route.
///
/// # Errors
/// See [`parse_route`].
pub fn resolve(target: &str) -> Result<&'static GameEntry, RouteError> {
    if target.starts_with('#') {
        match parse_route(target)? {
            Route::Game(entry) => Ok(entry),
            Route::Home => Err(RouteError::Malformed(target.to_string())),
        }
    } else {
        find_game(target).ok_or_else(|| RouteError::UnknownGame(target.to_string()))
    }
}

/// The hash route for an allow-listed game.
///
/// # Errors
/// `RouteError::UnknownGame` for ids outside the allow-list.
pub fn route_for(id: &str) -> Result<String, RouteError> {
    let entry = find_game(id).ok_or_else(|| RouteError::UnknownGame(id.to_string()))?;
    Ok(format!("{ROUTE_PREFIX}{}", entry.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_routes() {
        for hash in ["", "#", "#/"] {
            assert!(matches!(parse_route(hash), Ok(Route::Home)));
        }
    }

    #[test]
    fn test_game_route() {
        match parse_route("#/home/mlb-player-guess") {
            Ok(Route::Game(entry)) => {
                assert_eq!(entry.name, "Guess the MLB Player");
                assert!(matches!(entry.kind, GameKind::PlayerGuess(p) if p.key == "mlb"));
            }
            other => panic!("Expected game route, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_and_injected_ids_rejected() {
        assert_eq!(
            parse_route("#/home/mlb-standings-challenge").unwrap_err(),
            RouteError::UnknownGame("mlb-standings-challenge".to_string())
        );
        assert!(matches!(
            parse_route("#/home/../../evil"),
            Err(RouteError::UnknownGame(_))
        ));
        assert!(matches!(
            parse_route("#/home/mlb-player-guess\"><script>"),
            Err(RouteError::UnknownGame(_))
        ));
        assert!(matches!(parse_route("#/home/"), Err(RouteError::Malformed(_))));
        assert!(matches!(parse_route("#/away/x"), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn test_resolve_accepts_id_or_route() {
        assert_eq!(resolve("nba-player-guess").unwrap().id, "nba-player-guess");
        assert_eq!(resolve("#/home/mlb-player-comparison").unwrap().id, "mlb-player-comparison");
        assert!(resolve("#/").is_err());
        assert!(resolve("chess").is_err());
    }

    #[test]
    fn test_route_for() {
        assert_eq!(route_for("nfl-player-guess").unwrap(), "#/home/nfl-player-guess");
        assert!(route_for("games/evil").is_err());
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in GAMES.iter().enumerate() {
            assert!(GAMES.iter().skip(i + 1).all(|b| b.id != a.id));
            assert!(is_valid_game(a.id));
        }
    }
}
