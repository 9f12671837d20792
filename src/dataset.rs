use crate::csv_parser::{CsvParser, ParseOptions};
use crate::error::DataError;
use crate::profile::SportProfile;
use crate::schema::Record;
use std::fs;
use std::path::Path;

/// Parse a player data set against the profile's schema.
///
/// # Errors
/// `DataError::Parse` for invalid CSV and `DataError::Empty` when no rows survive.
pub fn load_players_from_str(
    profile: &SportProfile,
    data: &str,
    options: &ParseOptions,
) -> Result<Vec<Record>, DataError> {
    let players = CsvParser::new(options.clone())
        .parse(data, Some(&profile.schema()))
        .map_err(|source| DataError::Parse {
            sport: profile.name,
            source,
        })?;
    if players.is_empty() {
        return Err(DataError::Empty(profile.name));
    }
    log::info!("Loaded {} {} players", players.len(), profile.name);
    Ok(players)
}

/// # Errors
/// `DataError::Read` when the file cannot be read, otherwise as [`load_players_from_str`].
pub fn load_players_from_file<P: AsRef<Path>>(
    profile: &SportProfile,
    path: P,
    options: &ParseOptions,
) -> Result<Vec<Record>, DataError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_players_from_str(profile, &data, options)
}

/// The file at `path` if given, else the data shipped with the binary.
///
/// # Errors
/// See [`load_players_from_file`].
pub fn load_players(
    profile: &SportProfile,
    path: Option<&Path>,
    options: &ParseOptions,
) -> Result<Vec<Record>, DataError> {
    match path {
        Some(path) => load_players_from_file(profile, path, options),
        None => load_players_from_str(profile, profile.embedded_csv, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::profile::{MLB, NBA};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Player,League,Team,Age,Runs,SB,HR,OPS";

    #[test]
    fn test_embedded_data() {
        let players = load_players(&NBA, None, &ParseOptions::default()).unwrap();
        assert!(players.iter().any(|p| p.text("Player") == "Nikola Jokic"));
    }

    #[test]
    fn test_file_data_replaces_embedded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "Cal Raleigh,AL,SEA,28,110,14,60,.948").unwrap();
        let players = load_players(&MLB, Some(file.path()), &ParseOptions::default()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].number("HR"), Some(60.0));
    }

    #[test]
    fn test_missing_file() {
        let result = load_players_from_file(&MLB, "/definitely/not/here.csv", &ParseOptions::default());
        assert!(matches!(result, Err(DataError::Read { .. })));
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = load_players_from_str(&MLB, HEADER, &ParseOptions::default());
        assert!(matches!(result, Err(DataError::Empty("MLB"))));
    }

    #[test]
    fn test_wrong_sport_reports_missing_headers() {
        let result = load_players_from_str(&NBA, MLB.embedded_csv, &ParseOptions::default());
        assert!(matches!(
            result,
            Err(DataError::Parse {
                source: ParseError::MissingHeaders(_),
                ..
            })
        ));
    }
}
