use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{GameRecord, DEFAULT_POPULARITY},
};

use super::Catalog;

const LIST_DELIMITER: char = ';';

/// Raw catalog row, before list splitting and defaulting
///
/// `popularity` and `hidden_gem` are optional columns; older catalogs only
/// carry the first four.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    genres: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    hidden_gem: Option<String>,
}

impl CatalogRow {
    fn into_record(self) -> GameRecord {
        GameRecord {
            title: self.title,
            description: self.description,
            genres: split_list(&self.genres),
            tags: split_list(&self.tags),
            popularity: parse_popularity(self.popularity.as_deref()),
            hidden_gem: parse_flag(self.hidden_gem.as_deref()),
        }
    }
}

/// Loads the games catalog from a CSV file
///
/// Any I/O or parse failure is returned as an error; the caller treats it
/// as fatal.
pub fn load_catalog(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let catalog = read_rows(reader)?;

    tracing::info!(
        path = %path.display(),
        games = catalog.len(),
        hidden_gems = catalog.games().iter().filter(|g| g.hidden_gem).count(),
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Loads the games catalog from any CSV source
pub fn load_catalog_from_reader<R: Read>(source: R) -> AppResult<Catalog> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    read_rows(reader)
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Catalog> {
    let mut games = Vec::new();

    for (index, row) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = row?;
        if row.title.is_empty() {
            tracing::warn!(row = index + 1, "Skipping catalog row without a title");
            continue;
        }
        games.push(row.into_record());
    }

    if games.is_empty() {
        tracing::warn!("Catalog contains no games");
    }

    Ok(Catalog::new(games))
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_popularity(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(DEFAULT_POPULARITY)
}

fn parse_flag(cell: Option<&str>) -> bool {
    matches!(
        cell.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_CATALOG: &str = "\
title,description,genres,tags,popularity,hidden_gem
Stardew Clone,cozy farming sim,Simulation,relaxing;farming,20,true
\"Doom, Again\",\"fast, loud shooter\",Shooter; Action ;,gore;fast,95,false
Quiet Place,,Adventure,,not-a-number,maybe
";

    #[test]
    fn test_load_full_catalog() {
        let catalog = load_catalog_from_reader(FULL_CATALOG.as_bytes()).unwrap();
        let games = catalog.games();

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].title, "Stardew Clone");
        assert_eq!(games[0].tags, vec!["relaxing", "farming"]);
        assert_eq!(games[0].popularity, 20.0);
        assert!(games[0].hidden_gem);

        assert_eq!(games[1].title, "Doom, Again");
        assert_eq!(games[1].description, "fast, loud shooter");
        assert_eq!(games[1].genres, vec!["Shooter", "Action"]);
        assert!(!games[1].hidden_gem);
    }

    #[test]
    fn test_unparsable_values_fall_back_to_defaults() {
        let catalog = load_catalog_from_reader(FULL_CATALOG.as_bytes()).unwrap();
        let quiet = &catalog.games()[2];

        assert_eq!(quiet.description, "");
        assert!(quiet.tags.is_empty());
        assert_eq!(quiet.popularity, DEFAULT_POPULARITY);
        assert!(!quiet.hidden_gem);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let source = "title,description,genres,tags\nCeleste,climb a mountain,Platformer,Difficult;Pixel Graphics\n";
        let catalog = load_catalog_from_reader(source.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.games()[0].popularity, DEFAULT_POPULARITY);
        assert!(!catalog.games()[0].hidden_gem);
    }

    #[test]
    fn test_rows_without_title_are_skipped() {
        let source = "title,description,genres,tags\n,orphan,Puzzle,\nTetris,blocks,Puzzle,classic\n";
        let catalog = load_catalog_from_reader(source.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.games()[0].title, "Tetris");
    }

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some(" yes ")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CATALOG.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/games.csv");
        let catalog = load_catalog(path).unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.games().iter().any(|g| g.hidden_gem));
        assert!(catalog.games().iter().all(|g| !g.genres.is_empty()));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_catalog("/definitely/not/here/games.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_title_column_is_an_error() {
        let source = "name,description\nTetris,blocks\n";
        assert!(load_catalog_from_reader(source.as_bytes()).is_err());
    }
}
