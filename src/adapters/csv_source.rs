use crate::domain::model::CatalogRow;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{ColdMailError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

const PROJECT_COLUMNS: [&str; 3] = ["project", "name", "title"];
const URL_COLUMNS: [&str; 3] = ["url", "link", "links"];
const SKILLS_COLUMNS: [&str; 4] = ["skills", "techstack", "tech stack", "tech_stack"];

/// Portfolio catalog backed by a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses CSV text. Header names are matched case-insensitively; the
    /// project column is optional, link and skills columns are required.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CatalogRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|alias| h.as_str() == *alias))
        };

        let project_col = find(&PROJECT_COLUMNS);
        let url_col = find(&URL_COLUMNS).ok_or_else(|| ColdMailError::SourceUnavailable {
            message: format!("no link column (expected one of {})", URL_COLUMNS.join(", ")),
        })?;
        let skills_col = find(&SKILLS_COLUMNS).ok_or_else(|| ColdMailError::SourceUnavailable {
            message: format!(
                "no skills column (expected one of {})",
                SKILLS_COLUMNS.join(", ")
            ),
        })?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");
            rows.push(CatalogRow::new(
                field(project_col),
                field(Some(url_col)),
                field(Some(skills_col)),
            ));
        }

        Ok(rows)
    }
}

impl CatalogSource for CsvCatalogSource {
    fn load_rows(&self) -> Result<Vec<CatalogRow>> {
        tracing::debug!("Reading portfolio CSV: {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        Self::parse(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_standard_header() {
        let csv = "project,url,skills\nDash,u1,\"python, sql\"\nML,u2,python\n";
        let rows = CsvCatalogSource::parse(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], CatalogRow::new("Dash", "u1", "python, sql"));
        assert_eq!(rows[1].url, "u2");
    }

    #[test]
    fn test_parse_header_aliases() {
        let csv = "Techstack,Links\n\"React, Node.js, MongoDB\",https://example.com/react\n";
        let rows = CsvCatalogSource::parse(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[0].url, "https://example.com/react");
        assert_eq!(rows[0].skills_csv, "React, Node.js, MongoDB");
    }

    #[test]
    fn test_parse_missing_link_column() {
        let csv = "project,skills\nDash,python\n";
        let err = CsvCatalogSource::parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ColdMailError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_parse_ragged_row_is_an_error() {
        let csv = "project,url,skills\nDash,u1,python,extra\n";
        assert!(CsvCatalogSource::parse(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,link,skills").unwrap();
        writeln!(file, "Dash,u1,python").unwrap();

        let source = CsvCatalogSource::new(file.path());
        let rows = source.load_rows().unwrap();
        assert_eq!(rows, vec![CatalogRow::new("Dash", "u1", "python")]);
    }

    #[test]
    fn test_load_rows_missing_file() {
        let source = CsvCatalogSource::new("/definitely/not/here.csv");
        assert!(matches!(source.load_rows(), Err(ColdMailError::IoError(_))));
    }
}
