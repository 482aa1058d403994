use crate::domain::model::{CatalogRow, PortfolioEntry};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{ColdMailError, Result};

const FALLBACK_ENTRIES: [(&str, &str, &str); 5] = [
    (
        "E-commerce Analytics Dashboard",
        "https://github.com/atliq/ecommerce-analytics",
        "python,data analysis,visualization,dashboard",
    ),
    (
        "Customer Segmentation Engine",
        "https://github.com/atliq/customer-segmentation",
        "machine learning,clustering,python,data science",
    ),
    (
        "Inventory Management System",
        "https://github.com/atliq/inventory-management",
        "java,database,api development,backend",
    ),
    (
        "Sales Forecasting Tool",
        "https://github.com/atliq/sales-forecast",
        "predictive analytics,time series,python,statistics",
    ),
    (
        "HR Analytics Dashboard",
        "https://github.com/atliq/hr-analytics",
        "power bi,data visualization,analytics,reporting",
    ),
];

/// Portfolio entries in source order. Never empty once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<PortfolioEntry>,
}

impl Catalog {
    /// The fixed sample portfolio used whenever the real source is unusable.
    pub fn fallback() -> Self {
        Self {
            entries: FALLBACK_ENTRIES
                .iter()
                .map(|(project, url, skills)| PortfolioEntry::new(*project, *url, skills))
                .collect(),
        }
    }

    /// Validates rows into entries. Rows without a url are dropped, a missing
    /// project name falls back to the url. Fails when no row survives.
    pub fn from_rows(rows: Vec<CatalogRow>) -> Result<Self> {
        let mut entries = Vec::with_capacity(rows.len());

        for (line, row) in rows.into_iter().enumerate() {
            let url = row.url.trim();
            if url.is_empty() {
                tracing::warn!("Skipping catalog row {}: missing link", line + 1);
                continue;
            }

            let project = match row.name.trim() {
                "" => url,
                name => name,
            };
            entries.push(PortfolioEntry::new(project, url, &row.skills_csv));
        }

        if entries.is_empty() {
            return Err(ColdMailError::SourceUnavailable {
                message: "catalog source contains no usable rows".to_string(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&PortfolioEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioEntry> {
        self.entries.iter()
    }
}

/// Loads the catalog from `source`, substituting the fallback catalog when the
/// source is absent, unreadable or yields nothing usable. Never fails.
pub fn build_catalog(source: Option<&dyn CatalogSource>) -> Catalog {
    let Some(source) = source else {
        tracing::info!("📁 No portfolio source configured, using the sample portfolio");
        return Catalog::fallback();
    };

    match source.load_rows().and_then(Catalog::from_rows) {
        Ok(catalog) => {
            tracing::info!("📁 Loaded {} portfolio entries", catalog.len());
            catalog
        }
        Err(e) => {
            tracing::warn!("⚠️ Portfolio source unusable ({}), using the sample portfolio", e);
            Catalog::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Result<Vec<CatalogRow>>);

    impl CatalogSource for StaticSource {
        fn load_rows(&self) -> Result<Vec<CatalogRow>> {
            match &self.0 {
                Ok(rows) => Ok(rows.clone()),
                Err(e) => Err(ColdMailError::SourceUnavailable {
                    message: e.to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_no_source_uses_fallback() {
        let catalog = build_catalog(None);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.entries()[0].project(), "E-commerce Analytics Dashboard");
    }

    #[test]
    fn test_failing_source_uses_fallback() {
        let source = StaticSource(Err(ColdMailError::SourceUnavailable {
            message: "boom".to_string(),
        }));
        assert_eq!(build_catalog(Some(&source)), Catalog::fallback());
    }

    #[test]
    fn test_empty_source_uses_fallback() {
        let source = StaticSource(Ok(vec![]));
        assert_eq!(build_catalog(Some(&source)), Catalog::fallback());
    }

    #[test]
    fn test_rows_keep_source_order() {
        let source = StaticSource(Ok(vec![
            CatalogRow::new("Dash", "u1", "python,sql"),
            CatalogRow::new("ML", "u2", "Python, Clustering"),
        ]));
        let catalog = build_catalog(Some(&source));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].project(), "Dash");
        assert_eq!(catalog.entries()[1].skills(), ["python", "clustering"]);
    }

    #[test]
    fn test_rows_without_url_are_rejected() {
        let catalog = Catalog::from_rows(vec![
            CatalogRow::new("No link", "  ", "python"),
            CatalogRow::new("", "u2", "sql"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].project(), "u2");
    }

    #[test]
    fn test_all_rows_rejected_is_an_error() {
        let result = Catalog::from_rows(vec![CatalogRow::new("A", "", "python")]);
        assert!(matches!(result, Err(ColdMailError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_fallback_entries_are_normalized() {
        for entry in Catalog::fallback().iter() {
            assert!(!entry.skills().is_empty());
            for skill in entry.skills() {
                assert_eq!(skill, &skill.trim().to_lowercase());
            }
        }
    }
}
