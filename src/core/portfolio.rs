use crate::core::catalog::{build_catalog, Catalog};
use crate::core::index::{build_index, SkillIndex};
use crate::core::matcher::match_links;
use crate::domain::ports::CatalogSource;
use std::sync::{Arc, RwLock};

/// A catalog together with the index derived from it. Immutable; the two
/// halves are always built together so index positions stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSnapshot {
    catalog: Catalog,
    index: SkillIndex,
}

impl PortfolioSnapshot {
    pub fn load(source: Option<&dyn CatalogSource>) -> Self {
        Self::from_catalog(build_catalog(source))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let index = build_index(&catalog);
        Self { catalog, index }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SkillIndex {
        &self.index
    }

    pub fn query_links<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        match_links(skills, &self.index, &self.catalog)
    }
}

/// Shared handle to the current snapshot.
///
/// Readers take a cheap `Arc` clone and never block each other. `reload`
/// builds the replacement outside the lock and only holds the write lock for
/// the pointer swap.
#[derive(Debug)]
pub struct Portfolio {
    current: RwLock<Arc<PortfolioSnapshot>>,
}

impl Portfolio {
    pub fn new(snapshot: PortfolioSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn load(source: Option<&dyn CatalogSource>) -> Self {
        Self::new(PortfolioSnapshot::load(source))
    }

    pub fn snapshot(&self) -> Arc<PortfolioSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Rebuilds catalog and index from `source` and publishes them together.
    pub fn reload(&self, source: Option<&dyn CatalogSource>) -> Arc<PortfolioSnapshot> {
        let fresh = Arc::new(PortfolioSnapshot::load(source));
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&fresh);
        tracing::info!(
            "🔄 Portfolio reloaded: {} entries, {} skills",
            fresh.catalog().len(),
            fresh.index().len()
        );
        fresh
    }

    pub fn query_links<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        self.snapshot().query_links(skills)
    }
}
