use crate::core::catalog::Catalog;
use crate::core::index::SkillIndex;
use crate::domain::model::normalize_skill;
use std::collections::HashSet;

/// Upper bound on links handed to the email drafter.
pub const MATCH_CAP: usize = 3;

/// Number of leading catalog entries returned when nothing matches.
pub const FALLBACK_SIZE: usize = 2;

/// Pool of matched catalog positions, unique by url, in first-matched order.
struct MatchPool<'a> {
    catalog: &'a Catalog,
    positions: Vec<usize>,
    seen_urls: HashSet<&'a str>,
}

impl<'a> MatchPool<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            positions: Vec::new(),
            seen_urls: HashSet::new(),
        }
    }

    fn extend(&mut self, postings: &[usize]) {
        let catalog = self.catalog;
        for &position in postings {
            if let Some(entry) = catalog.get(position) {
                if self.seen_urls.insert(entry.url()) {
                    self.positions.push(position);
                }
            }
        }
    }

    fn is_full(&self) -> bool {
        self.positions.len() >= MATCH_CAP
    }
}

/// Matches raw skill strings against the portfolio and returns up to
/// [`MATCH_CAP`] `"project: url"` links.
///
/// Exact keys are collected for every token first. Only then do tokens with
/// no exact key fall back to every key they are a substring of, or that is a
/// substring of them, so exact hits always rank ahead of partial ones. An
/// empty query, or one that matches nothing, yields the first
/// [`FALLBACK_SIZE`] distinct catalog entries instead.
pub fn match_links<S: AsRef<str>>(
    query: &[S],
    index: &SkillIndex,
    catalog: &Catalog,
) -> Vec<String> {
    if query.is_empty() {
        tracing::debug!("Empty skill query, using default portfolio links");
        return fallback_links(catalog);
    }

    let mut pool = MatchPool::new(catalog);
    let mut unmatched: Vec<String> = Vec::new();

    for raw in query {
        let token = normalize_skill(raw.as_ref());
        if token.is_empty() {
            continue;
        }

        match index.get(&token) {
            Some(postings) => {
                tracing::debug!("Exact skill match '{}' -> {} entries", token, postings.len());
                pool.extend(postings);
            }
            None => unmatched.push(token),
        }
    }

    for token in &unmatched {
        if pool.is_full() {
            break;
        }

        for key in index.keys() {
            if key.contains(token.as_str()) || token.contains(key) {
                if let Some(postings) = index.get(key) {
                    tracing::debug!("Partial skill match '{}' ~ '{}'", token, key);
                    pool.extend(postings);
                }
            }
        }
    }

    if pool.positions.is_empty() {
        tracing::debug!("No portfolio entry matched {} skills, using defaults", query.len());
        return fallback_links(catalog);
    }

    pool.positions
        .iter()
        .take(MATCH_CAP)
        .filter_map(|&position| catalog.get(position))
        .map(|entry| entry.display_link())
        .collect()
}

fn fallback_links(catalog: &Catalog) -> Vec<String> {
    let mut seen_urls = HashSet::new();
    catalog
        .iter()
        .filter(|entry| seen_urls.insert(entry.url()))
        .take(FALLBACK_SIZE)
        .map(|entry| entry.display_link())
        .collect()
}
