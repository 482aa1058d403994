use crate::core::catalog::Catalog;
use std::collections::HashMap;

/// Inverted index from normalized skill token to catalog positions.
///
/// Postings hold positions into the `Catalog` the index was built from, in
/// catalog order and without repeats. Keys iterate in first-seen order so
/// fuzzy scans are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillIndex {
    keys: Vec<String>,
    postings: HashMap<String, Vec<usize>>,
}

impl SkillIndex {
    pub fn get(&self, token: &str) -> Option<&[usize]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Tokens in the order they were first seen while walking the catalog.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn insert(&mut self, token: &str, position: usize) {
        match self.postings.get_mut(token) {
            Some(positions) => {
                if !positions.contains(&position) {
                    positions.push(position);
                }
            }
            None => {
                self.keys.push(token.to_string());
                self.postings.insert(token.to_string(), vec![position]);
            }
        }
    }
}

pub fn build_index(catalog: &Catalog) -> SkillIndex {
    let mut index = SkillIndex::default();

    for (position, entry) in catalog.iter().enumerate() {
        for skill in entry.skills() {
            index.insert(skill, position);
        }
    }

    tracing::debug!(
        "Built skill index: {} tokens over {} entries",
        index.len(),
        catalog.len()
    );
    index
}
