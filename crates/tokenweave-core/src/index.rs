//! Path lookup across collections.
//!
//! References written by designers are loose: `'Spacing/base'`,
//! `'Dimensions/Spacing/base'` or just `'base'` may all mean the same
//! variable. [`PathIndex`] answers those lookups and refuses to guess when a
//! path matches variables in more than one collection.

use crate::errors::ResolveError;
use crate::text::slugify;

#[derive(Debug, Clone)]
struct Entry<T> {
    collection: String,
    collection_key: String,
    segments: Vec<String>,
    value: T,
}

/// Index of named items by collection and slash-delimited path.
#[derive(Debug, Clone)]
pub struct PathIndex<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for PathIndex<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

fn normalize_path(path: &str) -> Vec<String> {
    path.split('/')
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect()
}

impl<T> PathIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `collection` and the slash-delimited `name`.
    pub fn insert(&mut self, collection: &str, name: &str, value: T) {
        self.entries.push(Entry {
            collection: collection.to_string(),
            collection_key: slugify(collection),
            segments: normalize_path(name),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the item `path` refers to.
    ///
    /// Tried in order, first tier with a match wins: full name, then
    /// `Collection/name`, then trailing segments. Matches spread over several
    /// collections are an error.
    pub fn find(&self, path: &str) -> Result<Option<&T>, ResolveError> {
        let query = normalize_path(path);
        if query.is_empty() {
            return Ok(None);
        }

        let tiers: [&dyn Fn(&Entry<T>) -> bool; 3] = [
            &|e| e.segments == query,
            &|e| query.len() > 1 && e.collection_key == query[0] && e.segments == query[1..],
            &|e| e.segments.len() > query.len() && e.segments.ends_with(&query),
        ];

        for tier in tiers {
            let matches: Vec<&Entry<T>> = self.entries.iter().filter(|e| tier(*e)).collect();
            let Some(first) = matches.first() else {
                continue;
            };
            let mut collections: Vec<String> = Vec::new();
            for entry in &matches {
                if !collections.contains(&entry.collection) {
                    collections.push(entry.collection.clone());
                }
            }
            if collections.len() > 1 {
                collections.sort();
                return Err(ResolveError::AmbiguousPath {
                    path: path.to_string(),
                    collections,
                });
            }
            return Ok(Some(&first.value));
        }
        Ok(None)
    }
}
