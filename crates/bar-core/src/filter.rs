// File: crates/bar-core/src/filter.rs
// Summary: Row filter/normalizer (missing categories, allow-list, case canonicalization).

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::row::{Field, Row};

/// Filtering policy applied to the category field of every row.
#[derive(Clone, Debug, Default)]
pub struct RowFilter {
    pub category_field: Field,
    /// Known category labels; `None` admits every non-empty category.
    pub allow_list: Option<HashSet<String>>,
    pub normalize_case: bool,
    /// Extra fields that must be non-empty (group keys of the current chart).
    pub required: Vec<Field>,
}

impl RowFilter {
    pub fn new(category_field: Field) -> Self {
        Self { category_field, ..Self::default() }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut f = Self::new(config.category_field).normalize_case(config.normalize_case);
        if let Some(list) = &config.category_allow_list {
            f = f.allow(list.iter().cloned());
        }
        f
    }

    pub fn normalize_case(mut self, on: bool) -> Self {
        self.normalize_case = on;
        if on {
            // keep allow-list comparable with canonicalized rows
            self.allow_list = self
                .allow_list
                .take()
                .map(|set| set.iter().map(|s| canonical_case(s)).collect());
        }
        self
    }

    pub fn allow<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = labels
            .into_iter()
            .map(Into::into)
            .map(|s: String| if self.normalize_case { canonical_case(&s) } else { s })
            .collect();
        self.allow_list = Some(set);
        self
    }

    pub fn require(mut self, field: Field) -> Self {
        if field != self.category_field && !self.required.contains(&field) {
            self.required.push(field);
        }
        self
    }

    /// Normalize a single row, or `None` if the row is excluded.
    pub fn normalize(&self, row: &Row) -> Option<Row> {
        let raw = self.category_field.get(row);
        if raw.trim().is_empty() {
            return None;
        }
        if self.required.iter().any(|f| f.get(row).trim().is_empty()) {
            return None;
        }
        let mut out = row.clone();
        if self.normalize_case {
            *self.category_field.get_mut(&mut out) = canonical_case(raw);
        }
        if let Some(allowed) = &self.allow_list {
            if !allowed.contains(self.category_field.get(&out)) {
                return None;
            }
        }
        Some(out)
    }

    /// Filter and normalize rows, preserving input order.
    pub fn apply(&self, rows: &[Row]) -> Vec<Row> {
        let out: Vec<Row> = rows.iter().filter_map(|r| self.normalize(r)).collect();
        let dropped = rows.len() - out.len();
        if dropped > 0 {
            log::debug!(
                "filter on {:?}: kept {} rows, dropped {}",
                self.category_field,
                out.len(),
                dropped
            );
        }
        out
    }
}

/// Trim, collapse inner whitespace, and title-case each word.
/// `canonical_case(canonical_case(s)) == canonical_case(s)`.
pub fn canonical_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    // only the first char of an expanding uppercase stays upper ("ß" -> "Ss")
                    let mut up = first.to_uppercase();
                    up.next()
                        .into_iter()
                        .chain(up.flat_map(char::to_lowercase))
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
