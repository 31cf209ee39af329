// File: crates/bar-core/src/group.rs
// Summary: Grouping, counting, summing, and top-N selection over filtered rows.
// Notes:
// - Every grouping returns entries in first-encounter order of the key, i.e. the
//   order in which a key value first appears in the input rows.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::row::{Field, Row};

/// Number of rows sharing one category value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Sum of a magnitude over rows sharing one key value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySum {
    pub category: String,
    pub total: f64,
}

/// One primary-key group with nested counts per secondary key.
/// Counts can only grow through [`GroupedEntity::add`], which keeps
/// `total == sum(counts)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEntity {
    group_key: String,
    per_category_counts: BTreeMap<String, u64>,
    total: u64,
}

impl GroupedEntity {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self { group_key: group_key.into(), per_category_counts: BTreeMap::new(), total: 0 }
    }

    pub fn add(&mut self, category: &str, n: u64) {
        *self.per_category_counts.entry(category.to_string()).or_insert(0) += n;
        self.total += n;
    }

    pub fn group_key(&self) -> &str { &self.group_key }
    pub fn total(&self) -> u64 { self.total }
    pub fn counts(&self) -> &BTreeMap<String, u64> { &self.per_category_counts }

    /// Count for `category`, zero when the group has none.
    pub fn count_of(&self, category: &str) -> u64 {
        self.per_category_counts.get(category).copied().unwrap_or(0)
    }
}

/// Anything rankable by a magnitude for top-N selection.
pub trait Ranked {
    fn rank_value(&self) -> f64;
}

impl Ranked for CategoryCount {
    fn rank_value(&self) -> f64 { self.count as f64 }
}

impl Ranked for CategorySum {
    fn rank_value(&self) -> f64 { self.total }
}

impl Ranked for GroupedEntity {
    fn rank_value(&self) -> f64 { self.total as f64 }
}

/// Single-key mode: count rows per distinct key value.
pub fn count_by(rows: &[Row], key: Field) -> Vec<CategoryCount> {
    count_by_with(rows, |r| key.get(r))
}

/// Single-key mode with an arbitrary key extractor.
pub fn count_by_with<'a, F>(rows: &'a [Row], key: F) -> Vec<CategoryCount>
where
    F: Fn(&'a Row) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryCount> = Vec::new();
    for row in rows {
        let k = key(row);
        match index.get(k) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(k, out.len());
                out.push(CategoryCount { category: k.to_string(), count: 1 });
            }
        }
    }
    out
}

/// Sum a magnitude per distinct key value.
/// Totals saturate at `f64::MAX` instead of overflowing to infinity.
pub fn sum_by<F>(rows: &[Row], key: Field, magnitude: F) -> Vec<CategorySum>
where
    F: Fn(&Row) -> f64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategorySum> = Vec::new();
    for row in rows {
        let k = key.get(row);
        let v = magnitude(row);
        match index.get(k) {
            Some(&i) => out[i].total = saturating_add(out[i].total, v),
            None => {
                index.insert(k, out.len());
                out.push(CategorySum { category: k.to_string(), total: saturating_add(0.0, v) });
            }
        }
    }
    out
}

fn saturating_add(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum.is_finite() {
        sum
    } else if sum.is_nan() {
        0.0
    } else {
        f64::MAX.copysign(sum)
    }
}

/// Two-key mode: group by `primary`, counting rows per `secondary` value.
pub fn group_by(rows: &[Row], primary: Field, secondary: Field) -> Vec<GroupedEntity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<GroupedEntity> = Vec::new();
    for row in rows {
        let k = primary.get(row);
        let i = *index.entry(k).or_insert_with(|| {
            out.push(GroupedEntity::new(k));
            out.len() - 1
        });
        out[i].add(secondary.get(row), 1);
    }
    log::debug!("grouped {} rows into {} {:?} groups", rows.len(), out.len(), primary);
    out
}

/// Keep the `n` entries with the greatest magnitude.
/// Descending order; ties keep their input order.
pub fn top_n<T: Ranked>(mut items: Vec<T>, n: usize) -> Vec<T> {
    // stable sort; NaN never occurs since magnitudes are coerced
    items.sort_by(|a, b| b.rank_value().total_cmp(&a.rank_value()));
    items.truncate(n);
    items
}
