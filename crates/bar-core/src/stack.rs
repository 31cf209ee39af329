// File: crates/bar-core/src/stack.rs
// Summary: Stacked segment offsets for grouped counts in a fixed class order.

use serde::Serialize;

use crate::group::GroupedEntity;

/// One class's slice of a stacked bar, in magnitude units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub category: String,
    pub offset_start: u64,
    pub offset_end: u64,
}

impl Segment {
    /// The class's own count.
    pub fn extent(&self) -> u64 { self.offset_end - self.offset_start }
}

/// Cumulative offsets of `group` in `classes` order.
///
/// Classes absent from the group get an empty segment; counts for
/// categories not listed in `classes` are ignored. The result depends only
/// on `classes`, never on map iteration order.
pub fn stack_segments<S: AsRef<str>>(classes: &[S], group: &GroupedEntity) -> Vec<Segment> {
    let mut acc = 0u64;
    classes
        .iter()
        .map(|class| {
            let class = class.as_ref();
            let start = acc;
            acc += group.count_of(class);
            Segment { category: class.to_string(), offset_start: start, offset_end: acc }
        })
        .collect()
}
