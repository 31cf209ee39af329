// File: crates/bar-core/src/palette.rs
// Summary: Ordered class -> color mapping; drives stacking order, allow-list and legend.

use serde::{Deserialize, Serialize};

use crate::filter::canonical_case;

/// Category10 hues, assigned cyclically.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Single fill used by simple (unstacked) bars.
pub const BAR_FILL: &str = "steelblue";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassColor {
    pub name: String,
    pub color: String,
}

/// Class order is the list order; duplicates keep their first position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<ClassColor>,
}

impl Palette {
    pub fn new(entries: Vec<ClassColor>) -> Self {
        let mut p = Self::default();
        for e in entries {
            p.push(e.name, e.color);
        }
        p
    }

    /// Give each class a Category10 color in the order supplied.
    pub fn assign<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut p = Self::default();
        for name in classes {
            let color = CATEGORY10[p.entries.len() % CATEGORY10.len()];
            p.push(name.into(), color.to_string());
        }
        p
    }

    fn push(&mut self, name: String, color: String) {
        if !self.contains(&name) {
            self.entries.push(ClassColor { name, color });
        }
    }

    /// Same palette with class names in canonical case; merged names keep the first color.
    pub fn canonicalized(&self) -> Self {
        Self::new(
            self.entries
                .iter()
                .map(|e| ClassColor { name: canonical_case(&e.name), color: e.color.clone() })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ClassColor] { &self.entries }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn classes(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.iter().any(|e| e.name == class)
    }

    pub fn color_of(&self, class: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.name == class).map(|e| e.color.as_str())
    }
}
