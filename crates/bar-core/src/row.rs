// File: crates/bar-core/src/row.rs
// Summary: Store record model, key fields, and magnitude coercion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One store record as delivered by the data source.
/// Every field is kept as text; `sales` is coerced on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub store: String,
    pub store_class: String,
    pub city: String,
    pub country: String,
    pub sales: String,
}

impl Row {
    pub fn new(store: impl Into<String>, store_class: impl Into<String>) -> Self {
        Self { store: store.into(), store_class: store_class.into(), ..Self::default() }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_sales(mut self, sales: impl Into<String>) -> Self {
        self.sales = sales.into();
        self
    }

    /// Build a row from an already-parsed `field -> value` mapping.
    /// Header names match case-insensitively; absent fields read as "".
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        // alias order decides when several headers match
        let lookup = |names: &[&str]| -> String {
            names
                .iter()
                .find_map(|n| map.iter().find(|(k, _)| k.trim().eq_ignore_ascii_case(n)))
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        Self {
            store: lookup(Field::Store.header_aliases()),
            store_class: lookup(Field::StoreClass.header_aliases()),
            city: lookup(Field::City.header_aliases()),
            country: lookup(Field::Country.header_aliases()),
            sales: lookup(SALES_ALIASES),
        }
    }

    /// Sales coerced to a number; see [`coerce_magnitude`].
    pub fn sales_value(&self) -> f64 {
        coerce_magnitude(&self.sales)
    }
}

/// Header spellings accepted for the sales column.
pub const SALES_ALIASES: &[&str] = &["sales", "revenue", "turnover"];

/// Row fields that can act as a grouping key or category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Store,
    #[default]
    StoreClass,
    City,
    Country,
}

impl Field {
    #[inline]
    pub fn get<'a>(&self, row: &'a Row) -> &'a str {
        match self {
            Field::Store => &row.store,
            Field::StoreClass => &row.store_class,
            Field::City => &row.city,
            Field::Country => &row.country,
        }
    }

    pub fn get_mut<'a>(&self, row: &'a mut Row) -> &'a mut String {
        match self {
            Field::Store => &mut row.store,
            Field::StoreClass => &mut row.store_class,
            Field::City => &mut row.city,
            Field::Country => &mut row.country,
        }
    }

    /// Lower-case header names recognized for this field.
    pub fn header_aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Store => &["store", "store_id", "storeid", "store_name"],
            Field::StoreClass => &["storeclass", "store_class", "class"],
            Field::City => &["city"],
            Field::Country => &["country"],
        }
    }
}

/// Parse a magnitude from text.
/// Surrounding whitespace is ignored; empty, unparseable, NaN and infinite
/// values all coerce to `0.0`.
pub fn coerce_magnitude(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
