// File: crates/bar-core/src/source.rs
// Summary: CSV data source producing raw rows (no coercion, no filtering).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::row::{Field, Row, SALES_ALIASES};

/// Read rows from CSV with a header line.
/// Headers match case-insensitively against known aliases; a missing
/// column is logged and reads as "" for every row.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect::<Vec<_>>();
    log::debug!("CSV headers: {:?}", headers);

    let idx = |names: &[&str]| -> Option<usize> {
        names.iter().find_map(|want| headers.iter().position(|h| h == want))
    };

    let i_store = idx(Field::Store.header_aliases());
    let i_class = idx(Field::StoreClass.header_aliases());
    let i_city = idx(Field::City.header_aliases());
    let i_country = idx(Field::Country.header_aliases());
    let i_sales = idx(SALES_ALIASES);

    for (name, ix) in [
        ("store", i_store),
        ("storeClass", i_class),
        ("city", i_city),
        ("country", i_country),
        ("sales", i_sales),
    ] {
        if ix.is_none() {
            log::warn!("column '{}' not found; values read as empty", name);
        }
    }

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let get = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).unwrap_or("").to_string();
        out.push(Row {
            store: get(i_store),
            store_class: get(i_class),
            city: get(i_city),
            country: get(i_country),
            sales: get(i_sales),
        });
    }
    log::info!("loaded {} rows", out.len());
    Ok(out)
}

/// Open and read a CSV file. Any failure is returned whole; no partial rows.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    read_rows(file)
}
