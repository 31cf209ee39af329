// File: crates/bar-core/tests/source.rs
// Purpose: CSV loading, header aliasing, field-map rows, and TOML config parsing.

use std::collections::HashMap;
use std::path::PathBuf;

use bar_core::source::{load_rows, read_rows};
use bar_core::{ChartConfig, Error, Field, PaddingPolicy, Row};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/stores.csv")
}

#[test]
fn loads_fixture_rows_verbatim() {
    let rows = load_rows(fixture()).expect("load fixture");
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].store, "HM001");
    assert_eq!(rows[0].store_class, "Flagship");
    assert_eq!(rows[0].sales_value(), 1200.5);
    // blank class is kept as-is; filtering happens later
    assert_eq!(rows[5].store_class, "");
    assert_eq!(rows[4].sales_value(), 0.0);
}

#[test]
fn headers_match_case_insensitively_and_missing_columns_read_empty() {
    let csv = "Store_Class,CITY,Revenue\nRed,Oslo,12\nBlue,Bergen\n";
    let rows = read_rows(csv.as_bytes()).expect("parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].store_class, "Red");
    assert_eq!(rows[0].city, "Oslo");
    assert_eq!(rows[0].sales, "12");
    assert_eq!(rows[0].country, "");
    // short record tolerated
    assert_eq!(rows[1].sales, "");
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_rows("tests/data/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn row_from_field_map() {
    let map: HashMap<String, String> = [
        ("storeClass", "Red"),
        ("City", "Oslo"),
        ("country", "Norway"),
        ("sales", " 42 "),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let row = Row::from_map(&map);
    assert_eq!(row.store, "");
    assert_eq!(Field::StoreClass.get(&row), "Red");
    assert_eq!(Field::City.get(&row), "Oslo");
    assert_eq!(row.sales_value(), 42.0);
}

#[test]
fn config_parses_all_sections() {
    let text = r##"
        [engine]
        top_n = 5
        padding = "nice"
        category_allow_list = ["Flagship", "Standard"]
        normalize_case = true

        [layout]
        width = 960
        insets = { left = 80 }

        [[classes]]
        name = "Flagship"
        color = "#d62728"

        [[classes]]
        name = "Standard"
        color = "#1f77b4"
    "##;
    let cfg: ChartConfig = toml::from_str(text).expect("parse config");
    assert_eq!(cfg.engine.top_n, Some(5));
    assert_eq!(cfg.engine.padding, PaddingPolicy::Nice);
    assert!(cfg.engine.normalize_case);
    assert_eq!(cfg.engine.category_field, Field::StoreClass);
    assert_eq!(cfg.layout.width, 960);
    assert_eq!(cfg.layout.height, 500);
    assert_eq!(cfg.layout.insets.left, 80);
    assert_eq!(cfg.layout.insets.right, 20);
    let palette = cfg.palette().expect("palette");
    assert_eq!(palette.classes(), vec!["Flagship", "Standard"]);
}

#[test]
fn config_padding_accepts_numbers_and_rejects_unknown_words() {
    let cfg: ChartConfig = toml::from_str("[engine]\npadding = 3\n").expect("integer padding");
    assert_eq!(cfg.engine.padding, PaddingPolicy::Fixed(3.0));
    assert!(toml::from_str::<ChartConfig>("[engine]\npadding = \"round\"\n").is_err());
    let empty: ChartConfig = toml::from_str("").expect("empty config");
    assert_eq!(empty.engine.padding, PaddingPolicy::None);
    assert!(empty.palette().is_none());
}

#[test]
fn config_file_round_trip_through_disk() {
    let path = PathBuf::from("target/test_out/chart.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[engine]\ntop_n = 3\ncategory_field = \"country\"\n").unwrap();
    let cfg = ChartConfig::load_from_file(&path).expect("load config");
    assert_eq!(cfg.engine.top_n, Some(3));
    assert_eq!(cfg.engine.category_field, Field::Country);

    std::fs::write(&path, "[engine\n").unwrap();
    assert!(matches!(ChartConfig::load_from_file(&path), Err(Error::Config { .. })));
}
