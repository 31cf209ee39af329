// File: crates/bar-core/tests/layout.rs
// Purpose: End-to-end simple and stacked layouts: filtering, top-N, domains, and bar rectangles.

use bar_core::{BarChart, EngineConfig, Field, Measure, PaddingPolicy, Palette, RenderOptions, Row};

fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-3 }

fn stores() -> Vec<Row> {
    vec![
        Row::new("1", "Red").with_city("X").with_country("NO").with_sales("10"),
        Row::new("2", "Blue").with_city("X").with_country("NO").with_sales("20"),
        Row::new("3", "Red").with_city("X").with_country("SE").with_sales("x"),
        Row::new("4", "Red").with_city("Y").with_country("SE").with_sales("5"),
        Row::new("5", "Outlet").with_city("Y").with_country("SE").with_sales("1"),
        Row::new("6", "Blue").with_city("X").with_country("DK").with_sales("2"),
        Row::new("7", "").with_city("Z").with_country("DK").with_sales("99"),
    ]
}

#[test]
fn simple_by_class_geometry() {
    let rows = vec![Row::new("a", "Red"), Row::new("b", "Blue"), Row::new("c", "Red"), Row::new("d", "")];
    let layout = BarChart::default().simple(&rows, Field::StoreClass, Measure::Count);

    assert_eq!(layout.plot.width, 710);
    assert_eq!(layout.plot.height, 410);
    assert_eq!(layout.categories.keys(), ["Red", "Blue"]);
    assert_eq!(layout.magnitude.max, 2.0);

    let red = &layout.bars[0];
    assert_eq!(red.value, 2.0);
    assert_eq!(red.count, Some(2));
    assert_eq!(red.total, None);
    assert!(close(red.rect.y, 0.0));
    assert!(close(red.rect.height, 410.0));
    let blue = &layout.bars[1];
    assert!(close(blue.rect.y, 205.0));
    assert!(close(blue.rect.bottom(), 410.0));
    assert!(close(blue.rect.x - red.rect.x, 710.0 / 2.2));
    assert!(close(red.rect.width, blue.rect.width));
}

#[test]
fn simple_by_store_sums_sales_and_applies_top_n() {
    let chart = BarChart::new(
        EngineConfig { top_n: Some(2), padding: PaddingPolicy::Fixed(10.0), ..EngineConfig::default() },
        RenderOptions::default(),
    );
    let layout = chart.simple(&stores(), Field::Store, Measure::Sales);
    let cats: Vec<&str> = layout.bars.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(cats, vec!["2", "1"]);
    assert_eq!(layout.magnitude.max, 30.0);
    assert_eq!(layout.categories.keys(), ["2", "1"]);
    assert_eq!(layout.bars[0].total, Some(20.0));
    assert_eq!(layout.bars[0].count, None);
}

#[test]
fn huge_sales_saturate_instead_of_overflowing() {
    let rows = vec![
        Row::new("A", "Red").with_sales("1e308"),
        Row::new("A", "Red").with_sales("1e308"),
        Row::new("B", "Red").with_sales("1"),
    ];
    let layout = BarChart::default().simple(&rows, Field::Store, Measure::Sales);
    let a = &layout.bars[0];
    assert!(a.value.is_finite());
    assert!(layout.magnitude.max.is_finite());
    assert!(layout.ticks.iter().all(|t| t.is_finite()));
    assert!(!a.rect.y.is_nan() && !a.rect.height.is_nan());
    assert!(close(a.rect.y, 0.0));
    assert!(!layout.bars[1].rect.height.is_nan());
}

#[test]
fn bars_serialize_count_or_total_by_measure() {
    let rows = vec![Row::new("a", "Red").with_sales("3"), Row::new("b", "Red").with_sales("4")];
    let counted = serde_json::to_value(BarChart::default().simple(&rows, Field::StoreClass, Measure::Count))
        .expect("to json");
    let bar = &counted["bars"][0];
    assert_eq!(bar["count"], 2);
    assert!(bar.get("total").is_none() && bar.get("value").is_none());

    let summed = serde_json::to_value(BarChart::default().simple(&rows, Field::StoreClass, Measure::Sales))
        .expect("to json");
    let bar = &summed["bars"][0];
    assert_eq!(bar["total"], 7.0);
    assert!(bar.get("count").is_none() && bar.get("value").is_none());
}

#[test]
fn count_sum_equals_filtered_rows() {
    let layout = BarChart::default().simple(&stores(), Field::City, Measure::Count);
    // row 7 has no class and is filtered out
    let total: f64 = layout.bars.iter().map(|b| b.value).sum();
    assert_eq!(total, 6.0);
    assert_eq!(layout.categories.keys(), ["X", "Y"]);
}

#[test]
fn stacked_by_city_uses_palette_order_and_drops_unknown_classes() {
    let palette = Palette::assign(["Red", "Blue", "Flagship"]);
    let layout = BarChart::default().stacked(&stores(), Field::City, &palette);

    assert_eq!(layout.groups.keys(), ["X", "Y"]);
    let x = &layout.bars[0];
    assert_eq!(x.total, 4);
    let spans: Vec<(&str, u64, u64)> = x
        .segments
        .iter()
        .map(|s| (s.segment.category.as_str(), s.segment.offset_start, s.segment.offset_end))
        .collect();
    assert_eq!(spans, vec![("Red", 0, 2), ("Blue", 2, 4), ("Flagship", 4, 4)]);
    // "Outlet" is not in the palette
    assert_eq!(layout.bars[1].total, 1);
    assert_eq!(layout.magnitude.max, 4.0);

    for bar in &layout.bars {
        assert_eq!(bar.segments[0].segment.offset_start, 0);
        assert_eq!(bar.segments.last().map(|s| s.segment.offset_end), Some(bar.total));
        // segments tile the bar from the baseline upward
        for pair in bar.segments.windows(2) {
            assert!(close(pair[0].rect.y, pair[1].rect.bottom()));
        }
    }
    assert_eq!(x.segments[0].color, "#1f77b4");
    assert_eq!(layout.legend.len(), 3);
}

#[test]
fn stacked_top_n_by_total() {
    let chart = BarChart::new(EngineConfig { top_n: Some(1), ..EngineConfig::default() }, RenderOptions::default());
    let palette = Palette::assign(["Red", "Blue", "Outlet"]);
    let layout = chart.stacked(&stores(), Field::Country, &palette);
    // NO=2, SE=3, DK=1
    assert_eq!(layout.groups.keys(), ["SE"]);
    assert_eq!(layout.bars[0].total, 3);
}

#[test]
fn stacked_normalizes_palette_with_rows() {
    let rows = vec![
        Row::new("1", " red ").with_city("X"),
        Row::new("2", "BLUE").with_city("X"),
        Row::new("3", "red").with_city("X"),
    ];
    let chart = BarChart::new(EngineConfig { normalize_case: true, ..EngineConfig::default() }, RenderOptions::default());
    let layout = chart.stacked(&rows, Field::City, &Palette::assign(["red", "blue"]));
    let bar = &layout.bars[0];
    assert_eq!(bar.total, 3);
    assert_eq!(bar.segments[0].segment.category, "Red");
    assert_eq!(bar.segments[0].segment.extent(), 2);
}

#[test]
fn empty_input_produces_empty_layout() {
    let layout = BarChart::default().simple(&[], Field::Country, Measure::Count);
    assert!(layout.bars.is_empty());
    assert_eq!(layout.magnitude.max, 0.0);
    assert_eq!(layout.ticks, vec![0.0]);
}
