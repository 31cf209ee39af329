// File: crates/bar-examples/src/bin/classes.rs
// Summary: Minimal example that counts stores per class and prints bar geometry.

use bar_core::{BarChart, Field, Measure, Palette, Row};

fn main() {
    // A handful of in-memory records
    let rows = vec![
        Row::new("S1", "Red").with_city("Oslo").with_country("Norway"),
        Row::new("S2", "Blue").with_city("Oslo").with_country("Norway"),
        Row::new("S3", "Red").with_city("Bergen").with_country("Norway"),
        Row::new("S4", "Flagship").with_city("Lund").with_country("Sweden"),
        Row::new("S5", "").with_city("Lund").with_country("Sweden"),
    ];

    let chart = BarChart::default();
    let simple = chart.simple(&rows, Field::StoreClass, Measure::Count);
    for bar in &simple.bars {
        println!(
            "{:<10} {:>3}  x={:>6.1} y={:>6.1} w={:>5.1} h={:>6.1}",
            bar.category, bar.value, bar.rect.x, bar.rect.y, bar.rect.width, bar.rect.height
        );
    }

    let palette = Palette::assign(["Red", "Blue", "Flagship"]);
    let stacked = chart.stacked(&rows, Field::City, &palette);
    for bar in &stacked.bars {
        let parts: Vec<String> = bar
            .segments
            .iter()
            .map(|s| format!("{}[{}..{}]", s.segment.category, s.segment.offset_start, s.segment.offset_end))
            .collect();
        println!("{:<8} total={} {}", bar.group_key, bar.total, parts.join(" "));
    }
}
