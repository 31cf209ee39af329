// File: crates/demo/src/main.rs
// Summary: Demo loads a store CSV and emits the layout of one chart variant as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bar_core::{BarChart, ChartConfig, Field, Measure, PaddingPolicy, Palette, Row};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about = "Aggregate store records into bar chart geometry", long_about = None)]
struct Cli {
    /// Store CSV (store, storeClass, city, country, sales)
    input: PathBuf,

    /// TOML config with [engine], [layout] and [[classes]] sections
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ChartKind::ByClass)]
    chart: ChartKind,

    /// Keep only the N largest bars (overrides config)
    #[arg(long, value_name = "N")]
    top_n: Option<usize>,

    /// Magnitude padding: a number, "nice" or "none" (overrides config)
    #[arg(long, value_name = "POLICY")]
    padding: Option<PaddingPolicy>,

    /// Canonicalize category case (overrides config)
    #[arg(long)]
    normalize_case: bool,

    /// Write JSON here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

/// The six chart variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    ByClass,
    ByStore,
    ByCountry,
    ByCity,
    StackedCountry,
    StackedCity,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(p) => ChartConfig::load_from_file(p)
            .with_context(|| format!("failed to load config '{}'", p.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(n) = cli.top_n {
        config.engine.top_n = Some(n);
    }
    if let Some(p) = cli.padding {
        config.engine.padding = p;
    }
    if cli.normalize_case {
        config.engine.normalize_case = true;
    }

    let rows = bar_core::source::load_rows(&cli.input)
        .with_context(|| format!("failed to load CSV '{}'", cli.input.display()))?;
    if rows.is_empty() {
        anyhow::bail!("no rows loaded from {}; check headers/delimiter", cli.input.display());
    }

    let chart = BarChart::new(config.engine.clone(), config.layout);
    let json = match cli.chart {
        ChartKind::ByClass => serde_json::to_string_pretty(&chart.simple(&rows, Field::StoreClass, Measure::Count))?,
        ChartKind::ByStore => serde_json::to_string_pretty(&chart.simple(&rows, Field::Store, Measure::Sales))?,
        ChartKind::ByCountry => serde_json::to_string_pretty(&chart.simple(&rows, Field::Country, Measure::Count))?,
        ChartKind::ByCity => serde_json::to_string_pretty(&chart.simple(&rows, Field::City, Measure::Count))?,
        ChartKind::StackedCountry | ChartKind::StackedCity => {
            let key = if cli.chart == ChartKind::StackedCountry { Field::Country } else { Field::City };
            let palette = config.palette().unwrap_or_else(|| palette_from_data(&chart, &rows));
            log::info!("stacking classes {:?}", palette.classes());
            serde_json::to_string_pretty(&chart.stacked(&rows, key, &palette))?
        }
    };

    match &cli.out {
        Some(path) => {
            write_output(path, &json)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Classes in first-encounter order among the rows that pass the filter.
fn palette_from_data(chart: &BarChart, rows: &[Row]) -> Palette {
    let filtered = bar_core::RowFilter::from_config(&chart.config).apply(rows);
    let counts = bar_core::count_by(&filtered, chart.config.category_field);
    Palette::assign(counts.into_iter().map(|c| c.category))
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
