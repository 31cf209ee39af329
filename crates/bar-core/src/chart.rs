// File: crates/bar-core/src/chart.rs
// Summary: BarChart pipeline: filter -> group -> top-N -> domains -> bar geometry.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::filter::RowFilter;
use crate::geometry::{BarRect, PlotArea};
use crate::group::{self, CategorySum, GroupedEntity};
use crate::palette::{ClassColor, Palette, BAR_FILL};
use crate::row::{Field, Row};
use crate::scale::{BandScale, CategoryDomain, LinearScale, MagnitudeDomain, Value, DEFAULT_TICKS};
use crate::stack::{stack_segments, Segment};
use crate::types::{Insets, HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    /// Inner and outer band padding as a fraction of the band step.
    pub band_padding: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default(), band_padding: 0.2 }
    }
}

/// What a simple bar measures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Number of rows per key.
    #[default]
    Count,
    /// Sum of coerced `sales` per key.
    Sales,
}

/// One bar of a simple chart. Serializes `count` for [`Measure::Count`] and
/// `total` for [`Measure::Sales`]; `value` is the plotted magnitude of either.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimpleBar {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(skip)]
    pub value: Value,
    pub rect: BarRect,
}

/// Per-key magnitude before layout, integer counts kept exact.
struct Measured {
    category: String,
    count: Option<u64>,
    value: Value,
}

impl group::Ranked for Measured {
    fn rank_value(&self) -> f64 { self.value }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimpleLayout {
    pub key: Field,
    pub measure: Measure,
    pub fill: &'static str,
    pub bars: Vec<SimpleBar>,
    pub categories: CategoryDomain,
    pub magnitude: MagnitudeDomain,
    pub ticks: Vec<Value>,
    pub plot: PlotArea,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub color: String,
    pub rect: BarRect,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBar {
    pub group_key: String,
    pub total: u64,
    pub segments: Vec<PlacedSegment>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackedLayout {
    pub key: Field,
    pub bars: Vec<StackedBar>,
    pub groups: CategoryDomain,
    pub legend: Vec<ClassColor>,
    pub magnitude: MagnitudeDomain,
    pub ticks: Vec<Value>,
    pub plot: PlotArea,
}

/// Stateless layout engine; every call recomputes from the rows given.
#[derive(Clone, Debug, Default)]
pub struct BarChart {
    pub config: EngineConfig,
    pub options: RenderOptions,
}

impl BarChart {
    pub fn new(config: EngineConfig, options: RenderOptions) -> Self {
        Self { config, options }
    }

    fn plot(&self) -> PlotArea {
        PlotArea::new(self.options.width, self.options.height, self.options.insets)
    }

    fn trim<T: group::Ranked>(&self, items: Vec<T>) -> Vec<T> {
        match self.config.top_n {
            Some(n) => group::top_n(items, n),
            None => items,
        }
    }

    /// One bar per distinct `key` value.
    pub fn simple(&self, rows: &[Row], key: Field, measure: Measure) -> SimpleLayout {
        let filtered = RowFilter::from_config(&self.config).require(key).apply(rows);
        let measured: Vec<Measured> = match measure {
            Measure::Count => group::count_by(&filtered, key)
                .into_iter()
                .map(|c| Measured { value: c.count as f64, count: Some(c.count), category: c.category })
                .collect(),
            Measure::Sales => group::sum_by(&filtered, key, Row::sales_value)
                .into_iter()
                .map(|s: CategorySum| Measured { category: s.category, count: None, value: s.total })
                .collect(),
        };
        let measured = self.trim(measured);

        let categories = CategoryDomain::new(measured.iter().map(|m| m.category.clone()));
        let magnitude = MagnitudeDomain::from_values(measured.iter().map(|m| m.value), self.config.padding);
        let plot = self.plot();
        let x = BandScale::new((0.0, plot.width as f32), categories.len(), self.options.band_padding);
        let y = LinearScale::new(0.0, plot.height as f32, magnitude);

        let bars = measured
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let left = x.position(i).unwrap_or(0.0);
                let rect = BarRect::from_rows(left, x.bandwidth(), y.to_px(m.value), y.to_px(0.0));
                let total = if m.count.is_none() { Some(m.value) } else { None };
                SimpleBar { category: m.category, count: m.count, total, value: m.value, rect }
            })
            .collect();

        SimpleLayout {
            key,
            measure,
            fill: BAR_FILL,
            bars,
            categories,
            ticks: magnitude.ticks(DEFAULT_TICKS),
            magnitude,
            plot,
        }
    }

    /// One bar per `key` value, split into segments per palette class.
    /// Rows whose class is not in `palette` are left out entirely.
    pub fn stacked(&self, rows: &[Row], key: Field, palette: &Palette) -> StackedLayout {
        let class_field = self.config.category_field;
        let normalized;
        let palette = if self.config.normalize_case {
            normalized = palette.canonicalized();
            &normalized
        } else {
            palette
        };
        let filtered: Vec<Row> = RowFilter::from_config(&self.config)
            .require(key)
            .apply(rows)
            .into_iter()
            .filter(|r| palette.contains(class_field.get(r)))
            .collect();
        let groups: Vec<GroupedEntity> = self.trim(group::group_by(&filtered, key, class_field));

        let classes = palette.classes();
        let domain = CategoryDomain::new(groups.iter().map(|g| g.group_key().to_string()));
        let magnitude =
            MagnitudeDomain::from_values(groups.iter().map(|g| g.total() as f64), self.config.padding);
        let plot = self.plot();
        let x = BandScale::new((0.0, plot.width as f32), domain.len(), self.options.band_padding);
        let y = LinearScale::new(0.0, plot.height as f32, magnitude);

        let bars = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let left = x.position(i).unwrap_or(0.0);
                let segments = stack_segments(&classes, g)
                    .into_iter()
                    .map(|segment| {
                        let rect = BarRect::from_rows(
                            left,
                            x.bandwidth(),
                            y.to_px(segment.offset_end as f64),
                            y.to_px(segment.offset_start as f64),
                        );
                        let color = palette.color_of(&segment.category).unwrap_or(BAR_FILL).to_string();
                        PlacedSegment { segment, color, rect }
                    })
                    .collect();
                StackedBar { group_key: g.group_key().to_string(), total: g.total(), segments }
            })
            .collect();

        StackedLayout {
            key,
            bars,
            groups: domain,
            legend: palette.entries().to_vec(),
            ticks: magnitude.ticks(DEFAULT_TICKS),
            magnitude,
            plot,
        }
    }
}
