// File: crates/bar-core/src/lib.rs
// Summary: Core library entry point; exports the aggregation and bar layout API.

pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod group;
pub mod palette;
pub mod row;
pub mod scale;
pub mod source;
pub mod stack;
pub mod types;

pub use chart::{BarChart, Measure, RenderOptions, SimpleLayout, StackedLayout};
pub use config::{ChartConfig, EngineConfig};
pub use error::{Error, Result};
pub use filter::RowFilter;
pub use group::{count_by, group_by, sum_by, top_n, CategoryCount, CategorySum, GroupedEntity};
pub use palette::Palette;
pub use row::{Field, Row};
pub use scale::{CategoryDomain, MagnitudeDomain, PaddingPolicy};
pub use stack::{stack_segments, Segment};
