// File: crates/bar-core/src/config.rs
// Summary: Engine and chart configuration, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::RenderOptions;
use crate::error::{Error, Result};
use crate::palette::{ClassColor, Palette};
use crate::row::Field;
use crate::scale::PaddingPolicy;

/// Aggregation parameters shared by every chart variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Show only the N groups with the largest total.
    pub top_n: Option<usize>,
    pub padding: PaddingPolicy,
    pub category_allow_list: Option<Vec<String>>,
    pub normalize_case: bool,
    /// Field the allow-list and case normalization apply to.
    pub category_field: Field,
}

/// Everything a config file can carry.
///
/// ```toml
/// [engine]
/// top_n = 10
/// padding = "nice"
///
/// [layout]
/// width = 960
///
/// [[classes]]
/// name = "Flagship"
/// color = "#d62728"
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub engine: EngineConfig,
    pub layout: RenderOptions,
    /// Stacking order and colors; empty means "derive from data".
    pub classes: Vec<ClassColor>,
}

impl ChartConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| Error::Config { path: path.to_path_buf(), source })
    }

    pub fn palette(&self) -> Option<Palette> {
        (!self.classes.is_empty()).then(|| Palette::new(self.classes.clone()))
    }
}
