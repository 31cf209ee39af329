// File: crates/bar-core/src/scale.rs
// Summary: Scale domains (magnitude + categorical), padding policies, and pixel scales.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Magnitude value (count or summed sales).
pub type Value = f64;

/// How far past the largest total the magnitude axis extends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPadding", into = "RawPadding")]
pub enum PaddingPolicy {
    /// Domain ends at the largest total.
    #[default]
    None,
    /// Largest total plus a non-negative constant.
    Fixed(f64),
    /// Largest total rounded up to a multiple of a nice tick step.
    Nice,
}

/// Config-file form: a number, "nice" or "none".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPadding {
    Fixed(f64),
    Named(String),
}

impl TryFrom<RawPadding> for PaddingPolicy {
    type Error = Error;

    fn try_from(raw: RawPadding) -> Result<Self, Self::Error> {
        match raw {
            RawPadding::Fixed(v) => PaddingPolicy::fixed(v),
            RawPadding::Named(s) => s.parse(),
        }
    }
}

impl From<PaddingPolicy> for RawPadding {
    fn from(p: PaddingPolicy) -> Self {
        match p {
            PaddingPolicy::None => RawPadding::Named("none".into()),
            PaddingPolicy::Fixed(v) => RawPadding::Fixed(v),
            PaddingPolicy::Nice => RawPadding::Named("nice".into()),
        }
    }
}

impl PaddingPolicy {
    pub fn fixed(v: f64) -> Result<Self, Error> {
        if v.is_finite() && v >= 0.0 {
            Ok(PaddingPolicy::Fixed(v))
        } else {
            Err(Error::InvalidPadding(v.to_string()))
        }
    }

    /// Upper bound of the magnitude axis for a largest total `max`.
    /// A `Fixed` constant built directly (bypassing [`PaddingPolicy::fixed`])
    /// that is negative or not finite adds nothing. The result never exceeds `f64::MAX`.
    pub fn apply(&self, max: Value) -> Value {
        let top = match *self {
            PaddingPolicy::None => max,
            PaddingPolicy::Fixed(c) if c.is_finite() && c > 0.0 => max + c,
            PaddingPolicy::Fixed(_) => max,
            PaddingPolicy::Nice => nice_ceil(max, DEFAULT_TICKS),
        };
        if top.is_finite() { top } else { Value::MAX }
    }
}

impl std::str::FromStr for PaddingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("nice") { return Ok(PaddingPolicy::Nice); }
        if t.eq_ignore_ascii_case("none") { return Ok(PaddingPolicy::None); }
        match t.parse::<f64>() {
            Ok(v) => PaddingPolicy::fixed(v).map_err(|_| Error::InvalidPadding(s.to_string())),
            Err(_) => Err(Error::InvalidPadding(s.to_string())),
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingPolicy::None => f.write_str("none"),
            PaddingPolicy::Fixed(v) => write!(f, "{v}"),
            PaddingPolicy::Nice => f.write_str("nice"),
        }
    }
}

/// Tick count targeted by nice rounding.
pub const DEFAULT_TICKS: usize = 10;

/// Step of 1, 2 or 5 x 10^k giving roughly `ticks` intervals over `span`.
pub fn nice_step(span: Value, ticks: usize) -> Value {
    if !(span > 0.0) || ticks == 0 {
        return 0.0;
    }
    let rough = span / ticks as f64;
    let mag = 10f64.powf(rough.log10().floor());
    let norm = rough / mag;
    let step = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * mag
}

/// Round `max` up to the next multiple of its nice step. Zero stays zero.
pub fn nice_ceil(max: Value, ticks: usize) -> Value {
    let step = nice_step(max, ticks);
    if step <= 0.0 {
        return max.max(0.0);
    }
    (max / step).ceil() * step
}

/// Magnitude-axis domain, always anchored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MagnitudeDomain {
    pub min: Value,
    pub max: Value,
}

impl MagnitudeDomain {
    /// `[0, max(values) + padding]`; an empty input counts as max 0.
    pub fn from_values<I>(values: I, padding: PaddingPolicy) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let max = values.into_iter().fold(0.0f64, f64::max);
        Self { min: 0.0, max: padding.apply(max) }
    }

    /// Tick values from `min` to `max` on the nice step.
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        let step = nice_step(self.max - self.min, count);
        if step <= 0.0 {
            return vec![self.min];
        }
        let n = ((self.max - self.min) / step + 1e-9).floor() as usize;
        (0..=n).map(|i| self.min + step * i as f64).collect()
    }
}

/// Ordered categorical-axis domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryDomain {
    keys: Vec<String>,
}

impl CategoryDomain {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { keys: keys.into_iter().map(Into::into).collect() }
    }

    pub fn keys(&self) -> &[String] { &self.keys }
    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

/// Vertical magnitude scale mapping the domain to [bottom, top] pixels.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl LinearScale {
    pub fn new(top_px: f32, bottom_px: f32, domain: MagnitudeDomain) -> Self {
        let mut s = Self { top_px, bottom_px, vmin: domain.min, vmax: domain.max };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}

/// Band scale: equal-width bands with inner/outer padding, centred.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    start: f32,
    step: f32,
    bandwidth: f32,
    len: usize,
}

impl BandScale {
    /// `padding` is used for both inner and outer padding and clamped to [0, 1].
    pub fn new(range: (f32, f32), len: usize, padding: f32) -> Self {
        let (r0, r1) = range;
        let padding = padding.clamp(0.0, 1.0);
        let n = len as f32;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + ((r1 - r0) - step * (n - padding)) * 0.5;
        Self { start, step, bandwidth: step * (1.0 - padding), len }
    }

    /// Left edge of band `i`, or `None` when out of range.
    #[inline]
    pub fn position(&self, i: usize) -> Option<f32> {
        (i < self.len).then(|| self.start + self.step * i as f32)
    }

    pub fn bandwidth(&self) -> f32 { self.bandwidth }
    pub fn step(&self) -> f32 { self.step }
}
