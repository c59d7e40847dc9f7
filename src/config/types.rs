//! Value types shared by config, coordinates and artifacts.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use strum_macros::{Display, EnumIter};

/// Anything that carries a price value.
pub trait PriceLike {
    fn value(&self) -> f64;

    /// Strictly above zero, so it can sit on a logarithmic axis.
    fn is_positive(&self) -> bool {
        self.value() > 0.0
    }

    /// About six significant digits, never fewer than two decimals.
    fn format_price(&self) -> String {
        let price = self.value();
        if price == 0.0 || !price.is_finite() {
            return format!("{:.2}", price);
        }
        let magnitude = price.abs().log10().floor() as i32;
        let decimals = (4 - magnitude).clamp(2, 8) as usize;
        format!("{:.*}", decimals, price)
    }
}

/// A price on the chart's Y axis.
///
/// Not clamped at zero: a scene position below the zero line still has a (negative) price
/// in linear mode, and it has to survive the trip back to the scene.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PriceLike for Price {
    fn value(&self) -> f64 {
        self.0
    }
}

impl Add for Price {
    type Output = f64;

    fn add(self, rhs: Self) -> Self::Output {
        self.0 + rhs.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_price())
    }
}

/// How price maps onto scene Y.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default,
)]
pub enum PriceScaleMode {
    #[default]
    #[strum(to_string = "Linear")]
    Linear,
    #[strum(to_string = "Logarithmic")]
    Logarithmic,
}

/// 8-bit RGBA color carried by artifacts as a display attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::from_rgb(0, 0, 0)
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescription {
    pub family: String,
    pub point_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            family: crate::config::CHART.default_font_family.to_string(),
            point_size: crate::config::CHART.default_font_point_size,
            bold: false,
            italic: false,
        }
    }
}
