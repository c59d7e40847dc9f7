//! Chart geometry defaults

use super::types::Rgba;

pub struct ChartConfig {
    /// Default scaling: this many days per scene-to-view unit on X
    pub default_units_of_time: f64,
    /// Default scaling: this many price units per scene-to-view unit on Y
    pub default_units_of_price: f64,

    // --- VIEWPORT ---
    /// View size assumed when no surface is attached (CLI)
    pub default_view_size: (f64, f64),
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplicative step applied per wheel notch
    pub zoom_step: f64,
    /// Margin added around data when fitting the view (0.05 = 5%)
    pub fit_margin_pct: f64,

    /// Round-trip tolerance for scene x (days) and scene y
    pub conversion_tolerance: f64,

    // --- ARTIFACT DEFAULTS ---
    pub default_retracement_levels: &'static [f64],
    /// Gann angles as (time_units, price_units)
    pub default_gann_angles: &'static [(u32, u32)],

    pub default_font_family: &'static str,
    pub default_font_point_size: f64,

    pub color_text: Rgba,
    pub color_bar_count: Rgba,
    pub color_time_measurement: Rgba,
    pub color_modal_scale: Rgba,
    pub color_gann_fan: Rgba,
    pub color_retracement: Rgba,
}

pub const CHART: ChartConfig = ChartConfig {
    // 1 day : 1 price unit
    default_units_of_time: 1.0,
    default_units_of_price: 1.0,

    default_view_size: (1920.0, 1080.0),
    min_zoom: 1e-4,
    max_zoom: 1e4,
    zoom_step: 1.2,
    fit_margin_pct: 0.05,

    // ~86 microseconds on the time axis
    conversion_tolerance: 1e-6,

    default_retracement_levels: &[0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0, 1.272, 1.618],
    default_gann_angles: &[
        (1, 8),
        (1, 4),
        (1, 3),
        (1, 2),
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 1),
        (8, 1),
    ],

    default_font_family: "DejaVu Sans",
    default_font_point_size: 10.0,

    color_text: Rgba::from_rgb(0, 0, 0),
    color_bar_count: Rgba::from_rgb(0, 128, 255),
    color_time_measurement: Rgba::from_rgb(0, 160, 0),
    color_modal_scale: Rgba::from_rgb(148, 0, 211),
    color_gann_fan: Rgba::from_rgb(255, 140, 0),
    color_retracement: Rgba::from_rgb(178, 34, 34),
};
