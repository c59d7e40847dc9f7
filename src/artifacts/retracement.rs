//! Price and time retracements.
//!
//! Price levels are interpolated between the two prices, not between the two scene y
//! values, so a 50% retracement is the arithmetic midpoint on a log chart too.

use {
    super::ArtifactId,
    crate::{
        config::{CHART, Price, PriceLike, Rgba},
        coords::CoordinateConverter,
        domain::ScenePos,
        utils::lerp,
    },
    anyhow::Result,
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetracementLevel {
    pub ratio: f64,
    pub enabled: bool,
}

impl RetracementLevel {
    pub const fn new(ratio: f64) -> Self {
        Self {
            ratio,
            enabled: true,
        }
    }

    pub fn defaults() -> Vec<RetracementLevel> {
        CHART
            .default_retracement_levels
            .iter()
            .map(|&r| RetracementLevel::new(r))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRetracementArtifact {
    pub id: ArtifactId,
    pub start: ScenePos,
    pub end: ScenePos,
    pub levels: Vec<RetracementLevel>,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    pub ratio: f64,
    pub price: Price,
    pub scene_y: f64,
}

impl PriceRetracementArtifact {
    pub fn new(start: ScenePos, end: ScenePos) -> Self {
        Self {
            id: ArtifactId::new(),
            start,
            end,
            levels: RetracementLevel::defaults(),
            color: CHART.color_retracement,
        }
    }

    /// Enabled levels, ratio 0 at the start price and 1 at the end price.
    ///
    /// Levels whose price cannot be placed on the chart (at or below zero on a log scale)
    /// are skipped; the rest are still returned.
    pub fn levels(&self, conv: &CoordinateConverter) -> Result<Vec<PriceLevel>> {
        let p0 = conv.scene_y_to_price(self.start.y)?.value();
        let p1 = conv.scene_y_to_price(self.end.y)?.value();

        let levels = self
            .levels
            .iter()
            .filter(|l| l.enabled)
            .filter_map(|level| {
                let price = Price::new(lerp(p0, p1, level.ratio));
                match conv.price_to_scene_y(price) {
                    Ok(scene_y) => Some(PriceLevel {
                        ratio: level.ratio,
                        price,
                        scene_y,
                    }),
                    Err(e) => {
                        log::warn!("Retracement {}: skipping level {}: {:#}", self.id, level.ratio, e);
                        None
                    }
                }
            })
            .collect();
        Ok(levels)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRetracementArtifact {
    pub id: ArtifactId,
    pub start: ScenePos,
    pub end: ScenePos,
    pub levels: Vec<RetracementLevel>,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeLevel {
    pub ratio: f64,
    pub scene_x: f64,
    pub timestamp: DateTime<FixedOffset>,
}

impl TimeRetracementArtifact {
    pub fn new(start: ScenePos, end: ScenePos) -> Self {
        Self {
            id: ArtifactId::new(),
            start,
            end,
            levels: RetracementLevel::defaults(),
            color: CHART.color_retracement,
        }
    }

    /// Scene x is affine in time, so levels interpolate directly on x.
    pub fn levels(&self, conv: &CoordinateConverter) -> Result<Vec<TimeLevel>> {
        self.levels
            .iter()
            .filter(|l| l.enabled)
            .map(|level| {
                let scene_x = lerp(self.start.x, self.end.x, level.ratio);
                Ok(TimeLevel {
                    ratio: level.ratio,
                    scene_x,
                    timestamp: conv.scene_x_to_datetime(scene_x)?,
                })
            })
            .collect()
    }
}
