use {
    super::{ArtifactId, count_bars_between},
    crate::{
        config::{CHART, Rgba},
        coords::CoordinateConverter,
        domain::{PriceBar, ScenePos},
    },
    serde::{Deserialize, Serialize},
};

/// Counts the price bars between two points on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarCountArtifact {
    pub id: ArtifactId,
    pub start: ScenePos,
    pub end: ScenePos,
    pub color: Rgba,
}

impl BarCountArtifact {
    pub fn new(start: ScenePos, end: ScenePos) -> Self {
        Self {
            id: ArtifactId::new(),
            start,
            end,
            color: CHART.color_bar_count,
        }
    }

    /// Scene x interval covered, low end first.
    pub fn x_range(&self) -> (f64, f64) {
        (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
    }

    /// Bars whose open time lies in the closed x interval.
    pub fn count_bars(&self, bars: &[PriceBar], conv: &CoordinateConverter) -> usize {
        let (lo, hi) = self.x_range();
        count_bars_between(bars, conv, lo, hi)
    }
}
