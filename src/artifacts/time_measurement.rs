use {
    super::{ArtifactId, count_bars_between},
    crate::{
        config::{CHART, Rgba},
        coords::CoordinateConverter,
        domain::{PriceBar, ScenePos},
        utils::TimeUtils,
    },
    serde::{Deserialize, Serialize},
};

/// Measures the elapsed time between two points in several units at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMeasurementArtifact {
    pub id: ArtifactId,
    pub start: ScenePos,
    pub end: ScenePos,
    pub color: Rgba,
}

/// Elapsed time between the two points of a [`TimeMeasurementArtifact`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeMeasurement {
    /// Price bars inside the measured span, both ends included.
    pub bars: usize,
    pub sqrt_bars: f64,
    pub seconds: f64,
    pub minutes: f64,
    pub hours: f64,
    pub days: f64,
    pub sqrt_days: f64,
    pub weeks: f64,
    pub months: f64,
    pub years: f64,
}

impl TimeMeasurement {
    /// Everything except the bar count follows from the span in days.
    pub fn from_days(days: f64, bars: usize) -> Self {
        let days = days.abs();
        let seconds = days * TimeUtils::SECS_IN_D;
        Self {
            bars,
            sqrt_bars: (bars as f64).sqrt(),
            seconds,
            minutes: seconds / 60.0,
            hours: seconds / 3600.0,
            days,
            sqrt_days: days.sqrt(),
            weeks: days / 7.0,
            months: days / TimeUtils::DAYS_IN_MONTH,
            years: days / TimeUtils::DAYS_IN_YEAR,
        }
    }
}

impl TimeMeasurementArtifact {
    pub fn new(start: ScenePos, end: ScenePos) -> Self {
        Self {
            id: ArtifactId::new(),
            start,
            end,
            color: CHART.color_time_measurement,
        }
    }

    /// Scene x is in days, so the span needs no conversion.
    pub fn elapsed_days(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn measure(&self, bars: &[PriceBar], conv: &CoordinateConverter) -> TimeMeasurement {
        let bar_count = count_bars_between(bars, conv, self.start.x, self.end.x);
        TimeMeasurement::from_days(self.elapsed_days(), bar_count)
    }
}
