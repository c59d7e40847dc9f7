//! Scene <-> domain conversion.
//!
//! The scene X axis is the Julian Day of the instant, so one scene unit is one day and the
//! mapping is affine in time. The scene Y axis is the negated price, or the negated natural
//! log of the price when the scaling is logarithmic. Both mappings are exact inverses up to
//! floating-point rounding.

use {
    super::ChartScaling,
    crate::{
        config::{Price, PriceLike, PriceScaleMode},
        domain::ScenePos,
        utils::{
            datetime_to_julian_day, epoch_ms_to_julian_day, julian_day_to_epoch_ms,
            julian_day_to_utc,
        },
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, FixedOffset, TimeZone},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateConverter {
    scaling: ChartScaling,
    utc_offset: FixedOffset,
}

impl CoordinateConverter {
    pub fn new(scaling: ChartScaling, utc_offset: FixedOffset) -> Result<Self> {
        scaling.validate()?;
        Ok(Self {
            scaling,
            utc_offset,
        })
    }

    /// Converter for a UTC chart.
    pub fn utc(scaling: ChartScaling) -> Result<Self> {
        Self::new(scaling, FixedOffset::east_opt(0).context("UTC offset")?)
    }

    pub fn scaling(&self) -> &ChartScaling {
        &self.scaling
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn price_mode(&self) -> PriceScaleMode {
        self.scaling.price_mode
    }

    // =========================================================================
    // X axis: time
    // =========================================================================

    pub fn datetime_to_scene_x<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> f64 {
        datetime_to_julian_day(dt)
    }

    /// Timestamp at scene `x`, expressed in this chart's UTC offset.
    pub fn scene_x_to_datetime(&self, x: f64) -> Result<DateTime<FixedOffset>> {
        let utc = julian_day_to_utc(x).with_context(|| format!("scene x {} has no timestamp", x))?;
        Ok(utc.with_timezone(&self.utc_offset))
    }

    pub fn timestamp_ms_to_scene_x(&self, timestamp_ms: i64) -> f64 {
        epoch_ms_to_julian_day(timestamp_ms)
    }

    pub fn scene_x_to_timestamp_ms(&self, x: f64) -> Result<i64> {
        julian_day_to_epoch_ms(x)
    }

    // =========================================================================
    // Y axis: price
    // =========================================================================

    pub fn price_to_scene_y(&self, price: Price) -> Result<f64> {
        let p = price.value();
        if !p.is_finite() {
            bail!("Price {} is not a finite number", p);
        }
        match self.scaling.price_mode {
            PriceScaleMode::Linear => Ok(-p),
            PriceScaleMode::Logarithmic => {
                if !price.is_positive() {
                    bail!("Price {} cannot be placed on a logarithmic scale", p);
                }
                Ok(-p.ln())
            }
        }
    }

    pub fn scene_y_to_price(&self, y: f64) -> Result<Price> {
        if !y.is_finite() {
            bail!("Scene y {} is not a finite number", y);
        }
        let p = match self.scaling.price_mode {
            PriceScaleMode::Linear => -y,
            PriceScaleMode::Logarithmic => (-y).exp(),
        };
        if !p.is_finite() {
            bail!("Scene y {} maps outside the representable price range", y);
        }
        Ok(Price::new(p))
    }

    // =========================================================================
    // Both axes
    // =========================================================================

    pub fn scene_pos_to_domain(&self, pos: ScenePos) -> Result<(DateTime<FixedOffset>, Price)> {
        Ok((self.scene_x_to_datetime(pos.x)?, self.scene_y_to_price(pos.y)?))
    }

    pub fn domain_to_scene_pos<Tz: TimeZone>(&self, dt: &DateTime<Tz>, price: Price) -> Result<ScenePos> {
        Ok(ScenePos::new(self.datetime_to_scene_x(dt), self.price_to_scene_y(price)?))
    }

    /// Scene position of a price at a bar's open time.
    pub fn bar_point_to_scene_pos(&self, timestamp_ms: i64, price: Price) -> Result<ScenePos> {
        Ok(ScenePos::new(
            self.timestamp_ms_to_scene_x(timestamp_ms),
            self.price_to_scene_y(price)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHART;

    fn linear() -> CoordinateConverter {
        CoordinateConverter::utc(ChartScaling::default()).unwrap()
    }

    fn log() -> CoordinateConverter {
        CoordinateConverter::utc(
            ChartScaling::default().with_price_mode(PriceScaleMode::Logarithmic),
        )
        .unwrap()
    }

    #[test]
    fn test_epoch_maps_to_julian_day() {
        let conv = linear();
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(conv.datetime_to_scene_x(&epoch), 2_440_587.5);
        assert_eq!(conv.timestamp_ms_to_scene_x(0), 2_440_587.5);
    }

    #[test]
    fn test_one_day_is_one_scene_unit() {
        let conv = linear();
        let a = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        let b = DateTime::parse_from_rfc3339("2024-01-02T00:00:00Z").unwrap();
        let dx = conv.datetime_to_scene_x(&b) - conv.datetime_to_scene_x(&a);
        assert!((dx - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scene_x_roundtrip() {
        let conv = linear();
        for x in [2_440_587.5, 2_451_545.123_456, 2_460_000.999, 2_300_000.25, 2_600_000.0] {
            let dt = conv.scene_x_to_datetime(x).unwrap();
            let back = conv.datetime_to_scene_x(&dt);
            assert!(
                (back - x).abs() < CHART.conversion_tolerance,
                "x {} came back as {}",
                x,
                back
            );
        }
    }

    #[test]
    fn test_datetime_uses_chart_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let conv = CoordinateConverter::new(ChartScaling::default(), tz).unwrap();
        let dt = conv.scene_x_to_datetime(2_440_587.5).unwrap();
        assert_eq!(dt.offset(), &tz);
        assert_eq!(dt.timestamp(), 0);
        assert_eq!(dt.format("%H").to_string(), "19");
    }

    #[test]
    fn test_scene_x_rejects_garbage() {
        let conv = linear();
        assert!(conv.scene_x_to_datetime(f64::NAN).is_err());
        assert!(conv.scene_x_to_datetime(1e300).is_err());
    }

    #[test]
    fn test_linear_price_is_negated() {
        let conv = linear();
        assert_eq!(conv.price_to_scene_y(Price::new(125.5)).unwrap(), -125.5);
        assert_eq!(conv.scene_y_to_price(40.0).unwrap(), Price::new(-40.0));
    }

    #[test]
    fn test_price_roundtrip_both_modes() {
        for conv in [linear(), log()] {
            for p in [0.0001, 0.5, 1.0, 99.99, 43_210.5] {
                let y = conv.price_to_scene_y(Price::new(p)).unwrap();
                let back = conv.scene_y_to_price(y).unwrap().value();
                assert!((back - p).abs() <= p * 1e-12, "{} -> {} -> {}", p, y, back);
            }
        }
    }

    #[test]
    fn test_log_scale_rejects_non_positive() {
        let conv = log();
        assert!(conv.price_to_scene_y(Price::new(0.0)).is_err());
        assert!(conv.price_to_scene_y(Price::new(-3.0)).is_err());
        assert!(conv.scene_y_to_price(-1e6).is_err());
    }

    #[test]
    fn test_log_scale_orders_prices_upward() {
        let conv = log();
        let low = conv.price_to_scene_y(Price::new(10.0)).unwrap();
        let high = conv.price_to_scene_y(Price::new(100.0)).unwrap();
        assert!(high < low, "higher price must sit higher on a y-down surface");
        // Equal ratios are equal distances
        let higher = conv.price_to_scene_y(Price::new(1000.0)).unwrap();
        assert!(((low - high) - (high - higher)).abs() < 1e-12);
    }

    #[test]
    fn test_domain_roundtrip() {
        let conv = linear();
        let dt = DateTime::parse_from_rfc3339("2008-09-15T13:30:00-04:00").unwrap();
        let pos = conv.domain_to_scene_pos(&dt, Price::new(1192.7)).unwrap();
        let (back_dt, back_price) = conv.scene_pos_to_domain(pos).unwrap();
        assert!((back_dt.timestamp_millis() - dt.timestamp_millis()).abs() <= 1);
        assert!((back_price.value() - 1192.7).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_scaling_rejected() {
        let bad = ChartScaling::new("bad", 0.0, 1.0);
        assert!(CoordinateConverter::utc(bad).is_err());
    }
}
