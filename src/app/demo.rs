use {
    crate::{
        artifacts::{
            BarCountArtifact, GannFanArtifact, ModalScaleArtifact, PriceRetracementArtifact,
            TextArtifact, TimeMeasurementArtifact, TimeRetracementArtifact,
        },
        config::{Price, PriceLike, PriceScaleMode},
        data::ChartDocument,
        domain::{PriceBar, ScalePreset},
        utils::TimeUtils,
    },
    anyhow::{Context, Result},
    chrono::{NaiveDate, TimeZone, Utc},
};

const DEMO_BARS: usize = 180;

/// Deterministic daily bars: two overlapping waves around 100.
pub fn demo_price_bars(start_ms: i64) -> Vec<PriceBar> {
    let mut bars = Vec::with_capacity(DEMO_BARS);
    let mut prev_close = 100.0_f64;
    for i in 0..DEMO_BARS {
        let t = i as f64;
        let close = 100.0 + 20.0 * (t / 15.0).sin() + 5.0 * (t / 4.0).sin();
        let open = prev_close;
        let high = open.max(close) + 1.5;
        let low = open.min(close) - 1.5;
        let volume = 1_000.0 + 400.0 * (close - open).abs();
        bars.push(
            PriceBar::new(start_ms + i as i64 * TimeUtils::MS_IN_D, open, high, low, close)
                .with_volume(volume),
        );
        prev_close = close;
    }
    bars
}

/// A document with price data and one artifact of every kind.
pub fn demo_document(name: &str, price_mode: PriceScaleMode) -> Result<ChartDocument> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("Invalid demo start date")?;
    let start_ms = Utc.from_utc_datetime(&start).timestamp_millis();

    let mut doc = ChartDocument::new(name);
    doc.description = "Generated sample chart".to_string();
    doc.scaling = doc.scaling.clone().with_price_mode(price_mode);
    doc.set_price_bars(demo_price_bars(start_ms));
    let conv = doc.converter()?;

    let low_bar = doc
        .price_bars
        .iter()
        .min_by(|a, b| a.low_price.value().total_cmp(&b.low_price.value()))
        .context("Demo has no bars")?;
    let high_bar = doc
        .price_bars
        .iter()
        .max_by(|a, b| a.high_price.value().total_cmp(&b.high_price.value()))
        .context("Demo has no bars")?;

    let low = conv.bar_point_to_scene_pos(low_bar.timestamp_ms, low_bar.low_price)?;
    let high = conv.bar_point_to_scene_pos(high_bar.timestamp_ms, high_bar.high_price)?;
    let (first, last) = match (doc.price_bars.first(), doc.price_bars.last()) {
        (Some(f), Some(l)) => (
            conv.bar_point_to_scene_pos(f.timestamp_ms, f.close_price)?,
            conv.bar_point_to_scene_pos(l.timestamp_ms, l.close_price)?,
        ),
        _ => (low, high),
    };
    let month_later = conv.bar_point_to_scene_pos(
        start_ms + 30 * TimeUtils::MS_IN_D,
        Price::new(100.0),
    )?;

    doc.add_artifact(TextArtifact::new(high, "Swing high"));
    doc.add_artifact(BarCountArtifact::new(first, month_later));
    doc.add_artifact(TimeMeasurementArtifact::new(low, high));
    doc.add_artifact(ModalScaleArtifact::from_preset(low, high, ScalePreset::JustMajor));
    doc.add_artifact(GannFanArtifact::new(low, high));
    doc.add_artifact(PriceRetracementArtifact::new(low, high));
    doc.add_artifact(TimeRetracementArtifact::new(first, last));

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactKind;
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    #[test]
    fn test_demo_bars_are_daily_and_consistent() {
        let bars = demo_price_bars(0);
        assert_eq!(bars.len(), DEMO_BARS);
        for (a, b) in bars.iter().tuple_windows() {
            assert_eq!(b.timestamp_ms - a.timestamp_ms, TimeUtils::MS_IN_D);
            assert_eq!(b.open_price, a.close_price);
        }
        assert!(bars.iter().all(|b| b.low_price <= b.open_price && b.high_price >= b.close_price));
        assert!(bars.iter().all(|b| b.volume.is_some_and(|v| v >= 1_000.0)));
    }

    #[test]
    fn test_demo_document_has_every_kind() {
        let doc = demo_document("demo", PriceScaleMode::Logarithmic).unwrap();
        assert_eq!(doc.scaling.price_mode, PriceScaleMode::Logarithmic);
        for kind in ArtifactKind::iter() {
            assert_eq!(doc.artifacts_of_kind(kind).count(), 1, "{kind}");
        }
    }
}
