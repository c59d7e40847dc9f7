//! Plain-text tables for the CLI.

use {
    crate::{
        artifacts::{Artifact, RatioLabel, TimeMeasurement},
        config::PriceLike,
        coords::CoordinateConverter,
        data::ChartDocument,
        utils::{TimeUtils, format_datetime, format_duration},
    },
    anyhow::Result,
    itertools::Itertools,
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct ArtifactRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Anchors (scene)")]
    anchors: String,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct RatioRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Ratio")]
    description: String,
    #[tabled(rename = "Fraction")]
    fraction: String,
    #[tabled(rename = "Scene")]
    scene: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    label: String,
    #[tabled(rename = "Scene")]
    scene: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct MeasureRow {
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn artifact_table(doc: &ChartDocument) -> String {
    render(doc.artifacts.iter().map(|a| ArtifactRow {
        id: a.id().to_string(),
        kind: a.kind().to_string(),
        anchors: a.anchors().iter().join(" -> "),
        color: a.color().to_string(),
    }))
}

pub fn ratio_table(labels: &[RatioLabel]) -> String {
    render(labels.iter().map(|l| RatioRow {
        index: l.index,
        description: l.description.clone(),
        fraction: format!("{:.6}", l.fraction),
        scene: l.pos.to_string(),
        time: format_datetime(&l.timestamp),
        price: l.price.format_price(),
    }))
}

pub fn measurement_table(m: &TimeMeasurement) -> String {
    let span_ms = (m.days * TimeUtils::MS_IN_D as f64).round() as i64;
    let rows = [
        ("span", format_duration(span_ms)),
        ("bars", m.bars.to_string()),
        ("sqrt(bars)", format!("{:.4}", m.sqrt_bars)),
        ("seconds", format!("{:.2}", m.seconds)),
        ("minutes", format!("{:.2}", m.minutes)),
        ("hours", format!("{:.4}", m.hours)),
        ("days", format!("{:.4}", m.days)),
        ("sqrt(days)", format!("{:.4}", m.sqrt_days)),
        ("weeks", format!("{:.4}", m.weeks)),
        ("months", format!("{:.4}", m.months)),
        ("years", format!("{:.4}", m.years)),
    ];
    render(rows.into_iter().map(|(unit, value)| MeasureRow { unit, value }))
}

/// Derived values of one artifact under `conv`, headed by its kind and id.
pub fn artifact_details(
    artifact: &Artifact,
    doc: &ChartDocument,
    conv: &CoordinateConverter,
) -> Result<String> {
    let header = format!("{} {}", artifact.kind(), artifact.id());
    let body = match artifact {
        Artifact::Text(a) => format!(
            "\"{}\" ({} line(s)) at {} / {}",
            a.text,
            a.line_count(),
            format_datetime(&a.timestamp(conv)?),
            a.price(conv)?
        ),
        Artifact::BarCount(a) => format!("{} bar(s) in range", a.count_bars(&doc.price_bars, conv)),
        Artifact::TimeMeasurement(a) => measurement_table(&a.measure(&doc.price_bars, conv)),
        Artifact::ModalScale(a) => {
            let root = a.root().map(|r| r.description.as_str()).unwrap_or("-");
            format!(
                "axis {}, root {}, reversed {}\n{}",
                a.axis,
                root,
                a.reversed,
                ratio_table(&a.ratio_labels(conv)?)
            )
        }
        Artifact::GannFan(a) => {
            let rows = a.rays()?.into_iter().map(|ray| {
                let value = match conv.scene_y_to_price(ray.end.y) {
                    Ok(price) => price.format_price(),
                    Err(_) => "n/a".to_string(),
                };
                LevelRow {
                    label: ray.label,
                    scene: ray.end.to_string(),
                    value,
                }
            });
            render(rows)
        }
        Artifact::PriceRetracement(a) => render(a.levels(conv)?.into_iter().map(|l| LevelRow {
            label: format!("{:.3}", l.ratio),
            scene: format!("y={:.6}", l.scene_y),
            value: l.price.format_price(),
        })),
        Artifact::TimeRetracement(a) => render(a.levels(conv)?.into_iter().map(|l| LevelRow {
            label: format!("{:.3}", l.ratio),
            scene: format!("x={:.6}", l.scene_x),
            value: format_datetime(&l.timestamp),
        })),
    };
    Ok(format!("{header}\n{body}"))
}
