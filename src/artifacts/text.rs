use {
    super::ArtifactId,
    crate::{
        config::{CHART, FontDescription, Price, Rgba},
        coords::CoordinateConverter,
        domain::ScenePos,
    },
    anyhow::Result,
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
};

/// Free text placed on the chart. `pos` is the top-left of the text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextArtifact {
    pub id: ArtifactId,
    pub pos: ScenePos,
    pub text: String,
    #[serde(default)]
    pub font: FontDescription,
    pub color: Rgba,
    /// Stretch applied on top of the font size, so text can follow a chart scaling.
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TextArtifact {
    pub fn new(pos: ScenePos, text: impl Into<String>) -> Self {
        Self {
            id: ArtifactId::new(),
            pos,
            text: text.into(),
            font: FontDescription::default(),
            color: CHART.color_text,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn timestamp(&self, conv: &CoordinateConverter) -> Result<DateTime<FixedOffset>> {
        conv.scene_x_to_datetime(self.pos.x)
    }

    pub fn price(&self, conv: &CoordinateConverter) -> Result<Price> {
        conv.scene_y_to_price(self.pos.y)
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::PriceLike, coords::ChartScaling};

    #[test]
    fn test_text_derives_domain_values() {
        let conv = CoordinateConverter::utc(ChartScaling::default()).unwrap();
        let text = TextArtifact::new(ScenePos::new(2_440_588.5, -42.0), "Mars ingress\nAries");
        assert_eq!(text.timestamp(&conv).unwrap().timestamp(), 86_400);
        assert_eq!(text.price(&conv).unwrap().value(), 42.0);
        assert_eq!(text.line_count(), 2);
        assert_eq!(text.font.family, CHART.default_font_family);
    }
}
