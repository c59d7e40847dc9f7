//! Modal scale: musical ratios laid out along a start/end span.
//!
//! The ratio that maps onto the anchor point is the *root*. Every other ratio is divided by
//! the root and folded into the octave above it, and its fraction of the way to the far point
//! is `normalized - 1`. The far point is therefore the octave of the root.
//!
//! Reordering never touches ratio values:
//! - `rotate_up`/`rotate_down` move the root one step up or down the scale.
//! - `reverse` flips iteration order and swaps which end is the anchor.

use {
    super::ArtifactId,
    crate::{
        config::{CHART, Price, Rgba},
        coords::CoordinateConverter,
        domain::{MusicalRatio, ScalePreset, ScenePos},
        utils::fold_into_octave,
    },
    anyhow::{Result, bail},
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Which coordinates follow the ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default)]
pub enum ModalScaleAxis {
    #[default]
    Diagonal,
    /// Only x moves; every point sits at the start's y.
    Time,
    /// Only y moves; every point sits at the start's x.
    Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalScaleArtifact {
    pub id: ArtifactId,
    pub start: ScenePos,
    pub end: ScenePos,
    pub ratios: Vec<MusicalRatio>,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub axis: ModalScaleAxis,
    #[serde(default = "default_true")]
    pub text_enabled: bool,
    pub color: Rgba,
}

fn default_true() -> bool {
    true
}

/// A ratio with its derived position.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioPoint<'a> {
    pub index: usize,
    pub ratio: &'a MusicalRatio,
    pub fraction: f64,
    pub pos: ScenePos,
}

/// A ratio position translated to chart values.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioLabel {
    pub index: usize,
    pub description: String,
    pub fraction: f64,
    pub pos: ScenePos,
    pub timestamp: DateTime<FixedOffset>,
    pub price: Price,
}

impl ModalScaleArtifact {
    pub fn new(start: ScenePos, end: ScenePos, ratios: Vec<MusicalRatio>) -> Self {
        Self {
            id: ArtifactId::new(),
            start,
            end,
            ratios,
            reversed: false,
            axis: ModalScaleAxis::default(),
            text_enabled: true,
            color: CHART.color_modal_scale,
        }
    }

    pub fn from_preset(start: ScenePos, end: ScenePos, preset: ScalePreset) -> Self {
        Self::new(start, end, preset.ratios())
    }

    pub fn with_axis(mut self, axis: ModalScaleAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Index of the ratio that sits on the anchor point, `None` for an empty scale.
    pub fn root_index(&self) -> Option<usize> {
        match (self.ratios.len(), self.reversed) {
            (0, _) => None,
            (_, false) => Some(0),
            (n, true) => Some(n - 1),
        }
    }

    pub fn root(&self) -> Option<&MusicalRatio> {
        self.root_index().map(|i| &self.ratios[i])
    }

    /// Point the root sits on, and the point its octave sits on.
    fn anchor_and_far(&self) -> (ScenePos, ScenePos) {
        if self.reversed {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        }
    }

    /// Move the root one step up the scale.
    pub fn rotate_up(&mut self) {
        self.rotate(1);
    }

    /// Move the root one step down the scale.
    pub fn rotate_down(&mut self) {
        self.rotate(-1);
    }

    /// Rotate by `steps` (positive is up). Whole turns of the scale are dropped first.
    pub fn rotate(&mut self, steps: i32) {
        let len = self.ratios.len();
        if len == 0 {
            return;
        }
        let up = i64::from(steps).rem_euclid(len as i64) as usize;
        if up == 0 {
            return;
        }
        if self.reversed {
            self.ratios.rotate_right(up);
        } else {
            self.ratios.rotate_left(up);
        }
        log::debug!(
            "Modal scale {} rotated by {}, root now {:?}",
            self.id,
            steps,
            self.root().map(|r| &r.description)
        );
    }

    /// Flip direction: the root now sits on the other end.
    pub fn reverse(&mut self) {
        self.ratios.reverse();
        self.reversed = !self.reversed;
        log::debug!("Modal scale {} reversed={}", self.id, self.reversed);
    }

    /// Fraction of the span covered by the ratio at `index`.
    pub fn fraction_for_musical_ratio(&self, index: usize) -> Result<f64> {
        let Some(root) = self.root() else {
            bail!("Modal scale {} has no musical ratios", self.id);
        };
        let Some(ratio) = self.ratios.get(index) else {
            bail!(
                "Musical ratio index {} out of range (scale has {})",
                index,
                self.ratios.len()
            );
        };
        if !root.is_valid() {
            bail!("Root ratio {} of modal scale {} is not positive", root.ratio, self.id);
        }
        if !ratio.is_valid() {
            bail!("Musical ratio {} at index {} is not positive", ratio.ratio, index);
        }
        if !ratio.enabled {
            log::warn!("Modal scale {}: querying disabled ratio {}", self.id, ratio.description);
        }

        Ok(fold_into_octave(ratio.ratio / root.ratio) - 1.0)
    }

    /// Scene position of the ratio at `index` (in current iteration order).
    pub fn xy_for_musical_ratio(&self, index: usize) -> Result<ScenePos> {
        let fraction = self.fraction_for_musical_ratio(index)?;
        let (anchor, far) = self.anchor_and_far();
        let p = anchor.lerp(far, fraction);

        Ok(match self.axis {
            ModalScaleAxis::Diagonal => p,
            ModalScaleAxis::Time => ScenePos::new(p.x, self.start.y),
            ModalScaleAxis::Price => ScenePos::new(self.start.x, p.y),
        })
    }

    /// Enabled ratios with their scene positions, in iteration order.
    pub fn ratio_points(&self) -> Result<Vec<RatioPoint<'_>>> {
        self.ratios
            .iter()
            .enumerate()
            .filter(|(_, r)| r.enabled)
            .map(|(index, ratio)| {
                Ok(RatioPoint {
                    index,
                    ratio,
                    fraction: self.fraction_for_musical_ratio(index)?,
                    pos: self.xy_for_musical_ratio(index)?,
                })
            })
            .collect()
    }

    pub fn ratio_labels(&self, conv: &CoordinateConverter) -> Result<Vec<RatioLabel>> {
        self.ratio_points()?
            .into_iter()
            .map(|point| {
                let (timestamp, price) = conv.scene_pos_to_domain(point.pos)?;
                Ok(RatioLabel {
                    index: point.index,
                    description: point.ratio.description.clone(),
                    fraction: point.fraction,
                    pos: point.pos,
                    timestamp,
                    price,
                })
            })
            .collect()
    }

    pub fn set_ratio_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        match self.ratios.get_mut(index) {
            Some(r) => {
                r.enabled = enabled;
                Ok(())
            }
            None => bail!("Musical ratio index {} out of range", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::PriceLike, coords::ChartScaling, utils::approx_eq};

    const EPS: f64 = 1e-9;

    fn scale() -> ModalScaleArtifact {
        ModalScaleArtifact::from_preset(
            ScenePos::new(100.0, -10.0),
            ScenePos::new(200.0, -30.0),
            ScalePreset::JustMajor,
        )
    }

    fn descriptions(ms: &ModalScaleArtifact) -> Vec<&str> {
        ms.ratios.iter().map(|r| r.description.as_str()).collect()
    }

    fn point_of(ms: &ModalScaleArtifact, description: &str) -> ScenePos {
        let idx = ms.ratios.iter().position(|r| r.description == description).unwrap();
        ms.xy_for_musical_ratio(idx).unwrap()
    }

    #[test]
    fn test_root_sits_on_start_and_fifth_halfway() {
        let ms = scale();
        assert_eq!(ms.xy_for_musical_ratio(0).unwrap(), ms.start);
        // G = 3/2 -> fraction 0.5
        let g = point_of(&ms, "G");
        assert!(approx_eq(g.x, 150.0, EPS) && approx_eq(g.y, -20.0, EPS));
        // E = 5/4 -> fraction 0.25
        let e = point_of(&ms, "E");
        assert!(approx_eq(e.x, 125.0, EPS) && approx_eq(e.y, -15.0, EPS));
    }

    #[test]
    fn test_rotate_up_then_down_is_identity() {
        let original = scale();
        let mut ms = original.clone();
        ms.rotate_up();
        assert_eq!(descriptions(&ms), ["D", "E", "F", "G", "A", "B", "C"]);
        ms.rotate_down();
        assert_eq!(ms, original);
    }

    #[test]
    fn test_full_rotation_is_identity() {
        let original = scale();
        let mut ms = original.clone();
        ms.rotate(original.ratios.len() as i32);
        assert_eq!(ms, original);
        ms.rotate(-(original.ratios.len() as i32));
        assert_eq!(ms, original);
    }

    #[test]
    fn test_large_rotation_reduces_to_remainder() {
        let original = scale();
        let len = original.ratios.len() as i32;

        let mut big = original.clone();
        big.rotate(70_000_003);
        let mut small = original.clone();
        small.rotate(70_000_003 % len);
        assert_eq!(big, small);

        let mut min = original.clone();
        min.rotate(i32::MIN);
        let mut expected = original.clone();
        expected.rotate(i32::MIN.rem_euclid(len));
        assert_eq!(min, expected);
    }

    #[test]
    fn test_reversed_rotation_is_undone() {
        let mut original = scale();
        original.reverse();
        let root = original.root().unwrap().description.clone();

        let mut ms = original.clone();
        ms.rotate_up();
        assert_ne!(ms.root().unwrap().description, root);
        ms.rotate_down();
        assert_eq!(ms, original);

        ms.rotate(3);
        ms.rotate(-3);
        assert_eq!(ms, original);
        ms.rotate(-(original.ratios.len() as i32));
        assert_eq!(ms, original);

        // Up still means up the scale: the root moves from C to D
        let mut up = original.clone();
        up.rotate_up();
        assert_eq!(up.root().unwrap().description, "D");
    }

    #[test]
    fn test_rotation_renormalises_to_new_root() {
        let mut ms = scale();
        ms.rotate_up();
        // Root D = 9/8 sits on start, C folds up to 16/9 of D
        assert_eq!(ms.root().unwrap().description, "D");
        assert_eq!(point_of(&ms, "D"), ms.start);
        let c_fraction = ms.fraction_for_musical_ratio(6).unwrap();
        assert!(approx_eq(c_fraction, 16.0 / 9.0 - 1.0, EPS));
        // Ratio values are untouched
        assert_eq!(ms.ratios[0].ratio, 9.0 / 8.0);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let original = scale();
        let mut ms = original.clone();
        ms.reverse();
        assert!(ms.reversed);
        assert_eq!(descriptions(&ms), ["B", "A", "G", "F", "E", "D", "C"]);
        ms.reverse();
        assert_eq!(ms, original);
    }

    #[test]
    fn test_reverse_keeps_root_and_mirrors_points() {
        let forward = scale();
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(reversed.root().unwrap().description, "C");
        assert_eq!(point_of(&reversed, "C"), forward.end);

        for r in &forward.ratios {
            let p = point_of(&forward, &r.description);
            let q = point_of(&reversed, &r.description);
            assert!(approx_eq(q.x, forward.start.x + forward.end.x - p.x, EPS));
            assert!(approx_eq(q.y, forward.start.y + forward.end.y - p.y, EPS));
        }
    }

    #[test]
    fn test_reverse_and_rotate_commute() {
        let base = scale();
        let mut a = base.clone();
        a.reverse();
        a.rotate_up();

        let mut b = base.clone();
        b.rotate_up();
        b.reverse();

        assert_eq!(a, b);
        assert_eq!(a.root().unwrap().description, "D");
    }

    #[test]
    fn test_time_and_price_axes() {
        let time = scale().with_axis(ModalScaleAxis::Time);
        let g = point_of(&time, "G");
        assert!(approx_eq(g.x, 150.0, EPS));
        assert_eq!(g.y, time.start.y);

        let price = scale().with_axis(ModalScaleAxis::Price);
        let g = point_of(&price, "G");
        assert_eq!(g.x, price.start.x);
        assert!(approx_eq(g.y, -20.0, EPS));
    }

    #[test]
    fn test_errors() {
        let empty = ModalScaleArtifact::new(ScenePos::default(), ScenePos::new(1.0, 1.0), vec![]);
        assert!(empty.xy_for_musical_ratio(0).is_err());
        assert!(empty.root().is_none());

        let ms = scale();
        assert!(ms.xy_for_musical_ratio(99).is_err());

        let bad = ModalScaleArtifact::new(
            ScenePos::default(),
            ScenePos::new(1.0, 1.0),
            vec![MusicalRatio::new(1.0, "root"), MusicalRatio::new(-2.0, "bad")],
        );
        assert!(bad.xy_for_musical_ratio(0).is_ok());
        assert!(bad.xy_for_musical_ratio(1).is_err());
    }

    #[test]
    fn test_ratio_points_skip_disabled() {
        let mut ms = scale();
        ms.set_ratio_enabled(1, false).unwrap();
        let points = ms.ratio_points().unwrap();
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.index != 1));
        assert!(ms.set_ratio_enabled(50, false).is_err());
    }

    #[test]
    fn test_ratio_labels_derive_domain_values() {
        let conv = CoordinateConverter::utc(ChartScaling::default()).unwrap();
        let ms = ModalScaleArtifact::from_preset(
            ScenePos::new(2_460_000.5, -100.0),
            ScenePos::new(2_460_010.5, -200.0),
            ScalePreset::JustMajor,
        );
        let labels = ms.ratio_labels(&conv).unwrap();
        let g = labels.iter().find(|l| l.description == "G").unwrap();
        assert!(approx_eq(g.price.value(), 150.0, 1e-9));
        assert!(approx_eq(conv.datetime_to_scene_x(&g.timestamp), 2_460_005.5, 1e-6));
    }
}
