//! Chart annotations ("artifacts").
//!
//! Every artifact stores its geometry in scene coordinates only. Timestamps and prices are
//! derived on demand through a [`CoordinateConverter`], so changing the chart's timezone or
//! scaling never leaves stale domain values behind.

mod bar_count;
mod gann_fan;
mod modal_scale;
mod retracement;
mod text;
mod time_measurement;

pub use {
    bar_count::BarCountArtifact,
    gann_fan::{GannAngle, GannFanArtifact, GannRay},
    modal_scale::{ModalScaleArtifact, ModalScaleAxis, RatioLabel, RatioPoint},
    retracement::{
        PriceLevel, PriceRetracementArtifact, RetracementLevel, TimeLevel, TimeRetracementArtifact,
    },
    text::TextArtifact,
    time_measurement::{TimeMeasurement, TimeMeasurementArtifact},
};

use {
    crate::{
        config::Rgba,
        coords::CoordinateConverter,
        domain::{PriceBar, ScenePos, SceneRect},
    },
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
    uuid::Uuid,
};

/// Unique identifier for an artifact, stable across save/load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ArtifactKind {
    #[strum(to_string = "Text")]
    Text,
    #[strum(to_string = "Bar Count")]
    BarCount,
    #[strum(to_string = "Time Measurement")]
    TimeMeasurement,
    #[strum(to_string = "Modal Scale")]
    ModalScale,
    #[strum(to_string = "Gann Fan")]
    GannFan,
    #[strum(to_string = "Price Retracement")]
    PriceRetracement,
    #[strum(to_string = "Time Retracement")]
    TimeRetracement,
}

/// Enum wrapping all artifact types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Artifact {
    Text(TextArtifact),
    BarCount(BarCountArtifact),
    TimeMeasurement(TimeMeasurementArtifact),
    ModalScale(ModalScaleArtifact),
    GannFan(GannFanArtifact),
    PriceRetracement(PriceRetracementArtifact),
    TimeRetracement(TimeRetracementArtifact),
}

impl Artifact {
    pub fn id(&self) -> ArtifactId {
        match self {
            Artifact::Text(a) => a.id,
            Artifact::BarCount(a) => a.id,
            Artifact::TimeMeasurement(a) => a.id,
            Artifact::ModalScale(a) => a.id,
            Artifact::GannFan(a) => a.id,
            Artifact::PriceRetracement(a) => a.id,
            Artifact::TimeRetracement(a) => a.id,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Text(_) => ArtifactKind::Text,
            Artifact::BarCount(_) => ArtifactKind::BarCount,
            Artifact::TimeMeasurement(_) => ArtifactKind::TimeMeasurement,
            Artifact::ModalScale(_) => ArtifactKind::ModalScale,
            Artifact::GannFan(_) => ArtifactKind::GannFan,
            Artifact::PriceRetracement(_) => ArtifactKind::PriceRetracement,
            Artifact::TimeRetracement(_) => ArtifactKind::TimeRetracement,
        }
    }

    /// All user-draggable points of this artifact.
    pub fn anchors(&self) -> Vec<ScenePos> {
        match self {
            Artifact::Text(a) => vec![a.pos],
            Artifact::BarCount(a) => vec![a.start, a.end],
            Artifact::TimeMeasurement(a) => vec![a.start, a.end],
            Artifact::ModalScale(a) => vec![a.start, a.end],
            Artifact::GannFan(a) => vec![a.origin, a.leg],
            Artifact::PriceRetracement(a) => vec![a.start, a.end],
            Artifact::TimeRetracement(a) => vec![a.start, a.end],
        }
    }

    fn anchor_mut(&mut self, index: usize) -> Option<&mut ScenePos> {
        match (self, index) {
            (Artifact::Text(a), 0) => Some(&mut a.pos),
            (Artifact::BarCount(a), 0) => Some(&mut a.start),
            (Artifact::BarCount(a), 1) => Some(&mut a.end),
            (Artifact::TimeMeasurement(a), 0) => Some(&mut a.start),
            (Artifact::TimeMeasurement(a), 1) => Some(&mut a.end),
            (Artifact::ModalScale(a), 0) => Some(&mut a.start),
            (Artifact::ModalScale(a), 1) => Some(&mut a.end),
            (Artifact::GannFan(a), 0) => Some(&mut a.origin),
            (Artifact::GannFan(a), 1) => Some(&mut a.leg),
            (Artifact::PriceRetracement(a), 0) => Some(&mut a.start),
            (Artifact::PriceRetracement(a), 1) => Some(&mut a.end),
            (Artifact::TimeRetracement(a), 0) => Some(&mut a.start),
            (Artifact::TimeRetracement(a), 1) => Some(&mut a.end),
            _ => None,
        }
    }

    /// Move one anchor. Returns false if the artifact has no anchor at `index`.
    pub fn set_anchor(&mut self, index: usize, pos: ScenePos) -> bool {
        match self.anchor_mut(index) {
            Some(anchor) => {
                *anchor = pos;
                true
            }
            None => false,
        }
    }

    /// Move all anchors by the given scene delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let mut index = 0;
        while let Some(anchor) = self.anchor_mut(index) {
            *anchor = anchor.translate(dx, dy);
            index += 1;
        }
    }

    pub fn bounding_rect(&self) -> SceneRect {
        let anchors = self.anchors();
        // Every variant has at least one anchor
        SceneRect::bounding(anchors).unwrap_or(SceneRect::from_points(ScenePos::default(), ScenePos::default()))
    }

    pub fn color(&self) -> Rgba {
        match self {
            Artifact::Text(a) => a.color,
            Artifact::BarCount(a) => a.color,
            Artifact::TimeMeasurement(a) => a.color,
            Artifact::ModalScale(a) => a.color,
            Artifact::GannFan(a) => a.color,
            Artifact::PriceRetracement(a) => a.color,
            Artifact::TimeRetracement(a) => a.color,
        }
    }
}

macro_rules! impl_from_artifact {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Artifact {
            fn from(a: $ty) -> Self {
                Artifact::$variant(a)
            }
        }
    };
}

impl_from_artifact!(Text, TextArtifact);
impl_from_artifact!(BarCount, BarCountArtifact);
impl_from_artifact!(TimeMeasurement, TimeMeasurementArtifact);
impl_from_artifact!(ModalScale, ModalScaleArtifact);
impl_from_artifact!(GannFan, GannFanArtifact);
impl_from_artifact!(PriceRetracement, PriceRetracementArtifact);
impl_from_artifact!(TimeRetracement, TimeRetracementArtifact);

/// Bars whose open time falls in the closed scene-x interval spanned by `x0` and `x1`.
pub(crate) fn count_bars_between(
    bars: &[PriceBar],
    conv: &CoordinateConverter,
    x0: f64,
    x1: f64,
) -> usize {
    let (lo, hi) = (x0.min(x1), x0.max(x1));
    bars.iter()
        .map(|bar| conv.timestamp_ms_to_scene_x(bar.timestamp_ms))
        .filter(|x| *x >= lo && *x <= hi)
        .count()
}
