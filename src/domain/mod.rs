// Domain types and value objects
mod musical_ratio;
mod price_bar;
mod scene;

pub use musical_ratio::{MusicalRatio, ScalePreset};
pub use price_bar::{BarType, PriceBar};
pub use scene::{ScenePos, SceneRect, ViewPos};
