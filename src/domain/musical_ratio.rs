use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// One step of a modal scale.
///
/// `ratio` is a frequency ratio relative to some root (1.0 = unison, 2.0 = octave).
/// Numerator and denominator are kept only for display when the ratio is just.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicalRatio {
    pub ratio: f64,
    pub description: String,
    #[serde(default)]
    pub numerator: Option<u32>,
    #[serde(default)]
    pub denominator: Option<u32>,
    pub enabled: bool,
}

impl MusicalRatio {
    pub fn new(ratio: f64, description: impl Into<String>) -> Self {
        Self {
            ratio,
            description: description.into(),
            numerator: None,
            denominator: None,
            enabled: true,
        }
    }

    pub fn from_fraction(numerator: u32, denominator: u32, description: impl Into<String>) -> Self {
        let ratio = if denominator == 0 {
            f64::NAN
        } else {
            numerator as f64 / denominator as f64
        };
        Self {
            ratio,
            description: description.into(),
            numerator: Some(numerator),
            denominator: Some(denominator),
            enabled: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ratio.is_finite() && self.ratio > 0.0
    }

    /// "5/4" for just ratios, the decimal value otherwise.
    pub fn fraction_label(&self) -> String {
        match (self.numerator, self.denominator) {
            (Some(n), Some(d)) => format!("{}/{}", n, d),
            _ => format!("{:.6}", self.ratio),
        }
    }
}

impl std::fmt::Display for MusicalRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.fraction_label())
    }
}

/// Ready-made scales. None of them include the octave: the end point of a modal scale
/// already stands for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default)]
pub enum ScalePreset {
    #[default]
    #[strum(to_string = "Just Major")]
    JustMajor,
    #[strum(to_string = "Pythagorean")]
    Pythagorean,
    #[strum(to_string = "Just Chromatic")]
    Chromatic,
    #[strum(to_string = "12-TET")]
    EqualTempered12,
}

impl ScalePreset {
    pub fn ratios(&self) -> Vec<MusicalRatio> {
        match self {
            Self::JustMajor => vec![
                MusicalRatio::from_fraction(1, 1, "C"),
                MusicalRatio::from_fraction(9, 8, "D"),
                MusicalRatio::from_fraction(5, 4, "E"),
                MusicalRatio::from_fraction(4, 3, "F"),
                MusicalRatio::from_fraction(3, 2, "G"),
                MusicalRatio::from_fraction(5, 3, "A"),
                MusicalRatio::from_fraction(15, 8, "B"),
            ],
            Self::Pythagorean => vec![
                MusicalRatio::from_fraction(1, 1, "C"),
                MusicalRatio::from_fraction(9, 8, "D"),
                MusicalRatio::from_fraction(81, 64, "E"),
                MusicalRatio::from_fraction(4, 3, "F"),
                MusicalRatio::from_fraction(3, 2, "G"),
                MusicalRatio::from_fraction(27, 16, "A"),
                MusicalRatio::from_fraction(243, 128, "B"),
            ],
            Self::Chromatic => vec![
                MusicalRatio::from_fraction(1, 1, "C"),
                MusicalRatio::from_fraction(16, 15, "C#"),
                MusicalRatio::from_fraction(9, 8, "D"),
                MusicalRatio::from_fraction(6, 5, "D#"),
                MusicalRatio::from_fraction(5, 4, "E"),
                MusicalRatio::from_fraction(4, 3, "F"),
                MusicalRatio::from_fraction(45, 32, "F#"),
                MusicalRatio::from_fraction(3, 2, "G"),
                MusicalRatio::from_fraction(8, 5, "G#"),
                MusicalRatio::from_fraction(5, 3, "A"),
                MusicalRatio::from_fraction(9, 5, "A#"),
                MusicalRatio::from_fraction(15, 8, "B"),
            ],
            Self::EqualTempered12 => {
                const NAMES: [&str; 12] =
                    ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
                NAMES
                    .iter()
                    .enumerate()
                    .map(|(step, name)| MusicalRatio::new(2f64.powf(step as f64 / 12.0), *name))
                    .collect()
            }
        }
    }
}
