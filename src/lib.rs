#![allow(clippy::collapsible_if)]

// Core modules
pub mod app;
pub mod artifacts;
pub mod config;
pub mod coords;
pub mod data;
pub mod domain;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use app::run;
pub use artifacts::{Artifact, ArtifactId, ArtifactKind, ModalScaleArtifact};
pub use config::{CHART, PERSISTENCE, Price, PriceScaleMode};
pub use coords::{ChartScaling, CoordinateConverter, Viewport};
pub use data::ChartDocument;
pub use domain::{MusicalRatio, PriceBar, ScalePreset, ScenePos};

// CLI argument parsing
use {
    artifacts::ModalScaleAxis,
    clap::{Parser, Subcommand, ValueEnum},
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Display timezone, in hours east of UTC
    #[arg(long, global = true, default_value_t = 0.0, allow_negative_numbers = true)]
    pub utc_offset_hours: f64,

    /// Map price logarithmically onto scene Y
    #[arg(long, global = true, default_value_t = false)]
    pub log_scale: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scene coordinates to timestamp and price
    Convert {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Timestamp (RFC 3339) and price to scene coordinates
    ToScene {
        #[arg(long)]
        datetime: String,
        #[arg(long)]
        price: f64,
    },
    /// Lay a modal scale out between two scene points
    ModalScale {
        #[arg(long, allow_negative_numbers = true)]
        start_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        start_y: f64,
        #[arg(long, allow_negative_numbers = true)]
        end_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        end_y: f64,
        #[arg(long, value_enum, default_value_t = PresetArg::JustMajor)]
        preset: PresetArg,
        #[arg(long, value_enum, default_value_t = AxisArg::Diagonal)]
        axis: AxisArg,
        /// Steps to rotate the root (negative rotates down)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotate: i32,
        /// Reverse the scale before rotating
        #[arg(long, default_value_t = false)]
        reverse: bool,
    },
    /// Print a saved chart's artifacts and their derived values
    Inspect {
        path: PathBuf,
        /// Use --utc-offset-hours/--log-scale instead of the chart's own settings
        #[arg(long, default_value_t = false)]
        use_flags: bool,
    },
    /// Write a sample chart (a directory gets the default file name)
    Demo { path: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    JustMajor,
    Pythagorean,
    Chromatic,
    Tet12,
}

impl From<PresetArg> for ScalePreset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::JustMajor => ScalePreset::JustMajor,
            PresetArg::Pythagorean => ScalePreset::Pythagorean,
            PresetArg::Chromatic => ScalePreset::Chromatic,
            PresetArg::Tet12 => ScalePreset::EqualTempered12,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisArg {
    Diagonal,
    Time,
    Price,
}

impl From<AxisArg> for ModalScaleAxis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Diagonal => ModalScaleAxis::Diagonal,
            AxisArg::Time => ModalScaleAxis::Time,
            AxisArg::Price => ModalScaleAxis::Price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_negative_scene_values() {
        let cli = Cli::try_parse_from([
            "cycle-charter",
            "--utc-offset-hours",
            "-5",
            "modal-scale",
            "--start-x",
            "2460000.5",
            "--start-y",
            "-100",
            "--end-x",
            "2460010.5",
            "--end-y",
            "-200",
            "--rotate",
            "-2",
            "--preset",
            "tet12",
        ])
        .unwrap();
        assert_eq!(cli.utc_offset_hours, -5.0);
        match cli.command {
            Command::ModalScale { start_y, rotate, preset, .. } => {
                assert_eq!(start_y, -100.0);
                assert_eq!(rotate, -2);
                assert_eq!(preset, PresetArg::Tet12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["cycle-charter", "convert", "--x", "1", "--y", "-2", "--log-scale"]).unwrap();
        assert!(cli.log_scale);
    }
}
