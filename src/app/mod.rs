mod commands;
mod demo;

pub use demo::{demo_document, demo_price_bars};

use {
    crate::{
        Cli, Command,
        config::PriceScaleMode,
        coords::{ChartScaling, CoordinateConverter},
        domain::ScenePos,
    },
    anyhow::{Context, Result, bail},
    chrono::FixedOffset,
};

/// Converter built from the global CLI flags.
pub fn converter_from_cli(cli: &Cli) -> Result<CoordinateConverter> {
    let offset = utc_offset_from_hours(cli.utc_offset_hours)?;
    let mode = if cli.log_scale {
        PriceScaleMode::Logarithmic
    } else {
        PriceScaleMode::Linear
    };
    CoordinateConverter::new(ChartScaling::default().with_price_mode(mode), offset)
}

pub fn utc_offset_from_hours(hours: f64) -> Result<FixedOffset> {
    if !hours.is_finite() {
        bail!("UTC offset {} is not a finite number of hours", hours);
    }
    let secs = (hours * 3600.0).round() as i32;
    FixedOffset::east_opt(secs).with_context(|| format!("UTC offset out of range: {hours} hours"))
}

pub fn run(cli: Cli) -> Result<()> {
    let conv = converter_from_cli(&cli)?;
    log::info!(
        "Converter: {} with UTC offset {}",
        conv.scaling(),
        conv.utc_offset()
    );

    match cli.command {
        Command::Convert { x, y } => commands::convert(&conv, x, y),
        Command::ToScene { datetime, price } => commands::to_scene(&conv, &datetime, price),
        Command::ModalScale {
            start_x,
            start_y,
            end_x,
            end_y,
            preset,
            axis,
            rotate,
            reverse,
        } => commands::modal_scale(
            &conv,
            commands::ModalScaleArgs {
                start: ScenePos::new(start_x, start_y),
                end: ScenePos::new(end_x, end_y),
                preset,
                axis: axis.into(),
                rotate,
                reverse,
            },
        ),
        Command::Inspect { path, use_flags } => {
            commands::inspect(if use_flags { Some(&conv) } else { None }, &path)
        }
        Command::Demo { path } => commands::demo(&path, cli.log_scale, conv.utc_offset().local_minus_utc()),
    }
}
