mod maths_utils;
mod time_utils;

pub use time_utils::{
    TimeUtils, datetime_to_julian_day, epoch_ms_to_julian_day, format_datetime, format_duration,
    julian_day_to_epoch_ms, julian_day_to_utc,
};

pub use maths_utils::{GEOMETRY_EPSILON, approx_eq, fold_into_octave, lerp};
