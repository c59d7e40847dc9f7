use {
    anyhow::{Result, bail},
    chrono::{DateTime, TimeZone, Utc},
};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;

    pub const SECS_IN_D: f64 = 86_400.0;
    pub const NANOS_IN_S: f64 = 1_000_000_000.0;

    /// Mean Gregorian month and year, in days.
    pub const DAYS_IN_MONTH: f64 = 30.436875;
    pub const DAYS_IN_YEAR: f64 = 365.2425;

    /// Julian Day of 1970-01-01T00:00:00Z.
    pub const JULIAN_DAY_UNIX_EPOCH: f64 = 2_440_587.5;

    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
}

// Julian Day helpers

/// Fractional Julian Day of any instant, independent of its timezone.
pub fn datetime_to_julian_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / TimeUtils::NANOS_IN_S;
    secs / TimeUtils::SECS_IN_D + TimeUtils::JULIAN_DAY_UNIX_EPOCH
}

pub fn epoch_ms_to_julian_day(epoch_ms: i64) -> f64 {
    epoch_ms as f64 / TimeUtils::MS_IN_D as f64 + TimeUtils::JULIAN_DAY_UNIX_EPOCH
}

/// Inverse of [`datetime_to_julian_day`], rounded to the nearest nanosecond.
pub fn julian_day_to_utc(jd: f64) -> Result<DateTime<Utc>> {
    if !jd.is_finite() {
        bail!("Julian day {} is not a finite number", jd);
    }

    let secs_f = (jd - TimeUtils::JULIAN_DAY_UNIX_EPOCH) * TimeUtils::SECS_IN_D;
    let mut secs = secs_f.floor();
    let mut nanos = ((secs_f - secs) * TimeUtils::NANOS_IN_S).round();
    if nanos >= TimeUtils::NANOS_IN_S {
        secs += 1.0;
        nanos = 0.0;
    }

    // Out-of-range seconds saturate on the cast and are rejected by chrono below.
    match DateTime::from_timestamp(secs as i64, nanos as u32) {
        Some(dt) => Ok(dt),
        None => bail!("Julian day {} is outside the representable date range", jd),
    }
}

pub fn julian_day_to_epoch_ms(jd: f64) -> Result<i64> {
    if !jd.is_finite() {
        bail!("Julian day {} is not a finite number", jd);
    }
    let ms = ((jd - TimeUtils::JULIAN_DAY_UNIX_EPOCH) * TimeUtils::MS_IN_D as f64).round();
    if ms.abs() >= i64::MAX as f64 {
        bail!("Julian day {} overflows epoch milliseconds", jd);
    }
    Ok(ms as i64)
}

pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms.abs() / 1000;
    let sign = if ms < 0 { "-" } else { "" };
    if secs < 60 {
        return format!("{}{}s", sign, secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}{}m", sign, mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}{}h", sign, hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}{}d", sign, days);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}{}M", sign, months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}{}Y {}M", sign, years, rem_months)
}
