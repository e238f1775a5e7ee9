// ISO-8601 duration labels and elapsed time between two instants
use crate::config::DisplayLabels;
use crate::error::{Degraded, Resolution};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use tracing::debug;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"];

// Hours and minutes parsed from `PT[nH][nM]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsoDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl IsoDuration {
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

// A non-negative interval, whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed {
    pub minutes: i64,
}

impl Elapsed {
    pub fn hours_part(&self) -> i64 {
        self.minutes / 60
    }

    pub fn minutes_part(&self) -> i64 {
        self.minutes % 60
    }
}

// A parsed timestamp; offset-less values are local wall-clock times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instant {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

impl Instant {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Instant::Zoned(dt));
        }
        if let Some(dt) = ZONED_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        {
            return Some(Instant::Zoned(dt));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(Instant::Local)
    }

    pub fn wall_clock(self) -> NaiveDateTime {
        match self {
            Instant::Zoned(dt) => dt.naive_local(),
            Instant::Local(dt) => dt,
        }
    }

    // "HH:MM" in the instant's own local time
    pub fn clock_label(self) -> String {
        self.wall_clock().format("%H:%M").to_string()
    }

    fn plus_days(self, days: i64) -> Option<Self> {
        let delta = Duration::try_days(days)?;
        match self {
            Instant::Zoned(dt) => dt.checked_add_signed(delta).map(Instant::Zoned),
            Instant::Local(dt) => dt.checked_add_signed(delta).map(Instant::Local),
        }
    }

    // Both zoned: absolute difference. Otherwise compare wall-clock times.
    fn until(self, end: Instant) -> Duration {
        match (self, end) {
            (Instant::Zoned(start), Instant::Zoned(end)) => end.signed_duration_since(start),
            (start, end) => end.wall_clock().signed_duration_since(start.wall_clock()),
        }
    }
}

// The instant a timestamp names once its day-offset marker is applied
fn shifted_instant(raw: &str, day_offset: Option<&str>) -> Resolution<Instant> {
    let malformed = || Degraded::MalformedTimestamp {
        raw: raw.to_string(),
    };
    let instant = Instant::parse(raw).ok_or_else(malformed)?;
    match day_offset.and_then(parse_day_offset) {
        Some(days) => instant.plus_days(days).ok_or_else(malformed),
        None => Ok(instant),
    }
}

// Number of days in a marker such as "+1" or "(+2)"
pub fn parse_day_offset(label: &str) -> Option<i64> {
    let (_, after_plus) = label.split_once('+')?;
    let digits: String = after_plus
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub fn parse_iso_duration(raw: &str) -> Resolution<IsoDuration> {
    let malformed = || Degraded::MalformedDuration {
        raw: raw.to_string(),
    };
    let body = raw.strip_prefix("PT").ok_or_else(malformed)?;

    let (hours, rest) = match body.split_once('H') {
        Some((hours, rest)) => (hours.parse::<u32>().map_err(|_| malformed())?, rest),
        None => (0, body),
    };
    let minutes = match rest.split_once('M') {
        Some((minutes, _)) => minutes.parse::<u32>().map_err(|_| malformed())?,
        None => 0,
    };

    Ok(IsoDuration { hours, minutes })
}

// Formats durations and intervals with a fixed set of labels
#[derive(Debug, Clone, Default)]
pub struct DurationFormatter {
    labels: DisplayLabels,
}

impl DurationFormatter {
    pub fn new(labels: DisplayLabels) -> Self {
        Self { labels }
    }

    // `PT1H15M` -> "1ชม 15นาที". Non-`PT` input passes through, as does anything
    // that fails to parse.
    pub fn format_iso(&self, raw: &str) -> String {
        if !raw.starts_with("PT") {
            return raw.to_string();
        }
        match parse_iso_duration(raw) {
            Ok(duration) if duration.is_zero() => self.labels.unspecified.clone(),
            Ok(duration) => self.hours_minutes(duration.hours as i64, duration.minutes as i64),
            Err(err) => {
                debug!(%err, "duration left as raw text");
                raw.to_string()
            }
        }
    }

    pub fn format_elapsed(&self, elapsed: Elapsed) -> String {
        self.hours_minutes(elapsed.hours_part(), elapsed.minutes_part())
    }

    pub fn try_elapsed_between(
        &self,
        start: &str,
        end: &str,
        end_day_offset: Option<&str>,
    ) -> Resolution<Elapsed> {
        self.try_elapsed_between_offsets(start, None, end, end_day_offset)
    }

    // Either side may carry its own "+N" marker
    pub fn try_elapsed_between_offsets(
        &self,
        start: &str,
        start_day_offset: Option<&str>,
        end: &str,
        end_day_offset: Option<&str>,
    ) -> Resolution<Elapsed> {
        let start_at = shifted_instant(start, start_day_offset)?;
        let end_at = shifted_instant(end, end_day_offset)?;

        let minutes = start_at.until(end_at).num_minutes();
        if minutes < 0 {
            return Err(Degraded::NegativeInterval { minutes });
        }
        Ok(Elapsed { minutes })
    }

    pub fn elapsed_between(
        &self,
        start: &str,
        end: &str,
        end_day_offset: Option<&str>,
    ) -> Option<String> {
        match self.try_elapsed_between(start, end, end_day_offset) {
            Ok(elapsed) => Some(self.format_elapsed(elapsed)),
            Err(err) => {
                debug!(%err, start, end, "elapsed time suppressed");
                None
            }
        }
    }

    fn hours_minutes(&self, hours: i64, minutes: i64) -> String {
        match (hours, minutes) {
            (0, m) => format!("{}{}", m, self.labels.minute_unit),
            (h, 0) => format!("{}{}", h, self.labels.hour_unit),
            (h, m) => format!(
                "{}{} {}{}",
                h, self.labels.hour_unit, m, self.labels.minute_unit
            ),
        }
    }
}

pub fn format_iso_duration(raw: &str) -> String {
    DurationFormatter::default().format_iso(raw)
}

pub fn elapsed_between(start: &str, end: &str, end_day_offset: Option<&str>) -> Option<String> {
    DurationFormatter::default().elapsed_between(start, end, end_day_offset)
}
