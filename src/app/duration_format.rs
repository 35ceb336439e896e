//! Durations written the way the scanner's command line expects them:
//! `1h`, `1h30m`, `45s`, `500ms` on input, `1h0m0s` style on output.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

static FULL_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?(?:h|ms|m|s|us|µs|ns))+$").unwrap());
static DURATION_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)(h|ms|m|s|us|µs|ns)").unwrap());

/// Largest duration the scanner accepts: a signed 64-bit count of nanoseconds.
const MAX_NANOS: f64 = i64::MAX as f64;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid duration {0:?}, expected something like 1h30m, 45s or 500ms")]
pub struct InvalidDuration(pub String);

pub fn parse_duration(input: &str) -> Result<Duration, InvalidDuration> {
    let input = input.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }

    if !FULL_DURATION.is_match(input) {
        return Err(InvalidDuration(input.to_owned()));
    }

    let seconds: f64 = DURATION_PART
        .captures_iter(input)
        .map(|captures| {
            let value: f64 = captures[1].parse().unwrap_or_default();
            let unit_seconds = match &captures[2] {
                "h" => 3600.0,
                "m" => 60.0,
                "s" => 1.0,
                "ms" => 1e-3,
                "us" | "µs" => 1e-6,
                _ => 1e-9,
            };
            value * unit_seconds
        })
        .sum();

    if seconds * 1e9 > MAX_NANOS {
        return Err(InvalidDuration(input.to_owned()));
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| InvalidDuration(input.to_owned()))
}

pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fraction(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", fraction(nanos, NANOS_PER_MILLI));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = fraction(nanos % NANOS_PER_MINUTE, NANOS_PER_SECOND);

    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, m) => format!("{m}m{seconds}s"),
        (h, m) => format!("{h}h{m}m{seconds}s"),
    }
}

fn fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return whole.to_string();
    }

    let digits = unit.ilog10() as usize;
    let decimals = format!("{remainder:0digits$}");
    format!("{whole}.{}", decimals.trim_end_matches('0'))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{InvalidDuration, format_duration, parse_duration};

    #[rstest]
    #[case("1h", Duration::from_secs(3600))]
    #[case("23h", Duration::from_secs(23 * 3600))]
    #[case("1h30m", Duration::from_secs(5400))]
    #[case("1.5h", Duration::from_secs(5400))]
    #[case("45s", Duration::from_secs(45))]
    #[case("2m10s", Duration::from_secs(130))]
    #[case("500ms", Duration::from_millis(500))]
    #[case("0s", Duration::ZERO)]
    #[case("0", Duration::ZERO)]
    #[case("2562047h", Duration::from_secs(2_562_047 * 3600))]
    fn it_parses_durations(#[case] input: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("1d")]
    #[case("h")]
    #[case("-5m")]
    #[case("10 minutes")]
    #[case("2562048h")]
    #[case("999999999999h")]
    fn it_rejects_malformed_durations(#[case] input: &str) {
        assert_eq!(parse_duration(input), Err(InvalidDuration(input.to_owned())));
    }

    #[rstest]
    #[case(Duration::ZERO, "0s")]
    #[case(Duration::from_secs(3600), "1h0m0s")]
    #[case(Duration::from_secs(23 * 3600), "23h0m0s")]
    #[case(Duration::from_secs(5400), "1h30m0s")]
    #[case(Duration::from_secs(300), "5m0s")]
    #[case(Duration::from_secs(90), "1m30s")]
    #[case(Duration::from_secs(30), "30s")]
    #[case(Duration::from_millis(1500), "1.5s")]
    #[case(Duration::from_millis(500), "500ms")]
    #[case(Duration::from_micros(1500), "1.5ms")]
    #[case(Duration::from_nanos(250), "250ns")]
    fn it_formats_durations(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
    }
}
