//! Run configuration
//!
//! Turns parsed command-line arguments into a validated, immutable
//! [`RunConfig`]. Every check here runs before any request is sent.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::pagination::FetchRequest;
use crate::types::{Endpoint, OutputFormat};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, SubsecRound, Utc,
};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Calendar date layouts, extended and basic
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Time-of-day layouts, extended and basic. A bare hour is handled separately.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

/// Validated configuration for one download
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// What to fetch
    pub request: FetchRequest,
    /// Output file
    pub output: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Indent JSON output
    pub pretty: bool,
}

impl RunConfig {
    /// Validate `cli`, defaulting the end of the window to the current time
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::from_cli_at(cli, Utc::now())
    }

    /// Validate `cli` with `now` as the default end of the window
    pub fn from_cli_at(cli: &Cli, now: DateTime<Utc>) -> Result<Self> {
        if cli.token.trim().is_empty() {
            return Err(Error::config("Access token must not be empty"));
        }

        if parse_timestamp(&cli.begin).is_none() {
            return Err(Error::invalid_timestamp("beginning", &cli.begin));
        }
        let end = resolve_end(cli.end.as_deref(), now);

        check_output_path(&cli.filename, cli.overwrite)?;

        let endpoint = Endpoint::from_conference_flag(cli.conference).url(&cli.base_url)?;

        Ok(Self {
            request: FetchRequest::new(endpoint, &cli.begin, end, &cli.token),
            output: cli.filename.clone(),
            format: cli.format,
            pretty: cli.pretty,
        })
    }
}

/// Parse an ISO-8601 date or date-time.
///
/// Accepts a date in extended (`2024-01-01`) or basic (`20240101`) form,
/// optionally followed by `T` or a space and a time with hour, minute or
/// second (optionally fractional) precision. A time may carry `Z`, `±HH`,
/// `±HHMM` or `±HH:MM`. Values with an offset are converted to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let (local, offset) = split_offset(value)?;
    let naive = parse_naive(local)?;
    match offset {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(|dt| dt.naive_utc()),
        None => Some(naive),
    }
}

/// Split a trailing UTC designator or offset off the time part of `value`
fn split_offset(value: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(local) = value.strip_suffix(&['Z', 'z'][..]) {
        return Some((local, FixedOffset::east_opt(0)));
    }

    let Some(time_start) = value.find(&['T', ' '][..]) else {
        return Some((value, None));
    };
    match value[time_start..].rfind(&['+', '-'][..]) {
        Some(pos) => {
            let (local, offset) = value.split_at(time_start + pos);
            Some((local, Some(parse_offset(offset)?)))
        }
        None => Some((value, None)),
    }
}

/// Parse `±HH`, `±HHMM` or `±HH:MM`
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, rest) = match offset.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits = match rest.split_once(':') {
        Some((hours, minutes)) if hours.len() == 2 && minutes.len() == 2 => {
            format!("{hours}{minutes}")
        }
        Some(_) => return None,
        None => rest.to_string(),
    };
    if !matches!(digits.len(), 2 | 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 { digits[2..].parse().ok()? } else { 0 };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a date with an optional time of day, no offset
fn parse_naive(local: &str) -> Option<NaiveDateTime> {
    let (date, time) = match local.find(&['T', ' '][..]) {
        Some(pos) => (&local[..pos], Some(&local[pos + 1..])),
        None => (local, None),
    };

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())?;
    let time = match time {
        None => NaiveTime::MIN,
        Some(time) => parse_time(time)?,
    };
    Some(date.and_time(time))
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    // chrono needs a minute field, so a bare hour is read by hand
    if time.len() == 2 && time.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveTime::from_hms_opt(time.parse().ok()?, 0, 0);
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
}

/// Format `now` the way the API expects a default end: whole seconds, UTC
pub fn default_end(now: DateTime<Utc>) -> String {
    now.trunc_subsecs(0)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Effective end of the window.
///
/// A missing or unparseable `end` falls back to `now`.
pub fn resolve_end(end: Option<&str>, now: DateTime<Utc>) -> String {
    match end {
        Some(value) if parse_timestamp(value).is_some() => value.to_string(),
        Some(value) => {
            let fallback = default_end(now);
            warn!(end = value, fallback = %fallback, "Invalid ending date, using current time");
            fallback
        }
        None => default_end(now),
    }
}

/// Check that the output file can be written.
///
/// The parent directory must exist, and an existing file is only replaced
/// when `overwrite` is set.
pub fn check_output_path(path: &Path, overwrite: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    if !parent.is_dir() {
        return Err(Error::OutputDirMissing {
            path: parent.to_path_buf(),
        });
    }

    if path.exists() && !overwrite {
        return Err(Error::OutputExists {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_BASE_URL;
    use chrono::TimeZone;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use test_case::test_case;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap() + chrono::Duration::milliseconds(734)
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["cdr-fetch"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test_case("2024-01-01" ; "date only")]
    #[test_case("2024-01-01T00:00:00" ; "naive seconds")]
    #[test_case("2024-01-01T00:00" ; "naive minutes")]
    #[test_case("2024-01-01 08:15:30" ; "space separator")]
    #[test_case("2024-01-01T00:00:00.250" ; "fractional seconds")]
    #[test_case("2024-01-01T00:00:00Z" ; "zulu")]
    #[test_case("2024-01-01T00:00Z" ; "zulu minutes")]
    #[test_case("2024-01-01T00:00:00+02:00" ; "positive offset")]
    #[test_case("2024-01-01T00:00-05:00" ; "offset minutes")]
    #[test_case("2024-01-01T10" ; "hour only")]
    #[test_case("2024-01-01T10Z" ; "hour only zulu")]
    #[test_case("2024-01-01T00:00:00+0200" ; "offset without colon")]
    #[test_case("2024-01-01T00:00:00+02" ; "hours only offset")]
    #[test_case("20240101" ; "basic date")]
    #[test_case("20240101T103000" ; "basic date time")]
    #[test_case("20240101T1030-0500" ; "basic minutes with offset")]
    fn test_parse_timestamp_accepts(value: &str) {
        assert!(parse_timestamp(value).is_some(), "{value} should parse");
    }

    #[test_case("not-a-date" ; "garbage")]
    #[test_case("" ; "empty")]
    #[test_case("2024-13-01" ; "bad month")]
    #[test_case("2024-02-30T00:00:00" ; "bad day")]
    #[test_case("2024-01-01T25:00:00" ; "bad hour")]
    #[test_case("01/02/2024" ; "us style")]
    #[test_case("2024-01-01T" ; "empty time")]
    #[test_case("2024-01-01T24" ; "hour out of range")]
    #[test_case("2024-01-01T00:00:00+2" ; "single digit offset")]
    #[test_case("2024-01-01T00:00:00+02:0" ; "short offset minutes")]
    #[test_case("2024-01-01T00:00:00+0260" ; "offset minutes out of range")]
    fn test_parse_timestamp_rejects(value: &str) {
        assert!(parse_timestamp(value).is_none(), "{value} should not parse");
    }

    #[test]
    fn test_parse_timestamp_converts_offset_to_utc() {
        let parsed = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, parse_timestamp("2024-01-01T00:00:00").unwrap());
    }

    #[test]
    fn test_parse_timestamp_offset_spellings_agree() {
        let expected = parse_timestamp("2024-01-01T00:00:00+02:00").unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:00:00+0200").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-01T00:00:00+02").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-12-31T22:00:00Z").unwrap(), expected);
    }

    #[test]
    fn test_parse_timestamp_fills_missing_fields() {
        let midnight = parse_timestamp("2024-01-01T00:00:00").unwrap();
        assert_eq!(parse_timestamp("20240101").unwrap(), midnight);
        assert_eq!(
            parse_timestamp("2024-01-01T10").unwrap(),
            parse_timestamp("2024-01-01T10:00:00").unwrap()
        );
        assert_eq!(
            parse_timestamp("20240101T103000").unwrap(),
            parse_timestamp("2024-01-01T10:30:00").unwrap()
        );
    }

    #[test]
    fn test_default_end_truncates_to_seconds() {
        assert_eq!(default_end(fixed_now()), "2024-03-05T14:30:09+00:00");
    }

    #[test]
    fn test_resolve_end() {
        let now = fixed_now();
        assert_eq!(resolve_end(None, now), "2024-03-05T14:30:09+00:00");
        assert_eq!(
            resolve_end(Some("2024-02-01T00:00:00"), now),
            "2024-02-01T00:00:00"
        );
        assert_eq!(resolve_end(Some("garbage"), now), "2024-03-05T14:30:09+00:00");
    }

    #[test]
    fn test_resolve_end_keeps_reduced_precision_values() {
        let now = fixed_now();
        assert_eq!(resolve_end(Some("2024-01-01T10"), now), "2024-01-01T10");
        assert_eq!(resolve_end(Some("20240101"), now), "20240101");
        assert_eq!(
            resolve_end(Some("2024-01-01T00:00:00+0200"), now),
            "2024-01-01T00:00:00+0200"
        );
    }

    #[test]
    fn test_check_output_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert!(check_output_path(&path, false).is_ok());

        std::fs::write(&path, "x").unwrap();
        assert!(matches!(
            check_output_path(&path, false),
            Err(Error::OutputExists { .. })
        ));
        assert!(check_output_path(&path, true).is_ok());

        let missing = dir.path().join("nope").join("out.csv");
        match check_output_path(&missing, true) {
            Err(Error::OutputDirMissing { path }) => assert_eq!(path, dir.path().join("nope")),
            other => panic!("Expected OutputDirMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_check_output_path_bare_filename() {
        assert!(check_output_path(Path::new("cdr-fetch-test-does-not-exist.csv"), false).is_ok());
    }

    #[test]
    fn test_run_config_from_cli() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cdrs.json");
        let cli = cli(&[
            "-t",
            "secret",
            "-b",
            "2024-01-01",
            "-f",
            "json",
            "-c",
            out.to_str().unwrap(),
        ]);

        let config = RunConfig::from_cli_at(&cli, fixed_now()).unwrap();
        assert_eq!(config.output, out);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.pretty);
        assert_eq!(config.request.begin, "2024-01-01");
        assert_eq!(config.request.end, "2024-03-05T14:30:09+00:00");
        assert_eq!(config.request.token, "secret");
        assert_eq!(config.request.page_size, 1000);
        assert_eq!(
            config.request.endpoint.as_str(),
            format!("{DEFAULT_BASE_URL}/app/conference/calls")
        );
    }

    #[test]
    fn test_run_config_rejects_bad_begin() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cdrs.csv");
        let cli = cli(&["-t", "secret", "-b", "not-a-date", out.to_str().unwrap()]);

        let err = RunConfig::from_cli_at(&cli, fixed_now()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid beginning date: not-a-date");
        assert!(err.is_validation());
    }

    #[test]
    fn test_run_config_rejects_existing_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cdrs.csv");
        std::fs::write(&out, "old").unwrap();

        let cli_no = cli(&["-t", "secret", "-b", "2024-01-01", out.to_str().unwrap()]);
        assert!(matches!(
            RunConfig::from_cli_at(&cli_no, fixed_now()),
            Err(Error::OutputExists { .. })
        ));

        let cli_yes = cli(&["-t", "secret", "-b", "2024-01-01", "-o", out.to_str().unwrap()]);
        assert!(RunConfig::from_cli_at(&cli_yes, fixed_now()).is_ok());
    }

    #[test]
    fn test_run_config_rejects_empty_token() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cdrs.csv");
        let cli = cli(&["-t", " ", "-b", "2024-01-01", out.to_str().unwrap()]);
        assert!(matches!(
            RunConfig::from_cli_at(&cli, fixed_now()),
            Err(Error::Config { .. })
        ));
    }
}
