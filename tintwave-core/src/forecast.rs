//! Reduction of 3-hour forecast samples to one entry per calendar day.

use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ForecastEntry;

/// Hours preferred as a day's representative sample.
pub const MIDDAY_HOURS: [u32; 2] = [12, 15];

/// Upper bound on the number of days in a summary.
pub const MAX_DAYS: usize = 5;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid forecast date-time '{value}': {source}")]
    InvalidDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Pick one entry per calendar date, sorted by `dt` and capped at [`MAX_DAYS`].
///
/// A date's first midday sample (see [`MIDDAY_HOURS`]) wins; dates without one
/// fall back to their first sample in input order. Any entry whose date cannot
/// be parsed fails the whole reduction.
pub fn daily_summary(entries: &[ForecastEntry]) -> Result<Vec<ForecastEntry>, ForecastError> {
    let stamped = entries
        .iter()
        .map(|entry| entry.stamp().map(|stamp| (stamp, entry)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut resolved: HashSet<NaiveDate> = HashSet::new();
    let mut picked: Vec<&ForecastEntry> = Vec::new();

    for (stamp, entry) in &stamped {
        let midday = stamp.hour().is_some_and(|h| MIDDAY_HOURS.contains(&h));
        if midday && resolved.insert(stamp.date) {
            picked.push(entry);
        }
    }

    for (stamp, entry) in &stamped {
        if resolved.insert(stamp.date) {
            picked.push(entry);
        }
    }

    // Fallback picks may precede midday picks in time.
    picked.sort_by_key(|entry| entry.dt);
    picked.truncate(MAX_DAYS);

    Ok(picked.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Measurements, Wind};
    use chrono::NaiveDateTime;

    fn entry(dt_txt: &str) -> ForecastEntry {
        let dt = NaiveDateTime::parse_from_str(dt_txt, "%Y-%m-%d %H:%M:%S")
            .expect("test timestamps are well formed")
            .and_utc()
            .timestamp();

        ForecastEntry {
            dt,
            dt_txt: dt_txt.to_string(),
            main: Measurements {
                temp: 1.0,
                feels_like: 0.0,
                temp_min: -1.0,
                temp_max: 2.0,
                humidity: 80,
                pressure: 1012.0,
            },
            weather: vec![Condition {
                id: 800,
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
            wind: Wind { speed: 3.0 },
        }
    }

    fn stamps(entries: &[ForecastEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.dt_txt.as_str()).collect()
    }

    /// Every 3 hours for `days` days starting at `start` 00:00.
    fn full_days(start: NaiveDate, days: u32, hours: &[u32]) -> Vec<ForecastEntry> {
        let mut out = Vec::new();
        for day in 0..days {
            let date = start + chrono::Days::new(u64::from(day));
            for hour in hours {
                out.push(entry(&format!("{} {:02}:00:00", date.format("%Y-%m-%d"), hour)));
            }
        }
        out
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        assert!(daily_summary(&[]).unwrap().is_empty());
    }

    #[test]
    fn prefers_midday_samples() {
        let input = vec![
            entry("2026-01-01 00:00:00"),
            entry("2026-01-01 06:00:00"),
            entry("2026-01-01 12:00:00"),
            entry("2026-01-01 18:00:00"),
            entry("2026-01-02 00:00:00"),
            entry("2026-01-02 15:00:00"),
        ];

        let summary = daily_summary(&input).unwrap();
        assert_eq!(
            stamps(&summary),
            ["2026-01-01 12:00:00", "2026-01-02 15:00:00"]
        );
    }

    #[test]
    fn first_midday_sample_wins_over_later_one() {
        let input = vec![
            entry("2026-01-01 09:00:00"),
            entry("2026-01-01 12:00:00"),
            entry("2026-01-01 15:00:00"),
        ];

        let summary = daily_summary(&input).unwrap();
        assert_eq!(stamps(&summary), ["2026-01-01 12:00:00"]);
    }

    #[test]
    fn falls_back_to_first_sample_of_day() {
        let input = vec![
            entry("2026-01-01 18:00:00"),
            entry("2026-01-01 21:00:00"),
            entry("2026-01-02 09:00:00"),
            entry("2026-01-02 12:00:00"),
        ];

        let summary = daily_summary(&input).unwrap();
        assert_eq!(
            stamps(&summary),
            ["2026-01-01 18:00:00", "2026-01-02 12:00:00"]
        );
    }

    #[test]
    fn caps_at_five_days_without_midday_samples() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let input = full_days(start, 6, &[0, 3, 21]);

        let summary = daily_summary(&input).unwrap();
        assert_eq!(
            stamps(&summary),
            [
                "2026-01-01 00:00:00",
                "2026-01-02 00:00:00",
                "2026-01-03 00:00:00",
                "2026-01-04 00:00:00",
                "2026-01-05 00:00:00",
            ]
        );
    }

    #[test]
    fn typical_provider_window_yields_partial_first_day_then_middays() {
        // Provider windows start mid-day and span 40 samples.
        let mut input = vec![entry("2026-03-10 18:00:00"), entry("2026-03-10 21:00:00")];
        let start = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        input.extend(full_days(start, 5, &[0, 3, 6, 9, 12, 15, 18, 21]));

        let summary = daily_summary(&input).unwrap();
        assert_eq!(
            stamps(&summary),
            [
                "2026-03-10 18:00:00",
                "2026-03-11 12:00:00",
                "2026-03-12 12:00:00",
                "2026-03-13 12:00:00",
                "2026-03-14 12:00:00",
            ]
        );
    }

    #[test]
    fn output_is_sorted_with_unique_dates() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 30).unwrap();
        let input = full_days(start, 4, &[3, 15, 21]);

        let summary = daily_summary(&input).unwrap();
        assert!(summary.windows(2).all(|w| w[0].dt < w[1].dt));

        let dates: HashSet<_> = summary.iter().map(|e| e.stamp().unwrap().date).collect();
        assert_eq!(dates.len(), summary.len());
        assert_eq!(summary.len(), 4);
    }

    #[test]
    fn entries_without_hour_fall_through_to_fallback() {
        let mut dateless = entry("2026-01-01 12:00:00");
        dateless.dt_txt = "2026-01-01".to_string();
        let input = vec![dateless, entry("2026-01-01 15:00:00")];

        let summary = daily_summary(&input).unwrap();
        assert_eq!(stamps(&summary), ["2026-01-01 15:00:00"]);
    }

    #[test]
    fn bare_hour_counts_as_midday() {
        let mut bare = entry("2026-01-01 12:00:00");
        bare.dt_txt = "2026-01-01 12".to_string();
        let input = vec![entry("2026-01-01 09:00:00"), bare];

        let summary = daily_summary(&input).unwrap();
        assert_eq!(stamps(&summary), ["2026-01-01 12"]);
    }

    #[test]
    fn malformed_date_fails_the_reduction() {
        let mut bad = entry("2026-01-02 12:00:00");
        bad.dt_txt = "not a date".to_string();
        let input = vec![entry("2026-01-01 12:00:00"), bad];

        let err = daily_summary(&input).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidDateTime { ref value, .. } if value == "not a date"
        ));
    }

    #[test]
    fn repeated_calls_agree() {
        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let input = full_days(start, 7, &[0, 12, 18]);

        assert_eq!(daily_summary(&input).unwrap(), daily_summary(&input).unwrap());
    }
}
