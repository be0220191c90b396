//! Forecast normalization pipeline
//!
//! Turns a raw provider response into the [`WeatherSnapshot`] the screen
//! renders. All decisions are anchored to the location's own local time as
//! reported by the provider, never the device clock, so the same response
//! normalizes identically on every device:
//!
//! - the hourly strip starts at the location's current hour (inclusive) and
//!   runs across day boundaries, capped at 24 entries;
//! - the daily outlook labels the anchor date "today", the next date
//!   "tomorrow", and later dates with a capitalized localized weekday name;
//! - fractional values are truncated toward zero, and scheme-relative icon
//!   references are rewritten to absolute https URLs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::data::dto::{Condition, ForecastResponse};
use crate::domain::{DayItem, DisplayLocale, HourItem, WeatherSnapshot};

/// Wall-clock timestamp format of hourly records; the hour may arrive
/// unpadded ("2024-03-10 9:00")
const HOUR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Calendar date format of forecast days
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format for hourly labels, always zero-padded
const HOUR_LABEL_FORMAT: &str = "%H:%M";
/// Localized short date shown under daily labels, e.g. "26 ноя"
const DAY_DATE_FORMAT: &str = "%-d %b";
/// Localized full weekday name
const WEEKDAY_FORMAT: &str = "%A";

/// Upper bound on hourly entries in a snapshot
const HOURLY_WINDOW: usize = 24;
/// Upper bound on daily entries in a snapshot
const DAILY_WINDOW: usize = 7;

/// Errors raised when a response that deserialized fine still cannot be
/// normalized
///
/// These mean the upstream contract is broken; surfacing them beats
/// rendering a silently wrong screen.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The reported timezone is not a known IANA identifier
    #[error("unknown timezone identifier: {0}")]
    UnknownTimezone(String),
    /// The reported local-time epoch cannot be represented
    #[error("local time epoch out of range: {0}")]
    EpochOutOfRange(i64),
    /// An hourly record carried an unparseable timestamp
    #[error("invalid hourly timestamp: {0}")]
    InvalidHourTime(String),
    /// A forecast day carried an unparseable date
    #[error("invalid forecast date: {0}")]
    InvalidDate(String),
}

/// Normalizes a raw forecast response into a [`WeatherSnapshot`]
///
/// The reference instant is the response's own `localtime_epoch`, which is
/// the provider's canonical "now" at the queried location. The device clock
/// never enters the computation.
pub fn normalize(
    response: &ForecastResponse,
    locale: DisplayLocale,
) -> Result<WeatherSnapshot, NormalizeError> {
    let epoch = response.location.localtime_epoch;
    let reference =
        DateTime::from_timestamp(epoch, 0).ok_or(NormalizeError::EpochOutOfRange(epoch))?;
    normalize_at(response, locale, reference)
}

/// Like [`normalize`], but with an explicit reference instant
///
/// Lets callers pin "now" independently of the response, which is how the
/// windowing rules are exercised in tests.
pub fn normalize_at(
    response: &ForecastResponse,
    locale: DisplayLocale,
    reference: DateTime<Utc>,
) -> Result<WeatherSnapshot, NormalizeError> {
    let tz = resolve_timezone(response.location.tz_id.as_deref())?;
    let now_local = reference.with_timezone(&tz);
    let today = now_local.date_naive();
    let tomorrow = today.succ_opt();
    let current_hour = now_local.hour();

    let current = &response.current;

    Ok(WeatherSnapshot {
        city_name: response.location.name.clone(),
        temp_c: current.temp_c as i32,
        feels_like_c: current.feels_like_c as i32,
        condition_text: current.condition.text.clone(),
        icon_url: icon_url(&current.condition),
        wind_kph: current.wind_kph as i32,
        wind_dir: current.wind_dir.clone(),
        humidity_pct: current.humidity,
        pressure_mb: current.pressure_mb as i32,
        uv_index: current.uv as i32,
        hourly: hourly_window(response, today, current_hour)?,
        daily: daily_outlook(response, locale, today, tomorrow)?,
    })
}

/// Maps the reported `tz_id` to a timezone, defaulting to UTC when the
/// provider omitted it
fn resolve_timezone(tz_id: Option<&str>) -> Result<Tz, NormalizeError> {
    match tz_id {
        Some(id) => id
            .parse()
            .map_err(|_| NormalizeError::UnknownTimezone(id.to_string())),
        None => Ok(Tz::UTC),
    }
}

/// Builds the rolling hourly window: every forecast hour from the current
/// local hour onward, in provider order, capped at [`HOURLY_WINDOW`]
fn hourly_window(
    response: &ForecastResponse,
    today: NaiveDate,
    current_hour: u32,
) -> Result<Vec<HourItem>, NormalizeError> {
    let mut items = Vec::with_capacity(HOURLY_WINDOW);

    'days: for day in &response.forecast.forecastday {
        for hour in &day.hour {
            let stamp = NaiveDateTime::parse_from_str(&hour.time, HOUR_TIME_FORMAT)
                .map_err(|_| NormalizeError::InvalidHourTime(hour.time.clone()))?;

            // Hourly records are wall-clock times at the location; anything
            // dated before the anchor day, or earlier on the anchor day than
            // the anchor hour, has already passed. The anchor hour itself
            // stays in.
            if stamp.date() < today {
                continue;
            }
            if stamp.date() == today && stamp.hour() < current_hour {
                continue;
            }

            items.push(HourItem {
                time: stamp.format(HOUR_LABEL_FORMAT).to_string(),
                temp_c: hour.temp_c as i32,
                icon_url: icon_url(&hour.condition),
            });
            if items.len() == HOURLY_WINDOW {
                break 'days;
            }
        }
    }

    Ok(items)
}

/// Builds the daily outlook: the first [`DAILY_WINDOW`] forecast days in
/// provider order, labeled relative to the anchor date
fn daily_outlook(
    response: &ForecastResponse,
    locale: DisplayLocale,
    today: NaiveDate,
    tomorrow: Option<NaiveDate>,
) -> Result<Vec<DayItem>, NormalizeError> {
    let mut items = Vec::new();

    for day in response.forecast.forecastday.iter().take(DAILY_WINDOW) {
        let date = NaiveDate::parse_from_str(&day.date, DATE_FORMAT)
            .map_err(|_| NormalizeError::InvalidDate(day.date.clone()))?;

        let label = if date == today {
            locale.today.to_string()
        } else if Some(date) == tomorrow {
            locale.tomorrow.to_string()
        } else {
            let weekday = date
                .format_localized(WEEKDAY_FORMAT, locale.time_locale)
                .to_string();
            uppercase_first(&weekday)
        };

        items.push(DayItem {
            label,
            date: date
                .format_localized(DAY_DATE_FORMAT, locale.time_locale)
                .to_string(),
            max_temp_c: day.day.max_temp_c as i32,
            min_temp_c: day.day.min_temp_c as i32,
            icon_url: icon_url(&day.day.condition),
        });
    }

    Ok(items)
}

/// Rewrites the provider's scheme-relative icon references ("//cdn...") to
/// absolute https URLs; anything else passes through untouched
fn icon_url(condition: &Condition) -> String {
    match condition.icon.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => condition.icon.clone(),
    }
}

/// Uppercases the first letter of a label; localized weekday names come
/// back lowercased in some languages, Russian among them
fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dto::{Current, DaySummary, Forecast, ForecastDay, ForecastHour, Location};

    /// 2024-03-10 14:30 in Europe/Moscow (11:30 UTC)
    const MOSCOW_EPOCH: i64 = 1_710_070_200;
    const MOSCOW_TZ: &str = "Europe/Moscow";
    const ICON_REF: &str = "//cdn.weatherapi.com/weather/64x64/day/116.png";
    const ICON_URL: &str = "https://cdn.weatherapi.com/weather/64x64/day/116.png";

    fn condition(icon: &str) -> Condition {
        Condition {
            text: "Пасмурно".to_string(),
            icon: icon.to_string(),
        }
    }

    fn hour(time: &str, temp_c: f64) -> ForecastHour {
        ForecastHour {
            time: time.to_string(),
            temp_c,
            condition: condition(ICON_REF),
        }
    }

    fn day(date: &str, hours: Vec<ForecastHour>) -> ForecastDay {
        ForecastDay {
            date: date.to_string(),
            day: DaySummary {
                max_temp_c: 5.9,
                min_temp_c: -2.9,
                condition: condition(ICON_REF),
            },
            hour: hours,
        }
    }

    /// A day with all 24 hourly records, temperature equal to the hour
    fn full_day(date: &str) -> ForecastDay {
        let hours = (0..24)
            .map(|h| hour(&format!("{} {:02}:00", date, h), h as f64))
            .collect();
        day(date, hours)
    }

    fn response(epoch: i64, tz_id: Option<&str>, days: Vec<ForecastDay>) -> ForecastResponse {
        ForecastResponse {
            location: Location {
                name: "Москва".to_string(),
                localtime_epoch: epoch,
                tz_id: tz_id.map(str::to_string),
            },
            current: Current {
                temp_c: 3.9,
                feels_like_c: -1.9,
                condition: condition(ICON_REF),
                wind_kph: 12.7,
                wind_dir: "NW".to_string(),
                humidity: 87,
                pressure_mb: 1012.6,
                uv: 1.2,
            },
            forecast: Forecast { forecastday: days },
        }
    }

    fn moscow_response(days: Vec<ForecastDay>) -> ForecastResponse {
        response(MOSCOW_EPOCH, Some(MOSCOW_TZ), days)
    }

    #[test]
    fn test_current_conditions_mapped_with_truncation() {
        let resp = moscow_response(vec![full_day("2024-03-10")]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.city_name, "Москва");
        // Truncation is toward zero in both directions, not rounding
        assert_eq!(snap.temp_c, 3);
        assert_eq!(snap.feels_like_c, -1);
        assert_eq!(snap.condition_text, "Пасмурно");
        assert_eq!(snap.wind_kph, 12);
        assert_eq!(snap.wind_dir, "NW");
        assert_eq!(snap.humidity_pct, 87);
        assert_eq!(snap.pressure_mb, 1012);
        assert_eq!(snap.uv_index, 1);
    }

    #[test]
    fn test_icon_references_rewritten_to_https() {
        let mut resp = moscow_response(vec![full_day("2024-03-10")]);
        resp.forecast.forecastday[0].hour[20].condition.icon =
            "https://example.com/already-absolute.png".to_string();

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.icon_url, ICON_URL);
        assert_eq!(snap.daily[0].icon_url, ICON_URL);
        // Hour 20 is the seventh entry of a window starting at 14:00
        assert_eq!(snap.hourly[0].icon_url, ICON_URL);
        assert_eq!(
            snap.hourly[6].icon_url,
            "https://example.com/already-absolute.png"
        );
    }

    #[test]
    fn test_hourly_window_starts_at_current_hour() {
        let resp = moscow_response(vec![full_day("2024-03-10")]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        // Local time is 14:30, so the window opens with the 14:00 record
        assert_eq!(snap.hourly.len(), 10);
        assert_eq!(snap.hourly[0].time, "14:00");
        assert_eq!(snap.hourly[0].temp_c, 14);
        assert_eq!(snap.hourly[9].time, "23:00");
    }

    #[test]
    fn test_hourly_spans_midnight_and_caps_at_24() {
        let resp = moscow_response(vec![
            full_day("2024-03-10"),
            full_day("2024-03-11"),
            full_day("2024-03-12"),
        ]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        // 14:00-23:00 of the anchor day, then 00:00-13:00 of the next
        let expected: Vec<String> = (14..24)
            .chain(0..14)
            .map(|h| format!("{:02}:00", h))
            .collect();
        let actual: Vec<&str> = snap.hourly.iter().map(|item| item.time.as_str()).collect();
        assert_eq!(actual, expected);

        // Early next-day hours are kept even though 0 < 14 numerically
        assert_eq!(snap.hourly[10].time, "00:00");
        assert_eq!(snap.hourly[10].temp_c, 0);
        assert_eq!(snap.hourly[23].temp_c, 13);
    }

    #[test]
    fn test_current_hour_kept_earlier_hours_dropped() {
        let resp = moscow_response(vec![day(
            "2024-03-10",
            vec![
                hour("2024-03-10 13:00", 1.0),
                hour("2024-03-10 14:00", 2.0),
                hour("2024-03-10 15:00", 3.0),
            ],
        )]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        let times: Vec<&str> = snap.hourly.iter().map(|item| item.time.as_str()).collect();
        assert_eq!(times, ["14:00", "15:00"]);
    }

    #[test]
    fn test_hours_from_earlier_days_dropped() {
        let stale = day("2024-03-09", vec![hour("2024-03-09 23:00", -5.0)]);
        let resp = moscow_response(vec![stale, full_day("2024-03-10")]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.hourly.len(), 10);
        assert_eq!(snap.hourly[0].time, "14:00");
    }

    #[test]
    fn test_short_horizon_yields_fewer_than_24() {
        // 20:30 local: only four records of the single day remain
        let resp = response(
            MOSCOW_EPOCH + 6 * 3600,
            Some(MOSCOW_TZ),
            vec![full_day("2024-03-10")],
        );

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        let times: Vec<&str> = snap.hourly.iter().map(|item| item.time.as_str()).collect();
        assert_eq!(times, ["20:00", "21:00", "22:00", "23:00"]);
    }

    #[test]
    fn test_unpadded_hour_parses_and_label_is_padded() {
        // 08:30 local, record written as "9:00" without the leading zero
        let resp = response(
            MOSCOW_EPOCH - 6 * 3600,
            Some(MOSCOW_TZ),
            vec![day("2024-03-10", vec![hour("2024-03-10 9:00", 1.0)])],
        );

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.hourly.len(), 1);
        assert_eq!(snap.hourly[0].time, "09:00");
    }

    #[test]
    fn test_daily_labels_today_tomorrow_weekday_russian() {
        // 2024-03-13 is a Wednesday
        let resp = moscow_response(vec![
            full_day("2024-03-10"),
            full_day("2024-03-11"),
            full_day("2024-03-13"),
        ]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        let labels: Vec<&str> = snap.daily.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, ["Сегодня", "Завтра", "Среда"]);

        let dates: Vec<&str> = snap.daily.iter().map(|item| item.date.as_str()).collect();
        assert_eq!(dates, ["10 мар", "11 мар", "13 мар"]);
    }

    #[test]
    fn test_daily_labels_english() {
        let resp = moscow_response(vec![
            full_day("2024-03-10"),
            full_day("2024-03-11"),
            full_day("2024-03-13"),
        ]);

        let snap = normalize(&resp, DisplayLocale::ENGLISH).unwrap();

        let labels: Vec<&str> = snap.daily.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Tomorrow", "Wednesday"]);
        assert_eq!(snap.daily[0].date, "10 Mar");
    }

    #[test]
    fn test_daily_minmax_truncated_toward_zero() {
        let resp = moscow_response(vec![full_day("2024-03-10")]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.daily[0].max_temp_c, 5);
        assert_eq!(snap.daily[0].min_temp_c, -2);
    }

    #[test]
    fn test_daily_caps_at_seven() {
        let days = (10..19).map(|d| full_day(&format!("2024-03-{}", d))).collect();
        let resp = moscow_response(days);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.daily.len(), 7);
        assert_eq!(snap.daily[6].date, "16 мар");
    }

    #[test]
    fn test_utc_fallback_when_timezone_missing() {
        // Same instant is 11:30 UTC, so the window opens at 11:00 instead
        // of Moscow's 14:00
        let resp = response(MOSCOW_EPOCH, None, vec![full_day("2024-03-10")]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert_eq!(snap.hourly.len(), 13);
        assert_eq!(snap.hourly[0].time, "11:00");
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let resp = response(
            MOSCOW_EPOCH,
            Some("Atlantis/Lost"),
            vec![full_day("2024-03-10")],
        );

        let err = normalize(&resp, DisplayLocale::RUSSIAN).unwrap_err();
        assert!(matches!(err, NormalizeError::UnknownTimezone(ref id) if id == "Atlantis/Lost"));
    }

    #[test]
    fn test_invalid_hour_timestamp_rejected() {
        let resp = moscow_response(vec![day(
            "2024-03-10",
            vec![hour("not a timestamp", 1.0)],
        )]);

        let err = normalize(&resp, DisplayLocale::RUSSIAN).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidHourTime(_)));
    }

    #[test]
    fn test_invalid_forecast_date_rejected() {
        let resp = moscow_response(vec![day("10.03.2024", vec![])]);

        let err = normalize(&resp, DisplayLocale::RUSSIAN).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDate(_)));
    }

    #[test]
    fn test_epoch_out_of_range_rejected() {
        let resp = response(i64::MAX, Some(MOSCOW_TZ), vec![full_day("2024-03-10")]);

        let err = normalize(&resp, DisplayLocale::RUSSIAN).unwrap_err();
        assert!(matches!(err, NormalizeError::EpochOutOfRange(_)));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let resp = moscow_response(vec![full_day("2024-03-10"), full_day("2024-03-11")]);

        let first = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();
        let second = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();
        assert_eq!(first, second);

        // The implicit anchor is exactly the reported local-time epoch
        let reference = DateTime::from_timestamp(MOSCOW_EPOCH, 0).unwrap();
        let pinned = normalize_at(&resp, DisplayLocale::RUSSIAN, reference).unwrap();
        assert_eq!(first, pinned);
    }

    #[test]
    fn test_empty_forecast_gives_empty_lists() {
        let resp = moscow_response(vec![]);

        let snap = normalize(&resp, DisplayLocale::RUSSIAN).unwrap();

        assert!(snap.hourly.is_empty());
        assert!(snap.daily.is_empty());
        assert_eq!(snap.city_name, "Москва");
    }

    #[test]
    fn test_uppercase_first() {
        assert_eq!(uppercase_first("среда"), "Среда");
        assert_eq!(uppercase_first("tuesday"), "Tuesday");
        assert_eq!(uppercase_first("Вторник"), "Вторник");
        assert_eq!(uppercase_first(""), "");
    }
}
