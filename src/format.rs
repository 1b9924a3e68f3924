//! Date, time and text formatting shared by the live viewer and prerenderer.

use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::archive::Timestamp;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Reference time and zone for relative labels.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub now: OffsetDateTime,
    pub offset: UtcOffset,
}

impl Clock {
    pub fn system(offset: UtcOffset) -> Self {
        Self {
            now: OffsetDateTime::now_utc(),
            offset,
        }
    }

    pub fn fixed(now: OffsetDateTime, offset: UtcOffset) -> Self {
        Self { now, offset }
    }

    pub fn now_ts(&self) -> Timestamp {
        Timestamp::from_datetime(self.now)
    }

    fn local(&self, ts: Timestamp) -> OffsetDateTime {
        ts.to_datetime().to_offset(self.offset)
    }

    /// `HH:MM` in the clock's zone
    pub fn military_time(&self, ts: Timestamp) -> String {
        let dt = self.local(ts);
        format!("{:02}:{:02}", dt.hour(), dt.minute())
    }

    /// Label for the separator above a run of messages
    pub fn date_separator(&self, ts: Timestamp) -> String {
        let elapsed = self.now_ts().millis().saturating_sub(ts.millis());
        match elapsed.div_euclid(MS_PER_DAY) {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            _ => {
                let dt = self.local(ts);
                dt.format(format_description!(
                    "[weekday], [month repr:short] [day padding:none]"
                ))
                .unwrap_or_else(|_| dt.date().to_string())
            }
        }
    }

    /// Compact age: `Just now`, `5m`, `3h`, `2d`, `1w`
    pub fn time_ago(&self, ts: Timestamp) -> String {
        let seconds = self.now_ts().millis().saturating_sub(ts.millis()).div_euclid(1000);
        if seconds < 60 {
            "Just now".to_string()
        } else if seconds < 3_600 {
            format!("{}m", seconds / 60)
        } else if seconds < 86_400 {
            format!("{}h", seconds / 3_600)
        } else if seconds < 604_800 {
            format!("{}d", seconds / 86_400)
        } else {
            format!("{}w", seconds / 604_800)
        }
    }
}

/// Parse a `YYYY-MM-DD` day folder name
pub fn parse_day(day: &str) -> Option<Date> {
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// Long form of a day folder name, e.g. `Friday, January 5, 2024`
pub fn display_date(day: &str) -> String {
    parse_day(day)
        .and_then(|date| {
            date.format(format_description!(
                "[weekday], [month repr:long] [day padding:none], [year]"
            ))
            .ok()
        })
        .unwrap_or_else(|| day.to_string())
}

/// `m:ss` for a media length in seconds
pub fn duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s.floor() as u64,
        _ => return "0:00".to_string(),
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Up to two initials from a display name
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split(' ')
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect();
    if initials.is_empty() {
        name.chars().next().map(String::from).unwrap_or_default()
    } else {
        initials
    }
    .to_uppercase()
}

/// Long text messages get the wrapped bubble style
pub fn should_wrap(text: &str) -> bool {
    text.chars().count() > 50
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    fn clock() -> Clock {
        Clock::fixed(datetime!(2024-01-06 12:00 UTC), offset!(UTC))
    }

    fn ts(dt: OffsetDateTime) -> Timestamp {
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn military_time_respects_offset() {
        let at = ts(datetime!(2024-01-05 16:05 UTC));
        assert_eq!(clock().military_time(at), "16:05");

        let tokyo = Clock::fixed(datetime!(2024-01-06 12:00 UTC), offset!(+9));
        assert_eq!(tokyo.military_time(at), "01:05");
    }

    #[test]
    fn separator_today_yesterday_and_older() {
        let c = clock();
        assert_eq!(c.date_separator(ts(datetime!(2024-01-06 01:00 UTC))), "Today");
        assert_eq!(c.date_separator(ts(datetime!(2024-01-05 10:00 UTC))), "Yesterday");
        assert_eq!(
            c.date_separator(ts(datetime!(2024-01-04 10:00 UTC))),
            "Thursday, Jan 4"
        );
        // elapsed whole days, not calendar days
        assert_eq!(c.date_separator(ts(datetime!(2024-01-05 13:00 UTC))), "Today");
    }

    #[test]
    fn separator_future_uses_date() {
        let c = clock();
        assert_eq!(
            c.date_separator(ts(datetime!(2024-01-08 10:00 UTC))),
            "Monday, Jan 8"
        );
    }

    #[test]
    fn time_ago_buckets() {
        let c = clock();
        let now = datetime!(2024-01-06 12:00 UTC);
        assert_eq!(c.time_ago(ts(now - time::Duration::seconds(30))), "Just now");
        assert_eq!(c.time_ago(ts(now - time::Duration::minutes(5))), "5m");
        assert_eq!(c.time_ago(ts(now - time::Duration::hours(3))), "3h");
        assert_eq!(c.time_ago(ts(now - time::Duration::days(2))), "2d");
        assert_eq!(c.time_ago(ts(now - time::Duration::days(20))), "2w");
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let c = clock();
        let ancient: Timestamp = serde_json::from_str("-1e30").unwrap();
        assert_eq!(ancient, Timestamp(i64::MIN));
        assert_eq!(c.date_separator(ancient), "Thursday, Jan 1");
        assert_eq!(c.time_ago(ancient), "15250284452w");

        let future = Timestamp(i64::MAX);
        assert_eq!(c.time_ago(future), "Just now");
        assert_eq!(c.date_separator(future), "Thursday, Jan 1");
    }

    #[test]
    fn display_date_formats_day_names() {
        assert_eq!(display_date("2024-01-05"), "Friday, January 5, 2024");
        assert_eq!(display_date("2023-09-30"), "Saturday, September 30, 2023");
        assert_eq!(display_date("misc"), "misc");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(duration(None), "0:00");
        assert_eq!(duration(Some(0.0)), "0:00");
        assert_eq!(duration(Some(15.0)), "0:15");
        assert_eq!(duration(Some(75.9)), "1:15");
        assert_eq!(duration(Some(600.0)), "10:00");
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Alex Johnson"), "AJ");
        assert_eq!(initials("alex j k"), "AJ");
        assert_eq!(initials("cher"), "C");
        assert_eq!(initials(" lead"), "L");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn wrap_threshold() {
        assert!(!should_wrap(&"x".repeat(50)));
        assert!(should_wrap(&"x".repeat(51)));
    }
}
