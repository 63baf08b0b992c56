//! Next-prayer selection and countdown math

use crate::timings::{Prayer, Timings};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

/// Combine today's date with a prayer's "HH:MM". An elapsed time rolls over
/// to tomorrow only when its hour is before noon; elapsed afternoon/evening
/// times stay in the past and are handled by the Fajr fallback in
/// [next_prayer]. Keep that asymmetry: generalizing the rollover to all
/// prayers would change which prayer gets selected.
fn prayer_datetime(now: NaiveDateTime, time: &str) -> Option<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    let mut datetime = now.date().and_time(time);
    if datetime < now && time.hour() < 12 {
        datetime += Duration::days(1);
    }
    Some(datetime)
}

/// Find the prayer with the smallest strictly-positive time until it. When
/// every prayer has already elapsed, count down to tomorrow's Fajr instead.
/// Timing strings that don't parse are skipped.
pub fn next_prayer(timings: &Timings, now: NaiveDateTime) -> (Prayer, Duration) {
    let mut next: Option<(Prayer, Duration)> = None;
    for prayer in Prayer::ALL {
        let Some(datetime) = prayer_datetime(now, timings.get(prayer)) else {
            continue;
        };
        let diff = datetime - now;
        if diff > Duration::zero() && next.map_or(true, |(_, min)| diff < min) {
            next = Some((prayer, diff));
        }
    }

    next.unwrap_or_else(|| {
        let remaining = prayer_datetime(now, timings.get(Prayer::Fajr))
            .map(|fajr| fajr + Duration::days(1) - now)
            .unwrap_or_else(Duration::zero);
        (Prayer::Fajr, remaining)
    })
}

/// Format a countdown as zero-padded HH:MM:SS, wrapping at 24 hours
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.num_seconds().rem_euclid(24 * 60 * 60);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timings() -> Timings {
        Timings {
            fajr: "05:00".into(),
            sunrise: "06:30".into(),
            dhuhr: "12:15".into(),
            asr: "15:45".into(),
            maghrib: "18:20".into(),
            isha: "19:50".into(),
        }
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 26)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn next(timings: &Timings, now: NaiveDateTime) -> (Prayer, String) {
        let (prayer, remaining) = next_prayer(timings, now);
        (prayer, format_remaining(remaining))
    }

    #[test]
    fn test_next_prayer_midday() {
        // Fajr and Sunrise have elapsed (and rolled over to tomorrow),
        // Dhuhr at 12:15 is the nearest upcoming prayer
        assert_eq!(next(&timings(), at(12, 0, 0)), (Prayer::Dhuhr, "00:15:00".into()));
    }

    #[test]
    fn test_next_prayer_afternoon() {
        assert_eq!(next(&timings(), at(13, 0, 0)), (Prayer::Asr, "02:45:00".into()));
    }

    #[test]
    fn test_late_night_rolls_to_fajr() {
        // Isha has passed; tomorrow's Fajr (via the morning rollover) wins
        assert_eq!(next(&timings(), at(23, 0, 0)), (Prayer::Fajr, "06:00:00".into()));
    }

    #[test]
    fn test_evening_prefers_rolled_over_fajr() {
        // At 20:00 every prayer today has elapsed. Maghrib and Isha do not
        // roll over (hour >= 12), so the selection lands on tomorrow's Fajr
        assert_eq!(next(&timings(), at(20, 0, 0)), (Prayer::Fajr, "09:00:00".into()));
    }

    #[test]
    fn test_fallback_when_nothing_upcoming() {
        // No time rolls over when every hour is >= 12, so the explicit
        // Fajr fallback branch kicks in: (Fajr + 1 day) - now
        let timings = Timings {
            fajr: "13:00".into(),
            sunrise: "14:00".into(),
            dhuhr: "15:00".into(),
            asr: "16:00".into(),
            maghrib: "17:00".into(),
            isha: "18:00".into(),
        };
        assert_eq!(next(&timings, at(20, 0, 0)), (Prayer::Fajr, "17:00:00".into()));
    }

    #[test]
    fn test_unparseable_time_skipped() {
        let mut timings = timings();
        timings.dhuhr = "bogus".into();
        assert_eq!(next(&timings, at(12, 0, 0)), (Prayer::Asr, "03:45:00".into()));
    }

    #[test]
    fn test_exact_prayer_time_not_selected() {
        // A zero difference is not strictly positive
        assert_eq!(
            next(&timings(), at(12, 15, 0)),
            (Prayer::Asr, "03:30:00".into())
        );
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_remaining(Duration::seconds(3661)), "01:01:01");
        // Wraps at 24 hours, like the countdown always has
        assert_eq!(
            format_remaining(Duration::seconds(25 * 3600)),
            "01:00:00"
        );
    }
}
