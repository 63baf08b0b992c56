//! Prayer data model and the Aladhan timings API client

use crate::location::Location;
use anyhow::Context;
use chrono::{Datelike, Local};
use log::info;
use serde::Deserialize;
use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

const API_HOST: &str = "https://api.aladhan.com";
const TIMEOUT: Duration = Duration::from_secs(5);

/// The six daily prayer markers, in canonical display order
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Self; 6] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The `data` section of a timingsByCity response
/// https://aladhan.com/prayer-times-api#get-/timingsByCity/-date-
#[derive(Clone, Debug, Deserialize)]
pub struct PrayerData {
    pub timings: Timings,
    pub date: DateInfo,
}

/// Today's times, one "HH:MM" string per prayer. The API sends more keys
/// than these (Imsak, Midnight, ...), which we ignore.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl Timings {
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

/// Gregorian date plus the accompanying Hijri (lunar) date
#[derive(Clone, Debug, Deserialize)]
pub struct DateInfo {
    /// Readable Gregorian date, e.g. "26 Aug 2026"
    pub readable: String,
    pub hijri: HijriDate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HijriDate {
    /// e.g. "13-03-1448"
    pub date: String,
    pub month: HijriMonth,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HijriMonth {
    /// English month name, e.g. "Ramaḍān"
    pub en: String,
}

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: PrayerData,
}

/// Fetch today's timings for a location from the Aladhan API
pub fn fetch(location: &Location) -> anyhow::Result<PrayerData> {
    let today = Local::now();
    let url = format!(
        "{}/v1/timingsByCity/{}-{}-{}",
        API_HOST,
        today.day(),
        today.month(),
        today.year()
    );
    info!("Fetching prayer times from {url}");
    let response = ureq::get(&url)
        .timeout(TIMEOUT)
        .query("city", &location.city)
        .query("country", &location.country)
        .call()
        .with_context(|| format!("Error fetching prayer times from {API_HOST}"))?;
    let body: TimingsResponse = response
        .into_json()
        .context("Error parsing prayer times as JSON")?;
    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prayer_order() {
        let names: Vec<_> = Prayer::ALL.iter().map(|prayer| prayer.name()).collect();
        assert_eq!(
            names,
            ["Fajr", "Sunrise", "Dhuhr", "Asr", "Maghrib", "Isha"]
        );
    }

    #[test]
    fn test_deserialize_response() {
        // Trimmed-down real response; extra timing keys must be tolerated
        let body = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "timings": {
                    "Fajr": "05:00",
                    "Sunrise": "06:30",
                    "Dhuhr": "12:15",
                    "Asr": "15:45",
                    "Sunset": "18:20",
                    "Maghrib": "18:20",
                    "Isha": "19:50",
                    "Imsak": "04:50",
                    "Midnight": "00:15"
                },
                "date": {
                    "readable": "26 Aug 2026",
                    "timestamp": "1787997540",
                    "hijri": {
                        "date": "13-03-1448",
                        "month": {"number": 3, "en": "Rabīʿ al-awwal"}
                    }
                }
            }
        }"#;
        let response: TimingsResponse = serde_json::from_str(body).unwrap();
        let data = response.data;
        assert_eq!(data.timings.get(Prayer::Fajr), "05:00");
        assert_eq!(data.timings.get(Prayer::Isha), "19:50");
        assert_eq!(data.date.readable, "26 Aug 2026");
        assert_eq!(data.date.hijri.date, "13-03-1448");
        assert_eq!(data.date.hijri.month.en, "Rabīʿ al-awwal");
    }
}
