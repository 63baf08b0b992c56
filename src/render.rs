//! Terminal presentation: divider, colors, glyphs, and the prayer table

use crate::{
    location::Location,
    timings::{Prayer, PrayerData},
};
use crossterm::{style::Stylize, terminal};

/// Used when the terminal size can't be queried (e.g. output is piped)
const FALLBACK_WIDTH: u16 = 80;

/// Convert "HH:MM" to "H:MM AM/PM". Hour 0 is 12 AM and hour 12 is 12 PM.
/// A malformed input renders as an inline error string instead of taking
/// down the whole display.
pub fn twelve_hour(time: &str) -> String {
    match parse_hhmm(time) {
        Some((hours, minutes)) => {
            let period = if hours < 12 { "AM" } else { "PM" };
            let hours = match hours % 12 {
                0 => 12,
                hours => hours,
            };
            format!("{hours}:{minutes:02} {period}")
        }
        None => format!("Error: invalid time {time:?}"),
    }
}

fn parse_hhmm(time: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours <= 23 && minutes <= 59).then_some((hours, minutes))
}

/// Print the full report: header, dates, countdown, then the six prayers in
/// canonical order with the next one highlighted. Writes to stdout only.
pub fn print_report(location: &Location, data: &PrayerData, next: Prayer, remaining: &str) {
    let width = terminal::size()
        .map(|(columns, _)| columns)
        .unwrap_or(FALLBACK_WIDTH);
    let divider = "─".repeat(width as usize).blue();

    println!("{divider}");
    let title = format!("Prayer Times for {}, {}", location.city, location.country);
    println!("🕌 {} 🕌", title.bold());

    println!("{divider}");
    println!(
        "Date: {} | Hijri: {} ({})",
        data.date.readable, data.date.hijri.date, data.date.hijri.month.en
    );

    println!("{divider}");
    let countdown = format!("Next Prayer: {next} in {remaining}");
    println!("{}", countdown.cyan().bold());

    println!("{divider}");
    println!("{}", "Prayer Times:".bold());

    let name_width = Prayer::ALL
        .iter()
        .map(|prayer| prayer.name().len())
        .max()
        .unwrap_or(0);
    for prayer in Prayer::ALL {
        let name = format!("{:name_width$}", prayer.name());
        let time = twelve_hour(data.timings.get(prayer));
        if prayer == next {
            println!(
                "🕌 {}: {}",
                name.cyan().bold(),
                format!("{time} ← Next").cyan()
            );
        } else {
            println!("📿 {}: {}", name.green().bold(), time.yellow());
        }
    }

    println!("{divider}");
}
