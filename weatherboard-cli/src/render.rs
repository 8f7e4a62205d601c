//! Plain-text city cards.

use weatherboard_core::{CityWeatherRecord, Theme};

struct Frame {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

fn frame(theme: Theme) -> Frame {
    match theme {
        Theme::Light => Frame {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        },
        Theme::Dark => Frame {
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
            horizontal: '═',
            vertical: '║',
        },
    }
}

/// Values are labelled with the unit the record was fetched with, not the
/// current setting.
fn card_lines(record: &CityWeatherRecord) -> Vec<String> {
    let symbol = record.unit.symbol();
    let mut lines = vec![
        format!("{} (#{})", record.name, record.id),
        format!("Temp: {}{symbol}", record.temperature),
        format!("Humidity: {}%", record.humidity),
        capitalize(&record.condition.description),
    ];

    if !record.forecast.is_empty() {
        lines.push(String::new());
        for day in &record.forecast {
            lines.push(format!(
                "{}  {:>4}{symbol}  {}",
                day.timestamp.format("%a"),
                day.temperature.round() as i64,
                day.condition.description
            ));
        }
    }

    lines
}

pub fn card(record: &CityWeatherRecord, theme: Theme) -> String {
    let f = frame(theme);
    let lines = card_lines(record);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    let mut out = String::new();
    let rule: String = std::iter::repeat_n(f.horizontal, width).collect();

    out.push(f.top_left);
    out.push_str(&rule);
    out.push(f.top_right);
    out.push('\n');

    for line in &lines {
        let pad = width - 1 - line.chars().count();
        out.push(f.vertical);
        out.push(' ');
        out.push_str(line);
        out.push_str(&" ".repeat(pad));
        out.push(f.vertical);
        out.push('\n');
    }

    out.push(f.bottom_left);
    out.push_str(&rule);
    out.push(f.bottom_right);
    out.push('\n');
    out
}

pub fn cards(records: &[CityWeatherRecord], theme: Theme) -> String {
    if records.is_empty() {
        return "No favorite cities yet. Add one with `weatherboard add <city>`.\n".to_string();
    }

    records
        .iter()
        .map(|r| card(r, theme))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
