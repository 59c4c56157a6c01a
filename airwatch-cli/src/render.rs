//! Text rendering of the dashboard panels.

use airwatch_core::{
    AirQualityIndex, DashboardState, RecentCities, WeatherReading,
    format::{
        air_quality_bar_percent, air_quality_info_for, capitalize_first, format_local_time,
        format_temperature, icon_for,
    },
};
use owo_colors::OwoColorize;

pub const TITLE: &str = "Weather & Air Quality Dashboard";

const BAR_CELLS: u32 = 20;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
}

pub fn render_dashboard(state: &DashboardState, opts: RenderOptions) -> String {
    let mut out = String::new();

    let title = match state.background_class() {
        Some(class) => format!("{TITLE} [{class}]"),
        None => TITLE.to_string(),
    };
    out.push_str(&paint_bold(&title, opts));
    out.push('\n');

    if let Some(line) = render_recent(&state.recent) {
        out.push_str(&line);
        out.push('\n');
    }

    if let Some(error) = &state.error {
        out.push('\n');
        out.push_str(&paint_error(error, opts));
        out.push('\n');
    }

    if let Some(weather) = &state.weather {
        out.push('\n');
        out.push_str(&render_weather(weather));
    }

    if let Some(aqi) = state.air_quality {
        out.push('\n');
        out.push_str(&render_air_quality(aqi, opts));
    }

    out
}

pub fn render_recent(recent: &RecentCities) -> Option<String> {
    if recent.is_empty() {
        return None;
    }
    Some(format!("Recent: {}", recent.iter().collect::<Vec<_>>().join(" | ")))
}

pub fn render_weather(w: &WeatherReading) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}, {}\n", icon_for(w.condition.as_deref()), w.city, w.country));
    out.push_str(&format!("{}\n", format_temperature(w.temperature_c)));
    out.push_str(&format!("{}\n\n", capitalize_first(&w.description)));
    out.push_str(&format!("Feels like: {}\n", format_temperature(w.feels_like_c)));
    out.push_str(&format!("Humidity: {}%\n", w.humidity_pct));
    out.push_str(&format!("Wind: {} m/s\n", w.wind_speed_mps));
    out.push_str(&format!("Pressure: {} hPa\n", w.pressure_hpa));
    out.push_str(&format!("Sunrise: {}\n", format_local_time(w.sunrise)));
    out.push_str(&format!("Sunset: {}\n", format_local_time(w.sunset)));
    out
}

pub fn render_air_quality(aqi: AirQualityIndex, opts: RenderOptions) -> String {
    let info = air_quality_info_for(aqi);
    let percent = air_quality_bar_percent(aqi);
    let filled = (percent * BAR_CELLS / 100) as usize;
    let bar = format!(
        "[{}{}] {percent}%",
        "█".repeat(filled),
        "░".repeat(BAR_CELLS as usize - filled)
    );
    let label = format!("{aqi} – {}", info.label);

    let mut out = String::from("Air Quality Index\n");
    out.push_str(&paint_hex(&bar, info.color, opts));
    out.push('\n');
    out.push_str(&paint_hex(&label, info.color, opts));
    out.push('\n');
    if !info.description.is_empty() {
        out.push_str(info.description);
        out.push('\n');
    }
    out
}

/// `#rrggbb` to RGB; anything else is not a usable color.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn paint_hex(text: &str, hex: &str, opts: RenderOptions) -> String {
    match (opts.color, parse_hex_color(hex)) {
        (true, Some((r, g, b))) => text.truecolor(r, g, b).to_string(),
        _ => text.to_string(),
    }
}

fn paint_bold(text: &str, opts: RenderOptions) -> String {
    if opts.color { text.bold().to_string() } else { text.to_string() }
}

fn paint_error(text: &str, opts: RenderOptions) -> String {
    if opts.color { text.red().to_string() } else { text.to_string() }
}
