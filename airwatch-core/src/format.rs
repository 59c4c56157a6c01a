//! Pure mappings from raw readings to display values.

use chrono::{DateTime, Local, TimeZone};

use crate::model::AirQualityIndex;

/// Display band for an air quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityInfo {
    pub label: &'static str,
    /// CSS-style hex color. The unknown band carries a deliberately invalid
    /// placeholder that renderers should leave untinted.
    pub color: &'static str,
    pub description: &'static str,
}

/// Temperature band used to tint the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundClass {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl BackgroundClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundClass::Cold => "cold",
            BackgroundClass::Cool => "cool",
            BackgroundClass::Warm => "warm",
            BackgroundClass::Hot => "hot",
        }
    }
}

impl std::fmt::Display for BackgroundClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_ICON: &str = "🌤️";

pub fn icon_for(condition: Option<&str>) -> &'static str {
    let Some(condition) = condition else {
        return DEFAULT_ICON;
    };

    match condition.to_lowercase().as_str() {
        "clear" => "☀️",
        "clouds" => "☁️",
        "rain" | "drizzle" => "🌧️",
        "snow" => "❄️",
        "thunderstorm" => "⛈️",
        "mist" | "fog" | "haze" => "🌫️",
        _ => DEFAULT_ICON,
    }
}

/// Zero and NaN count as "no temperature" and get no class.
pub fn background_class_for(temperature: Option<f64>) -> Option<BackgroundClass> {
    let t = temperature.filter(|t| *t != 0.0 && !t.is_nan())?;

    Some(if t < 10.0 {
        BackgroundClass::Cold
    } else if t < 20.0 {
        BackgroundClass::Cool
    } else if t < 30.0 {
        BackgroundClass::Warm
    } else {
        BackgroundClass::Hot
    })
}

pub fn air_quality_info_for(index: AirQualityIndex) -> AirQualityInfo {
    let (label, color, description) = match index.value() {
        1 => ("Good", "#00e400", "Air quality is satisfactory."),
        2 => ("Fair", "#ffff00", "Air quality is acceptable."),
        3 => ("Moderate", "#ff7e00", "Sensitive groups may experience effects."),
        4 => ("Poor", "#ff0000", "Everyone may experience health effects."),
        5 => ("Very Poor", "#8f3f97", "Health warnings of emergency conditions."),
        _ => ("Unknown", "#gray", ""),
    };

    AirQualityInfo { label, color, description }
}

/// Bar fill in percent: 20 per index step, capped at 100.
pub fn air_quality_bar_percent(index: AirQualityIndex) -> u32 {
    index.value().saturating_mul(20).min(100)
}

/// Nearest whole degree, halves rounded up (-2.5 → -2).
pub fn round_temperature(celsius: f64) -> i64 {
    let rounded = celsius.round();
    // `f64::round` sends halves away from zero; negative halves go up instead.
    if rounded - celsius == -0.5 { (rounded + 1.0) as i64 } else { rounded as i64 }
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_temperature(celsius))
}

/// Upper-case the first character, leave the rest as is.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `HH:MM` wall-clock time of a unix timestamp in `tz`.
pub fn format_clock_time<Tz>(unix_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp(unix_secs, 0)?;
    Some(utc.with_timezone(tz).format("%H:%M").to_string())
}

/// `HH:MM` in the machine's local timezone; `--:--` for out-of-range input.
pub fn format_local_time(unix_secs: i64) -> String {
    format_clock_time(unix_secs, &Local).unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn icon_lookup_ignores_case() {
        assert_eq!(icon_for(Some("Clear")), "☀️");
        assert_eq!(icon_for(Some("clear")), "☀️");
        assert_eq!(icon_for(Some("CLOUDS")), "☁️");
    }

    #[test]
    fn icon_groups_share_glyphs() {
        assert_eq!(icon_for(Some("Rain")), "🌧️");
        assert_eq!(icon_for(Some("Drizzle")), "🌧️");
        assert_eq!(icon_for(Some("Snow")), "❄️");
        assert_eq!(icon_for(Some("Thunderstorm")), "⛈️");
        for haze in ["Mist", "Fog", "Haze"] {
            assert_eq!(icon_for(Some(haze)), "🌫️");
        }
    }

    #[test]
    fn icon_falls_back_for_unknown_or_missing() {
        assert_eq!(icon_for(Some("Tornado")), DEFAULT_ICON);
        assert_eq!(icon_for(Some("")), DEFAULT_ICON);
        assert_eq!(icon_for(None), DEFAULT_ICON);
    }

    #[test]
    fn background_bands() {
        assert_eq!(background_class_for(Some(9.9)), Some(BackgroundClass::Cold));
        assert_eq!(background_class_for(Some(-12.0)), Some(BackgroundClass::Cold));
        assert_eq!(background_class_for(Some(10.0)), Some(BackgroundClass::Cool));
        assert_eq!(background_class_for(Some(19.99)), Some(BackgroundClass::Cool));
        assert_eq!(background_class_for(Some(20.0)), Some(BackgroundClass::Warm));
        assert_eq!(background_class_for(Some(30.0)), Some(BackgroundClass::Hot));
    }

    #[test]
    fn background_zero_and_absent_have_no_class() {
        assert_eq!(background_class_for(Some(0.0)), None);
        assert_eq!(background_class_for(Some(-0.0)), None);
        assert_eq!(background_class_for(Some(f64::NAN)), None);
        assert_eq!(background_class_for(None), None);
    }

    #[test]
    fn air_quality_bands() {
        let moderate = air_quality_info_for(AirQualityIndex(3));
        assert_eq!(moderate.label, "Moderate");
        assert_eq!(moderate.description, "Sensitive groups may experience effects.");
        assert_eq!(moderate.color, "#ff7e00");

        assert_eq!(air_quality_info_for(AirQualityIndex(1)).label, "Good");
        assert_eq!(air_quality_info_for(AirQualityIndex(2)).label, "Fair");
        assert_eq!(air_quality_info_for(AirQualityIndex(4)).label, "Poor");
        assert_eq!(air_quality_info_for(AirQualityIndex(5)).label, "Very Poor");
    }

    #[test]
    fn air_quality_out_of_range_is_unknown() {
        for idx in [0, 6, 9] {
            let info = air_quality_info_for(AirQualityIndex(idx));
            assert_eq!(info.label, "Unknown");
            assert_eq!(info.description, "");
        }
    }

    #[test]
    fn bar_width_scales_with_index() {
        assert_eq!(air_quality_bar_percent(AirQualityIndex(2)), 40);
        assert_eq!(air_quality_bar_percent(AirQualityIndex(5)), 100);
        assert_eq!(air_quality_bar_percent(AirQualityIndex(9)), 100);
    }

    #[test]
    fn temperature_rounds_half_up() {
        assert_eq!(format_temperature(15.4), "15°C");
        assert_eq!(format_temperature(15.5), "16°C");
        assert_eq!(format_temperature(-2.5), "-2°C");
        assert_eq!(format_temperature(-2.6), "-3°C");
    }

    #[test]
    fn rounding_is_exact_near_half() {
        assert_eq!(round_temperature(0.49999999999999994), 0);
        assert_eq!(round_temperature(-0.49999999999999994), 0);
        assert_eq!(round_temperature(0.5), 1);
        assert_eq!(round_temperature(-0.5), 0);
        assert_eq!(round_temperature(-1.5), -1);
    }

    #[test]
    fn capitalize_only_first_letter() {
        assert_eq!(capitalize_first("light rain"), "Light rain");
        assert_eq!(capitalize_first("overcast CLOUDS"), "Overcast CLOUDS");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn clock_time_uses_given_zone() {
        // 2023-11-14T22:13:20Z
        let ts = 1_700_000_000;
        assert_eq!(format_clock_time(ts, &Utc).as_deref(), Some("22:13"));

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_clock_time(ts, &plus_two).as_deref(), Some("00:13"));
    }

    #[test]
    fn local_time_out_of_range_is_placeholder() {
        assert_eq!(format_local_time(i64::MAX), "--:--");
    }
}
