use cityweather_core::{SkyKind, WeatherError, WeatherResult};

fn sky_glyph(sky: SkyKind) -> &'static str {
    match sky {
        SkyKind::Sunny => "☀",
        SkyKind::PartlySunny => "⛅",
        SkyKind::Cloud => "☁",
        SkyKind::Rainy => "☂",
        SkyKind::Snow => "❄",
        SkyKind::Thunderstorm => "⚡",
    }
}

/// Plain-text weather card.
pub fn render(result: &WeatherResult) -> String {
    let mut out = format!(
        "{}\n{}\n\n  {}°C  {}\n  {}\n",
        result.short_city(),
        result.city,
        result.temperature,
        result.condition,
        result.description,
    );

    if !result.hourly_forecast.is_empty() {
        out.push_str("\nWeather Today\n");
        for hour in &result.hourly_forecast {
            out.push_str(&format!(
                "  {}  {} {:>3}°\n",
                hour.time,
                sky_glyph(hour.sky()),
                hour.temperature
            ));
        }
    }

    out
}

pub fn render_json(result: &WeatherResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn render_error_json(err: &WeatherError) -> String {
    serde_json::json!({ "error": err.kind(), "message": err.to_string() }).to_string()
}
