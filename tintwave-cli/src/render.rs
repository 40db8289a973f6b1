use chrono::{DateTime, FixedOffset};
use tintwave_core::{
    AcquisitionError, AcquisitionState, CurrentConditions, ForecastEntry, Label, Language,
};

/// Render everything the state currently holds: error, current block, forecast block.
///
/// A forecast that cannot be summarized is reported as a line of its own and
/// never hides the current conditions.
pub fn render_state(state: &AcquisitionState) -> String {
    let lang = state.language();
    let mut out = String::new();

    if let Some(err) = state.error() {
        out.push_str(&format!("! {}\n", err.message(lang)));
    }
    if state.is_loading() {
        out.push_str(&format!("{}\n", Label::Loading.text(lang)));
    }
    if let Some(current) = state.current().state().data() {
        out.push_str(&render_current(current, lang));
    }
    match state.daily_summary() {
        Some(Ok(summary)) => out.push_str(&render_daily(&summary, lang)),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "forecast could not be summarized");
            out.push_str(&format!("! {}\n", AcquisitionError::Unknown.message(lang)));
        }
        None => {}
    }

    out
}

pub fn render_current(current: &CurrentConditions, lang: Language) -> String {
    let place = if current.sys.country.is_empty() {
        current.name.clone()
    } else {
        format!("{}, {}", current.name, current.sys.country)
    };
    let main = &current.main;

    let mut out = format!("== {} · {place} ==\n", Label::CurrentWeather.text(lang));
    out.push_str(&format!("{}: {}°C\n", Label::Temperature.text(lang), main.temp));
    out.push_str(&format!("{}: {}°C\n", Label::FeelsLike.text(lang), main.feels_like));
    out.push_str(&format!(
        "{}: {}°C / {}°C\n",
        Label::MinMax.text(lang),
        main.temp_min,
        main.temp_max
    ));
    out.push_str(&format!("{}: {}%\n", Label::Humidity.text(lang), main.humidity));
    out.push_str(&format!("{}: {} hPa\n", Label::Pressure.text(lang), main.pressure));
    out.push_str(&format!(
        "{}: {} m/s\n",
        Label::WindSpeed.text(lang),
        current.wind.speed
    ));

    if let Some(condition) = current.condition() {
        out.push_str(&format!(
            "{}: {} ({})\n",
            Label::Weather.text(lang),
            condition.description,
            condition.icon_url()
        ));
    }

    if let Some(sunrise) = local_time(current.sys.sunrise, current.timezone) {
        out.push_str(&format!("{}: {sunrise}\n", Label::Sunrise.text(lang)));
    }
    if let Some(sunset) = local_time(current.sys.sunset, current.timezone) {
        out.push_str(&format!("{}: {sunset}\n", Label::Sunset.text(lang)));
    }

    out
}

pub fn render_daily(summary: &[ForecastEntry], lang: Language) -> String {
    let mut out = format!("== {} ==\n", Label::DailyForecast.text(lang));

    for entry in summary {
        let day = entry
            .stamp()
            .map(|s| s.date.format("%a, %b %-d").to_string())
            .unwrap_or_else(|_| entry.dt_txt.clone());
        let (description, icon) = entry
            .condition()
            .map(|c| (c.description.as_str(), c.icon_url()))
            .unwrap_or(("-", String::new()));

        out.push_str(&format!(
            "{day:<12} {:>4}°C  {description:<20} {}: {} m/s  {}: {}%  {icon}\n",
            entry.main.temp.round(),
            Label::WindSpeed.text(lang),
            entry.wind.speed,
            Label::Humidity.text(lang),
            entry.main.humidity,
        ));
    }

    out
}

/// `HH:MM` at the location, from epoch seconds and a UTC offset in seconds.
fn local_time(epoch: i64, offset_secs: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    let at = DateTime::from_timestamp(epoch, 0)?.with_timezone(&offset);
    Some(at.format("%H:%M").to_string())
}
