use crate::consts::{ASTRONOMICAL_UNIT, EARTH_SEMI_MAJOR_AXIS, SECONDS_PER_DAY};

/// Orbits at planetary scale read better in AU; anything tighter than
/// Earth's orbit stays in kilometers.
pub fn format_semi_major_axis(meters: f64) -> String {
    if meters >= EARTH_SEMI_MAJOR_AXIS {
        format!("{:.3} AU", meters / ASTRONOMICAL_UNIT)
    } else {
        format!("{:.0} km", meters / 1000.0)
    }
}

/// Period in whichever unit keeps the number readable.
pub fn format_period(seconds: f64) -> String {
    let days = seconds / SECONDS_PER_DAY;
    if days >= 365.25 {
        format!("{:.2} years", days / 365.25)
    } else if days >= 1.0 {
        format!("{:.2} days", days)
    } else {
        format!("{:.1} hours", seconds / 3600.0)
    }
}

/// Elapsed simulated time as "y, d, hh:mm:ss", for the on-screen clock.
pub fn format_elapsed(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let mut total_seconds = seconds.abs() as u64;
    let n_minutes = 60;
    let n_hours = n_minutes * 60;
    let n_days = n_hours * 24;
    let n_years = 365 * n_days;

    macro_rules! count_and_remainder {
        ($variable:ident, $divisor:expr) => {
            let $variable = total_seconds / $divisor;
            total_seconds %= $divisor;
        };
    }

    count_and_remainder!(years, n_years);
    count_and_remainder!(days, n_days);
    count_and_remainder!(hours, n_hours);
    count_and_remainder!(minutes, n_minutes);

    format!(
        "{}{}y, {}d, {:02}:{:02}:{:02}",
        sign, years, days, hours, minutes, total_seconds
    )
}
