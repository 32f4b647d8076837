//! Formatting utilities used for CLI outputs.

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// `1234.5` → `€1234.50`
pub fn fmt_money(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, amount)
}

pub fn fmt_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}
