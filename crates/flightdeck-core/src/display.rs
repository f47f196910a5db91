//! Text formatting shared by the flight and stats views.

/// Remaining time as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Minutes as `"Xh Ym"`, or `"Ym"` under an hour. Fractions are dropped.
pub fn format_minutes(total: f64) -> String {
    let total = if total.is_finite() && total > 0.0 {
        total.floor() as u64
    } else {
        0
    };
    let hours = total / 60;
    let minutes = total % 60;
    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Greeting for a local hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// ASCII progress bar, `width` cells between brackets.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
