//! `HH:MM:SS` formatting and parsing for countdown values

/// Format whole seconds as zero-padded `HH:MM:SS`
///
/// Hours are not wrapped at 24, so very long durations render as `100:00:00`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parse `HH:MM:SS`, `MM:SS` or a plain number of seconds
pub fn parse_hms(input: &str) -> Result<u64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() > 3 {
        return Err(format!("invalid duration '{}': expected HH:MM:SS", input));
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let value: u64 = part
            .parse()
            .map_err(|_| format!("invalid duration '{}': '{}' is not a number", input, part))?;
        values.push(value);
    }

    // Leading component is unbounded, the rest must fit a clock face.
    if values.iter().skip(1).any(|&v| v > 59) {
        return Err(format!("invalid duration '{}': minutes and seconds must be below 60", input));
    }

    values
        .iter()
        .try_fold(0u64, |acc, &v| acc.checked_mul(60)?.checked_add(v))
        .ok_or_else(|| format!("invalid duration '{}': duration too large", input))
}
