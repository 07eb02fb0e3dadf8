//! Display formatting for dashboard numbers.

/// Round to a whole number and group thousands with commas.
///
/// ```
/// use dynamic_pricing_dashboard::pricing::format::thousands;
///
/// assert_eq!(thousands(1_234_567.4), "1,234,567");
/// assert_eq!(thousands(-999.6), "-1,000");
/// ```
#[must_use]
pub fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);

    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && grouped != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Rupee amount, whole units with grouping (`₹12,345`).
#[must_use]
pub fn rupees(value: f64) -> String {
    format!("₹{}", thousands(value))
}

/// Ratio as a percentage with one decimal (`0.3512` -> `35.1%`).
#[must_use]
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Bar width in percent of the largest value, for CSS bar charts.
#[must_use]
pub fn bar_width(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    format!("{:.1}", (value / max * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(100_000.0), "100,000");
        assert_eq!(thousands(52_431_987.6), "52,431,988");
        assert_eq!(thousands(-0.2), "0");
    }

    #[test]
    fn test_rupees() {
        assert_eq!(rupees(1049.7), "₹1,050");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.3512), "35.1%");
        assert_eq!(percent(0.2), "20.0%");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(50.0, 200.0), "25.0");
        assert_eq!(bar_width(200.0, 200.0), "100.0");
        assert_eq!(bar_width(1.0, 0.0), "0");
    }
}
