//! Display formatting for goal values

const PREFIX_UNITS: [&str; 4] = ["$", "€", "£", "¥"];

/// Format a goal value with its unit for display
///
/// ```
/// use waypoint_core::format_goal_value;
///
/// assert_eq!(format_goal_value(1234567.0, "$"), "$1,234,567");
/// assert_eq!(format_goal_value(42.5, "%"), "42.50%");
/// assert_eq!(format_goal_value(21.1, "km"), "21.10 km");
/// assert_eq!(format_goal_value(-1500.0, "€"), "-€1,500");
/// ```
pub fn format_goal_value(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let rendered = if magnitude.fract() == 0.0 {
        format!("{:.0}", magnitude)
    } else {
        format!("{:.2}", magnitude)
    };

    let number = match rendered.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&rendered),
    };
    let sign = if value < 0.0 { "-" } else { "" };

    let unit = unit.trim();
    if unit.is_empty() {
        format!("{}{}", sign, number)
    } else if PREFIX_UNITS.contains(&unit) {
        format!("{}{}{}", sign, unit, number)
    } else if unit == "%" {
        format!("{}{}%", sign, number)
    } else {
        format!("{}{} {}", sign, number, unit)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_prefixes() {
        assert_eq!(format_goal_value(1_000_000.0, "$"), "$1,000,000");
        assert_eq!(format_goal_value(2_500.5, "£"), "£2,500.50");
        assert_eq!(format_goal_value(80.0, "¥"), "¥80");
    }

    #[test]
    fn test_suffix_units() {
        assert_eq!(format_goal_value(75.0, "%"), "75%");
        assert_eq!(format_goal_value(12_345.678, "km"), "12,345.68 km");
        assert_eq!(format_goal_value(3.0, "books"), "3 books");
    }

    #[test]
    fn test_empty_unit_is_bare_number() {
        assert_eq!(format_goal_value(999.0, ""), "999");
        assert_eq!(format_goal_value(1_000.0, "  "), "1,000");
    }

    #[test]
    fn test_negative_sign_before_symbol() {
        assert_eq!(format_goal_value(-250.25, "$"), "-$250.25");
        assert_eq!(format_goal_value(-5.0, "kg"), "-5 kg");
    }

    #[test]
    fn test_rounding_carries_into_grouping() {
        assert_eq!(format_goal_value(999.999, "$"), "$1,000.00");
        assert_eq!(format_goal_value(0.5, ""), "0.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
