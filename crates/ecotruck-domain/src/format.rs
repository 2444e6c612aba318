//! Brazilian-style number formatting for reports and exports

/// Currency in reais, e.g. `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("R$ {}", value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}R$ {}", sign, format_decimal(value.abs(), 2))
}

/// Decimal with `,` as separator and `.` grouping thousands
pub fn format_decimal(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", places, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Integer with `.` grouping thousands, e.g. `80.000`
pub fn format_thousands(value: u64) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Truncate to `max_len` characters, marking the cut with `..`
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
