//! Display formatting for KPI and table values.

/// Groups an integer into thousands: `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Engagement ratios are displayed with four decimal places.
pub fn format_engagement(v: f64) -> String {
    format!("{:.4}", v)
}
