//! INR currency formatting with Indian digit grouping (1,00,000)

/// Format as rupees with two decimals, e.g. `₹1,23,456.50`
pub fn format_inr(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let paise = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && paise > 0 { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, group_indian(paise / 100), paise % 100)
}

/// Format as whole rupees, e.g. `₹75,000`
pub fn format_inr_whole(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rupees = value.abs().round() as u64;
    let sign = if value < 0.0 && rupees > 0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(rupees))
}

/// Last three digits, then groups of two
fn group_indian(whole: u64) -> String {
    let digits = whole.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
