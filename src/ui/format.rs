//! Display formatting of money and percentages.

/// Whole crowns with thousands separators, truncated toward zero:
/// `-12345.9` → `-12,345 Kč`.
pub fn czk(amount: f64) -> String {
    format!("{} Kč", group_thousands(amount.trunc() as i64))
}

/// Millions with the given number of decimals: `2_450_000` → `2.45 M`.
pub fn millions(amount: f64, decimals: usize) -> String {
    format!("{:.*} M", decimals, amount / 1_000_000.0)
}

pub fn percent(value: f64) -> String {
    format!("{value:.2} %")
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
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
    fn czk_groups_and_truncates() {
        assert_eq!(czk(0.0), "0 Kč");
        assert_eq!(czk(999.99), "999 Kč");
        assert_eq!(czk(8_333.33), "8,333 Kč");
        assert_eq!(czk(1_234_567.0), "1,234,567 Kč");
        assert_eq!(czk(-596.2), "-596 Kč");
        assert_eq!(czk(-12_345.9), "-12,345 Kč");
    }

    #[test]
    fn millions_and_percent() {
        assert_eq!(millions(2_450_000.0, 2), "2.45 M");
        assert_eq!(millions(7_960_000.0, 1), "8.0 M");
        assert_eq!(percent(5.126), "5.13 %");
    }
}
