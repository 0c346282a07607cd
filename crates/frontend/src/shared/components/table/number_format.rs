//! Number formatting for tables, totals and documents

/// Currency symbol (Peruvian sol)
pub const CURRENCY: &str = "S/.";

/// Fixed decimals with a space every three integer digits
///
/// # Example
///
/// ```ignore
/// assert_eq!(format_decimal(1234.567, 2), "1 234.57");
/// ```
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        // -0.0 and tiny negatives round to zero and print unsigned
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => ("", rest),
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let grouped = group_thousands(integer_part);
    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Amount without the currency symbol, 2 decimals
pub fn format_amount(value: f64) -> String {
    format_decimal(value, 2)
}

/// Amount with the currency symbol: `S/. 1 234.50`
pub fn format_money(value: f64) -> String {
    format!("{} {}", CURRENCY, format_amount(value))
}

/// Quantities come as floats from the API; whole values print without decimals
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_decimal(value, 0)
    } else {
        format_decimal(value, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "S/. 1 234.50");
        assert_eq!(format_money(0.0), "S/. 0.00");
        assert_eq!(format_money(-1234567.891), "S/. -1 234 567.89");
    }

    #[test]
    fn test_negative_zero_prints_unsigned() {
        assert_eq!(format_money(-0.0), "S/. 0.00");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(-0.5), "-0.50");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.567, 0), "1 235");
        assert_eq!(format_decimal(123.4, 1), "123.4");
        assert_eq!(format_decimal(999999.999, 2), "1 000 000.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.50");
        assert_eq!(format_quantity(1500.0), "1 500");
    }
}
