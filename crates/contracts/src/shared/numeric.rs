//! Numeric input handling for editable cost tables
//!
//! Cell values are kept exactly as the user typed them and only coerced to
//! a number at computation time. The input gate accepts digits with at most
//! one decimal point; anything else is rejected and the cell keeps its
//! previous contents.

/// Check a keystroke result against the decimal-number pattern
///
/// Accepts the empty string (clearing a cell) and strings of ASCII digits
/// containing at most one `.`. A lone `.` is accepted as the start of a
/// fractional entry.
pub fn is_decimal_input(s: &str) -> bool {
    let mut dots = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

/// Coerce an as-entered cell value to a number; empty or malformed input
/// counts as zero.
pub fn parse_input(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Render a stored scalar back into an editable cell, the way a user
/// would have typed it: "14", "8.5", no trailing zeros.
pub fn format_input(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v.fract() == 0.0 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.6}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_decimal_numbers() {
        assert!(is_decimal_input(""));
        assert!(is_decimal_input("0"));
        assert!(is_decimal_input("14"));
        assert!(is_decimal_input("14.5"));
        assert!(is_decimal_input(".5"));
        assert!(is_decimal_input("5."));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_decimal_input("1.2.3"));
        assert!(!is_decimal_input("-1"));
        assert!(!is_decimal_input("1,5"));
        assert!(!is_decimal_input("abc"));
        assert!(!is_decimal_input("1e5"));
        assert!(!is_decimal_input(" 1"));
    }

    #[test]
    fn parses_with_zero_fallback() {
        assert_eq!(parse_input("12.5"), 12.5);
        assert_eq!(parse_input(""), 0.0);
        assert_eq!(parse_input("."), 0.0);
        assert_eq!(parse_input("garbage"), 0.0);
        assert_eq!(parse_input("NaN"), 0.0);
    }

    #[test]
    fn formats_back_without_trailing_zeros() {
        assert_eq!(format_input(14.0), "14");
        assert_eq!(format_input(8.5), "8.5");
        assert_eq!(format_input(0.0), "0");
        assert_eq!(format_input(0.24), "0.24");
    }
}
