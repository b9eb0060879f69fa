// Number handling shared by the engine and any front end.

// Russian locale conventions: space-grouped thousands, comma as the decimal
// separator. Input also accepts a period as the decimal separator.
pub mod russian_format {
    /// Fraction digits kept when formatting for display.
    pub const MAX_FRACTION_DIGITS: usize = 3;

    const GROUP_SEPARATOR: char = ' ';
    const DECIMAL_SEPARATOR: char = ',';

    // Enough fraction digits to print any finite f64 exactly.
    const EXACT_FRACTION_DIGITS: usize = 1100;

    // Scans the longest numeric prefix the way JavaScript's parseFloat does.
    // Returns the value and the number of bytes consumed.
    pub fn scan_float_prefix(s: &str) -> Option<(f64, usize)> {
        let bytes = s.as_bytes();
        let mut pos = 0;
        if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
            pos += 1;
        }
        if s[pos..].starts_with("Infinity") {
            let end = pos + "Infinity".len();
            let value = if bytes.first() == Some(&b'-') { f64::NEG_INFINITY } else { f64::INFINITY };
            return Some((value, end));
        }

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let mut digits = pos - int_start;
        if pos < bytes.len() && bytes[pos] == b'.' {
            let frac_start = pos + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            digits += frac_end - frac_start;
            if digits > 0 {
                pos = frac_end;
            }
        }
        if digits == 0 {
            return None;
        }

        // Exponent only counts when at least one digit follows it.
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            let mut exp_end = pos + 1;
            if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                pos = exp_end;
            }
        }

        s[..pos].parse::<f64>().ok().map(|value| (value, pos))
    }

    /// parseFloat semantics: leading whitespace skipped, trailing garbage ignored.
    pub fn parse_float(s: &str) -> f64 {
        scan_float_prefix(s.trim_start())
            .map(|(value, _)| value)
            .unwrap_or(f64::NAN)
    }

    /// Whole-string numeric conversion. Blank input converts to 0.
    pub fn parse_strict(s: &str) -> f64 {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        match scan_float_prefix(trimmed) {
            Some((value, consumed)) if consumed == trimmed.len() => value,
            _ => f64::NAN,
        }
    }

    /// Parses user input such as "1 234,5". Blank input yields 0, junk yields NaN.
    pub fn parse_value(s: &str) -> f64 {
        if s.trim().is_empty() {
            return 0.0;
        }
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        parse_float(&compact.replacen(',', ".", 1))
    }

    pub fn format_number(value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
        }

        let fixed = to_fixed(value.abs(), MAX_FRACTION_DIGITS);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut formatted = String::new();
        let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
        if value < 0.0 && !is_zero {
            formatted.push('-');
        }
        formatted.push_str(&group_thousands(int_part));
        if !frac_part.is_empty() {
            formatted.push(DECIMAL_SEPARATOR);
            formatted.push_str(frac_part);
        }
        formatted
    }

    /// Fixed-point text with `digits` fraction digits. Exact ties round away from zero,
    /// judged on the full binary value, so 0.125 gives "0.13" while 1.005 gives "1.00".
    pub fn to_fixed(value: f64, digits: usize) -> String {
        if !value.is_finite() {
            return format_plain(value);
        }
        let exact = format!("{:.*}", EXACT_FRACTION_DIGITS.max(digits + 1), value.abs());
        let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

        let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
        if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
            let mut carry = true;
            for d in kept.iter_mut().rev() {
                if *d == b'9' {
                    *d = b'0';
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                kept.insert(0, b'1');
            }
        }

        let int_len = kept.len() - digits;
        let mut fixed = String::with_capacity(kept.len() + 2);
        if value.is_sign_negative() && kept.iter().any(|d| *d != b'0') {
            fixed.push('-');
        }
        fixed.extend(kept[..int_len].iter().map(|d| *d as char));
        if digits > 0 {
            fixed.push('.');
            fixed.extend(kept[int_len..].iter().map(|d| *d as char));
        }
        fixed
    }

    /// Shortest representation, no grouping (used for percentages in templates).
    /// Magnitudes outside [1e-6, 1e21) switch to exponent form such as `1e-7` or `1e+21`.
    pub fn format_plain(value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-Infinity".to_string() } else { "Infinity".to_string() };
        }
        if value == 0.0 {
            return "0".to_string();
        }
        if (1e-6..1e21).contains(&value.abs()) {
            return format!("{}", value);
        }
        let scientific = format!("{:e}", value);
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => scientific,
        }
    }

    fn group_thousands(digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(c);
        }
        grouped
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_value_blank_is_zero() {
            assert_eq!(parse_value(""), 0.0);
            assert_eq!(parse_value("   "), 0.0);
            assert_eq!(parse_value("\t\n"), 0.0);
        }

        #[test]
        fn test_parse_value_with_grouping_and_comma() {
            assert_eq!(parse_value("1 234,5"), 1234.5);
            assert_eq!(parse_value("12.75"), 12.75);
            assert_eq!(parse_value(" -3,25 "), -3.25);
        }

        #[test]
        fn test_parse_value_junk_is_nan() {
            assert!(parse_value("abc").is_nan());
            assert!(parse_value(",").is_nan());
        }

        #[test]
        fn test_parse_value_keeps_numeric_prefix() {
            assert_eq!(parse_value("12abc"), 12.0);
            assert_eq!(parse_value("1,2,3"), 1.2);
            assert_eq!(parse_value("2e3"), 2000.0);
            assert_eq!(parse_value("5e"), 5.0);
        }

        #[test]
        fn test_parse_strict() {
            assert_eq!(parse_strict(""), 0.0);
            assert_eq!(parse_strict(" 30 "), 30.0);
            assert!(parse_strict("30x").is_nan());
            assert!(parse_strict("inf").is_nan());
        }

        #[test]
        fn test_format_number_groups_thousands() {
            assert_eq!(format_number(1234567.0), "1 234 567");
            assert_eq!(format_number(999.0), "999");
            assert_eq!(format_number(1000.0), "1 000");
            assert_eq!(format_number(-1234.5), "-1 234,5");
        }

        #[test]
        fn test_format_number_limits_fraction_digits() {
            assert_eq!(format_number(1.0 / 3.0), "0,333");
            assert_eq!(format_number(2.5), "2,5");
            assert_eq!(format_number(104.5), "104,5");
            assert_eq!(format_number(-0.0001), "0");
        }

        #[test]
        fn test_format_number_non_finite() {
            assert_eq!(format_number(f64::NAN), "NaN");
            assert_eq!(format_number(f64::INFINITY), "∞");
        }

        #[test]
        fn test_format_plain() {
            assert_eq!(format_plain(10.0), "10");
            assert_eq!(format_plain(2.5), "2.5");
            assert_eq!(format_plain(-0.0), "0");
            assert_eq!(format_plain(0.000001), "0.000001");
            assert_eq!(format_plain(1e20), "100000000000000000000");
        }

        #[test]
        fn test_format_plain_exponent_form() {
            assert_eq!(format_plain(1e-7), "1e-7");
            assert_eq!(format_plain(-2.5e-7), "-2.5e-7");
            assert_eq!(format_plain(1e21), "1e+21");
            assert_eq!(format_plain(1.5e300), "1.5e+300");
        }

        #[test]
        fn test_to_fixed_ties_round_away_from_zero() {
            assert_eq!(to_fixed(0.125, 2), "0.13");
            assert_eq!(to_fixed(-0.125, 2), "-0.13");
            assert_eq!(to_fixed(2.0625, 3), "2.063");
            assert_eq!(to_fixed(0.5, 0), "1");
            assert_eq!(to_fixed(9.995, 2), "9.99");
            assert_eq!(to_fixed(99.5, 0), "100");
        }

        #[test]
        fn test_to_fixed_below_tie_rounds_down() {
            // 1.005 is stored just under the midpoint.
            assert_eq!(to_fixed(1.005, 2), "1.00");
            assert_eq!(to_fixed(1.0 / 3.0, 2), "0.33");
            assert_eq!(to_fixed(-0.001, 2), "0.00");
            assert_eq!(to_fixed(12.0, 2), "12.00");
        }

        #[test]
        fn test_format_number_rounds_ties_up() {
            assert_eq!(format_number(2.0625), "2,063");
            assert_eq!(format_number(4.25 / 4.0), "1,063");
            assert_eq!(format_number(-1.0625), "-1,063");
            assert_eq!(format_number(999.9995), "1 000");
        }
    }
}
