use crate::config::ListPolicy;
use crate::error::ValidationError;

pub use shared::utils::russian_format::parse_value;

/// Numbers recovered from a comma-separated list, plus the tokens that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedList {
    pub values: Vec<f64>,
    pub rejected: Vec<String>,
}

/// True when the text is non-blank and parses to a finite number.
pub fn is_valid_number(text: &str) -> bool {
    !text.trim().is_empty() && parse_value(text).is_finite()
}

/// Splits on commas and parses every token. Blank input gives an empty list.
///
/// Tokens that are not numbers are collected in `rejected`; with
/// [`ListPolicy::RejectInvalid`] any such token fails the whole list.
pub fn parse_number_list_with(text: &str, policy: ListPolicy) -> Result<ParsedList, ValidationError> {
    let mut parsed = ParsedList::default();
    if text.trim().is_empty() {
        return Ok(parsed);
    }

    for token in text.split(',').map(str::trim) {
        let value = parse_value(token);
        if value.is_nan() {
            parsed.rejected.push(token.to_string());
        } else {
            parsed.values.push(value);
        }
    }

    if !parsed.rejected.is_empty() {
        match policy {
            ListPolicy::DropInvalid => {
                tracing::debug!(rejected = ?parsed.rejected, "Dropped non-numeric list entries");
            }
            ListPolicy::RejectInvalid => {
                return Err(ValidationError::RejectedEntries(parsed.rejected));
            }
        }
    }
    Ok(parsed)
}

/// Lenient list parsing: non-numeric tokens are dropped.
pub fn parse_number_list(text: &str) -> Vec<f64> {
    match parse_number_list_with(text, ListPolicy::DropInvalid) {
        Ok(parsed) => parsed.values,
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_number() {
        assert!(is_valid_number("42"));
        assert!(is_valid_number("1 234,5"));
        assert!(!is_valid_number(""));
        assert!(!is_valid_number("  "));
        assert!(!is_valid_number("abc"));
        assert!(!is_valid_number("Infinity"));
    }

    #[test]
    fn test_parse_number_list_drops_junk() {
        assert_eq!(parse_number_list("1, 2, abc, 3"), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_number_list(""), Vec::<f64>::new());
        assert_eq!(parse_number_list("   "), Vec::<f64>::new());
    }

    #[test]
    fn test_parse_number_list_keeps_diagnostics() {
        let parsed = parse_number_list_with("10, x, 20, y", ListPolicy::DropInvalid).unwrap();
        assert_eq!(parsed.values, vec![10.0, 20.0]);
        assert_eq!(parsed.rejected, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_parse_number_list_reject_policy() {
        let result = parse_number_list_with("10, x", ListPolicy::RejectInvalid);
        assert_eq!(result, Err(ValidationError::RejectedEntries(vec!["x".to_string()])));

        let clean = parse_number_list_with("10, 20", ListPolicy::RejectInvalid).unwrap();
        assert_eq!(clean.values, vec![10.0, 20.0]);
        assert!(clean.rejected.is_empty());
    }

    #[test]
    fn test_blank_token_counts_as_zero() {
        assert_eq!(parse_number_list("5, , 7"), vec![5.0, 0.0, 7.0]);
    }

    #[test]
    fn test_grouped_tokens() {
        assert_eq!(parse_number_list("1 000, 2 500.5"), vec![1000.0, 2500.5]);
    }
}
