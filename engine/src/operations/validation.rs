// Input checks shared by several operations
use shared::models::CalculationRow;

use super::EvalContext;
use crate::error::{Field, ValidationError};
use crate::parsing::{is_valid_number, is_valid_time, parse_number_list_with, parse_value};

pub fn require_number(text: &str, field: Field) -> Result<f64, ValidationError> {
    if is_valid_number(text) {
        Ok(parse_value(text))
    } else {
        Err(ValidationError::NotANumber(field))
    }
}

/// First and second values as numbers.
pub fn require_pair(row: &CalculationRow) -> Result<(f64, f64), ValidationError> {
    let v1 = require_number(&row.value1, Field::First)?;
    let v2 = require_number(&row.value2, Field::Second)?;
    Ok((v1, v2))
}

pub fn require_time(text: &str, field: Field) -> Result<(), ValidationError> {
    if is_valid_time(text) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTime(field))
    }
}

/// Numbers from the first list field.
pub fn list_numbers(row: &CalculationRow, ctx: &EvalContext) -> Result<Vec<f64>, ValidationError> {
    Ok(parse_number_list_with(&row.value1, ctx.list_policy)?.values)
}

/// Numbers from both list fields, in order.
pub fn all_numbers(row: &CalculationRow, ctx: &EvalContext) -> Result<Vec<f64>, ValidationError> {
    let mut numbers = parse_number_list_with(&row.value1, ctx.list_policy)?.values;
    numbers.extend(parse_number_list_with(&row.value2, ctx.list_policy)?.values);
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListPolicy;

    #[test]
    fn test_require_pair() {
        assert_eq!(require_pair(&CalculationRow::new("200", "10")), Ok((200.0, 10.0)));
        assert_eq!(
            require_pair(&CalculationRow::new("", "10")),
            Err(ValidationError::NotANumber(Field::First))
        );
        assert_eq!(
            require_pair(&CalculationRow::new("1", "ten")),
            Err(ValidationError::NotANumber(Field::Second))
        );
    }

    #[test]
    fn test_all_numbers_merges_fields() {
        let ctx = EvalContext::default();
        let row = CalculationRow::new("12, 18", "24, junk");
        assert_eq!(all_numbers(&row, &ctx), Ok(vec![12.0, 18.0, 24.0]));
    }

    #[test]
    fn test_all_numbers_respects_policy() {
        let ctx = EvalContext {
            list_policy: ListPolicy::RejectInvalid,
            ..EvalContext::default()
        };
        let row = CalculationRow::new("12, 18", "24, junk");
        assert_eq!(
            all_numbers(&row, &ctx),
            Err(ValidationError::RejectedEntries(vec!["junk".to_string()]))
        );
    }

    #[test]
    fn test_require_time() {
        assert!(require_time("1:30", Field::First).is_ok());
        assert_eq!(require_time("1:75", Field::Second), Err(ValidationError::InvalidTime(Field::Second)));
    }
}
