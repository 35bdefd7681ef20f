//! Column constraint checks shared by every storage backend
//!
//! Constraints are declared with `validator` derives on the records and drafts
//! in [`crate::core::entity`]; this module runs them and converts the result
//! into a [`ValidationError`] naming the table and every rejected column.

use crate::core::entity::EntityKind;
use crate::core::error::{FieldViolation, ValidationError};
use validator::Validate;

/// Run the declared constraints of `value`, which belongs to table `entity`
pub fn check<T: Validate>(entity: EntityKind, value: &T) -> Result<(), ValidationError> {
    let Err(errors) = value.validate() else {
        return Ok(());
    };

    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldViolation {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed the '{}' check", err.code)),
            })
        })
        .collect();

    // field_errors() is a hash map
    violations.sort_by(|a, b| a.field.cmp(&b.field));

    Err(ValidationError::Fields { entity, violations })
}

/// Parse an integer column supplied as text
pub fn parse_integer_column(
    entity: EntityKind,
    field: &str,
    raw: &str,
) -> Result<i32, ValidationError> {
    raw.trim().parse::<i32>().map_err(|_| {
        ValidationError::field(
            entity,
            field,
            format!("expected a number but got '{}'", raw),
        )
    })
}
