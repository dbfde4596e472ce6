//! Recursive evaluation of a value against an expression.

use crate::error::{Result, ValidationErrors};
use crate::expression::Expression;
use crate::format::{self, sprintf, ROOT};
use crate::validator::Validator;
use crate::value::Value;

/// Validate `value` against `expr` with the root named `it`.
///
/// Returns `Ok(None)` when the value passes, the ordered-unique messages when
/// it does not, and `Err` when the expression itself is malformed.
///
/// ## Example
///
/// ```rust
/// use validobj::{checks, has_errors, Expression, Value};
/// use serde_json::json;
///
/// let person = Expression::fields()
///     .field("name", checks::is_string())
///     .field("age", checks::is_number())
///     .build();
///
/// let value = Value::from(json!({"name": "john", "age": "27"}));
/// let errors = has_errors(&value, &person).unwrap().unwrap();
/// assert_eq!(errors.messages(), ["it.age is not number"]);
/// ```
pub fn has_errors(value: &Value, expr: &Expression) -> Result<Option<ValidationErrors>> {
    has_errors_at(value, expr, ROOT, ValidationErrors::new())
}

/// Validate `value` against `expr`, naming the root `location` and starting
/// from the messages in `seed`.
///
/// The expression is checked for usage errors before any data is looked at,
/// so a malformed expression fails the same way for every value.
///
/// A record expression reports `"<location> is not object"` for sequences
/// only. Any other non-record value, including scalars, reads as an empty
/// record: its fields are all absent.
pub fn has_errors_at(
    value: &Value,
    expr: &Expression,
    location: &str,
    seed: ValidationErrors,
) -> Result<Option<ValidationErrors>> {
    expr.check_usage(location)?;
    let mut errors = seed;
    collect(value, expr, location, &mut errors)?;
    Ok(errors.into_option())
}

/// First message of [`has_errors`], if any.
pub fn validate(value: &Value, expr: &Expression) -> Result<Option<String>> {
    Ok(has_errors(value, expr)?.and_then(|errors| errors.into_iter().next()))
}

fn collect(
    value: &Value,
    expr: &Expression,
    location: &str,
    errors: &mut ValidationErrors,
) -> Result<()> {
    tracing::trace!(location, expression = expr.kind_name(), value = value.type_name(), "evaluating");

    match expr {
        Expression::Leaf(validators) => run_leaf(validators, value, location, errors),
        Expression::Array(inner) => {
            let Value::Array(items) = value else {
                errors.add(sprintf("%s is not array", &[&location])?);
                return Ok(());
            };
            for (i, item) in items.iter().enumerate() {
                let item_location = format::index(location, i);
                match inner.as_ref() {
                    Expression::Leaf(validators) => {
                        run_leaf(validators, item, &item_location, errors)?
                    }
                    nested => collect(item, nested, &item_location, errors)?,
                }
            }
            Ok(())
        }
        Expression::Record(fields) => {
            // Records never match sequences; arrays of records need an array wrapper.
            if value.is_array() {
                errors.add(sprintf("%s is not object", &[&location])?);
                return Ok(());
            }
            for (name, field_expr) in fields {
                collect(value.get(name), field_expr, &format::field(location, name), errors)?;
            }
            Ok(())
        }
    }
}

fn run_leaf(
    validators: &[Validator],
    value: &Value,
    location: &str,
    errors: &mut ValidationErrors,
) -> Result<()> {
    for validator in validators {
        // Only `required` looks at absent values; everything else passes them.
        if value.is_absent() && !validator.observes_absence() {
            continue;
        }
        if let Some(message) = validator.call(value, location)? {
            errors.add(message);
        }
    }
    Ok(())
}
