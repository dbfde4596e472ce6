//! Turn boolean predicates into registry checks.

use crate::validator::{Check, ErrorMessage};
use crate::value::Value;
use std::sync::Arc;

/// Build a check from `predicate` with the generic `"<location> is invalid"`
/// message.
///
/// ## Example
///
/// ```rust
/// use validobj::{build, has_errors, Expression, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.register(
///     "isGender",
///     build(|value, _| matches!(value.as_str(), Some("male" | "female"))),
///     false,
/// );
///
/// let expr = Expression::from(registry.get("isGender").unwrap());
/// let errors = has_errors(&Value::from("middle"), &expr).unwrap().unwrap();
/// assert!(errors.contains("it is invalid"));
/// ```
pub fn build<P>(predicate: P) -> Check
where
    P: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
{
    build_with_message(predicate, |location, _| format!("{location} is invalid"))
}

/// Build a check from `predicate` and a default message function.
///
/// On failure the check returns, in order of preference, the literal
/// override, the override function applied to `(location, params)`, or the
/// default message.
pub fn build_with_message<P, M>(predicate: P, default_message: M) -> Check
where
    P: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    M: Fn(&str, &[Value]) -> String + Send + Sync + 'static,
{
    Arc::new(
        move |value: &Value, location: &str, message: Option<&ErrorMessage>, params: &[Value]| {
            if predicate(value, params) {
                return None;
            }
            Some(match message {
                Some(message) => message.render(location, params),
                None => default_message(location, params),
            })
        },
    )
}
