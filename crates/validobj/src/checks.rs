//! Shorthand constructors for the built-in checks.
//!
//! ```rust
//! use validobj::{checks, has_errors, Expression, Value};
//!
//! let expr = Expression::leaf([checks::required(), checks::is_in(["red", "blue"])]);
//! let errors = has_errors(&Value::from("yellow"), &expr).unwrap().unwrap();
//! assert_eq!(errors.first(), Some("it must be one of (red, blue)"));
//! ```

use crate::builtins;
use crate::validator::{Config, Validator};
use crate::value::Value;
use chrono::{DateTime, Utc};

/// `required`: present and not the empty string.
pub fn required() -> Validator {
    builtins::required()
}

/// `isString`
pub fn is_string() -> Validator {
    builtins::is_string()
}

/// `isNumber`
pub fn is_number() -> Validator {
    builtins::is_number()
}

/// `isDate`
pub fn is_date() -> Validator {
    builtins::is_date()
}

/// `isBool`
pub fn is_bool() -> Validator {
    builtins::is_bool()
}

/// `isObject`: records, sequences and dates.
pub fn is_object() -> Validator {
    builtins::is_object()
}

/// `isEmail`
pub fn is_email() -> Validator {
    builtins::is_email()
}

/// `isUrl`: http, https or ftp.
pub fn is_url() -> Validator {
    builtins::is_url()
}

/// `isCreditCard`
pub fn is_credit_card() -> Validator {
    builtins::is_credit_card()
}

/// `isIn` configured with `options`.
pub fn is_in<V, I>(options: I) -> Validator
where
    V: Into<Value>,
    I: IntoIterator<Item = V>,
{
    builtins::is_in().with_params(options)
}

/// `isIn` with a full configuration (options plus message override).
pub fn is_in_with(config: Config) -> Validator {
    builtins::is_in().configure(config)
}

/// `minLength([min])`
pub fn min_length(min: usize) -> Validator {
    builtins::min_length().with_params([min])
}

/// `maxLength([max])`
pub fn max_length(max: usize) -> Validator {
    builtins::max_length().with_params([max])
}

/// `isBefore([limit])`
pub fn is_before(limit: DateTime<Utc>) -> Validator {
    builtins::is_before().with_params([limit])
}

/// `isAfter([limit])`
pub fn is_after(limit: DateTime<Utc>) -> Validator {
    builtins::is_after().with_params([limit])
}
