//! Built-in checks.
//!
//! Each check is registered under the name shown in its doc comment by
//! [`Registry::with_builtins`](crate::Registry::with_builtins). The
//! functions in [`checks`](crate::checks) hand out the same validators
//! without a registry.

use crate::build::build_with_message;
use crate::validator::Validator;
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static CREDIT_CARD_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:https?|ftp)://[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+(?::\d{1,5})?(?:[/?#][^\s]*)?$",
        )
        .unwrap()
    })
}

fn credit_card_regex() -> &'static Regex {
    CREDIT_CARD_REGEX.get_or_init(|| {
        // Visa, MasterCard, Amex, Diners Club, Discover, JCB
        Regex::new(
            r"^(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|3(?:0[0-5]|[68][0-9])[0-9]{11}|6(?:011|5[0-9]{2})[0-9]{12,15}|(?:2131|1800|35[0-9]{3})[0-9]{11})$",
        )
        .unwrap()
    })
}

fn matches_regex(regex: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| regex.is_match(s))
}

/// First parameter as a length bound.
fn length_param(params: &[Value]) -> Option<usize> {
    params
        .first()
        .and_then(Value::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
}

fn char_len(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}

fn option_list(params: &[Value]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `required`: present and not the empty string.
pub fn required() -> Validator {
    Validator::high_order(
        "required",
        build_with_message(
            |value, _| !value.is_absent() && value.as_str() != Some(""),
            |name, _| format!("{name} is required"),
        ),
        false,
    )
    .observing_absence()
}

/// `isString`
pub fn is_string() -> Validator {
    Validator::high_order(
        "isString",
        build_with_message(
            |value, _| matches!(value, Value::String(_)),
            |name, _| format!("{name} is not string"),
        ),
        false,
    )
}

/// `isNumber`
pub fn is_number() -> Validator {
    Validator::high_order(
        "isNumber",
        build_with_message(
            |value, _| matches!(value, Value::Number(_)),
            |name, _| format!("{name} is not number"),
        ),
        false,
    )
}

/// `isDate`
pub fn is_date() -> Validator {
    Validator::high_order(
        "isDate",
        build_with_message(
            |value, _| matches!(value, Value::Date(_)),
            |name, _| format!("{name} is not date"),
        ),
        false,
    )
}

/// `isBool`
pub fn is_bool() -> Validator {
    Validator::high_order(
        "isBool",
        build_with_message(
            |value, _| matches!(value, Value::Bool(_)),
            |name, _| format!("{name} is not bool"),
        ),
        false,
    )
}

/// `isObject`: records, sequences and dates.
pub fn is_object() -> Validator {
    Validator::high_order(
        "isObject",
        build_with_message(
            |value, _| matches!(value, Value::Object(_) | Value::Array(_) | Value::Date(_)),
            |name, _| format!("{name} is not object"),
        ),
        false,
    )
}

/// `isIn(options)`: equal to one of the parameters.
pub fn is_in() -> Validator {
    Validator::high_order(
        "isIn",
        build_with_message(
            |value, options| options.contains(value),
            |name, options| format!("{name} must be one of ({})", option_list(options)),
        ),
        true,
    )
    .with_usage("isIn(['option1', 'option2'])")
}

/// `minLength([n])`: a string of at least `n` characters.
pub fn min_length() -> Validator {
    Validator::high_order(
        "minLength",
        build_with_message(
            |value, params| match (char_len(value), length_param(params)) {
                (Some(len), Some(min)) => len >= min,
                _ => false,
            },
            |name, params| {
                format!(
                    "{name} must be a string and have at least {} characters",
                    params.first().cloned().unwrap_or_default()
                )
            },
        ),
        true,
    )
    .with_usage("minLength([3])")
}

/// `maxLength([n])`: a string of at most `n` characters.
pub fn max_length() -> Validator {
    Validator::high_order(
        "maxLength",
        build_with_message(
            |value, params| match (char_len(value), length_param(params)) {
                (Some(len), Some(max)) => len <= max,
                _ => false,
            },
            |name, params| {
                format!(
                    "{name} must be a string and have at most {} characters",
                    params.first().cloned().unwrap_or_default()
                )
            },
        ),
        true,
    )
    .with_usage("maxLength([10])")
}

/// `isEmail`
pub fn is_email() -> Validator {
    Validator::high_order(
        "isEmail",
        build_with_message(
            |value, _| matches_regex(email_regex(), value),
            |name, _| format!("{name} is not email"),
        ),
        false,
    )
}

/// `isUrl`: http, https or ftp.
pub fn is_url() -> Validator {
    Validator::high_order(
        "isUrl",
        build_with_message(
            |value, _| matches_regex(url_regex(), value),
            |name, _| format!("{name} is not url"),
        ),
        false,
    )
}

/// `isCreditCard`: card number patterns, digits only.
pub fn is_credit_card() -> Validator {
    Validator::high_order(
        "isCreditCard",
        build_with_message(
            |value, _| matches_regex(credit_card_regex(), value),
            |name, _| format!("{name} is not credit card number"),
        ),
        false,
    )
}

/// `isBefore([date])`: strictly earlier than the parameter.
pub fn is_before() -> Validator {
    Validator::high_order(
        "isBefore",
        build_with_message(
            |value, params| match (value.as_date(), params.first().and_then(Value::as_date)) {
                (Some(value), Some(limit)) => value < limit,
                _ => false,
            },
            |name, _| format!("{name} is not before"),
        ),
        true,
    )
    .with_usage("isBefore([date])")
}

/// `isAfter([date])`: strictly later than the parameter.
pub fn is_after() -> Validator {
    Validator::high_order(
        "isAfter",
        build_with_message(
            |value, params| match (value.as_date(), params.first().and_then(Value::as_date)) {
                (Some(value), Some(limit)) => value > limit,
                _ => false,
            },
            |name, _| format!("{name} is not after"),
        ),
        true,
    )
    .with_usage("isAfter([date])")
}

/// Every built-in, in registration order.
pub fn all() -> Vec<Validator> {
    vec![
        required(),
        is_string(),
        is_number(),
        is_date(),
        is_bool(),
        is_object(),
        is_in(),
        min_length(),
        max_length(),
        is_email(),
        is_url(),
        is_credit_card(),
        is_before(),
        is_after(),
    ]
}
