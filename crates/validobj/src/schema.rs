//! Compile JSON-authored expressions.
//!
//! The JSON form mirrors the shapes of [`Expression`]:
//!
//! | JSON | Expression |
//! |---|---|
//! | `"isString"` | leaf with the registered check |
//! | `{"$check": "isIn", "params": ["a"], "message": "..."}` | leaf with a configured check |
//! | `["required", "isString"]` | leaf (every element a check) |
//! | `[{"sku": "isNumber"}]`, `[["isString"]]` | array wrapper (exactly one element) |
//! | `{"name": "isString"}` | record |
//!
//! Date parameters of `isBefore`/`isAfter` are written as RFC 3339 strings.
//!
//! ```rust
//! use validobj::{has_errors, schema, Registry, Value};
//! use serde_json::json;
//!
//! let registry = Registry::with_builtins();
//! let expr = schema::compile(
//!     &json!({"name": ["required", "isString"], "items": [{"sku": "isNumber"}]}),
//!     &registry,
//! )
//! .unwrap();
//!
//! let value = Value::from(json!({"items": [{"sku": "123"}]}));
//! let errors = has_errors(&value, &expr).unwrap().unwrap();
//! assert_eq!(errors.messages(), ["it.name is required", "it.items[0].sku is not number"]);
//! ```

use crate::error::{Result, UsageError};
use crate::expression::Expression;
use crate::format::{self, ROOT};
use crate::registry::Registry;
use crate::validator::{Config, Validator};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde_json::Value as Json;

/// Key marking an object as a configured check rather than a record.
pub const CHECK_KEY: &str = "$check";

/// Compile `json` into an expression using checks from `registry`.
pub fn compile(json: &Json, registry: &Registry) -> Result<Expression> {
    compile_at(json, registry, ROOT)
}

/// Parse and compile a JSON document.
pub fn compile_str(source: &str, registry: &Registry) -> Result<Expression> {
    let json: Json = serde_json::from_str(source).map_err(|e| UsageError::InvalidExpression {
        location: format!("{ROOT} ({e})"),
    })?;
    compile(&json, registry)
}

fn compile_at(json: &Json, registry: &Registry, location: &str) -> Result<Expression> {
    if is_check(json) {
        return Ok(Expression::from(check(json, registry, location)?));
    }

    match json {
        Json::Array(items) if items.iter().all(is_check) => {
            let validators = items
                .iter()
                .map(|item| check(item, registry, location))
                .collect::<Result<Vec<_>>>()?;
            Ok(Expression::leaf(validators))
        }
        Json::Array(items) => {
            let inner = items
                .iter()
                .map(|item| compile_at(item, registry, location))
                .collect::<Result<Vec<_>>>()?;
            Expression::array_of(inner)
        }
        Json::Object(map) => {
            let mut record = Expression::fields();
            for (name, field) in map {
                let field_location = format::field(location, name);
                record = record.field(name.clone(), compile_at(field, registry, &field_location)?);
            }
            Ok(record.build())
        }
        _ => Err(UsageError::InvalidExpression {
            location: location.to_string(),
        }),
    }
}

fn is_check(json: &Json) -> bool {
    match json {
        Json::String(_) => true,
        Json::Object(map) => map.contains_key(CHECK_KEY),
        _ => false,
    }
}

fn check(json: &Json, registry: &Registry, location: &str) -> Result<Validator> {
    let object = match json {
        Json::String(name) => return registry.get(name),
        Json::Object(object) => object,
        _ => {
            return Err(UsageError::InvalidExpression {
                location: location.to_string(),
            })
        }
    };

    let name = object
        .get(CHECK_KEY)
        .and_then(Json::as_str)
        .ok_or_else(|| UsageError::InvalidExpression {
            location: location.to_string(),
        })?;
    let entry = registry.get(name)?;

    let mut config = Config::new();
    match object.get("params") {
        None | Some(Json::Null) => {}
        Some(Json::Array(params)) => {
            config.params = params
                .iter()
                .map(|p| param(name, p))
                .collect::<Result<Vec<_>>>()?;
        }
        Some(other) => {
            return Err(UsageError::InvalidParams {
                name: name.to_string(),
                reason: format!("expected an array, found {other}"),
            })
        }
    }
    match object.get("message") {
        None | Some(Json::Null) => {}
        Some(Json::String(message)) => config = config.message(message.as_str()),
        Some(other) => {
            return Err(UsageError::InvalidParams {
                name: name.to_string(),
                reason: format!("message must be a string, found {other}"),
            })
        }
    }

    Ok(entry.configure(config))
}

fn param(name: &str, json: &Json) -> Result<Value> {
    if matches!(name, "isBefore" | "isAfter") {
        if let Json::String(s) = json {
            return DateTime::parse_from_rfc3339(s)
                .map(|d| Value::Date(d.with_timezone(&Utc)))
                .map_err(|e| UsageError::InvalidParams {
                    name: name.to_string(),
                    reason: format!("'{s}' is not an RFC 3339 date ({e})"),
                });
        }
    }
    Ok(Value::from(json.clone()))
}
