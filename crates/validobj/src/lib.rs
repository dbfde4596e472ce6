//! # validobj
//!
//! Declarative validation of nested values. Describe the expected shape with
//! an [`Expression`] and get back every violation, located by path.
//!
//! ## Example
//!
//! ```rust
//! use validobj::prelude::*;
//! use serde_json::json;
//!
//! let order = Expression::fields()
//!     .field("name", Expression::leaf([checks::required(), checks::is_string()]))
//!     .field("items", Expression::array(Expression::fields().field("sku", checks::is_number())))
//!     .build();
//!
//! let value = Value::from(json!({"items": [{"sku": 222}, {"sku": "123"}]}));
//! let errors = has_errors(&value, &order).unwrap().unwrap();
//! assert_eq!(errors.messages(), ["it.name is required", "it.items[1].sku is not number"]);
//! ```
//!
//! ## Expressions
//!
//! - leaf: one or more validators, all of which must pass
//! - array wrapper: the value must be a sequence and every element must match
//! - record: each declared field must match its own expression
//!
//! ## Validators
//!
//! Validators are registered by name on a [`Registry`]. A registered entry is
//! *high-order*: parameterized checks (`isIn`, `minLength`, ...) must be
//! configured with a [`Config`] before use, the rest can be used directly.
//! Only `required` sees absent values; every other check passes them.
//!
//! ## Errors
//!
//! Violations in the data come back as [`ValidationErrors`]. Mistakes in the
//! expression itself (an unconfigured `isIn`, an array wrapper with two
//! members) are returned as [`UsageError`] and stop evaluation.

pub mod build;
mod builtins;
pub mod checks;
mod engine;
mod error;
mod evaluate;
mod expression;
pub mod format;
pub mod registry;
pub mod schema;
mod validator;
mod value;


pub use build::{build, build_with_message};
pub use engine::{Engine, EngineBuilder, EngineConfig};
pub use error::{ReportBody, Result, UsageError, ValidationErrors, ValidationReport};
pub use evaluate::{has_errors, has_errors_at, validate};
pub use expression::{Expression, RecordBuilder};
pub use registry::Registry;
pub use validator::{Check, Config, ErrorMessage, MessageFn, Validator, ValidatorKind};
pub use value::Value;

/// Prelude module for validation
pub mod prelude {
    pub use crate::build::{build, build_with_message};
    pub use crate::checks;
    pub use crate::engine::{Engine, EngineConfig};
    pub use crate::error::{UsageError, ValidationErrors};
    pub use crate::evaluate::{has_errors, has_errors_at, validate};
    pub use crate::expression::Expression;
    pub use crate::registry::Registry;
    pub use crate::validator::{Config, ErrorMessage, Validator, ValidatorKind};
    pub use crate::value::Value;
}
