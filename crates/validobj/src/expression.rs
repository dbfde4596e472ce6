//! Validation expressions.
//!
//! An expression is built once, when it is authored, and is classified by
//! its variant from then on:
//!
//! - [`Expression::Leaf`]: validators applied to the value itself (logical AND)
//! - [`Expression::Array`]: the value must be a sequence whose elements all
//!   satisfy the nested expression
//! - [`Expression::Record`]: each declared field of the value must satisfy its
//!   nested expression
//!
//! ```rust
//! use validobj::{checks, Expression};
//!
//! let order = Expression::fields()
//!     .field("name", checks::is_string())
//!     .field("orderNumber", checks::is_number())
//!     .field(
//!         "items",
//!         Expression::array(
//!             Expression::fields()
//!                 .field("sku", checks::is_number())
//!                 .field("quantity", checks::is_number()),
//!         ),
//!     )
//!     .build();
//! assert!(!order.is_validation_expression());
//! ```

use crate::error::{Result, UsageError};
use crate::format;
use crate::validator::{Validator, ValidatorKind};

/// A validation expression tree.
#[derive(Debug, Clone)]
pub enum Expression {
    /// Validators that must all pass.
    Leaf(Vec<Validator>),
    /// Every element of a sequence must satisfy the nested expression.
    Array(Box<Expression>),
    /// Per-field expressions, in declaration order.
    Record(Vec<(String, Expression)>),
}

impl Expression {
    /// Leaf from a list of validators.
    ///
    /// Parameterless high-order entries are configured here, once, so
    /// evaluation never has to.
    pub fn leaf(validators: impl IntoIterator<Item = Validator>) -> Self {
        Expression::Leaf(validators.into_iter().map(settle).collect())
    }

    /// Array wrapper around `inner`.
    pub fn array(inner: impl Into<Expression>) -> Self {
        Expression::Array(Box::new(inner.into()))
    }

    /// Array wrapper from a list that must hold exactly one expression.
    pub fn array_of(items: Vec<Expression>) -> Result<Self> {
        if items.len() != 1 {
            return Err(UsageError::ArrayArity { found: items.len() });
        }
        let mut items = items;
        match items.pop() {
            Some(inner) => Ok(Expression::array(inner)),
            None => Err(UsageError::ArrayArity { found: 0 }),
        }
    }

    /// Record from `(field, expression)` pairs.
    pub fn record<K, E, I>(fields: I) -> Self
    where
        K: Into<String>,
        E: Into<Expression>,
        I: IntoIterator<Item = (K, E)>,
    {
        fields
            .into_iter()
            .fold(RecordBuilder::default(), |builder, (name, expr)| {
                builder.field(name, expr)
            })
            .build()
    }

    /// Start a record builder.
    pub fn fields() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// Whether this is a leaf whose validators can all run without further
    /// configuration.
    ///
    /// A leaf holding a parameterized check that was never configured is not a
    /// validation expression; evaluating it raises
    /// [`UsageError::MissingParams`].
    pub fn is_validation_expression(&self) -> bool {
        match self {
            Expression::Leaf(validators) => validators.iter().all(Validator::is_ready),
            _ => false,
        }
    }

    /// Walk the whole tree and fail on the first validator that is not
    /// ready, whatever data it would later be applied to.
    ///
    /// Elements of an array wrapper are reported at index `0`.
    pub fn check_usage(&self, location: &str) -> Result<()> {
        match self {
            Expression::Leaf(validators) => match validators.iter().find(|v| !v.is_ready()) {
                Some(unready) => Err(unready.missing_params(location)),
                None => Ok(()),
            },
            Expression::Array(inner) => inner.check_usage(&format::index(location, 0)),
            Expression::Record(fields) => fields
                .iter()
                .try_for_each(|(name, expr)| expr.check_usage(&format::field(location, name))),
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Leaf(_) => "leaf",
            Expression::Array(_) => "array",
            Expression::Record(_) => "record",
        }
    }
}

fn settle(validator: Validator) -> Validator {
    match validator.kind() {
        ValidatorKind::HighOrder if !validator.needs_params() => validator.resolve(),
        _ => validator,
    }
}

impl From<Validator> for Expression {
    fn from(validator: Validator) -> Self {
        Expression::leaf([validator])
    }
}

impl From<Vec<Validator>> for Expression {
    fn from(validators: Vec<Validator>) -> Self {
        Expression::leaf(validators)
    }
}

impl From<RecordBuilder> for Expression {
    fn from(builder: RecordBuilder) -> Self {
        builder.build()
    }
}

/// Builder for [`Expression::Record`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    fields: Vec<(String, Expression)>,
}

impl RecordBuilder {
    /// Declare a field. Declaring the same name twice keeps the position of the
    /// first declaration and the expression of the last.
    pub fn field(mut self, name: impl Into<String>, expr: impl Into<Expression>) -> Self {
        let name = name.into();
        let expr = expr.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = expr,
            None => self.fields.push((name, expr)),
        }
        self
    }

    /// Finish the record.
    pub fn build(self) -> Expression {
        Expression::Record(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks;
    use crate::registry::Registry;
    use crate::validator::Config;

    #[test]
    fn single_and_listed_validators_are_leaves() {
        assert!(Expression::from(checks::is_string()).is_validation_expression());
        assert!(Expression::leaf([checks::required(), checks::is_string()]).is_validation_expression());
    }

    #[test]
    fn unconfigured_parameterized_check_is_not_a_validation_expression() {
        let registry = Registry::with_builtins();
        let bare = Expression::from(registry.get("isIn").unwrap());
        assert!(!bare.is_validation_expression());

        let configured = Expression::from(checks::is_in(["a"]));
        assert!(configured.is_validation_expression());
    }

    #[test]
    fn parameterless_entries_are_configured_on_construction() {
        let registry = Registry::with_builtins();
        let Expression::Leaf(validators) = Expression::from(registry.get("isString").unwrap()) else {
            panic!("expected leaf");
        };
        assert_eq!(validators[0].kind(), ValidatorKind::Concrete);

        let Expression::Leaf(validators) = Expression::from(registry.get("required").unwrap()) else {
            panic!("expected leaf");
        };
        assert_eq!(validators[0].kind(), ValidatorKind::Required);
    }

    #[test]
    fn message_only_configuration_is_not_a_validation_expression() {
        let expr = Expression::from(checks::is_in_with(Config::new().message("bad color")));
        assert!(!expr.is_validation_expression());
    }

    #[test]
    fn check_usage_reaches_nested_leaves() {
        let registry = Registry::with_builtins();
        let expr = Expression::fields()
            .field("name", checks::is_string())
            .field("colors", Expression::array(registry.get("isIn").unwrap()))
            .build();

        let err = expr.check_usage("it").unwrap_err();
        assert!(matches!(
            err,
            UsageError::MissingParams { ref location, ref name, .. }
                if location == "it.colors[0]" && name == "isIn"
        ));

        let ok = Expression::array(Expression::fields().field("color", checks::is_in(["red"])));
        assert!(ok.check_usage("it").is_ok());
    }

    #[test]
    fn structural_nodes_are_not_validation_expressions() {
        assert!(!Expression::array(checks::is_string()).is_validation_expression());
        assert!(!Expression::record([("a", checks::is_string())]).is_validation_expression());
    }

    #[test]
    fn array_of_requires_exactly_one() {
        let two = vec![
            Expression::from(checks::required()),
            Expression::from(checks::is_string()),
        ];
        assert_eq!(
            Expression::array_of(two).unwrap_err(),
            UsageError::ArrayArity { found: 2 }
        );
        assert_eq!(
            Expression::array_of(vec![]).unwrap_err(),
            UsageError::ArrayArity { found: 0 }
        );
        assert!(matches!(
            Expression::array_of(vec![checks::is_string().into()]).unwrap(),
            Expression::Array(_)
        ));
    }

    #[test]
    fn record_keeps_declaration_order() {
        let expr = Expression::fields()
            .field("b", checks::is_string())
            .field("a", checks::is_number())
            .field("b", checks::is_bool())
            .build();

        let Expression::Record(fields) = expr else {
            panic!("expected record");
        };
        let names: Vec<_> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        let Expression::Leaf(b) = &fields[0].1 else {
            panic!("expected leaf");
        };
        assert_eq!(b[0].name(), "isBool");
    }
}
