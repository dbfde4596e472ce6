//! Error types: usage errors raised on malformed expressions and the
//! ordered-unique list of validation messages.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Result type alias for operations that can raise a [`UsageError`].
pub type Result<T, E = UsageError> = std::result::Result<T, E>;

/// A programming mistake in how an expression or validator was put together.
///
/// Usage errors are never mixed into the returned message list. They stop the
/// evaluation of the current call as soon as they are detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// An array wrapper was given zero or several nested expressions.
    #[error("array validation expression must have one and only one validation expression, like [[required, isString]]")]
    ArrayArity {
        /// Number of nested expressions supplied
        found: usize,
    },

    /// The expression at `location` is neither a leaf, an array wrapper nor a record.
    #[error("invalid validation expression: {location}")]
    InvalidExpression {
        /// Location the expression was applied at
        location: String,
    },

    /// A parameterized check was used without being configured.
    #[error("{location}: {name} has to have parameters like {usage}")]
    MissingParams {
        /// Location the check was applied at
        location: String,
        /// Registered name of the check
        name: String,
        /// Expected call shape
        usage: String,
    },

    /// No check is registered under the name.
    #[error("no validator registered as '{0}'")]
    UnknownValidator(String),

    /// A template's `%s` count does not match the number of arguments.
    #[error("the number of %s in '{template}' is not equal to the number of variables ({args})")]
    FormatArity {
        /// The offending template
        template: String,
        /// Number of arguments supplied
        args: usize,
    },

    /// Parameters were supplied but have the wrong shape for the check.
    #[error("{name}: invalid parameters, {reason}")]
    InvalidParams {
        /// Registered name of the check
        name: String,
        /// What was wrong
        reason: String,
    },
}

/// Ordered list of unique validation messages.
///
/// Messages keep first-seen order. Adding a message that is already present is
/// a no-op, so the same message reached twice at the same path is reported
/// once while the same suffix at two different paths is reported twice.
#[derive(Clone, Default)]
pub struct ValidationErrors {
    messages: Vec<String>,
    seen: HashSet<String>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message unless an identical one is already present.
    pub fn add(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.seen.insert(message.clone()) {
            self.messages.push(message);
        }
    }

    /// Union another collection into this one, keeping first-seen order.
    pub fn merge(&mut self, other: ValidationErrors) {
        for message in other.messages {
            self.add(message);
        }
    }

    /// Union of several message sequences.
    pub fn union<I, S>(sequences: impl IntoIterator<Item = I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors = Self::new();
        for sequence in sequences {
            errors.extend(sequence);
        }
        errors
    }

    /// Check if there are any messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Messages in first-seen order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// First message, if any.
    pub fn first(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    /// Whether a message is present verbatim.
    pub fn contains(&self, message: &str) -> bool {
        self.seen.contains(message)
    }

    /// `None` when empty, the collection otherwise.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Convert to Result - Ok if no messages, Err otherwise.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Take the messages out.
    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }

    /// Convert to the JSON error envelope.
    pub fn to_report(&self) -> ValidationReport {
        ValidationReport {
            error: ReportBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                errors: self.messages.clone(),
            },
        }
    }
}

impl PartialEq for ValidationErrors {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
    }
}

impl Eq for ValidationErrors {}

impl fmt::Debug for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationErrors")
            .field("messages", &self.messages)
            .finish()
    }
}

impl<S: Into<String>> Extend<S> for ValidationErrors {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for message in iter {
            self.add(message);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut errors = Self::new();
        errors.extend(iter);
        errors
    }
}

impl IntoIterator for ValidationErrors {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_report().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let report = ValidationReport::deserialize(deserializer)?;
        Ok(report.error.errors.into_iter().collect())
    }
}

/// JSON envelope for validation messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub error: ReportBody,
}

/// Body of the JSON envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_first_seen_order_and_drops_duplicates() {
        let mut errors = ValidationErrors::new();
        errors.add("it.b is not number");
        errors.add("it.a is not number");
        errors.add("it.b is not number");

        assert_eq!(errors.messages(), ["it.b is not number", "it.a is not number"]);
    }

    #[test]
    fn many_messages_stay_unique() {
        let mut errors = ValidationErrors::new();
        for round in 0..2 {
            for i in 0..5000 {
                errors.add(format!("it[{i}] is not number"));
            }
            assert_eq!(errors.len(), 5000, "round {round}");
        }
        assert!(errors.contains("it[4999] is not number"));
        assert_eq!(errors.first(), Some("it[0] is not number"));
    }

    #[test]
    fn union_keeps_same_suffix_at_distinct_paths() {
        let errors = ValidationErrors::union([
            vec!["it[0] is not string", "it[1] is not string"],
            vec!["it[0] is not string"],
        ]);

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("it[1] is not string"));
    }

    #[test]
    fn empty_normalizes_to_none() {
        assert!(ValidationErrors::new().into_option().is_none());
        assert!(ValidationErrors::new().into_result().is_ok());

        let errors: ValidationErrors = ["it is required"].into_iter().collect();
        assert_eq!(errors.into_option().unwrap().first(), Some("it is required"));
    }

    #[test]
    fn merge_appends_only_new_messages() {
        let mut left: ValidationErrors = ["a", "b"].into_iter().collect();
        let right: ValidationErrors = ["b", "c"].into_iter().collect();
        left.merge(right);

        assert_eq!(left.into_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn serializes_to_envelope() {
        let errors: ValidationErrors = ["it.age is not number"].into_iter().collect();
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["message"], "Validation failed");
        assert_eq!(json["error"]["errors"][0], "it.age is not number");

        let back: ValidationErrors = serde_json::from_value(json).unwrap();
        assert_eq!(back, errors);
    }

    #[test]
    fn usage_error_messages() {
        let err = UsageError::MissingParams {
            location: "it".into(),
            name: "isIn".into(),
            usage: "isIn(['option1', 'option2'])".into(),
        };
        assert_eq!(
            err.to_string(),
            "it: isIn has to have parameters like isIn(['option1', 'option2'])"
        );
        assert_eq!(
            UsageError::InvalidExpression { location: "it.a".into() }.to_string(),
            "invalid validation expression: it.a"
        );
    }
}
