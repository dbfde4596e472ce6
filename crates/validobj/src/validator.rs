//! Validator descriptors and their configuration.

use crate::error::{Result, UsageError};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Calling convention shared by every registered check.
///
/// Given `(value, location, message_override, params)` a check returns `None`
/// when the value passes and the error message otherwise. Use
/// [`build`](crate::build::build) to produce one from a boolean predicate.
pub type Check =
    Arc<dyn Fn(&Value, &str, Option<&ErrorMessage>, &[Value]) -> Option<String> + Send + Sync>;

/// Function form of a message: `(location, params) -> message`.
pub type MessageFn = Arc<dyn Fn(&str, &[Value]) -> String + Send + Sync>;

/// Message used in place of a check's default message.
#[derive(Clone)]
pub enum ErrorMessage {
    /// Returned as is.
    Literal(String),
    /// Called with the location and the params.
    Func(MessageFn),
}

impl ErrorMessage {
    /// Wrap a message function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&str, &[Value]) -> String + Send + Sync + 'static,
    {
        ErrorMessage::Func(Arc::new(f))
    }

    /// Produce the message for a failure at `location`.
    pub fn render(&self, location: &str, params: &[Value]) -> String {
        match self {
            ErrorMessage::Literal(s) => s.clone(),
            ErrorMessage::Func(f) => f(location, params),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            ErrorMessage::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for ErrorMessage {
    fn from(s: &str) -> Self {
        ErrorMessage::Literal(s.to_string())
    }
}

impl From<String> for ErrorMessage {
    fn from(s: String) -> Self {
        ErrorMessage::Literal(s)
    }
}

/// Configuration bound to a high-order validator.
///
/// ## Example
///
/// ```rust
/// use validobj::{checks, Config};
///
/// let color = checks::is_in_with(
///     Config::new()
///         .params(["red", "blue"])
///         .message("color is invalid"),
/// );
/// assert_eq!(color.name(), "isIn");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Positional parameters (options for `isIn`, `[n]` for `minLength`, ...)
    pub params: Vec<Value>,
    /// Message override
    pub message: Option<ErrorMessage>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameters.
    pub fn params<V, I>(mut self, params: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Append one parameter.
    pub fn param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the message override.
    pub fn message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Resolve loosely ordered legacy arguments.
    ///
    /// The first array is taken as the parameter list and the first string as
    /// a literal message override, whatever their order.
    pub fn from_args(args: &[Value]) -> Self {
        let mut config = Self::new();
        let mut have_params = false;
        for arg in args {
            match arg {
                Value::Array(items) if !have_params => {
                    config.params = items.clone();
                    have_params = true;
                }
                Value::String(s) if config.message.is_none() => {
                    config.message = Some(ErrorMessage::Literal(s.clone()));
                }
                _ => {}
            }
        }
        config
    }
}

/// Discriminant of a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    /// Configured and allowed to observe absent values.
    Required,
    /// Configured, skipped when the value is absent.
    Concrete,
    /// Registered entry that still has to be configured.
    HighOrder,
}

/// A named check, either configured or still high-order.
#[derive(Clone)]
pub struct Validator {
    name: Arc<str>,
    kind: ValidatorKind,
    needs_params: bool,
    observes_absence: bool,
    usage: Option<Arc<str>>,
    check: Check,
    config: Arc<Config>,
}

impl Validator {
    /// Create an unconfigured entry for `check`.
    pub fn high_order(name: impl Into<Arc<str>>, check: Check, needs_params: bool) -> Self {
        Self {
            name: name.into(),
            kind: ValidatorKind::HighOrder,
            needs_params,
            observes_absence: false,
            usage: None,
            check,
            config: Arc::new(Config::default()),
        }
    }

    /// Record the call shape shown when parameters are missing.
    pub fn with_usage(mut self, usage: impl Into<Arc<str>>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Let configured instances see absent values.
    pub(crate) fn observing_absence(mut self) -> Self {
        self.observes_absence = true;
        self
    }

    /// Bind `config` and return the ready-to-call form.
    pub fn configure(&self, config: Config) -> Validator {
        Validator {
            name: Arc::clone(&self.name),
            kind: if self.observes_absence {
                ValidatorKind::Required
            } else {
                ValidatorKind::Concrete
            },
            needs_params: self.needs_params,
            observes_absence: self.observes_absence,
            usage: self.usage.clone(),
            check: Arc::clone(&self.check),
            config: Arc::new(config),
        }
    }

    /// Configure with parameters only.
    pub fn with_params<V, I>(&self, params: I) -> Validator
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.configure(Config::new().params(params))
    }

    /// Configure with a message override only.
    pub fn with_message(&self, message: impl Into<ErrorMessage>) -> Validator {
        self.configure(Config::new().message(message))
    }

    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Discriminant.
    pub fn kind(&self) -> ValidatorKind {
        self.kind
    }

    /// Whether the check needs parameters before use.
    pub fn needs_params(&self) -> bool {
        self.needs_params
    }

    /// Expected call shape, e.g. `isIn(['option1', 'option2'])`.
    pub fn usage(&self) -> String {
        match &self.usage {
            Some(usage) => usage.to_string(),
            None => format!("{}([...])", self.name),
        }
    }

    /// Bound configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether this validator can sit in a leaf as is: parameterless, or
    /// configured with a non-empty parameter list.
    pub fn is_ready(&self) -> bool {
        !self.needs_params || (self.kind != ValidatorKind::HighOrder && !self.config.params.is_empty())
    }

    /// Whether absent values are passed to the check instead of skipped.
    pub fn observes_absence(&self) -> bool {
        self.observes_absence
    }

    /// Usage error for a validator that is not [ready](Self::is_ready), naming
    /// `location`.
    pub fn missing_params(&self, location: &str) -> UsageError {
        let err = UsageError::MissingParams {
            location: location.to_string(),
            name: self.name.to_string(),
            usage: self.usage(),
        };
        tracing::debug!(error = %err, "malformed validation expression");
        err
    }

    /// The configured form, using the default configuration for a
    /// high-order entry.
    pub fn resolve(&self) -> Validator {
        match self.kind {
            ValidatorKind::HighOrder => self.configure(Config::default()),
            _ => self.clone(),
        }
    }

    /// Run the check against `value` at `location`.
    ///
    /// Absence is not special-cased here; see
    /// [`has_errors`](crate::has_errors) for the skip rule.
    pub fn call(&self, value: &Value, location: &str) -> Result<Option<String>> {
        if !self.is_ready() {
            return Err(self.missing_params(location));
        }

        // A high-order entry carries the default configuration already.
        Ok((self.check)(
            value,
            location,
            self.config.message.as_ref(),
            &self.config.params,
        ))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("needs_params", &self.needs_params)
            .field("config", &self.config)
            .finish()
    }
}
