//! An explicit registry plus evaluation settings.

use crate::error::{Result, ValidationErrors};
use crate::evaluate;
use crate::expression::Expression;
use crate::format::ROOT;
use crate::registry::Registry;
use crate::schema;
use crate::validator::Validator;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Environment variable read by [`EngineConfig::from_env`].
pub const ROOT_ENV: &str = "VALIDOBJ_ROOT";

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the value at the root of every location (`it`)
    pub root: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: ROOT.to_string(),
        }
    }
}

impl EngineConfig {
    /// Settings from the environment, falling back to defaults.
    ///
    /// `VALIDOBJ_ROOT` overrides the root location name when set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(ROOT_ENV) {
            Ok(root) if !root.trim().is_empty() => Self {
                root: root.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// A registry and settings that evaluation runs against.
///
/// ## Example
///
/// ```rust
/// use validobj::{build, Engine, Registry, Value};
/// use serde_json::json;
///
/// let mut registry = Registry::with_builtins();
/// registry.register("isEven", build(|v, _| v.as_f64().is_some_and(|n| n % 2.0 == 0.0)), false);
///
/// let engine = Engine::builder().registry(registry).root("order").build();
/// let expr = engine.compile(&json!({"count": ["required", "isEven"]})).unwrap();
///
/// let errors = engine.has_errors(&Value::from(json!({"count": 3})), &expr).unwrap().unwrap();
/// assert_eq!(errors.messages(), ["order.count is invalid"]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<Registry>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Registry::with_builtins())
    }
}

impl Engine {
    /// Engine over `registry` with default settings.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: EngineConfig::default(),
        }
    }

    /// Create a builder.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The registry checks are resolved from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Look up a registered check.
    pub fn check(&self, name: &str) -> Result<Validator> {
        self.registry.get(name)
    }

    /// Compile a JSON-authored expression against this engine's registry.
    pub fn compile(&self, json: &serde_json::Value) -> Result<Expression> {
        schema::compile(json, &self.registry)
    }

    /// Full message list for `value`, rooted at the configured name.
    pub fn has_errors(&self, value: &Value, expr: &Expression) -> Result<Option<ValidationErrors>> {
        evaluate::has_errors_at(value, expr, &self.config.root, ValidationErrors::new())
    }

    /// First message for `value`, if any.
    pub fn validate(&self, value: &Value, expr: &Expression) -> Result<Option<String>> {
        Ok(self
            .has_errors(value, expr)?
            .and_then(|errors| errors.into_iter().next()))
    }
}

/// Builder for [`Engine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    registry: Option<Registry>,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Use `registry` instead of the built-ins.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace all settings.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Name the root location.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Build the engine.
    pub fn build(self) -> Engine {
        Engine {
            registry: Arc::new(self.registry.unwrap_or_else(Registry::with_builtins)),
            config: self.config,
        }
    }
}
