//! Named validator registry.
//!
//! A [`Registry`] maps names to high-order validators. Build one at startup,
//! register custom checks on it, then hand validators out of it while authoring
//! expressions. A process-wide instance pre-loaded with the built-ins is
//! available through [`global`] and [`register`].

use crate::builtins;
use crate::error::{Result, UsageError};
use crate::validator::{Check, Validator};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Map of registered check names to their high-order entries.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Validator>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in check.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for validator in builtins::all() {
            registry.insert(validator);
        }
        registry
    }

    /// Register `check` under `name`.
    ///
    /// Re-registering a name replaces the previous entry.
    pub fn register(&mut self, name: impl Into<String>, check: Check, needs_params: bool) {
        let name = name.into();
        self.insert(Validator::high_order(name, check, needs_params));
    }

    /// Register a parameterized `check` along with its expected call shape.
    pub fn register_with_usage(
        &mut self,
        name: impl Into<String>,
        check: Check,
        usage: impl Into<String>,
    ) {
        let name = name.into();
        let usage = usage.into();
        self.insert(Validator::high_order(name, check, true).with_usage(usage));
    }

    /// Store a high-order validator under its own name.
    pub fn insert(&mut self, validator: Validator) {
        let name = validator.name().to_string();
        if self.entries.contains_key(&name) {
            tracing::debug!(validator = %name, "replacing registered validator");
        } else {
            tracing::trace!(validator = %name, needs_params = validator.needs_params(), "registered validator");
        }
        self.entries.insert(name, validator);
    }

    /// Look up the high-order entry registered as `name`.
    pub fn get(&self, name: &str) -> Result<Validator> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| UsageError::UnknownValidator(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered entries, sorted by name.
    pub fn entries(&self) -> Vec<&Validator> {
        let mut entries: Vec<&Validator> = self.entries.values().collect();
        entries.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        entries
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

fn global_lock() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| RwLock::new(Registry::with_builtins()))
}

/// Read access to the process-wide registry.
///
/// Readers may run in parallel; registration takes the write lock and should
/// happen during startup.
pub fn global() -> RwLockReadGuard<'static, Registry> {
    // A panic while holding the lock cannot leave the map half-written.
    global_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn global_mut() -> RwLockWriteGuard<'static, Registry> {
    global_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register `check` on the process-wide registry.
pub fn register(name: impl Into<String>, check: Check, needs_params: bool) {
    global_mut().register(name, check, needs_params);
}

/// Look up `name` on the process-wide registry.
pub fn lookup(name: &str) -> Result<Validator> {
    global().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{build, build_with_message};
    use crate::validator::ValidatorKind;
    use crate::value::Value;

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::with_builtins();
        for name in [
            "required",
            "isString",
            "isNumber",
            "isDate",
            "isBool",
            "isObject",
            "isIn",
            "minLength",
            "maxLength",
            "isEmail",
            "isUrl",
            "isCreditCard",
            "isBefore",
            "isAfter",
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn entries_are_high_order() {
        let registry = Registry::with_builtins();
        let is_in = registry.get("isIn").unwrap();
        assert_eq!(is_in.kind(), ValidatorKind::HighOrder);
        assert!(is_in.needs_params());

        let configured = is_in.with_params(["a"]);
        assert_eq!(configured.kind(), ValidatorKind::Concrete);
        assert!(configured.needs_params());
    }

    #[test]
    fn unknown_name_is_usage_error() {
        let err = Registry::new().get("isGender").unwrap_err();
        assert_eq!(err, UsageError::UnknownValidator("isGender".into()));
    }

    #[test]
    fn re_registering_overwrites() {
        let mut registry = Registry::new();
        registry.register("isGender", build(|v, _| v.as_str() == Some("male")), false);
        registry.register(
            "isGender",
            build_with_message(
                |v, _| matches!(v.as_str(), Some("male" | "female")),
                |name, _| format!("{name} is not gender"),
            ),
            false,
        );

        let gender = registry.get("isGender").unwrap();
        assert_eq!(gender.call(&Value::from("female"), "it").unwrap(), None);
        assert_eq!(
            gender.call(&Value::from("middle"), "it").unwrap().as_deref(),
            Some("it is not gender")
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registering_required_name_does_not_grant_absence() {
        let mut registry = Registry::with_builtins();
        registry.register("required", build(|v, _| !v.is_absent()), false);
        assert_eq!(
            registry.get("required").unwrap().resolve().kind(),
            ValidatorKind::Concrete
        );
    }

    #[test]
    fn usage_is_recorded() {
        let mut registry = Registry::new();
        registry.register_with_usage("isMultipleOf", build(|_, _| true), "isMultipleOf([3])");
        assert_eq!(registry.get("isMultipleOf").unwrap().usage(), "isMultipleOf([3])");
    }

    #[test]
    fn global_registry_accepts_custom_checks() {
        register("isTestOnlyPositive", build(|v, _| v.as_f64().is_some_and(|n| n > 0.0)), false);
        let positive = lookup("isTestOnlyPositive").unwrap();
        assert!(positive.call(&Value::from(-1), "it").unwrap().is_some());
        assert!(lookup("required").is_ok());
    }

    #[test]
    fn names_are_sorted() {
        let registry = Registry::with_builtins();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
