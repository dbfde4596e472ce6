//! `%s` substitution and location strings (`it`, `it.prop`, `it[0]`).

use crate::error::{Result, UsageError};
use std::fmt::Display;

/// Default name of the value at the root of an evaluation.
pub const ROOT: &str = "it";

/// Substitute each `%s` in `template` with the next argument.
///
/// The number of placeholders must equal the number of arguments.
///
/// ```
/// use validobj::format::sprintf;
///
/// assert_eq!(sprintf("%s[%s]", &[&"it", &0]).unwrap(), "it[0]");
/// assert!(sprintf("%s is not %s", &[&"it"]).is_err());
/// ```
pub fn sprintf(template: &str, args: &[&dyn Display]) -> Result<String> {
    let parts: Vec<&str> = template.split("%s").collect();
    if parts.len() != args.len() + 1 {
        return Err(UsageError::FormatArity {
            template: template.to_string(),
            args: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    out.push_str(parts[0]);
    for (arg, part) in args.iter().zip(&parts[1..]) {
        out.push_str(&arg.to_string());
        out.push_str(part);
    }
    Ok(out)
}

/// Location of a record field: `it` + `age` → `it.age`.
pub fn field(parent: &str, name: &str) -> String {
    format!("{parent}.{name}")
}

/// Location of a sequence element: `it.items` + `0` → `it.items[0]`.
pub fn index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        assert_eq!(
            sprintf("%s must be one of (%s)", &[&"it", &"red, blue"]).unwrap(),
            "it must be one of (red, blue)"
        );
        assert_eq!(sprintf("no placeholders", &[]).unwrap(), "no placeholders");
    }

    #[test]
    fn arity_mismatch_is_usage_error() {
        let err = sprintf("%s is not array", &[&"it", &"extra"]).unwrap_err();
        assert!(matches!(err, UsageError::FormatArity { args: 2, .. }));
    }

    #[test]
    fn builds_nested_paths() {
        let items = field(ROOT, "items");
        let first = index(&items, 0);
        assert_eq!(field(&first, "sku"), "it.items[0].sku");
    }
}
