//! Stock rule evaluators for the formtree validation engine
//!
//! The core engine treats field constraints as a pluggable capability: any
//! [`RuleEvaluator`] attached to a property runs during validation and its
//! messages land in the flattened error set. This crate carries the
//! implementations most forms need:
//!
//! - [`Presence`] - value must be bound and non-blank
//! - [`Length`] - string character count bounds
//! - [`Format`] - regex pattern match, with an email convenience
//! - [`Inclusion`] - value must be one of an allowed set
//!
//! Evaluators skip values that are absent or null (except [`Presence`], whose
//! job that is), so optional fields validate cleanly without extra wiring.

use formtree_core::{Error, Result, RuleEvaluator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Value must be bound and non-blank
///
/// Blank means unbound, null, a whitespace-only string, or an empty
/// array/object. The default message is `"required"`.
#[derive(Debug, Clone)]
pub struct Presence {
    message: String,
}

impl Presence {
    pub fn new() -> Self {
        Self {
            message: "required".to_string(),
        }
    }

    /// Replace the default failure message
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEvaluator for Presence {
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        if is_blank(value) {
            vec![self.message.clone()]
        } else {
            Vec::new()
        }
    }
}

/// String length bounds, counted in characters
///
/// Absent, null, or non-string values pass; combine with [`Presence`] when
/// the field is also mandatory.
#[derive(Debug, Clone)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

impl Length {
    /// At least `min` characters
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// At most `max` characters
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Between `min` and `max` characters inclusive
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl RuleEvaluator for Length {
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        let Some(Value::String(s)) = value else {
            return Vec::new();
        };
        let count = s.chars().count();
        let mut messages = Vec::new();
        if let Some(min) = self.min {
            if count < min {
                messages.push(format!("is too short (minimum is {} characters)", min));
            }
        }
        if let Some(max) = self.max {
            if count > max {
                messages.push(format!("is too long (maximum is {} characters)", max));
            }
        }
        messages
    }
}

/// String must match a regex pattern
///
/// Absent, null, or non-string values pass. The default message is
/// `"is invalid"`.
#[derive(Debug, Clone)]
pub struct Format {
    pattern: Regex,
    message: String,
}

impl Format {
    /// Compile a pattern; an invalid pattern is a definition-time error
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::schema(format!("invalid format pattern: {}", e)))?;
        Ok(Self {
            pattern,
            message: "is invalid".to_string(),
        })
    }

    /// Email address format
    pub fn email() -> Self {
        Self {
            pattern: EMAIL_REGEX.clone(),
            message: "is not a valid email address".to_string(),
        }
    }

    /// Replace the default failure message
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = message.into();
        self
    }
}

impl RuleEvaluator for Format {
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        let Some(Value::String(s)) = value else {
            return Vec::new();
        };
        if self.pattern.is_match(s) {
            Vec::new()
        } else {
            vec![self.message.clone()]
        }
    }
}

/// Value must be one of an allowed set
///
/// Absent or null values pass.
#[derive(Debug, Clone)]
pub struct Inclusion {
    allowed: Vec<Value>,
    message: String,
}

impl Inclusion {
    pub fn of<I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self {
            allowed: allowed.into_iter().collect(),
            message: "is not included in the list".to_string(),
        }
    }

    /// Replace the default failure message
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = message.into();
        self
    }
}

impl RuleEvaluator for Inclusion {
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(v) if self.allowed.contains(v) => Vec::new(),
            Some(_) => vec![self.message.clone()],
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_blank_values() {
        let rule = Presence::new();
        assert_eq!(rule.validate(None), vec!["required"]);
        assert_eq!(rule.validate(Some(&Value::Null)), vec!["required"]);
        assert_eq!(rule.validate(Some(&json!(""))), vec!["required"]);
        assert_eq!(rule.validate(Some(&json!("   "))), vec!["required"]);
        assert_eq!(rule.validate(Some(&json!([]))), vec!["required"]);
    }

    #[test]
    fn test_presence_accepts_values() {
        let rule = Presence::new();
        assert!(rule.validate(Some(&json!("Damnit"))).is_empty());
        assert!(rule.validate(Some(&json!(0))).is_empty());
        assert!(rule.validate(Some(&json!(false))).is_empty());
    }

    #[test]
    fn test_presence_custom_message() {
        let rule = Presence::new().with_message("can't be blank");
        assert_eq!(rule.validate(None), vec!["can't be blank"]);
    }

    #[test]
    fn test_length_bounds() {
        let rule = Length::between(2, 5);
        assert_eq!(
            rule.validate(Some(&json!("a"))),
            vec!["is too short (minimum is 2 characters)"]
        );
        assert_eq!(
            rule.validate(Some(&json!("abcdef"))),
            vec!["is too long (maximum is 5 characters)"]
        );
        assert!(rule.validate(Some(&json!("abc"))).is_empty());
    }

    #[test]
    fn test_length_skips_absent_and_non_strings() {
        let rule = Length::min(3);
        assert!(rule.validate(None).is_empty());
        assert!(rule.validate(Some(&Value::Null)).is_empty());
        assert!(rule.validate(Some(&json!(42))).is_empty());
    }

    #[test]
    fn test_format_pattern() {
        let rule = Format::new(r"^\d{4}$").unwrap();
        assert!(rule.validate(Some(&json!("2481"))).is_empty());
        assert_eq!(rule.validate(Some(&json!("24x1"))), vec!["is invalid"]);
    }

    #[test]
    fn test_format_invalid_pattern_is_schema_error() {
        let result = Format::new("(unclosed");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid format pattern"));
    }

    #[test]
    fn test_format_email() {
        let rule = Format::email();
        assert!(rule.validate(Some(&json!("tom@epitaph.com"))).is_empty());
        assert_eq!(
            rule.validate(Some(&json!("not-an-email"))),
            vec!["is not a valid email address"]
        );
    }

    #[test]
    fn test_inclusion() {
        let rule = Inclusion::of([json!("vinyl"), json!("cd")]);
        assert!(rule.validate(Some(&json!("vinyl"))).is_empty());
        assert_eq!(
            rule.validate(Some(&json!("8-track"))),
            vec!["is not included in the list"]
        );
        assert!(rule.validate(None).is_empty());
    }
}
