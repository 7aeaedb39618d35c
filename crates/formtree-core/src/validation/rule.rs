//! The rule evaluator seam
//!
//! Individual field constraints are a pluggable capability: the engine runs
//! whatever evaluators a form definition attaches and aggregates the messages
//! they produce. Stock implementations live in the `formtree-validators`
//! crate; anything implementing this trait plugs in the same way.

use serde_json::Value;

/// A single validation rule for one property
///
/// `value` is the property's current bound value: `None` when nothing was
/// ever bound, `Some(&Value::Null)` when the model held an explicit null.
/// An empty message list means the rule passed.
pub trait RuleEvaluator: Send + Sync {
    fn validate(&self, value: Option<&Value>) -> Vec<String>;
}

/// Closures act as rule evaluators directly
impl<F> RuleEvaluator for F
where
    F: Fn(Option<&Value>) -> Vec<String> + Send + Sync,
{
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closure_as_rule() {
        let rule = |value: Option<&Value>| {
            if value.is_none() {
                vec!["required".to_string()]
            } else {
                Vec::new()
            }
        };

        assert_eq!(rule.validate(None), vec!["required"]);
        assert!(rule.validate(Some(&json!("x"))).is_empty());
    }
}
