//! Validation aggregation over a form instance tree
//!
//! Each node's rules run against its current bound values; child results
//! merge into the parent under the child property's name as a dot-joined
//! prefix. Collection elements all merge under the same prefix with no index
//! component, so same-named failures across elements share one flattened
//! key. That flattening is an observable contract of the `_attributes`
//! payload convention and is kept as-is.
//!
//! Copyright (c) 2025 Formtree Team
//! Licensed under the Apache-2.0 license

use crate::instance::FormInstance;
use crate::schema::PropertyDeclaration;
use crate::validation::ErrorSet;

/// Aggregation options for one validate call
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Stop the walk at the first node that produced any message
    pub fail_fast: bool,
    /// Maximum number of flattened field keys to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    /// Configuration that collects every failure (the `validate` default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Cap the number of collected field keys
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Run every node's rules and merge the results into one root-relative set
pub(crate) fn aggregate(instance: &FormInstance, config: &ValidationConfig) -> ErrorSet {
    let mut errors = ErrorSet::new();
    collect(instance, config, &mut errors);
    errors
}

fn collect(instance: &FormInstance, config: &ValidationConfig, errors: &mut ErrorSet) {
    for (name, evaluator) in instance.def().rules() {
        if at_capacity(errors, config) {
            return;
        }
        for message in evaluator.validate(instance.value(name)) {
            errors.add(name.clone(), message);
        }
    }
    if config.fail_fast && !errors.is_empty() {
        return;
    }

    for declaration in instance.def().properties() {
        if at_capacity(errors, config) {
            return;
        }
        match declaration {
            PropertyDeclaration::Scalar { .. } => {}
            PropertyDeclaration::Nested { name, .. } => {
                if let Some(child) = instance.nested(name) {
                    let mut child_errors = ErrorSet::new();
                    collect(child, config, &mut child_errors);
                    errors.merge_prefixed(name, child_errors);
                }
            }
            PropertyDeclaration::Collection { name, .. } => {
                for element in instance.collection(name).unwrap_or(&[]) {
                    let mut element_errors = ErrorSet::new();
                    collect(element, config, &mut element_errors);
                    errors.merge_prefixed(name, element_errors);
                }
            }
        }
        if config.fail_fast && !errors.is_empty() {
            return;
        }
    }
}

fn at_capacity(errors: &ErrorSet, config: &ValidationConfig) -> bool {
    config.max_errors > 0 && errors.len() >= config.max_errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ValidationConfig::default();
        assert!(!config.fail_fast);
        assert_eq!(config.max_errors, 0);
    }

    #[test]
    fn test_config_builders() {
        let config = ValidationConfig::new().with_fail_fast().with_max_errors(3);
        assert!(config.fail_fast);
        assert_eq!(config.max_errors, 3);
    }
}
