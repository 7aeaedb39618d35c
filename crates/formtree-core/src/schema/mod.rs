//! Form definitions and the schema builder
//!
//! A [`FormDef`] is the static description of one node of a nested form tree:
//! an ordered list of property declarations plus the validation rules scoped
//! to that node. Definitions are immutable once built and shared via `Arc`,
//! so every instance bound from the same definition reads the same schema,
//! and a sub-form definition can be reused by any number of parents. The
//! `Arc` graph is the process-wide registry: built once at startup, never
//! mutated afterwards.

use crate::error::{Error, Result};
use crate::instance::FormInstance;
use crate::model::ModelHandle;
use crate::validation::RuleEvaluator;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// One declared property of a form definition
#[derive(Debug, Clone)]
pub enum PropertyDeclaration {
    /// A leaf value copied from, or assembled for, the underlying model
    Scalar {
        name: String,
        /// Assembled from `name(1i)`..`name(5i)` date/time parts when set
        multi_param: bool,
    },
    /// A single nested form bound to one sub-object
    Nested { name: String, form: Arc<FormDef> },
    /// An ordered sequence of nested forms, one per element of a model sequence
    Collection { name: String, form: Arc<FormDef> },
}

impl PropertyDeclaration {
    /// The property's local name
    pub fn name(&self) -> &str {
        match self {
            PropertyDeclaration::Scalar { name, .. }
            | PropertyDeclaration::Nested { name, .. }
            | PropertyDeclaration::Collection { name, .. } => name,
        }
    }
}

/// Immutable definition of one form node: schema plus validation rules
pub struct FormDef {
    properties: Vec<PropertyDeclaration>,
    rules: Vec<(String, Arc<dyn RuleEvaluator>)>,
}

impl FormDef {
    /// Start building a new form definition
    pub fn builder() -> FormDefBuilder {
        FormDefBuilder {
            properties: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Declared properties, in declaration order
    pub fn properties(&self) -> &[PropertyDeclaration] {
        &self.properties
    }

    /// Look up a declaration by name
    pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Validation rules, in attachment order, keyed by local property name
    pub fn rules(&self) -> &[(String, Arc<dyn RuleEvaluator>)] {
        &self.rules
    }

    /// Eagerly construct a form instance tree over a model document
    ///
    /// Nested and collection children are instantiated here, one-to-one with
    /// the model graph; a later payload that omits them leaves them at their
    /// model-derived defaults. The model is shared, never copied. The
    /// receiver is an `Arc` because instances keep their definition alive;
    /// `Arc::clone` the definition to bind it more than once.
    pub fn bind(self: Arc<Self>, model: Rc<RefCell<Value>>) -> FormInstance {
        FormInstance::from_model(self, ModelHandle::new(model))
    }
}

impl fmt::Debug for FormDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDef")
            .field("properties", &self.properties)
            .field(
                "rules",
                &self.rules.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for [`FormDef`]
///
/// Declarations register in call order. Re-declaring an existing name
/// replaces the prior declaration in place (reopen-and-extend semantics for
/// specialized form variants) rather than erroring.
pub struct FormDefBuilder {
    properties: Vec<PropertyDeclaration>,
    rules: Vec<(String, Arc<dyn RuleEvaluator>)>,
}

impl FormDefBuilder {
    /// Declare a plain scalar property
    pub fn scalar(mut self, name: &str) -> Self {
        self.declare(PropertyDeclaration::Scalar {
            name: name.to_string(),
            multi_param: false,
        });
        self
    }

    /// Declare a scalar property assembled from multi-parameter date/time parts
    pub fn multi_param(mut self, name: &str) -> Self {
        self.declare(PropertyDeclaration::Scalar {
            name: name.to_string(),
            multi_param: true,
        });
        self
    }

    /// Declare a nested single sub-form
    pub fn nested(mut self, name: &str, form: &Arc<FormDef>) -> Self {
        self.declare(PropertyDeclaration::Nested {
            name: name.to_string(),
            form: Arc::clone(form),
        });
        self
    }

    /// Declare a collection of sub-forms
    pub fn collection(mut self, name: &str, form: &Arc<FormDef>) -> Self {
        self.declare(PropertyDeclaration::Collection {
            name: name.to_string(),
            form: Arc::clone(form),
        });
        self
    }

    /// Attach a validation rule to a declared property
    ///
    /// A property may carry several rules; they run in attachment order.
    pub fn rule<R>(mut self, name: &str, evaluator: R) -> Self
    where
        R: RuleEvaluator + 'static,
    {
        self.rules.push((name.to_string(), Arc::new(evaluator)));
        self
    }

    /// Finish the definition
    ///
    /// Fails when a declared name is empty or a rule references a property
    /// that was never declared. Both are definition-time mistakes, caught
    /// here so that binding and validation never have to fail.
    pub fn build(self) -> Result<Arc<FormDef>> {
        for property in &self.properties {
            if property.name().is_empty() {
                return Err(Error::schema("property name must not be empty"));
            }
        }
        for (name, _) in &self.rules {
            if !self.properties.iter().any(|p| p.name() == name) {
                return Err(Error::schema(format!(
                    "rule references undeclared property '{}'",
                    name
                )));
            }
        }
        Ok(Arc::new(FormDef {
            properties: self.properties,
            rules: self.rules,
        }))
    }

    // Last write wins on redeclaration, keeping the original position.
    fn declare(&mut self, declaration: PropertyDeclaration) {
        match self
            .properties
            .iter()
            .position(|p| p.name() == declaration.name())
        {
            Some(i) => self.properties[i] = declaration,
            None => self.properties.push(declaration),
        }
    }
}
