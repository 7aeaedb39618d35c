//! The runtime form instance tree
//!
//! A [`FormInstance`] wraps one node of the model graph: it exposes the bound
//! property values for that node, its eagerly built nested and collection
//! children, and the error set left by the last validate call. The tree is
//! constructed once per bind and mutated in place by each validate: values
//! are reassigned and errors replaced, never accumulated across calls.
//!
//! Copyright (c) 2025 Formtree Team
//! Licensed under the Apache-2.0 license

use crate::binding;
use crate::model::ModelHandle;
use crate::schema::{FormDef, PropertyDeclaration};
use crate::validation::{self, ErrorSet, ValidationConfig};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The bound content of one declared property
#[derive(Debug)]
pub enum BoundProperty {
    /// A scalar value; `None` when neither the model nor any payload ever
    /// provided one
    Value(Option<Value>),
    /// A single nested sub-form
    Nested(FormInstance),
    /// Ordered sub-forms, one per element of the model's sequence
    Collection(Vec<FormInstance>),
}

/// One node of a bound form tree
#[derive(Debug)]
pub struct FormInstance {
    def: Arc<FormDef>,
    model: ModelHandle,
    values: BTreeMap<String, BoundProperty>,
    errors: ErrorSet,
}

impl FormInstance {
    /// Eagerly construct an instance tree from a definition and a model node
    ///
    /// Every nested and collection child is instantiated here; missing
    /// payload data later on leaves them at the defaults read from the model
    /// now. Collection children are built one-to-one with the model's
    /// existing sequence elements.
    pub(crate) fn from_model(def: Arc<FormDef>, model: ModelHandle) -> Self {
        let mut values = BTreeMap::new();
        for declaration in def.properties() {
            match declaration {
                PropertyDeclaration::Scalar { name, .. } => {
                    values.insert(name.clone(), BoundProperty::Value(model.read(name)));
                }
                PropertyDeclaration::Nested { name, form } => {
                    let child = FormInstance::from_model(Arc::clone(form), model.child(name));
                    values.insert(name.clone(), BoundProperty::Nested(child));
                }
                PropertyDeclaration::Collection { name, form } => {
                    let elements = (0..model.sequence_len(name))
                        .map(|i| {
                            FormInstance::from_model(Arc::clone(form), model.element(name, i))
                        })
                        .collect();
                    values.insert(name.clone(), BoundProperty::Collection(elements));
                }
            }
        }
        Self {
            def,
            model,
            values,
            errors: ErrorSet::new(),
        }
    }

    /// Bind a payload onto the tree, run all validation rules, and store the
    /// aggregated result
    ///
    /// Returns `true` iff no rule anywhere in the tree produced a message.
    /// The previous error set is replaced, never appended to.
    pub fn validate(&mut self, payload: &Value) -> bool {
        self.validate_with_config(payload, &ValidationConfig::default())
    }

    /// [`FormInstance::validate`] with explicit aggregation options
    pub fn validate_with_config(&mut self, payload: &Value, config: &ValidationConfig) -> bool {
        binding::bind(self, payload);
        let errors = validation::aggregate(self, config);
        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// The error set produced by the last validate call (empty before the
    /// first one)
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// The bound content of a declared property
    pub fn get(&self, name: &str) -> Option<&BoundProperty> {
        self.values.get(name)
    }

    /// The bound scalar value of a property, when one has been bound
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.values.get(name)? {
            BoundProperty::Value(value) => value.as_ref(),
            _ => None,
        }
    }

    /// The nested sub-form instance under `name`
    pub fn nested(&self, name: &str) -> Option<&FormInstance> {
        match self.values.get(name)? {
            BoundProperty::Nested(child) => Some(child),
            _ => None,
        }
    }

    /// The collection elements under `name`
    pub fn collection(&self, name: &str) -> Option<&[FormInstance]> {
        match self.values.get(name)? {
            BoundProperty::Collection(elements) => Some(elements),
            _ => None,
        }
    }

    /// Handle onto this node's slice of the shared model graph
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub(crate) fn def(&self) -> &FormDef {
        &self.def
    }

    pub(crate) fn def_arc(&self) -> Arc<FormDef> {
        Arc::clone(&self.def)
    }

    // Scalar assignment: update the bound value and write through to the
    // model attribute in the same step.
    pub(crate) fn assign(&mut self, name: &str, value: Value) {
        self.model.write(name, value.clone());
        self.values
            .insert(name.to_string(), BoundProperty::Value(Some(value)));
    }

    pub(crate) fn nested_mut(&mut self, name: &str) -> Option<&mut FormInstance> {
        match self.values.get_mut(name)? {
            BoundProperty::Nested(child) => Some(child),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, name: &str, index: usize) -> Option<&mut FormInstance> {
        match self.values.get_mut(name)? {
            BoundProperty::Collection(elements) => elements.get_mut(index),
            _ => None,
        }
    }
}
