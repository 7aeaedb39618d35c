//! The attribute binder
//!
//! Applies one payload to one form instance tree, depth-first, following the
//! schema. Binding is deliberately lenient: an absent key, a wrong-shaped
//! value, or an out-of-range collection index means "nothing to bind" for
//! that subtree, never a fault. Catching bad input is validation's job, not
//! the binder's. Scalar assignments write through to the shared model as
//! they land.
//!
//! Copyright (c) 2025 Formtree Team
//! Licensed under the Apache-2.0 license

pub mod multi_param;

pub use multi_param::MultiParamOutcome;

use crate::instance::FormInstance;
use crate::schema::PropertyDeclaration;
use serde_json::Value;

/// Serialization formats for multi-parameter values landing in a JSON model
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Apply a payload onto an instance subtree
pub(crate) fn bind(instance: &mut FormInstance, payload: &Value) {
    let Some(object) = payload.as_object() else {
        log::debug!("payload is not an object, nothing to bind");
        return;
    };

    let def = instance.def_arc();
    for declaration in def.properties() {
        match declaration {
            PropertyDeclaration::Scalar {
                name,
                multi_param: false,
            } => {
                if let Some(value) = object.get(name) {
                    instance.assign(name, value.clone());
                }
            }
            PropertyDeclaration::Scalar {
                name,
                multi_param: true,
            } => match multi_param::deconstruct(object, name) {
                MultiParamOutcome::Date(date) => {
                    instance.assign(name, Value::String(date.format(DATE_FORMAT).to_string()));
                }
                MultiParamOutcome::DateTime(datetime) => {
                    instance.assign(
                        name,
                        Value::String(datetime.format(DATETIME_FORMAT).to_string()),
                    );
                }
                MultiParamOutcome::Absent => {}
                MultiParamOutcome::Rejected => {
                    log::debug!("rejected incomplete multi-parameter group '{}'", name);
                }
            },
            PropertyDeclaration::Nested { name, .. } => {
                if let Some(sub_payload) = object.get(&attributes_key(name)) {
                    if let Some(child) = instance.nested_mut(name) {
                        bind(child, sub_payload);
                    }
                }
            }
            PropertyDeclaration::Collection { name, .. } => {
                let Some(entries) = object.get(&attributes_key(name)).and_then(Value::as_object)
                else {
                    continue;
                };
                for (index_key, sub_payload) in entries {
                    let Ok(index) = index_key.parse::<usize>() else {
                        log::debug!(
                            "ignoring non-positional key '{}' in '{}' collection payload",
                            index_key,
                            name
                        );
                        continue;
                    };
                    match instance.element_mut(name, index) {
                        Some(element) => bind(element, sub_payload),
                        None => {
                            log::debug!(
                                "ignoring index {} beyond '{}' collection size",
                                index,
                                name
                            );
                        }
                    }
                }
            }
        }
    }
}

fn attributes_key(name: &str) -> String {
    format!("{}_attributes", name)
}
