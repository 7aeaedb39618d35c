//! Shared model access for form instance trees
//!
//! A form instance tree is a read/write view over one model graph, not a copy
//! of it. [`ModelHandle`] gives every node of the tree access to its slice of
//! the shared graph: a reference-counted root document plus the path of field
//! and index steps leading to the node. Reads and writes navigate that path
//! on demand, so a scalar assignment on a deeply nested node is immediately
//! visible through the root.

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// One step of a path from the model root to a nested node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named attribute of an object node
    Field(String),
    /// Position within a sequence attribute
    Index(usize),
}

/// Non-owning read/write handle onto one node of the model graph
///
/// Handles are cheap to clone; they share the root document. The handle is
/// deliberately not `Send`: a single instance tree supports one in-flight
/// bind/validate at a time, and the `Rc<RefCell<_>>` root makes that contract
/// explicit in the types.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    root: Rc<RefCell<Value>>,
    path: Vec<PathSegment>,
}

impl ModelHandle {
    /// Create a handle onto the root of a model document
    pub fn new(root: Rc<RefCell<Value>>) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Path from the model root to this node
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Handle onto the nested object attribute `name`
    pub fn child(&self, name: &str) -> ModelHandle {
        let mut path = self.path.clone();
        path.push(PathSegment::Field(name.to_string()));
        ModelHandle {
            root: Rc::clone(&self.root),
            path,
        }
    }

    /// Handle onto element `index` of the sequence attribute `name`
    pub fn element(&self, name: &str, index: usize) -> ModelHandle {
        let mut path = self.path.clone();
        path.push(PathSegment::Field(name.to_string()));
        path.push(PathSegment::Index(index));
        ModelHandle {
            root: Rc::clone(&self.root),
            path,
        }
    }

    /// Length of the sequence attribute `name`, or 0 when absent or not a sequence
    pub fn sequence_len(&self, name: &str) -> usize {
        self.read(name)
            .and_then(|v| v.as_array().map(|a| a.len()))
            .unwrap_or(0)
    }

    /// Read the attribute `name` of this node
    ///
    /// Returns `None` when any step of the path is missing or the node is not
    /// an object. The returned value is a clone; the model itself is only
    /// mutated through [`ModelHandle::write`].
    pub fn read(&self, name: &str) -> Option<Value> {
        let doc = self.root.borrow();
        let node = navigate(&doc, &self.path)?;
        node.as_object().and_then(|obj| obj.get(name)).cloned()
    }

    /// Write the attribute `name` of this node, creating intermediate objects
    /// along the path as needed
    ///
    /// Writes through an `Index` segment require the sequence element to
    /// already exist; a handle onto a since-removed element writes nothing.
    pub fn write(&self, name: &str, value: Value) {
        let mut doc = self.root.borrow_mut();
        if let Some(node) = navigate_or_create(&mut doc, &self.path) {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Some(obj) = node.as_object_mut() {
                obj.insert(name.to_string(), value);
            }
        }
    }

    /// Clone of the model node this handle points at
    ///
    /// `Value::Null` when the path no longer resolves.
    pub fn snapshot(&self) -> Value {
        let doc = self.root.borrow();
        navigate(&doc, &self.path).cloned().unwrap_or(Value::Null)
    }
}

fn navigate<'a>(doc: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path {
        current = match segment {
            PathSegment::Field(name) => current.as_object()?.get(name)?,
            PathSegment::Index(i) => current.as_array()?.get(*i)?,
        };
    }
    Some(current)
}

fn navigate_or_create<'a>(doc: &'a mut Value, path: &[PathSegment]) -> Option<&'a mut Value> {
    let mut current = doc;
    for segment in path {
        match segment {
            PathSegment::Field(name) => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                let obj = current.as_object_mut()?;
                current = obj
                    .entry(name.clone())
                    .or_insert(Value::Object(Map::new()));
            }
            PathSegment::Index(i) => {
                current = current.as_array_mut()?.get_mut(*i)?;
            }
        }
    }
    Some(current)
}
