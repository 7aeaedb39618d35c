//! Formtree Core - Nested form composition, binding, and validation
//!
//! This crate lets a caller describe a tree of form definitions mirroring an
//! object graph (a root entity plus nested single objects and collections),
//! populate that tree from a flat or semi-structured payload (including
//! `"x_attributes"` nesting and multi-parameter date/time field groups), run
//! validation rules scoped to each node, and read all failures back as one
//! flattened, dotted-path keyed error map.
//!
//! # Main Components
//!
//! - **Schema**: immutable, `Arc`-shared form definitions built once and
//!   reused by every instance
//! - **Binding**: lenient depth-first payload application, with
//!   multi-parameter date/time coercion
//! - **Validation**: pluggable per-property rule evaluators whose results
//!   merge into one root-relative [`ErrorSet`]
//! - **Instances**: a non-owning read/write view over the shared model graph
//!
//! # Example
//!
//! ```
//! use formtree_core::FormDef;
//! use serde_json::{json, Value};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let artist = FormDef::builder()
//!     .scalar("name")
//!     .rule("name", |value: Option<&Value>| match value {
//!         Some(v) if !v.is_null() => Vec::new(),
//!         _ => vec!["required".to_string()],
//!     })
//!     .build()
//!     .unwrap();
//! let album = FormDef::builder().nested("artist", &artist).build().unwrap();
//!
//! let model = Rc::new(RefCell::new(json!({"artist": {}})));
//! let mut form = album.bind(model);
//!
//! assert!(form.validate(&json!({"artist_attributes": {"name": "Blink 182"}})));
//! assert_eq!(form.nested("artist").unwrap().value("name"), Some(&json!("Blink 182")));
//! ```

pub mod binding;
pub mod error;
pub mod instance;
pub mod model;
pub mod schema;
pub mod validation;

// Re-export main types for convenience
pub use binding::MultiParamOutcome;
pub use error::{Error, Result};
pub use instance::{BoundProperty, FormInstance};
pub use model::{ModelHandle, PathSegment};
pub use schema::{FormDef, FormDefBuilder, PropertyDeclaration};
pub use validation::{ErrorSet, RuleEvaluator, ValidationConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::schema("test error");
        assert!(err.to_string().contains("test error"));
    }
}
