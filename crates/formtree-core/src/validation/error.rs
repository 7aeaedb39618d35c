//! The flattened validation error map
//!
//! One validate call over one instance tree produces one [`ErrorSet`]: a
//! mapping from a root-relative, dot-joined field key (`band.label.name`) to
//! the ordered messages that accumulated for that field. Re-validating
//! replaces the set rather than appending to it.
//!
//! Copyright (c) 2025 Formtree Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Flattened, dot-namespaced field-to-messages error mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSet {
    messages: BTreeMap<String, Vec<String>>,
}

impl ErrorSet {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message for a field key
    pub fn add<K, M>(&mut self, key: K, message: M)
    where
        K: Into<String>,
        M: Into<String>,
    {
        self.messages
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Merge another error set into this one, prefixing every key
    ///
    /// A child key `name` lands under `prefix.name`. Messages for a key that
    /// already exists are appended, which is how same-named fields across
    /// collection elements share one flattened key.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ErrorSet) {
        for (key, messages) in other.messages {
            let entry = self
                .messages
                .entry(format!("{}.{}", prefix, key))
                .or_default();
            entry.extend(messages);
        }
    }

    /// Messages recorded for a field key
    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.messages.get(key)
    }

    /// True when no field has any message
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of field keys carrying messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterate over field keys and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.messages.iter()
    }

    /// The underlying key-to-messages mapping
    pub fn messages(&self) -> &BTreeMap<String, Vec<String>> {
        &self.messages
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, messages) in &self.messages {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", key, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut errors = ErrorSet::new();
        errors.add("name", "required");
        errors.add("name", "is too short");

        assert_eq!(
            errors.get("name"),
            Some(&vec!["required".to_string(), "is too short".to_string()])
        );
        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_merge_prefixed_nests_keys() {
        let mut child = ErrorSet::new();
        child.add("name", "required");

        let mut grandparent = ErrorSet::new();
        let mut parent = ErrorSet::new();
        parent.merge_prefixed("label", child);
        grandparent.merge_prefixed("band", parent);

        assert_eq!(
            grandparent.get("band.label.name"),
            Some(&vec!["required".to_string()])
        );
    }

    #[test]
    fn test_merge_prefixed_appends_on_collision() {
        let mut errors = ErrorSet::new();
        let mut first = ErrorSet::new();
        first.add("title", "required");
        let mut second = ErrorSet::new();
        second.add("title", "required");

        errors.merge_prefixed("songs", first);
        errors.merge_prefixed("songs", second);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("songs.title"),
            Some(&vec!["required".to_string(), "required".to_string()])
        );
    }

    #[test]
    fn test_display() {
        let mut errors = ErrorSet::new();
        errors.add("artist.name", "required");
        errors.add("label.name", "required");

        assert_eq!(
            errors.to_string(),
            "artist.name: required; label.name: required"
        );
    }
}
