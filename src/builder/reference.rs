//! @dose
//! purpose: Reference navigation resolver. Builds the name to canonical-id map from tokens the
//!     caller already resolved, and answers read-only lookups while rendering.
//!
//! when-editing:
//!     - !Lookups are exact; similar-looking names never navigate
//!     - First insertion of a name wins; later duplicates are ignored
//!
//! invariants:
//!     - A token with a missing or empty id contributes nothing (no navigation, no error)
//!     - The map is never mutated during rendering
//!
//! gotchas:
//!     - Keys are the token text as displayed, including any namespace qualification

use crate::types::Token;
use std::collections::HashMap;

/// Resolved type name to canonical reference id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: HashMap<String, String>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. Returns false when the name was already present or the id is empty.
    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) -> bool {
        let id = id.into();
        if id.is_empty() {
            return false;
        }
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, id);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, I: Into<String>> FromIterator<(N, I)> for ReferenceMap {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut map = ReferenceMap::new();
        for (name, id) in iter {
            map.insert(name, id);
        }
        map
    }
}

/// Build a reference map from already-resolved tokens
pub fn build_reference_map<'a, I>(resolved_tokens: I) -> ReferenceMap
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut map = ReferenceMap::new();
    for token in resolved_tokens {
        match token.navigate_to_id.as_deref() {
            Some(id) if !id.is_empty() => {
                map.insert(token.value.as_str(), id);
            }
            _ => {
                tracing::debug!(name = %token.value, "token has no canonical id; not navigable");
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::token::{create_token, TokenOptions};
    use crate::types::TokenKind;

    fn resolved(name: &str, id: Option<&str>) -> Token {
        create_token(
            TokenKind::TypeName,
            name,
            TokenOptions::default().navigate_to(id.map(str::to_string)),
        )
    }

    #[test]
    fn test_build_reference_map() {
        let tokens = vec![
            resolved("Foo", Some("pkg!Foo:interface")),
            resolved("Bar", Some("pkg!Bar:class")),
            resolved("Broken", Some("")),
            resolved("Missing", None),
            resolved("Foo", Some("pkg!Other")),
        ];
        let map = build_reference_map(&tokens);

        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup("Foo"), Some("pkg!Foo:interface"));
        assert_eq!(map.lookup("Bar"), Some("pkg!Bar:class"));
        assert_eq!(map.lookup("Broken"), None);
        assert_eq!(map.lookup("Missing"), None);
        assert_eq!(map.lookup("foo"), None);
    }

    #[test]
    fn test_from_iterator() {
        let map: ReferenceMap = [("A", "id-a"), ("B", "id-b")].into_iter().collect();
        assert_eq!(map.lookup("A"), Some("id-a"));
        assert!(!map.is_empty());
    }
}
