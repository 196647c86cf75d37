//! Insertion-ordered map for JSON objects.

use std::fmt;

use indexmap::map::{Iter, Keys, Values};
use indexmap::IndexMap;

use crate::error::ErrorKind;
use crate::value::Value;

/// The members of a JSON object, in input order.
///
/// Keys are unique. The parser rejects duplicates before insertion, so a map
/// obtained from parsing never lost a member. Equality ignores order.
#[derive(Clone, Default, PartialEq)]
pub struct Map {
    members: IndexMap<String, Value>,
}

impl Map {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a member by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the object has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over members in input order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.members.iter()
    }

    /// Iterate over keys in input order.
    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.members.keys()
    }

    /// Iterate over values in input order.
    pub fn values(&self) -> Values<'_, String, Value> {
        self.members.values()
    }

    /// Build a map from members in order, failing on the first repeated key
    /// the same way the parser does.
    pub fn from_members<K, I>(members: I) -> std::result::Result<Self, ErrorKind>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = Self::new();
        for (key, value) in members {
            let key = key.into();
            if map.contains_key(&key) {
                return Err(ErrorKind::DuplicateKey(key));
            }
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Append a member whose key is known to be new.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.members.insert(key, value);
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.members.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(members: &[(&str, Value)]) -> Map {
        Map::from_members(members.iter().cloned()).unwrap()
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut map = Map::new();
        map.insert("z".into(), Value::Null);
        map.insert("a".into(), Value::Bool(true));
        map.insert("m".into(), Value::from(1));
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = map(&[("x", Value::from(1)), ("y", Value::from(2))]);
        let b = map(&[("y", Value::from(2)), ("x", Value::from(1))]);
        assert_eq!(a, b);

        let c = map(&[("x", Value::from(1)), ("y", Value::from(3))]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_lookup() {
        let map = map(&[("k", Value::from("v"))]);
        assert_eq!(map.get("k"), Some(&Value::from("v")));
        assert!(map.contains_key("k"));
        assert!(!map.contains_key("v"));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert!(Map::new().is_empty());
    }

    #[test]
    fn test_debug() {
        let map = map(&[("a", Value::from(1)), ("b", Value::Null)]);
        assert_eq!(format!("{:?}", map), "{\"a\": 1, \"b\": null}");
    }

    #[test]
    fn test_from_members_rejects_repeated_keys() {
        let err = Map::from_members([
            ("a", Value::from(1)),
            ("b", Value::Null),
            ("a", Value::from(2)),
        ])
        .unwrap_err();
        assert_eq!(err, ErrorKind::DuplicateKey("a".into()));
    }
}
