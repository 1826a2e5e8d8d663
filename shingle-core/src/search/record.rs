//! Field access on caller-owned records.
//!
//! A search compares the query against one text field of each record.
//! Callers either hand the ranker a key closure (`Fn(&T) -> &str`, checked
//! at compile time) or implement [`Record`] and name the field at runtime.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde_json::Value;

/// A record whose text fields can be looked up by name.
///
/// `field` returns `None` when the record has no such field or the value
/// is not a string; the ranker turns that into
/// [`SearchError::InvalidFieldKind`](shingle_types::SearchError::InvalidFieldKind).
///
/// ```
/// use shingle_core::search::Record;
///
/// struct Place {
///     name: String,
///     city: String,
/// }
///
/// impl Record for Place {
///     fn field(&self, name: &str) -> Option<&str> {
///         match name {
///             "name" => Some(&self.name),
///             "city" => Some(&self.city),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the text stored under `name`.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    #[inline]
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

/// JSON objects: only string members count as text.
impl Record for Value {
    #[inline]
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    #[inline]
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    #[inline]
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_string_member() {
        let v = json!({ "name": "café", "stars": 4 });
        assert_eq!(v.field("name"), Some("café"));
    }

    #[test]
    fn json_non_string_member_is_rejected() {
        let v = json!({ "name": "café", "stars": 4, "tags": ["a"], "owner": null });
        assert_eq!(v.field("stars"), None);
        assert_eq!(v.field("tags"), None);
        assert_eq!(v.field("owner"), None);
    }

    #[test]
    fn json_missing_member_or_non_object() {
        assert_eq!(json!({ "name": "x" }).field("title"), None);
        assert_eq!(json!("just a string").field("name"), None);
        assert_eq!(json!([1, 2, 3]).field("name"), None);
    }

    #[test]
    fn hash_map_fields() {
        let mut m: HashMap<String, String> = HashMap::new();
        m.insert("name".into(), "tea house".into());
        assert_eq!(m.field("name"), Some("tea house"));
        assert_eq!(m.field("city"), None);
    }

    #[test]
    fn btree_map_with_str_keys() {
        let m: BTreeMap<&str, &str> = [("name", "cafe racer")].into_iter().collect();
        assert_eq!(m.field("name"), Some("cafe racer"));
    }

    #[test]
    fn reference_forwards() {
        let v = json!({ "name": "tea" });
        let r = &v;
        assert_eq!(Record::field(&r, "name"), Some("tea"));
    }
}
