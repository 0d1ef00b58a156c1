//! Ordered element attributes.
//!
//! [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
//!
//! "An element has an associated ordered attribute list."
//!
//! Serialization writes attributes back in source order, so the list keeps
//! insertion order instead of hashing.

use serde::Serialize;

/// A single attribute: a name and a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "An attribute has a local name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of attributes with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    list: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Get the value of the attribute with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns true if an attribute with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.list.iter().any(|attr| attr.name == name)
    }

    /// [§ 4.9 change an attribute](https://dom.spec.whatwg.org/#concept-element-attributes-change)
    ///
    /// Set an attribute value. An existing attribute keeps its position;
    /// a new one is appended. Returns the previous value, if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.list.iter_mut().find(|attr| attr.name == name) {
            return Some(std::mem::replace(&mut existing.value, value));
        }
        self.list.push(Attribute { name, value });
        None
    }

    /// Add an attribute only if no attribute with that name exists yet.
    ///
    /// Returns true if the attribute was added. Used when the parser merges
    /// attributes from a stray `<html>` or `<body>` start tag.
    pub fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.list.push(Attribute::new(name, value));
        true
    }

    /// Remove the attribute with the given name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.list.iter().position(|attr| attr.name == name)?;
        Some(self.list.remove(index).value)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    /// Later duplicates are ignored, matching the tokenizer's
    /// "first attribute wins" rule.
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let name = name.into();
            if !attrs.contains(&name) {
                attrs.list.push(Attribute {
                    name,
                    value: value.into(),
                });
            }
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_position() {
        let mut attrs = Attributes::new();
        let _ = attrs.set("id", "a");
        let _ = attrs.set("class", "b");
        assert_eq!(attrs.set("id", "c"), Some("a".to_string()));

        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["id", "class"]);
        assert_eq!(attrs.get("id"), Some("c"));
    }

    #[test]
    fn test_from_iter_first_wins() {
        let attrs: Attributes = [("x", "1"), ("y", "2"), ("x", "3")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("x"), Some("1"));
    }

    #[test]
    fn test_remove_and_set_if_absent() {
        let mut attrs: Attributes = [("lang", "en")].into_iter().collect();
        assert!(!attrs.set_if_absent("lang", "fr"));
        assert!(attrs.set_if_absent("dir", "ltr"));
        assert_eq!(attrs.remove("lang"), Some("en".to_string()));
        assert_eq!(attrs.remove("lang"), None);
        assert_eq!(attrs.get("dir"), Some("ltr"));
    }
}
