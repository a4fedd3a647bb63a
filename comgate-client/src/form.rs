//! Form-encoded request parameters.

use crate::error::{ComgateError, Result};

/// Ordered set of request parameters.
///
/// Keys are unique: [`insert`](Self::insert) on an existing key replaces the value
/// in place, so the encoded order stays the order keys were first seen.
///
/// # Examples
///
/// ```
/// use comgate_client::FormParams;
///
/// let mut params = FormParams::new();
/// params.insert("label", "Order #1");
/// params.insert("price", 100);
/// assert_eq!(params.encode()?, "label=Order+%231&price=100");
/// # Ok::<(), comgate_client::ComgateError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Overlays `other` on top of `self`; keys in `other` win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (key, value) in other.pairs {
            self.insert(key, value);
        }
        self
    }

    /// Looks up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes as an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::EncodingError`] if serialization fails.
    pub fn encode(&self) -> Result<String> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| ComgateError::EncodingError(e.to_string()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = FormParams::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("3"));
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_merge_right_side_wins() {
        let base = FormParams::new().with("secret", "s").with("test", "true");
        let call = FormParams::new().with("test", "false").with("transId", "T1");

        let merged = base.merge(call);
        assert_eq!(merged.get("secret"), Some("s"));
        assert_eq!(merged.get("test"), Some("false"));
        assert_eq!(merged.get("transId"), Some("T1"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let params = FormParams::new().with("label", "a&b=c d").with("url", "https://x.cz/?q=1");
        assert_eq!(params.encode().unwrap(), "label=a%26b%3Dc+d&url=https%3A%2F%2Fx.cz%2F%3Fq%3D1");
    }

    #[test]
    fn test_encode_unicode() {
        let params = FormParams::new().with("label", "Objednávka");
        assert_eq!(params.encode().unwrap(), "label=Objedn%C3%A1vka");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(FormParams::new().encode().unwrap(), "");
        assert!(FormParams::new().is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: FormParams = [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
        assert_eq!(params.get("x"), Some("3"));
        assert!(params.contains_key("y"));
        assert!(!params.contains_key("z"));
    }
}
