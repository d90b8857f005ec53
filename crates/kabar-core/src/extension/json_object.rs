use super::JsonValueExt;
use crate::{JsonValue, Map};
use std::borrow::Cow;

/// Extension trait for [`Map`](crate::Map).
pub trait JsonObjectExt {
    /// Extracts the boolean value corresponding to the key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Extracts the integer value corresponding to the key.
    fn get_i64(&self, key: &str) -> Option<i64>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `u64` if possible.
    fn get_u64(&self, key: &str) -> Option<u64>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `u32` if possible.
    fn get_u32(&self, key: &str) -> Option<u32>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `usize` if possible.
    fn get_usize(&self, key: &str) -> Option<usize>;

    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the array value corresponding to the key.
    fn get_array(&self, key: &str) -> Option<&Vec<JsonValue>>;

    /// Extracts the object value corresponding to the key.
    fn get_map(&self, key: &str) -> Option<&Map>;

    /// Extracts the value corresponding to the key and parses it as a string.
    fn parse_string(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Extracts the value corresponding to the key and parses it as an `i64`.
    fn parse_i64(&self, key: &str) -> Option<i64>;

    /// Extracts the value corresponding to the key and parses it as a `u64`.
    fn parse_u64(&self, key: &str) -> Option<u64>;

    /// Inserts or updates a key-value pair into the map.
    fn upsert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue>;

    /// Creates a new instance with the entry.
    fn from_entry(key: impl Into<String>, value: impl Into<JsonValue>) -> Self;
}

impl JsonObjectExt for Map {
    #[inline]
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    #[inline]
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    #[inline]
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.as_u64())
    }

    #[inline]
    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok())
    }

    #[inline]
    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(|v| v.as_u64())
            .and_then(|n| usize::try_from(n).ok())
    }

    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_array(&self, key: &str) -> Option<&Vec<JsonValue>> {
        self.get(key).and_then(|v| v.as_array())
    }

    #[inline]
    fn get_map(&self, key: &str) -> Option<&Map> {
        self.get(key).and_then(|v| v.as_object())
    }

    #[inline]
    fn parse_string(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(|v| v.parse_string())
    }

    #[inline]
    fn parse_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.parse_i64())
    }

    #[inline]
    fn parse_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse_u64())
    }

    #[inline]
    fn upsert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.insert(key.into(), value.into())
    }

    #[inline]
    fn from_entry(key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let mut map = Map::with_capacity(1);
        map.insert(key.into(), value.into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::JsonObjectExt;
    use crate::Map;

    #[test]
    fn it_parses_lenient_scalars() {
        let mut map = Map::new();
        map.upsert("page", "3");
        map.upsert("limit", 12);
        map.upsert("active", true);

        assert_eq!(map.parse_u64("page"), Some(3));
        assert_eq!(map.get_u64("limit"), Some(12));
        assert_eq!(map.parse_string("limit").as_deref(), Some("12"));
        assert_eq!(map.get_bool("active"), Some(true));
        assert_eq!(map.get_u64("missing"), None);
    }
}
