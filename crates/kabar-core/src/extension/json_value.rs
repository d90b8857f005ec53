use crate::{JsonValue, Map};
use std::borrow::Cow;

/// Extension trait for [`JsonValue`](crate::JsonValue).
pub trait JsonValueExt {
    /// Returns `true` if the value is null or an empty string.
    fn is_unset(&self) -> bool;

    /// Parses the value as a string, converting scalars to their display form.
    fn parse_string(&self) -> Option<Cow<'_, str>>;

    /// Parses the value as an `i64`, accepting numbers and numeric strings.
    fn parse_i64(&self) -> Option<i64>;

    /// Parses the value as a `u64`, accepting numbers and numeric strings.
    fn parse_u64(&self) -> Option<u64>;

    /// Consumes the value and returns it as a json object if possible.
    fn into_map_opt(self) -> Option<Map>;
}

impl JsonValueExt for JsonValue {
    #[inline]
    fn is_unset(&self) -> bool {
        match self {
            JsonValue::Null => true,
            JsonValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    fn parse_string(&self) -> Option<Cow<'_, str>> {
        match self {
            JsonValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            JsonValue::Number(n) => Some(Cow::Owned(n.to_string())),
            JsonValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    fn parse_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn parse_u64(&self) -> Option<u64> {
        match self {
            JsonValue::Number(n) => n.as_u64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    #[inline]
    fn into_map_opt(self) -> Option<Map> {
        if let JsonValue::Object(map) = self {
            Some(map)
        } else {
            None
        }
    }
}
