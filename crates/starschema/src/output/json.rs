use serde::Serialize;

/// Serializes a value as pretty-printed JSON.
///
/// Decimals are written as strings so prices keep their exact value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
