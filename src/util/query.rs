//! Query-string helpers.

use url::form_urlencoded;

/// Encode a single query-string value (`application/x-www-form-urlencoded`
/// escaping, spaces as `+`).
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
