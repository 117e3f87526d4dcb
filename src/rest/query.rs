//! `key=value&key=value` lookup for query strings and form bodies.

/// Value of the first `name=value` pair in `encoded`.
///
/// A key with no `=` or an empty value is treated as absent.
pub fn variable<'a>(encoded: &'a str, name: &str) -> Option<&'a str> {
    encoded
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
