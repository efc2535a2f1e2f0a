//! URL query helpers.

use std::collections::HashMap;

use url::form_urlencoded;

/// Appends a query parameter to a URI.
///
/// Uses `?` for the first parameter and `&` for subsequent ones. The name
/// and value are appended as given; callers encode them if needed.
pub fn add_parameter(uri: &str, name: &str, value: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}{name}={value}")
}

/// Parses a query string into a parameter multimap.
///
/// Keys and values are percent-decoded (with `+` as space). A repeated key
/// accumulates all of its values in order; a key without `=` maps to an
/// empty value. An empty query yields an empty map.
pub fn parse_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut parameters: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        parameters
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_parameter_first() {
        assert_eq!(
            add_parameter("http://example.com/path", "q", "rust"),
            "http://example.com/path?q=rust"
        );
    }

    #[test]
    fn test_add_parameter_appends() {
        assert_eq!(
            add_parameter("http://example.com/path?q=rust", "page", "2"),
            "http://example.com/path?q=rust&page=2"
        );
    }

    #[test]
    fn test_parse_query_single_pairs() {
        let params = parse_query("a=1&b=2");
        assert_eq!(params["a"], ["1"]);
        assert_eq!(params["b"], ["2"]);
    }

    #[test]
    fn test_parse_query_repeated_key() {
        let params = parse_query("tag=rust&tag=http");
        assert_eq!(params["tag"], ["rust", "http"]);
    }

    #[test]
    fn test_parse_query_key_without_value() {
        let params = parse_query("flag");
        assert_eq!(params["flag"], [""]);
    }

    #[test]
    fn test_parse_query_percent_decoding() {
        let params = parse_query("q=hello%20world&name=a+b");
        assert_eq!(params["q"], ["hello world"]);
        assert_eq!(params["name"], ["a b"]);
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
    }
}
