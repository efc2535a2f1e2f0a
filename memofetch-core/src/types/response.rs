//! Full HTTP response representation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Response headers as a multimap.
///
/// HTTP allows a header to appear several times, so each name maps to the
/// ordered list of values the server sent. Names are stored lowercase.
pub type HeaderMap = HashMap<String, Vec<String>>;

/// A downloaded page body together with the full response headers.
///
/// This is the value type of the URL → response cache, so it is cheap to
/// clone relative to a network round-trip and serializable for diagnostics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Decoded response body.
    pub body: String,
    /// Response headers, names lowercase.
    pub headers: HeaderMap,
}

impl HttpResponse {
    /// Creates a response from a decoded body and header multimap.
    ///
    /// Header names are normalized to lowercase.
    pub fn new(body: impl Into<String>, headers: HeaderMap) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            body: body.into(),
            headers,
        }
    }

    /// Returns the single value of a header, if present.
    ///
    /// # Errors
    ///
    /// [`FetchError::AmbiguousHeader`] if the header carries several values;
    /// callers that expect one value must not silently pick the first.
    pub fn header(&self, name: &str) -> Result<Option<&str>> {
        single_header_value(&self.headers, name)
    }

    /// Returns all values of a header, if present.
    pub fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_lowercase())
            .map(|values| values.as_slice())
    }
}

/// Looks up the single value of a header in a multimap.
///
/// Returns `Ok(None)` when the header is absent: absence is a normal
/// outcome, not a failure. Several values for the same name are a
/// caller-contract violation and surface as [`FetchError::AmbiguousHeader`].
pub fn single_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>> {
    match headers.get(&name.to_lowercase()) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(Some(values[0].as_str())),
        Some(values) => Err(FetchError::AmbiguousHeader {
            name: name.to_lowercase(),
            count: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_response() -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type".into(), vec!["text/html".into()]);
        headers.insert(
            "Set-Cookie".into(),
            vec!["a=1".into(), "b=2".into()],
        );
        HttpResponse::new("<html></html>", headers)
    }

    #[test]
    fn test_header_names_normalized() {
        let response = sample_response();
        assert!(response.headers.contains_key("content-type"));
        assert!(!response.headers.contains_key("Content-Type"));
    }

    #[test_case("content-type"; "lowercase")]
    #[test_case("Content-Type"; "canonical")]
    #[test_case("CONTENT-TYPE"; "uppercase")]
    fn test_header_lookup_case_insensitive(name: &str) {
        let response = sample_response();
        assert_eq!(response.header(name).unwrap(), Some("text/html"));
    }

    #[test]
    fn test_header_absent_is_none() {
        let response = sample_response();
        assert_eq!(response.header("x-missing").unwrap(), None);
    }

    #[test]
    fn test_header_multiple_values_is_error() {
        let response = sample_response();
        let err = response.header("set-cookie").unwrap_err();
        assert!(matches!(
            err,
            FetchError::AmbiguousHeader { count: 2, .. }
        ));
    }

    #[test]
    fn test_header_values_returns_all() {
        let response = sample_response();
        let values = response.header_values("set-cookie").unwrap();
        assert_eq!(values, ["a=1", "b=2"]);
    }

    #[test]
    fn test_response_serde_round_trip() {
        let response = sample_response();
        let json = serde_json::to_string(&response).unwrap();
        let back: HttpResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.body, response.body);
        assert_eq!(back.headers, response.headers);
    }
}
