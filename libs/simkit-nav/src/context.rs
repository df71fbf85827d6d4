use std::collections::BTreeMap;

/// Flat string map of extracted path parameters or query pairs.
pub type RouteParams = BTreeMap<String, String>;

/// Everything one navigation attempt knows about itself.
///
/// Created per attempt and discarded after the attempt resolves, whether it
/// mounts, redirects or is superseded.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    pub to_path: String,
    pub to_params: RouteParams,
    pub to_query: RouteParams,
    pub from_path: Option<String>,
    pub from_params: RouteParams,
}

impl NavigationContext {
    #[must_use]
    pub fn new(to_path: impl Into<String>) -> Self {
        Self {
            to_path: to_path.into(),
            to_params: RouteParams::new(),
            to_query: RouteParams::new(),
            from_path: None,
            from_params: RouteParams::new(),
        }
    }

    /// Path parameter by name, if the matched pattern captured it.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.to_params.get(name).map(String::as_str)
    }

    /// Query parameter by name.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.to_query.get(name).map(String::as_str)
    }
}

/// Parse the query-string part of a target into a flat map.
///
/// Keys without `=` map to an empty value; percent-encoding is decoded,
/// with undecodable sequences kept verbatim.
#[must_use]
pub fn parse_query(query: &str) -> RouteParams {
    let mut params = RouteParams::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        params.insert(decode(key), decode(value));
    }
    params
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |s| s.into_owned())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_pairs() {
        let params = parse_query("type=all&limit=20");
        assert_eq!(params.get("type").map(String::as_str), Some("all"));
        assert_eq!(params.get("limit").map(String::as_str), Some("20"));
    }

    #[test]
    fn test_parse_query_decodes_percent_encoding() {
        let params = parse_query("name=Hong%20Kong");
        assert_eq!(params.get("name").map(String::as_str), Some("Hong Kong"));
    }

    #[test]
    fn test_parse_query_bare_key() {
        let params = parse_query("debug");
        assert_eq!(params.get("debug").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
    }
}
