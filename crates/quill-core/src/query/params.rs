//! Raw request parameters, as handed over by the transport layer.

use std::collections::BTreeMap;

/// Parameter holding the search keyword.
pub const KEYWORD_PARAM: &str = "keyword";

/// Parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Keys that never become filter conditions.
pub const RESERVED_PARAMS: [&str; 5] = [KEYWORD_PARAM, PAGE_PARAM, "limit", "sort", "fields"];

/// Value of a single parameter: repeated keys collapse into `Many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl ParamValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Many(values) => values.first().map(String::as_str),
        }
    }

    fn push(self, value: String) -> Self {
        match self {
            ParamValue::Single(first) => ParamValue::Many(vec![first, value]),
            ParamValue::Many(mut values) => {
                values.push(value);
                ParamValue::Many(values)
            }
        }
    }
}

/// Query-string parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; a key seen before turns into a multi-valued parameter.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let merged = match self.0.remove(&key) {
            Some(existing) => existing.push(value),
            None => ParamValue::Single(value),
        };
        self.0.insert(key, merged);
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Non-blank search keyword, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.get(KEYWORD_PARAM)
            .and_then(ParamValue::first)
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Requested page: missing or non-numeric means 1, anything below 1 is raised to 1.
    pub fn page(&self) -> u64 {
        self.get(PAGE_PARAM)
            .and_then(ParamValue::first)
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|p| p.max(1) as u64)
            .unwrap_or(1)
    }

    /// Parameters that take part in filtering.
    pub fn filterable(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0
            .iter()
            .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_collect() {
        let params: QueryParams = vec![("tags", "rust"), ("tags", "web"), ("title", "x")]
            .into_iter()
            .collect();

        assert_eq!(
            params.get("tags"),
            Some(&ParamValue::Many(vec!["rust".to_string(), "web".to_string()]))
        );
        assert_eq!(params.get("title"), Some(&ParamValue::Single("x".to_string())));
    }

    #[test]
    fn test_page_defaults_and_coercion() {
        assert_eq!(QueryParams::new().page(), 1);
        assert_eq!(QueryParams::new().with("page", "3").page(), 3);
        assert_eq!(QueryParams::new().with("page", "0").page(), 1);
        assert_eq!(QueryParams::new().with("page", "-4").page(), 1);
        assert_eq!(QueryParams::new().with("page", "abc").page(), 1);
    }

    #[test]
    fn test_filterable_skips_reserved_keys() {
        let params = QueryParams::new()
            .with("keyword", "rust")
            .with("page", "2")
            .with("limit", "5")
            .with("author", "someone");

        let keys: Vec<&str> = params.filterable().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["author"]);
    }

    #[test]
    fn test_blank_keyword_is_ignored() {
        assert_eq!(QueryParams::new().with("keyword", "   ").keyword(), None);
        assert_eq!(
            QueryParams::new().with("keyword", " rust ").keyword(),
            Some("rust")
        );
    }
}
