use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// An HTTP request method.
///
/// Methods are matched exactly: `"get"` is a custom method, not `GET`.
/// Equality and hashing go through [`Method::as_str`], so
/// `Method::Custom("GET".into())` is the same method as `Method::Get`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Custom(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Custom(name) => name,
        }
    }

    /// The named variant for a standard method spelled as `Custom`.
    pub fn canonical(self) -> Self {
        Method::from(String::from(self))
    }

    /// Position used when listing routes and allowed methods.
    fn rank(&self) -> u8 {
        match self.as_str() {
            "GET" => 0,
            "HEAD" => 1,
            "POST" => 2,
            "PUT" => 3,
            "DELETE" => 4,
            "PATCH" => 5,
            "OPTIONS" => 6,
            _ => 7,
        }
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl Ord for Method {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl PartialOrd for Method {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            other => Method::Custom(other.to_string()),
        }
    }
}

impl From<String> for Method {
    fn from(value: String) -> Self {
        match Method::from(value.as_str()) {
            Method::Custom(_) => Method::Custom(value),
            known => known,
        }
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        match method {
            Method::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl log::kv::ToValue for Method {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_parse() {
        assert_eq!(Method::from("GET"), Method::Get);
        assert_eq!(Method::from("PATCH"), Method::Patch);
        assert_eq!(Method::from("OPTIONS"), Method::Options);
    }

    #[test]
    fn test_methods_are_case_sensitive() {
        assert_eq!(Method::from("get"), Method::Custom("get".to_string()));
        assert_eq!(Method::from("get").as_str(), "get");
    }

    #[test]
    fn test_ordering() {
        let mut methods = vec![
            Method::Custom("PURGE".to_string()),
            Method::Delete,
            Method::Post,
            Method::Get,
        ];
        methods.sort();
        assert_eq!(
            methods,
            vec![
                Method::Get,
                Method::Post,
                Method::Delete,
                Method::Custom("PURGE".to_string())
            ]
        );
    }

    #[test]
    fn test_custom_spelling_of_standard_method() {
        let spelled = Method::Custom("GET".to_string());
        assert_eq!(spelled, Method::Get);
        assert_eq!(spelled.cmp(&Method::Get), std::cmp::Ordering::Equal);
        assert!(matches!(spelled.canonical(), Method::Get));

        let mut handlers = rustc_hash::FxHashMap::default();
        handlers.insert(Method::Custom("DELETE".to_string()), 1);
        assert_eq!(handlers.get(&Method::Delete), Some(&1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Custom("PURGE".into()).to_string(), "PURGE");
    }
}
