//! Path segment utilities.
//!
//! Paths are cleaned the way a filesystem path join would clean them:
//! repeated separators collapse, `.` segments disappear and `..` removes the
//! segment before it. Every normalized path is rooted, so `a/b`, `/a/b/` and
//! `//a//b` all become `/a/b`.

/// Prefix marking a segment as a named parameter, as in `/users/:id`.
pub const PARAM_SIGIL: char = ':';

/// Clean a path into its rooted, canonical form.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            segment => stack.push(segment),
        }
    }

    if stack.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Join path pieces with `/` and normalize the result.
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let joined = parts.into_iter().collect::<Vec<_>>().join("/");
    normalize(&joined)
}

/// Split a path into its non-empty segments without normalizing it.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// The parameter name declared by a segment, if it is a parameter segment.
pub fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(PARAM_SIGIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("/a/b"), "/a/b");
        assert_eq!(normalize("a/b/"), "/a/b");
        assert_eq!(normalize("//a//b"), "/a/b");
    }

    #[test]
    fn test_normalize_resolves_dots() {
        assert_eq!(normalize("/a/./b"), "/a/b");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("/a/.."), "/");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["/api", "v1/", "/users"]), "/api/v1/users");
        assert_eq!(join(["", "/ping"]), "/ping");
        assert_eq!(join(["/api", ""]), "/api");
        assert_eq!(join(["/api/v1", "../v2"]), "/api/v2");
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/users/:id/"), vec!["users", ":id"]);
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_param_name() {
        assert_eq!(param_name(":id"), Some("id"));
        assert_eq!(param_name(":"), Some(""));
        assert_eq!(param_name("users"), None);
    }
}
