use std::fmt;

/// Reasons a route definition is rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A `:` segment with nothing after it
    EmptyParameterName { path: String },
    /// The parameter edge at this position is already bound to another name
    ParameterConflict {
        path: String,
        existing: String,
        requested: String,
    },
    /// The same parameter name appears twice in one route
    DuplicateParameter { path: String, name: String },
    /// The route is deeper than the router allows
    TooManySegments {
        path: String,
        count: usize,
        max: usize,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::EmptyParameterName { path } => {
                write!(f, "Route '{}' has a parameter segment without a name", path)
            }
            RouteError::ParameterConflict {
                path,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "Route '{}' names parameter ':{}' where ':{}' is already registered",
                    path, requested, existing
                )
            }
            RouteError::DuplicateParameter { path, name } => {
                write!(f, "Route '{}' uses parameter ':{}' more than once", path, name)
            }
            RouteError::TooManySegments { path, count, max } => {
                write!(
                    f,
                    "Route '{}' has {} segments, exceeding the maximum of {}",
                    path, count, max
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}

pub type Result<T> = std::result::Result<T, RouteError>;
