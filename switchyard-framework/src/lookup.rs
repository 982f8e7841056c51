use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{method::Method, middleware::Endpoint, Params};

/// Outcome of resolving a method and path.
#[derive(Debug)]
pub enum RouteLookup<'a, E> {
    /// A route matched both path and method.
    Match {
        endpoint: &'a Endpoint<E>,
        params: Params,
    },
    /// The path matched a route, but not for this method.
    MethodNotAllowed { allowed: Vec<Method>, params: Params },
    /// No route matched the path.
    NotFound,
}

impl<'a, E> RouteLookup<'a, E> {
    pub fn endpoint(&self) -> Option<&'a Endpoint<E>> {
        match self {
            RouteLookup::Match { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, RouteLookup::Match { .. })
    }
}

/// A registered route, as listed by [`Router::routes`](crate::Router::routes).
#[derive(Debug)]
pub struct RouteInfo<'a, E> {
    pub method: Method,
    /// Normalized pattern, e.g. `/users/:id`
    pub path: String,
    pub endpoint: &'a Endpoint<E>,
}

impl<E> Serialize for RouteInfo<'_, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RouteInfo", 3)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("middleware", &self.endpoint.len())?;
        state.end()
    }
}
