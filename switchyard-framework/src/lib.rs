//! Method and path routing over a segment trie, with middleware chains
//! composed when routes are registered.
//!
//! ```
//! use switchyard::{Params, Router};
//!
//! let mut router: Router<Vec<String>> = Router::new();
//! router.use_middleware(|params, log, next| {
//!     log.push("logged".to_string());
//!     next.run(params, log);
//! });
//! router
//!     .get("/users/:id", |params: &Params, log: &mut Vec<String>| {
//!         log.push(format!("user {}", params["id"]));
//!     })
//!     .unwrap();
//!
//! let mut log = Vec::new();
//! assert!(router.dispatch("GET", "/users/42", &mut log));
//! assert_eq!(log, vec!["logged", "user 42"]);
//! ```

mod config;
mod error;
mod group;
mod lookup;
mod method;
mod middleware;
mod node;
pub mod path;
mod router;

use std::collections::HashMap;

pub use config::{RouterConfig, DEFAULT_MAX_SEGMENTS};
pub use error::{Result, RouteError};
pub use group::Group;
pub use lookup::{RouteInfo, RouteLookup};
pub use method::Method;
pub use middleware::{Endpoint, Handler, Middleware, Next};
pub use router::Router;

/// Parameter values captured from the path, keyed by parameter name.
pub type Params = HashMap<String, String>;
