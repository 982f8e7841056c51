use std::fmt;
use std::sync::Arc;

use kv_log_macro as log;

use crate::{
    config::RouterConfig,
    error::{Result, RouteError},
    group::{Group, Scope},
    lookup::{RouteInfo, RouteLookup},
    method::Method,
    middleware::{Endpoint, Handler, Middleware, Next},
    node::Node,
    path, Params,
};

/// Routes requests by method and path through a segment trie.
///
/// Registration needs `&mut self`; lookups only need `&self`, so a router can
/// be built once at startup and then shared between readers.
pub struct Router<E> {
    root: Node<E>,
    global_middleware: Vec<Middleware<E>>,
    config: RouterConfig,
}

impl<E> Router<E> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Router {
            root: Node::new(),
            global_middleware: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register `handler` for `method` at `path`, replacing any handler
    /// already registered for the same method and path.
    pub fn add_route<H>(
        &mut self,
        method: impl Into<Method>,
        path: &str,
        handler: H,
    ) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.insert(&Scope::root(), method.into(), path, Arc::new(handler))
    }

    pub fn get<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.add_route(Method::Get, path, handler)
    }

    pub fn post<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.add_route(Method::Post, path, handler)
    }

    pub fn put<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.add_route(Method::Put, path, handler)
    }

    pub fn delete<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.add_route(Method::Delete, path, handler)
    }

    pub fn patch<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.add_route(Method::Patch, path, handler)
    }

    /// Add middleware to every route registered from now on. Routes that
    /// already exist keep the chain they were registered with.
    pub fn use_middleware<M>(&mut self, middleware: M)
    where
        M: Fn(&Params, &mut E, Next<'_, E>) + Send + Sync + 'static,
    {
        self.global_middleware.push(Arc::new(middleware));
    }

    /// Register routes under `base_path` with their own middleware list.
    pub fn group<F>(&mut self, base_path: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Group<'_, E>) -> Result<()>,
    {
        let scope = Scope::root().nested(base_path);
        f(&mut Group::new(self, scope))
    }

    /// Copy every route of `other` under `base_path`. This router's
    /// middleware runs before whatever `other` already wrapped the routes in.
    pub fn mount(&mut self, base_path: &str, other: &Router<E>) -> Result<()> {
        self.mount_scoped(&Scope::root(), base_path, other)
    }

    pub(crate) fn insert(
        &mut self,
        scope: &Scope<E>,
        method: Method,
        route: &str,
        handler: Handler<E>,
    ) -> Result<()> {
        let middleware = self.middleware_for(scope);
        let full_path = path::join([scope.base_path.as_str(), route]);

        self.insert_endpoint(method, &full_path, Endpoint::new(middleware, handler))
    }

    pub(crate) fn mount_scoped(
        &mut self,
        scope: &Scope<E>,
        base_path: &str,
        other: &Router<E>,
    ) -> Result<()> {
        let outer = self.middleware_for(scope);
        let prefix = path::join([scope.base_path.as_str(), base_path]);
        let routes = other.routes();

        log::debug!("Mounting router", {
            prefix: prefix.as_str(),
            routes: routes.len()
        });

        for route in routes {
            let full_path = path::join([prefix.as_str(), route.path.as_str()]);
            self.insert_endpoint(route.method, &full_path, route.endpoint.layered(&outer))?;
        }

        Ok(())
    }

    /// Global middleware followed by the scope's, as of right now.
    fn middleware_for(&self, scope: &Scope<E>) -> Vec<Middleware<E>> {
        self.global_middleware
            .iter()
            .chain(scope.middleware.iter())
            .cloned()
            .collect()
    }

    fn insert_endpoint(
        &mut self,
        method: Method,
        full_path: &str,
        endpoint: Endpoint<E>,
    ) -> Result<()> {
        let method = method.canonical();
        let segments = path::segments(full_path);

        if let Err(err) = self.validate(full_path, &segments) {
            log::warn!("Rejected route", {
                method: method,
                path: full_path,
                error: err.to_string().as_str()
            });
            return Err(err);
        }

        let mut node = &mut self.root;
        for segment in &segments {
            node = match path::param_name(segment) {
                Some(name) => node.param_child_or_insert(name),
                None => node.child_or_insert(segment),
            };
        }

        node.is_end = true;
        if node.handlers.insert(method.clone(), endpoint).is_some() {
            log::warn!("Replaced route handler", {
                method: method,
                path: full_path
            });
        } else {
            log::debug!("Registered route", {
                method: method,
                path: full_path
            });
        }

        Ok(())
    }

    /// Check a route against the limits and the existing parameter edges
    /// without touching the trie. Insertion relies on this having rejected
    /// every parameter conflict.
    fn validate(&self, full_path: &str, segments: &[&str]) -> Result<()> {
        if segments.len() > self.config.max_segments {
            return Err(RouteError::TooManySegments {
                path: full_path.to_string(),
                count: segments.len(),
                max: self.config.max_segments,
            });
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut node = Some(&self.root);

        for segment in segments {
            match path::param_name(segment) {
                Some("") => {
                    return Err(RouteError::EmptyParameterName {
                        path: full_path.to_string(),
                    })
                }
                Some(name) => {
                    if seen.contains(&name) {
                        return Err(RouteError::DuplicateParameter {
                            path: full_path.to_string(),
                            name: name.to_string(),
                        });
                    }
                    seen.push(name);

                    if let Some(existing) = node.and_then(Node::param_name) {
                        if existing != name {
                            return Err(RouteError::ParameterConflict {
                                path: full_path.to_string(),
                                existing: existing.to_string(),
                                requested: name.to_string(),
                            });
                        }
                    }

                    node = node.and_then(Node::param).map(|edge| edge.node.as_ref());
                }
                None => node = node.and_then(|n| n.child(segment)),
            }
        }

        Ok(())
    }

    /// Resolve `path` and return the handler registered for `method`, along
    /// with the parameters bound on the way. The parameters are returned even
    /// when nothing matched.
    pub fn find_handler(&self, method: &str, path: &str) -> (Option<&Endpoint<E>>, Params) {
        let (node, params) = self.resolve(path);
        let endpoint = node
            .filter(|node| node.is_end)
            .and_then(|node| node.handlers.get(&Method::from(method)));

        (endpoint, params)
    }

    /// Like [`find_handler`](Self::find_handler), but tells a path that
    /// exists under other methods apart from one that does not exist.
    pub fn lookup(&self, method: &str, path: &str) -> RouteLookup<'_, E> {
        let (node, params) = self.resolve(path);

        let Some(node) = node.filter(|node| node.is_end) else {
            return RouteLookup::NotFound;
        };

        match node.handlers.get(&Method::from(method)) {
            Some(endpoint) => RouteLookup::Match { endpoint, params },
            None => RouteLookup::MethodNotAllowed {
                allowed: sorted_methods(node),
                params,
            },
        }
    }

    /// Methods registered at `path`, in listing order.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        match self.resolve(path) {
            (Some(node), _) if node.is_end => sorted_methods(node),
            _ => Vec::new(),
        }
    }

    /// Look up and invoke the handler. Returns `false` if nothing matched.
    pub fn dispatch(&self, method: &str, path: &str, env: &mut E) -> bool {
        match self.find_handler(method, path) {
            (Some(endpoint), params) => {
                log::trace!("Dispatching", { method: method, path: path });
                endpoint.call(&params, env);
                true
            }
            (None, _) => {
                log::debug!("No route found", { method: method, path: path });
                false
            }
        }
    }

    fn resolve(&self, path: &str) -> (Option<&Node<E>>, Params) {
        let normalized;
        let path = if self.config.normalize_lookups {
            normalized = path::normalize(path);
            normalized.as_str()
        } else {
            path
        };

        let segments = path::segments(path);
        let mut params = Params::new();

        if segments.len() > self.config.max_segments {
            return (None, params);
        }

        let mut node = &self.root;
        for segment in segments {
            if let Some(child) = node.child(segment) {
                node = child;
            } else if let Some(edge) = node.param() {
                params.insert(edge.name.clone(), segment.to_string());
                node = edge.node.as_ref();
            } else {
                return (None, params);
            }
        }

        (Some(node), params)
    }

    /// Every registered route, sorted by method and then path.
    pub fn routes(&self) -> Vec<RouteInfo<'_, E>> {
        let mut routes = Vec::new();
        collect_routes(&self.root, &mut Vec::new(), &mut routes);
        routes.sort_by(|a, b| a.method.cmp(&b.method).then_with(|| a.path.cmp(&b.path)));
        routes
    }

    /// Number of registered method and path pairs.
    pub fn route_count(&self) -> usize {
        count_routes(&self.root)
    }
}

fn sorted_methods<E>(node: &Node<E>) -> Vec<Method> {
    let mut methods: Vec<Method> = node.handlers.keys().cloned().collect();
    methods.sort();
    methods
}

fn collect_routes<'a, E>(
    node: &'a Node<E>,
    prefix: &mut Vec<String>,
    out: &mut Vec<RouteInfo<'a, E>>,
) {
    if node.is_end {
        let path = format!("/{}", prefix.join("/"));
        for (method, endpoint) in &node.handlers {
            out.push(RouteInfo {
                method: method.clone(),
                path: path.clone(),
                endpoint,
            });
        }
    }

    for (segment, child) in &node.children {
        prefix.push(segment.clone());
        collect_routes(child, prefix, out);
        prefix.pop();
    }

    if let Some(edge) = node.param() {
        prefix.push(format!("{}{}", path::PARAM_SIGIL, edge.name));
        collect_routes(&edge.node, prefix, out);
        prefix.pop();
    }
}

fn count_routes<E>(node: &Node<E>) -> usize {
    let below: usize = node.children.values().map(count_routes).sum();
    let param = node.param().map_or(0, |edge| count_routes(&edge.node));
    node.handlers.len() + below + param
}

impl<E> Default for Router<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Router<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.route_count())
            .field("global_middleware", &self.global_middleware.len())
            .field("config", &self.config)
            .finish()
    }
}
