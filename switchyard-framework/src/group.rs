use std::sync::Arc;

use crate::{
    error::Result,
    method::Method,
    middleware::{Middleware, Next},
    path,
    router::Router,
    Params,
};

/// Registration context of a group: its path prefix and its own middleware.
pub(crate) struct Scope<E> {
    pub(crate) base_path: String,
    pub(crate) middleware: Vec<Middleware<E>>,
}

impl<E> Scope<E> {
    pub(crate) fn root() -> Self {
        Scope {
            base_path: "/".to_string(),
            middleware: Vec::new(),
        }
    }

    /// A scope under `base_path`. Middleware is not inherited.
    pub(crate) fn nested(&self, base_path: &str) -> Self {
        Scope {
            base_path: path::join([self.base_path.as_str(), base_path]),
            middleware: Vec::new(),
        }
    }
}

/// Registers routes on a [`Router`] under a shared prefix.
///
/// Middleware added with [`Group::use_middleware`] applies to routes
/// registered through this group afterwards, but not to nested groups, which
/// start with an empty list of their own.
pub struct Group<'r, E> {
    router: &'r mut Router<E>,
    scope: Scope<E>,
}

impl<'r, E> Group<'r, E> {
    pub(crate) fn new(router: &'r mut Router<E>, scope: Scope<E>) -> Self {
        Group { router, scope }
    }

    pub fn base_path(&self) -> &str {
        &self.scope.base_path
    }

    pub fn use_middleware<M>(&mut self, middleware: M)
    where
        M: Fn(&Params, &mut E, Next<'_, E>) + Send + Sync + 'static,
    {
        self.scope.middleware.push(Arc::new(middleware));
    }

    pub fn add_route<H>(
        &mut self,
        method: impl Into<Method>,
        path: &str,
        handler: H,
    ) -> Result<()>
    where
        H: Fn(&Params, &mut E) + Send + Sync + 'static,
    {
        self.router.insert(&self.scope, method.into(), path, Arc::new(handler))
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

    pub fn group<F>(&mut self, base_path: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Group<'_, E>) -> Result<()>,
    {
        let scope = self.scope.nested(base_path);
        f(&mut Group::new(&mut *self.router, scope))
    }

    pub fn mount(&mut self, base_path: &str, other: &Router<E>) -> Result<()> {
        self.router.mount_scoped(&self.scope, base_path, other)
    }
}
