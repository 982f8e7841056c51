//! Handlers, middleware and the frozen chains that join them.
//!
//! A route's [`Endpoint`] is built once, when the route is registered: it
//! holds the middleware that were in effect at that moment (global first,
//! then group) and the terminal handler. Calling the endpoint walks that list
//! with a [`Next`] continuation, so global middleware runs first, group
//! middleware second and the handler last.

use std::fmt;
use std::sync::Arc;

use crate::Params;

/// Terminal request handler.
pub type Handler<E> = Arc<dyn Fn(&Params, &mut E) + Send + Sync>;

/// A layer between the request and the handler. It must call
/// [`Next::run`] to continue; dropping `next` stops the chain.
pub type Middleware<E> = Arc<dyn Fn(&Params, &mut E, Next<'_, E>) + Send + Sync>;

/// A handler together with the middleware wrapped around it.
pub struct Endpoint<E> {
    middleware: Arc<[Middleware<E>]>,
    handler: Handler<E>,
}

impl<E> Endpoint<E> {
    pub fn new(middleware: Vec<Middleware<E>>, handler: Handler<E>) -> Self {
        Endpoint {
            middleware: middleware.into(),
            handler,
        }
    }

    /// Run the chain from the outermost middleware.
    pub fn call(&self, params: &Params, env: &mut E) {
        Next {
            endpoint: self,
            index: 0,
        }
        .run(params, env)
    }

    /// Number of middleware layers around the handler.
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Wrap this endpoint in `outer`, which runs before the existing layers.
    pub fn layered(&self, outer: &[Middleware<E>]) -> Self {
        if outer.is_empty() {
            return self.clone();
        }

        let middleware = outer
            .iter()
            .chain(self.middleware.iter())
            .cloned()
            .collect::<Vec<_>>();

        Endpoint::new(middleware, self.handler.clone())
    }
}

impl<E> Clone for Endpoint<E> {
    fn clone(&self) -> Self {
        Endpoint {
            middleware: self.middleware.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<E> fmt::Debug for Endpoint<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

/// The rest of a chain, handed to each middleware.
pub struct Next<'a, E> {
    endpoint: &'a Endpoint<E>,
    index: usize,
}

impl<E> Next<'_, E> {
    /// Continue to the next middleware, or the handler if none remain.
    pub fn run(self, params: &Params, env: &mut E) {
        match self.endpoint.middleware.get(self.index) {
            Some(middleware) => middleware(
                params,
                env,
                Next {
                    endpoint: self.endpoint,
                    index: self.index + 1,
                },
            ),
            None => (self.endpoint.handler)(params, env),
        }
    }

    /// Layers still to run, not counting the handler.
    pub fn remaining(&self) -> usize {
        self.endpoint.middleware.len() - self.index
    }
}
