//! Common test utilities shared across integration tests

use switchyard::{Next, Params, Router};

/// Environment used by the tests: each layer appends what it did.
pub type Trace = Vec<String>;

/// Handler that records `name` when it runs
pub fn record(name: &'static str) -> impl Fn(&Params, &mut Trace) + Send + Sync + 'static {
    move |_params, trace| trace.push(name.to_string())
}

/// Handler that records the value of parameter `key`
#[allow(dead_code)]
pub fn echo(key: &'static str) -> impl Fn(&Params, &mut Trace) + Send + Sync + 'static {
    move |params, trace| {
        let value = params.get(key).cloned().unwrap_or_default();
        trace.push(format!("{}={}", key, value));
    }
}

/// Middleware that records `name` and continues
#[allow(dead_code)]
pub fn tag(
    name: &'static str,
) -> impl Fn(&Params, &mut Trace, Next<'_, Trace>) + Send + Sync + 'static {
    move |params, trace, next| {
        trace.push(name.to_string());
        next.run(params, trace);
    }
}

/// Middleware that records `name` and stops the chain
#[allow(dead_code)]
pub fn halt(
    name: &'static str,
) -> impl Fn(&Params, &mut Trace, Next<'_, Trace>) + Send + Sync + 'static {
    move |_params, trace, _next| trace.push(name.to_string())
}

/// Dispatch a request and return what the chain recorded
#[allow(dead_code)]
pub fn run(router: &Router<Trace>, method: &str, path: &str) -> Option<Trace> {
    let mut trace = Trace::new();
    router.dispatch(method, path, &mut trace).then_some(trace)
}
