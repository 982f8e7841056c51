//! Middleware Tests
//!
//! These tests verify middleware composition:
//! - Global middleware runs before group middleware, which runs before the handler
//! - A middleware that does not continue stops the chain
//! - Chains are frozen when a route is registered
//! - Group middleware stays inside its group

mod common;

use common::{echo, halt, record, run, tag, Trace};
use switchyard::Router;

fn trace(items: &[&str]) -> Option<Trace> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_global_then_group_then_handler() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(tag("A"));
    router
        .group("/api", |api| {
            api.use_middleware(tag("B"));
            api.get("/ping", record("H"))
        })
        .unwrap();

    assert_eq!(run(&router, "GET", "/api/ping"), trace(&["A", "B", "H"]));
}

#[test]
fn test_middleware_runs_in_registration_order() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(tag("A1"));
    router.use_middleware(tag("A2"));
    router
        .group("/g", |g| {
            g.use_middleware(tag("B1"));
            g.use_middleware(tag("B2"));
            g.get("/x", record("H"))
        })
        .unwrap();

    assert_eq!(
        run(&router, "GET", "/g/x"),
        trace(&["A1", "A2", "B1", "B2", "H"])
    );
}

#[test]
fn test_short_circuit_prevents_handler() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(tag("A"));
    router
        .group("/admin", |admin| {
            admin.use_middleware(halt("deny"));
            admin.use_middleware(tag("never"));
            admin.get("/panel", record("H"))
        })
        .unwrap();

    assert_eq!(run(&router, "GET", "/admin/panel"), trace(&["A", "deny"]));
}

#[test]
fn test_middleware_sees_parameters() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(|params, trace: &mut Trace, next| {
        trace.push(format!("mw:{}", params.len()));
        next.run(params, trace);
    });
    router.get("/orgs/:org/repos/:repo", echo("repo")).unwrap();

    assert_eq!(
        run(&router, "GET", "/orgs/acme/repos/anvil"),
        trace(&["mw:2", "repo=anvil"])
    );
}

#[test]
fn test_chain_is_frozen_at_registration() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(tag("early"));
    router.get("/before", record("H")).unwrap();
    router.use_middleware(tag("late"));
    router.get("/after", record("H")).unwrap();

    assert_eq!(run(&router, "GET", "/before"), trace(&["early", "H"]));
    assert_eq!(run(&router, "GET", "/after"), trace(&["early", "late", "H"]));

    let (endpoint, _) = router.find_handler("GET", "/before");
    assert_eq!(endpoint.map(|e| e.len()), Some(1));
}

#[test]
fn test_group_middleware_added_after_route_does_not_apply() {
    let mut router: Router<Trace> = Router::new();
    router
        .group("/g", |g| {
            g.get("/first", record("H"))?;
            g.use_middleware(tag("B"));
            g.get("/second", record("H"))
        })
        .unwrap();

    assert_eq!(run(&router, "GET", "/g/first"), trace(&["H"]));
    assert_eq!(run(&router, "GET", "/g/second"), trace(&["B", "H"]));
}

#[test]
fn test_nested_group_starts_without_outer_middleware() {
    let mut router: Router<Trace> = Router::new();
    router
        .group("/outer", |outer| {
            outer.use_middleware(tag("outer"));
            outer.get("/here", record("H"))?;

            outer.group("/inner", |inner| {
                inner.use_middleware(tag("inner"));
                inner.get("/here", record("H"))
            })?;

            outer.get("/again", record("H"))
        })
        .unwrap();

    assert_eq!(run(&router, "GET", "/outer/here"), trace(&["outer", "H"]));
    assert_eq!(
        run(&router, "GET", "/outer/inner/here"),
        trace(&["inner", "H"])
    );
    // Inner middleware does not leak back into the outer group
    assert_eq!(run(&router, "GET", "/outer/again"), trace(&["outer", "H"]));
}

#[test]
fn test_sibling_groups_are_isolated() {
    let mut router: Router<Trace> = Router::new();
    router
        .group("/left", |left| {
            left.use_middleware(tag("left"));
            left.get("/x", record("H"))
        })
        .unwrap();
    router
        .group("/right", |right| right.get("/x", record("H")))
        .unwrap();
    router.get("/top", record("H")).unwrap();

    assert_eq!(run(&router, "GET", "/left/x"), trace(&["left", "H"]));
    assert_eq!(run(&router, "GET", "/right/x"), trace(&["H"]));
    assert_eq!(run(&router, "GET", "/top"), trace(&["H"]));
}

#[test]
fn test_failed_group_leaves_router_usable() {
    let mut router: Router<Trace> = Router::new();
    router.get("/users/:id", record("user")).unwrap();

    let result = router.group("/users", |users| {
        users.use_middleware(tag("scoped"));
        users.get("/:name/avatar", record("avatar"))?;
        users.get("/unreachable", record("never"))
    });
    assert!(result.is_err());

    // Nothing from the failed group was registered and no scope leaked
    assert_eq!(router.route_count(), 1);
    assert!(router.find_handler("GET", "/users/unreachable").0.is_some());
    assert_eq!(run(&router, "GET", "/users/unreachable"), trace(&["user"]));
    router.get("/health", record("ok")).unwrap();
    assert_eq!(run(&router, "GET", "/health"), trace(&["ok"]));
}

#[test]
fn test_unmatched_request_runs_nothing() {
    let mut router: Router<Trace> = Router::new();
    router.use_middleware(tag("A"));
    router.get("/x", record("H")).unwrap();

    let mut seen = Trace::new();
    assert!(!router.dispatch("GET", "/y", &mut seen));
    assert!(!router.dispatch("POST", "/x", &mut seen));
    assert!(seen.is_empty());
}
