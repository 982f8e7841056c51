use kv_log_macro as log;
use switchyard::{Next, Params, Result, Router};

use crate::Exchange;

const ID_KEY: &str = "id";
const ADMIN_TOKEN: &str = "letmein";

pub fn build() -> Result<Router<Exchange>> {
    let mut router = Router::new();
    router.use_middleware(access_log);

    router.get("/test", hello)?;

    router.group("/admin", |admin| {
        admin.use_middleware(require_token);
        admin.get("/stats", stats)
    })?;

    router.mount("/api", &api()?)?;

    Ok(router)
}

/// Routes served under `/api`, built as their own router and mounted.
fn api() -> Result<Router<Exchange>> {
    let mut api = Router::new();

    api.group("/users", |users| {
        users.get("/", list_users)?;
        users.get("/:id", show_user)?;
        users.delete("/:id", delete_user)
    })?;

    Ok(api)
}

fn access_log(params: &Params, exchange: &mut Exchange, next: Next<'_, Exchange>) {
    log::debug!("Request started", { params: params.len() });
    next.run(params, exchange);
    log::debug!("Request finished", { status: exchange.status });
}

fn require_token(params: &Params, exchange: &mut Exchange, next: Next<'_, Exchange>) {
    if exchange.token.as_deref() == Some(ADMIN_TOKEN) {
        next.run(params, exchange);
    } else {
        log::warn!("Rejected unauthenticated request");
        exchange.respond(401, "Unauthorized");
    }
}

fn hello(_params: &Params, exchange: &mut Exchange) {
    exchange.respond(200, "Hello from the test route");
}

fn stats(_params: &Params, exchange: &mut Exchange) {
    exchange.respond(200, "uptime: 3d");
}

fn list_users(_params: &Params, exchange: &mut Exchange) {
    exchange.respond(200, "ada, grace, linus");
}

fn show_user(params: &Params, exchange: &mut Exchange) {
    match params.get(ID_KEY) {
        Some(id) => exchange.respond(200, format!("User {}", id)),
        None => exchange.respond(400, "Missing user id"),
    }
}

fn delete_user(params: &Params, exchange: &mut Exchange) {
    log::info!("Deleting user", { id: params.get(ID_KEY).map_or("", String::as_str) });
    exchange.respond(204, "");
}
