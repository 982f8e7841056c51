mod routes;

use kv_log_macro as log;
use switchyard::RouteLookup;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Per-request state threaded through middleware and handlers.
#[derive(Debug, Default)]
pub struct Exchange {
    pub token: Option<String>,
    pub status: u16,
    pub body: String,
}

impl Exchange {
    fn with_token(token: &str) -> Self {
        Exchange {
            token: Some(token.to_string()),
            ..Default::default()
        }
    }

    pub fn respond(&mut self, status: u16, body: impl Into<String>) {
        self.status = status;
        self.body = body.into();
    }
}

fn main() -> Result<(), BoxError> {
    femme::start();

    let router = routes::build()?;
    log::info!("Router ready", { routes: router.route_count() });
    println!("{}", serde_json::to_string_pretty(&router.routes())?);

    let requests = [
        ("GET", "/test", Exchange::default()),
        ("GET", "/api/users", Exchange::default()),
        ("GET", "/api/users/42", Exchange::default()),
        ("DELETE", "/api/users/42", Exchange::default()),
        ("PUT", "/api/users/42", Exchange::default()),
        ("GET", "/admin/stats", Exchange::default()),
        ("GET", "/admin/stats", Exchange::with_token("letmein")),
        ("GET", "/nowhere", Exchange::default()),
    ];

    for (method, path, mut exchange) in requests {
        match router.lookup(method, path) {
            RouteLookup::Match { endpoint, params } => {
                endpoint.call(&params, &mut exchange);
                log::info!("Handled request", {
                    method: method,
                    path: path,
                    status: exchange.status
                });
                println!("{} {} -> {} {}", method, path, exchange.status, exchange.body);
            }
            RouteLookup::MethodNotAllowed { allowed, .. } => {
                let allowed: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                println!("{} {} -> 405 (allowed: {})", method, path, allowed.join(", "));
            }
            RouteLookup::NotFound => {
                log::error!("No route found", { method: method, path: path });
                println!("Handler not found!");
            }
        }
    }

    Ok(())
}
