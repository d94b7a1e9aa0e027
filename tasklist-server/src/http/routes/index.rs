//! Root status and environment debug endpoints
//!
//! Neither touches the database.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{redact_connection_string, CONNECTION_ENV_VARS};
use crate::state::AppState;

/// Prefixes of environment keys worth listing on the debug endpoint
const DEBUG_ENV_PREFIXES: [&str; 3] = ["VERCEL", "DATABASE", "POSTGRES"];

/// Debug endpoint response
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    /// Connection variables, redacted, `null` when unset
    pub connection: Value,
    pub env_keys: Vec<String>,
}

/// GET /
async fn index() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "tasklist API running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /debug
async fn debug_env() -> Json<DebugResponse> {
    let connection = CONNECTION_ENV_VARS
        .iter()
        .map(|name| {
            let value = std::env::var(name)
                .ok()
                .map(|raw| redact_connection_string(&raw));
            (name.to_string(), json!(value))
        })
        .collect::<serde_json::Map<_, _>>();

    let mut env_keys: Vec<String> = std::env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| DEBUG_ENV_PREFIXES.iter().any(|p| key.starts_with(p)))
        .collect();
    env_keys.sort();

    Json(DebugResponse {
        connection: Value::Object(connection),
        env_keys,
    })
}

/// Root routes; the debug endpoint is only mounted when asked for.
pub fn router(debug_routes: bool) -> Router<AppState> {
    let router = Router::new().route("/", get(index));

    if debug_routes {
        router.route("/debug", get(debug_env))
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_returns_ok() {
        let Json(body) = index().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn debug_lists_connection_variables() {
        let Json(body) = debug_env().await;
        let connection = body.connection.as_object().unwrap();

        assert!(connection.contains_key("DATABASE_URL"));
        assert!(connection.contains_key("POSTGRES_URL"));
        assert!(body
            .env_keys
            .iter()
            .all(|k| DEBUG_ENV_PREFIXES.iter().any(|p| k.starts_with(p))));
    }
}
