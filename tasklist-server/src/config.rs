//! Connection-string resolution and normalization
//!
//! Hosting providers hand out Postgres URLs that the driver does not accept
//! as-is: a legacy `postgres://` scheme, provider-only query parameters, and
//! no explicit TLS mode. [`normalize_connection_string`] rewrites such a URL
//! into a canonical form. It is pure and idempotent.

use url::{form_urlencoded, Url};

use crate::error::ConfigError;

/// Environment variables checked for the connection string, first match wins.
pub const CONNECTION_ENV_VARS: [&str; 2] = ["DATABASE_URL", "POSTGRES_URL"];

const LEGACY_SCHEME: &str = "postgres";
const SCHEME: &str = "postgresql";

/// Provider-specific query parameters the driver misinterprets.
const STRIPPED_PARAMS: [&str; 3] = ["supa", "options", "schema"];

const SSL_MODE_KEY: &str = "sslmode";
const SSL_MODE_DEFAULT: &str = "require";

/// Pick the connection string from a variable lookup.
///
/// Checks [`CONNECTION_ENV_VARS`] in order. Empty or whitespace-only values
/// count as unset.
pub fn resolve_connection_string<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    CONNECTION_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .ok_or_else(|| ConfigError::MissingConnectionString {
            names: CONNECTION_ENV_VARS.join(", "),
        })
}

/// Pick the connection string from the process environment.
pub fn connection_string_from_env() -> Result<String, ConfigError> {
    resolve_connection_string(|name| std::env::var(name).ok())
}

/// Rewrite a raw connection string into the form the driver expects.
///
/// # Rules
/// - a `postgres` scheme (any case) becomes `postgresql`
/// - `supa`, `options` and `schema` query parameters are dropped
/// - `sslmode=require` is appended when no `sslmode` is present; a blank
///   `sslmode` counts as absent
/// - remaining parameters keep their order
///
/// # Example
/// ```
/// use tasklist_server::config::normalize_connection_string;
///
/// let url = normalize_connection_string("postgres://u:p@db:5432/app").unwrap();
/// assert_eq!(url, "postgresql://u:p@db:5432/app?sslmode=require");
/// ```
pub fn normalize_connection_string(raw: &str) -> Result<String, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidConnectionString {
        reason: e.to_string(),
    })?;

    // Url::parse lowercases the scheme, so any spelling of the legacy one lands here.
    if url.scheme() == LEGACY_SCHEME {
        url.set_scheme(SCHEME)
            .map_err(|()| ConfigError::InvalidConnectionString {
                reason: format!("cannot rewrite scheme '{}'", LEGACY_SCHEME),
            })?;
    }

    if url.scheme() != SCHEME {
        return Err(ConfigError::InvalidConnectionString {
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    // A blank sslmode is treated as absent and replaced with the default.
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !STRIPPED_PARAMS.contains(&key.as_ref()))
        .filter(|(key, value)| !(key == SSL_MODE_KEY && value.trim().is_empty()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if !params.iter().any(|(key, _)| key == SSL_MODE_KEY) {
        params.push((SSL_MODE_KEY.to_owned(), SSL_MODE_DEFAULT.to_owned()));
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&params)
        .finish();
    url.set_query(Some(&query));

    Ok(url.into())
}

/// Replace the password in a connection string with `***`.
///
/// Anything that does not parse as a URL is hidden entirely.
pub fn redact_connection_string(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(mut url) => {
            if url.password().is_some() {
                // Only fails for URLs without a host, which carry no password.
                let _ = url.set_password(Some("***"));
            }
            url.into()
        }
        Err(_) => "<unparseable>".to_owned(),
    }
}
