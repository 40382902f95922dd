use crate::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use subtle::ConstantTimeEq;

/// Header carrying the shared function key.
pub const FUNCTION_KEY_HEADER: &str = "x-functions-key";

/// Shared-secret gate in front of the API routes.
///
/// With no key configured the gate is open. Otherwise a request must present the key
/// either in the `x-functions-key` header or in the `code` query parameter. Install it
/// with `route_layer` on the routes to protect; health endpoints stay outside it.
#[derive(Clone, Debug, Default)]
pub struct FunctionKeyConfig {
    pub key: Option<Secret<String>>,
}

impl FunctionKeyConfig {
    pub fn new(key: Option<Secret<String>>) -> Self {
        Self { key }
    }
}

#[derive(Deserialize)]
struct CodeQuery {
    code: Option<String>,
}

pub async fn function_key_middleware(
    State(config): State<FunctionKeyConfig>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = config.key.as_ref() else {
        return Ok(next.run(req).await);
    };

    let presented = extract_key(&req).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "Request rejected: missing function key");
        AppError::Unauthorized("Missing function key.".to_string())
    })?;

    if !keys_match(expected.expose_secret(), &presented) {
        tracing::warn!(path = %req.uri().path(), "Request rejected: invalid function key");
        return Err(AppError::Unauthorized("Invalid function key.".to_string()));
    }

    Ok(next.run(req).await)
}

fn extract_key(req: &Request) -> Option<String> {
    if let Some(value) = req
        .headers()
        .get(FUNCTION_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(value.to_string());
    }

    req.uri()
        .query()
        .and_then(|q| serde_urlencoded::from_str::<CodeQuery>(q).ok())
        .and_then(|q| q.code)
}

fn keys_match(expected: &str, presented: &str) -> bool {
    let expected = expected.as_bytes();
    let presented = presented.as_bytes();

    if expected.len() != presented.len() {
        return false;
    }

    expected.ct_eq(presented).into()
}
