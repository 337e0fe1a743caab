//! Request-scoped Razorpay credentials for the HTTP transport
//!
//! Clients authenticate every request with their own key pair:
//!
//! ```bash
//! curl -X POST http://localhost:8090/mcp \
//!   -H "Authorization: Basic $(printf 'rzp_test_xxx:secret' | base64)" \
//!   -d '{"jsonrpc":"2.0","id":1,"method":"tools/list"}'
//! ```

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::config::Credentials;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,
    #[error("unsupported authorization scheme, expected Basic")]
    UnsupportedScheme,
    #[error("malformed Basic credentials")]
    Malformed,
}

/// Read `Authorization: Basic base64(key_id:key_secret)`.
///
/// Returns `Ok(None)` when the header is absent.
pub fn credentials_from_headers(headers: &HeaderMap) -> Result<Option<Credentials>, AuthError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let header = header.to_str().map_err(|_| AuthError::Malformed)?;
    parse_basic(header).map(Some)
}

fn parse_basic(header: &str) -> Result<Credentials, AuthError> {
    let (scheme, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::UnsupportedScheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::UnsupportedScheme);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Malformed)?;
    match decoded.split_once(':') {
        Some((key_id, key_secret)) if !key_id.is_empty() && !key_secret.is_empty() => {
            Ok(Credentials::new(key_id, key_secret))
        }
        _ => Err(AuthError::Malformed),
    }
}
