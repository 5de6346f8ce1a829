//! Response security headers and the per-request CSP nonce.

use crate::web::state::AppState;
use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::header::CONTENT_SECURITY_POLICY;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use std::convert::Infallible;
use uuid::Uuid;

pub const NONCE_HEADER: &str = "x-nonce";

/// Headers set on every response regardless of route.
pub const STATIC_HEADERS: [(&str, &str); 12] = [
    ("x-dns-prefetch-control", "on"),
    (
        "strict-transport-security",
        "max-age=63072000; includeSubDomains; preload",
    ),
    ("x-xss-protection", "1; mode=block"),
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("x-permitted-cross-domain-policies", "none"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=(), interest-cohort=()",
    ),
    ("access-control-allow-origin", "*"),
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
];

/// Policy for responses that carry no nonce.
pub const STATIC_CSP: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
style-src 'self' 'unsafe-inline'; \
img-src 'self' blob: data:; \
font-src 'self' data:; \
object-src 'none'; \
base-uri 'self'; \
form-action 'self'; \
frame-ancestors 'none'; \
block-all-mixed-content; \
upgrade-insecure-requests; \
connect-src 'self';";

/// Nonce attached to the request by [`security_headers`].
///
/// Extracting it never fails; requests exempt from the nonce policy yield
/// an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspNonce(pub String);

impl CspNonce {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CspNonce {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CspNonce>().cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SecurityPolicy {
    allow_eval: bool,
}

impl SecurityPolicy {
    /// `development` adds `'unsafe-eval'` to the page policy.
    pub fn new(development: bool) -> Self {
        Self {
            allow_eval: development,
        }
    }

    pub fn page_csp(&self, nonce: &str) -> String {
        let eval = if self.allow_eval { " 'unsafe-eval'" } else { "" };
        format!(
            "default-src 'self'; \
             script-src 'self' 'nonce-{nonce}'{eval}; \
             style-src 'self' 'unsafe-inline' https://us.i.posthog.com; \
             img-src 'self' blob: data:; \
             font-src 'self'; \
             connect-src 'self' https://us.i.posthog.com https://internal-j.posthog.com; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors 'none'; \
             upgrade-insecure-requests;"
        )
    }
}

/// Base64 of a random UUID string.
pub fn generate_nonce() -> String {
    BASE64_STANDARD.encode(Uuid::new_v4().to_string())
}

/// Static assets, the favicon and prefetches keep the fixed policy.
pub fn needs_nonce(path: &str, headers: &HeaderMap) -> bool {
    if path.starts_with("/static/") || path == "/favicon.ico" {
        return false;
    }
    let is_prefetch = headers.contains_key("next-router-prefetch")
        || headers
            .get("purpose")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("prefetch"));
    !is_prefetch
}

pub async fn security_headers(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let csp = if needs_nonce(request.uri().path(), request.headers()) {
        let nonce = generate_nonce();
        if let Ok(value) = HeaderValue::from_str(&nonce) {
            request.headers_mut().insert(NONCE_HEADER, value);
        }
        let csp = state.security().page_csp(&nonce);
        request.extensions_mut().insert(CspNonce(nonce));
        csp
    } else {
        STATIC_CSP.to_string()
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in STATIC_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!("Invalid Content-Security-Policy value: {}", e),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_is_base64_of_a_uuid() {
        let nonce = generate_nonce();
        let decoded = BASE64_STANDARD.decode(&nonce).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert!(Uuid::parse_str(&text).is_ok());
        assert_ne!(nonce, generate_nonce());
    }

    #[test]
    fn test_page_csp_carries_nonce() {
        let csp = SecurityPolicy::new(false).page_csp("abc123");
        assert!(csp.contains("script-src 'self' 'nonce-abc123';"));
        assert!(!csp.contains("unsafe-eval"));
        assert!(csp.contains("frame-ancestors 'none'"));
        assert!(csp.ends_with("upgrade-insecure-requests;"));
    }

    #[test]
    fn test_development_policy_allows_eval() {
        let csp = SecurityPolicy::new(true).page_csp("abc123");
        assert!(csp.contains("'nonce-abc123' 'unsafe-eval';"));
    }

    #[test]
    fn test_exempt_requests_skip_the_nonce() {
        let empty = HeaderMap::new();
        assert!(needs_nonce("/", &empty));
        assert!(needs_nonce("/career", &empty));
        assert!(!needs_nonce("/static/css/site.css", &empty));
        assert!(!needs_nonce("/favicon.ico", &empty));

        let mut prefetch = HeaderMap::new();
        prefetch.insert("purpose", HeaderValue::from_static("prefetch"));
        assert!(!needs_nonce("/career", &prefetch));

        let mut router_prefetch = HeaderMap::new();
        router_prefetch.insert("next-router-prefetch", HeaderValue::from_static("1"));
        assert!(!needs_nonce("/", &router_prefetch));
    }

    #[test]
    fn test_static_csp_values_are_valid_headers() {
        assert!(HeaderValue::from_str(STATIC_CSP).is_ok());
        for (name, value) in STATIC_HEADERS {
            assert_eq!(name, name.to_ascii_lowercase());
            assert!(HeaderValue::from_str(value).is_ok());
        }
    }
}
