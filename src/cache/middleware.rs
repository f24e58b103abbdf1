//! Response cache middleware.
//!
//! Serves JSON bodies of GET routes from the key-value store and writes
//! produced bodies back on a miss.

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

use super::{codec, CacheAside, MAX_CACHED_BODY_BYTES};

/// Derives the cache key for a request: path and query, verbatim.
///
/// No normalization happens, so `?a=1&b=2` and `?b=2&a=1` are distinct keys.
pub fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Middleware for cache-aside response caching.
///
/// On a hit the downstream handler is not invoked at all, so its side
/// effects are skipped. Only 200 responses with a JSON body of at most
/// [`MAX_CACHED_BODY_BYTES`] are stored; anything else is passed through
/// untouched. Hits serve the stored bytes exactly as the handler produced them.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn cache_aside_layer(
    State(cache): State<CacheAside>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(request.uri());

    if let Some(body) = cache.lookup_json(&key).await {
        debug!(key = %key, outcome = "hit", "serving cached response");
        return json_response(body);
    }

    debug!(key = %key, outcome = "miss", "cache miss, executing handler");
    let response = next.run(request).await;

    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    if body.size_hint().lower() > MAX_CACHED_BODY_BYTES as u64 {
        debug!(key = %key, "response body too large to cache, streaming through");
        return Response::from_parts(parts, body);
    }

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "failed to collect response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if bytes.len() > MAX_CACHED_BODY_BYTES {
        debug!(key = %key, len = bytes.len(), "response body too large to cache");
    } else {
        match codec::json_text(&bytes) {
            Ok(text) => cache.populate_json(&key, text).await,
            Err(e) => warn!(key = %key, error = %e, "response body is not JSON, not caching"),
        }
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Builds a 200 JSON response from cached text.
fn json_response(body: String) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}
