//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Validate the request path and extract the page title
//! - Read the submitted page body from urlencoded or multipart form data
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The title extractor re-checks the whole raw path against the route
//!   pattern; axum's `{title}` segment alone would accept any characters
//! - Form values are decoded to raw bytes; invalid UTF-8 is stored as sent
//! - A body of any other content type (or none) is ignored, leaving only
//!   the query string as a source for the field

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{header, request::Parts, HeaderMap, HeaderName},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::error::WikiError;
use crate::http::server::AppState;
use crate::routing::Title;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer assigning an `x-request-id` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID, or `"unknown"` if none was set.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// A title taken from a path that matched `/(view|edit|save)/<title>`.
#[derive(Debug, Clone)]
pub struct ValidTitle(pub Title);

impl FromRequestParts<AppState> for ValidTitle {
    type Rejection = WikiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        match state.router.match_path(path) {
            Some(m) => {
                tracing::debug!(
                    request_id = %request_id(&parts.headers),
                    route = %m.route,
                    title = %m.title,
                    "Route matched"
                );
                Ok(ValidTitle(m.title))
            }
            None => {
                tracing::debug!(
                    request_id = %request_id(&parts.headers),
                    path = %path,
                    "Invalid page title"
                );
                Err(WikiError::NotFound(path.to_string()))
            }
        }
    }
}

/// Form field holding the page text.
pub const BODY_FIELD: &str = "body";

/// The `body` form field of a save request, as raw bytes.
///
/// Looked up in the request body first (urlencoded or multipart), then in
/// the query string. Missing everywhere means an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBody(pub Vec<u8>);

impl<S> FromRequest<S> for PageBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().map(str::to_owned);
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            });

        let from_body = match content_type.as_deref() {
            Some("application/x-www-form-urlencoded") => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                form_value(&bytes, BODY_FIELD)
            }
            Some("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                multipart_value(multipart, BODY_FIELD).await?
            }
            _ => None,
        };

        let value = from_body
            .or_else(|| query.and_then(|q| form_value(q.as_bytes(), BODY_FIELD)))
            .unwrap_or_default();
        Ok(PageBody(value))
    }
}

async fn multipart_value(
    mut multipart: Multipart,
    key: &str,
) -> Result<Option<Vec<u8>>, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        if field.name() == Some(key) {
            let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
            return Ok(Some(bytes.to_vec()));
        }
    }
    Ok(None)
}

/// First value of `key` in `application/x-www-form-urlencoded` input.
pub fn form_value(input: &[u8], key: &str) -> Option<Vec<u8>> {
    input
        .split(|b| *b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|b| *b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (form_decode(name) == key.as_bytes()).then(|| form_decode(value))
        })
}

fn form_decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
