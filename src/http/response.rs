//! Response construction.
//!
//! # Responsibilities
//! - Map `WikiError` kinds to HTTP status codes
//! - Build redirects, HTML pages and plain-text error bodies
//!
//! # Design Decisions
//! - NotFound never exposes its cause; the body is always `404 page not found`
//! - Io and Render errors expose their message with a 500
//! - Redirects use 302 Found

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::error::WikiError;

const NOT_FOUND_BODY: &str = "404 page not found\n";

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound(_) => not_found(),
            WikiError::Io { .. } | WikiError::Render(_) => {
                tracing::error!(error = %self, "Request failed");
                plain_error(StatusCode::INTERNAL_SERVER_ERROR, &self.to_string())
            }
        }
    }
}

/// `404 page not found`.
pub fn not_found() -> Response {
    plain_error(StatusCode::NOT_FOUND, NOT_FOUND_BODY.trim_end())
}

/// 405 with the methods the route does serve.
pub fn method_not_allowed(allow: &'static str) -> Response {
    let mut response = plain_error(StatusCode::METHOD_NOT_ALLOWED, "405 method not allowed");
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

/// 302 redirect to `location`.
pub fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// 200 with an HTML body.
pub fn html(body: String) -> Response {
    Html(body).into_response()
}

/// Plain-text error body terminated by a newline.
pub fn plain_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        format!("{}\n", message),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_hides_cause() {
        let response = WikiError::NotFound("secret_title".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_io_error_exposes_message() {
        let err = WikiError::Io {
            file: "Home.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(response).await, "Home.txt: permission denied\n");
    }

    #[tokio::test]
    async fn test_method_not_allowed_lists_allow() {
        let response = method_not_allowed("POST");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
        assert_eq!(body_string(response).await, "405 method not allowed\n");
    }

    #[test]
    fn test_found() {
        let response = found("/edit/Home".into());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/edit/Home");
    }
}
