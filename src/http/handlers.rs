//! The view, edit and save handlers.
//!
//! Each handler receives a title that already passed route validation.

use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
};

use crate::error::WikiError;
use crate::http::request::{PageBody, ValidTitle};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::render::PageTemplate;
use crate::routing::Route;
use crate::storage::Page;

/// GET /view/{title}: render the page, or send the client to the editor.
pub async fn view(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Response, WikiError> {
    match state.store.load(title.as_str()).await {
        Ok(page) => render(&state, PageTemplate::View, &page),
        Err(_) => {
            tracing::debug!(title = %title, "Page missing, redirecting to editor");
            Ok(response::found(Route::Edit.location(&title)))
        }
    }
}

/// GET /edit/{title}: render the editor, blank if the page does not exist.
pub async fn edit(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Response, WikiError> {
    let page = state
        .store
        .load(title.as_str())
        .await
        .unwrap_or_else(|_| Page::blank(title.as_str()));
    render(&state, PageTemplate::Edit, &page)
}

/// POST /save/{title}: persist the submitted body and show the page.
pub async fn save(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
    PageBody(body): PageBody,
) -> Result<Response, WikiError> {
    let location = Route::View.location(&title);
    let page = Page::new(title.into_inner(), body);

    let result = state.store.save(&page).await;
    metrics::record_save(result.is_ok());
    result?;

    tracing::info!(title = %page.title, bytes = page.body.len(), "Page saved");
    Ok(response::found(location))
}

/// Anything outside the three routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    response::not_found()
}

/// A method the route does not serve. Paths with an invalid title are
/// still a 404; only a well-formed path earns the 405.
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    match state.router.match_path(uri.path()) {
        Some(m) => {
            tracing::debug!(method = %method, route = %m.route, "Method not allowed");
            response::method_not_allowed(m.route.allowed_methods())
        }
        None => {
            tracing::debug!(method = %method, path = %uri.path(), "Invalid page title");
            response::not_found()
        }
    }
}

fn render(state: &AppState, template: PageTemplate, page: &Page) -> Result<Response, WikiError> {
    let html = state.templates.render(template, page)?;
    Ok(response::html(html))
}
