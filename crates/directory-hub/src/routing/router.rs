use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::CatalogProvider;
use crate::routing::resolver::{Disposition, REDIRECT_STATUS};
use crate::routing::service::DirectoryGateway;

/// Router builder exposing the resolution and presentation endpoints.
pub fn gateway_router<P>(gateway: Arc<DirectoryGateway<P>>) -> Router
where
    P: CatalogProvider + 'static,
{
    Router::new()
        .route("/api/v1/route/resolve", post(resolve_handler::<P>))
        .route(
            "/api/v1/directories/:slug/featured",
            get(featured_handler::<P>),
        )
        .route(
            "/api/v1/directories/:slug/subcategories",
            get(subcategories_handler::<P>),
        )
        .with_state(gateway)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveRequest {
    pub(crate) hostname: String,
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubcategoryParams {
    #[serde(default)]
    pub(crate) active: Option<String>,
}

pub(crate) async fn resolve_handler<P>(
    State(gateway): State<Arc<DirectoryGateway<P>>>,
    axum::Json(request): axum::Json<ResolveRequest>,
) -> Response
where
    P: CatalogProvider + 'static,
{
    let disposition = gateway.resolve(&request.hostname, &request.path, request.query.as_deref());
    let payload = match disposition {
        Disposition::PassThrough => json!({ "disposition": "pass_through" }),
        Disposition::Rewrite { path } => json!({ "disposition": "rewrite", "path": path }),
        Disposition::Redirect { location } => json!({
            "disposition": "redirect",
            "location": location,
            "status": REDIRECT_STATUS,
        }),
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn featured_handler<P>(
    State(gateway): State<Arc<DirectoryGateway<P>>>,
    Path(slug): Path<String>,
) -> Response
where
    P: CatalogProvider + 'static,
{
    match gateway.featured(&slug) {
        Some(segments) => (StatusCode::OK, axum::Json(segments)).into_response(),
        None => unknown_directory(&slug),
    }
}

pub(crate) async fn subcategories_handler<P>(
    State(gateway): State<Arc<DirectoryGateway<P>>>,
    Path(slug): Path<String>,
    Query(params): Query<SubcategoryParams>,
) -> Response
where
    P: CatalogProvider + 'static,
{
    match gateway.subcategory_nav(&slug, params.active.as_deref()) {
        Some(nav) => (StatusCode::OK, axum::Json(nav)).into_response(),
        None => unknown_directory(&slug),
    }
}

fn unknown_directory(slug: &str) -> Response {
    let payload = json!({ "error": format!("unknown directory '{slug}'") });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}
