// Product route handlers
// CRUD operations over the injected store

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use std::fmt::Display;
use std::sync::Arc;

use super::draft::ProductDraft;
use super::HandlerError;
use crate::config::AppState;
use crate::http;

/// List the full collection
pub async fn list(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    http::json_response(StatusCode::OK, store.list())
}

/// Fetch one record by id
pub async fn get(state: &Arc<AppState>, id: &str) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    match store.get(id) {
        Some(product) => http::json_response(StatusCode::OK, product),
        None => http::not_found(),
    }
}

/// Create a new record from the request body
pub async fn create<B>(
    req: Request<B>,
    state: &Arc<AppState>,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Display,
{
    let draft = read_draft(req).await?;
    let input = match draft.validate() {
        Ok(input) => input,
        Err(e) => return Ok(http::error_response(StatusCode::BAD_REQUEST, &e.to_string())),
    };

    let product = state.store.write().await.insert(input);
    Ok(http::json_response(StatusCode::CREATED, &product))
}

/// Replace an existing record
///
/// The id is checked before validation, so an unknown id reports 404
/// even when the body is invalid.
pub async fn update<B>(
    req: Request<B>,
    state: &Arc<AppState>,
    id: &str,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Display,
{
    let draft = read_draft(req).await?;

    let mut store = state.store.write().await;
    if store.get(id).is_none() {
        return Ok(http::not_found());
    }

    let input = match draft.validate() {
        Ok(input) => input,
        Err(e) => return Ok(http::error_response(StatusCode::BAD_REQUEST, &e.to_string())),
    };

    match store.update(id, input) {
        Some(product) => Ok(http::json_response(StatusCode::OK, &product)),
        None => Ok(http::not_found()),
    }
}

/// Remove a record
pub async fn delete(state: &Arc<AppState>, id: &str) -> Response<Full<Bytes>> {
    let mut store = state.store.write().await;
    if store.remove(id) {
        http::no_content()
    } else {
        http::not_found()
    }
}

/// Collect the request body and decode it into a draft
///
/// An empty body decodes to an empty draft so the field checks report
/// 400 rather than a fault.
async fn read_draft<B>(req: Request<B>) -> Result<ProductDraft, HandlerError>
where
    B: Body,
    B::Error: Display,
{
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| HandlerError::Body(e.to_string()))?
        .to_bytes();

    if body.is_empty() {
        return Ok(ProductDraft::default());
    }

    Ok(serde_json::from_slice(&body)?)
}
