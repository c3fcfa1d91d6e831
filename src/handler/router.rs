//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: logs every request, applies
//! the guard chain to mutating routes, and dispatches on method and path.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::{guard, products, HandlerError};
use crate::config::AppState;
use crate::http;
use crate::logger;

const WELCOME: &str = "Welcome to the Product API! Go to /api/products to see all products.";

/// Main entry point for HTTP request handling
///
/// Generic over the body type so tests can drive it with `Full<Bytes>`
/// requests against an isolated `AppState`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    if state.cached_access_log.load(Ordering::Relaxed) {
        logger::log_request(req.method().as_str(), req.uri().path());
    }

    // Domain failures come back as responses; anything that escapes as an
    // error is an unexpected fault and collapses to a generic 500.
    let response = match dispatch(req, &state).await {
        Ok(response) => response,
        Err(e) => {
            logger::log_error(&format!("Unhandled handler fault: {e}"));
            http::internal_error()
        }
    };

    Ok(response)
}

/// Route the request based on method and path
async fn dispatch<B>(
    req: Request<B>,
    state: &Arc<AppState>,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Routes carrying an id segment
    if let Some(id) = path
        .strip_prefix("/api/products/")
        .filter(|id| !id.is_empty())
    {
        return match method {
            Method::GET => Ok(products::get(state, id).await),
            Method::PUT => match guard::run(&req, &guard::mutating()) {
                Some(response) => Ok(response),
                None => products::update(req, state, id).await,
            },
            Method::DELETE => match guard::run(&req, &guard::mutating()) {
                Some(response) => Ok(response),
                None => Ok(products::delete(state, id).await),
            },
            _ => Ok(http::unknown_route()),
        };
    }

    match (method, path.as_str()) {
        (Method::GET, "/") => Ok(http::text_response(StatusCode::OK, WELCOME)),
        (Method::GET, "/api/products") => Ok(products::list(state).await),
        (Method::POST, "/api/products") => match guard::run(&req, &guard::mutating()) {
            Some(response) => Ok(response),
            None => products::create(req, state).await,
        },
        _ => Ok(http::unknown_route()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, ServerConfig};
    use http_body_util::BodyExt;
    use hyper::header::AUTHORIZATION;
    use serde_json::{json, Value};

    const TOKEN: &str = "Bearer secret-token";

    fn test_state() -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
        };
        Arc::new(AppState::new(&config))
    }

    fn request(
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> Request<Full<Bytes>> {
        let bytes = body.map_or_else(Bytes::new, |v| Bytes::from(v.to_string()));
        raw_request(method, path, auth, bytes)
    }

    fn raw_request(
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Bytes,
    ) -> Request<Full<Bytes>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = auth {
            builder = builder.header(AUTHORIZATION, token);
        }
        builder.body(Full::new(body)).unwrap()
    }

    async fn send(state: &Arc<AppState>, req: Request<Full<Bytes>>) -> (StatusCode, Bytes) {
        let response = handle_request(req, Arc::clone(state)).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    fn json(body: &Bytes) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    fn valid_draft() -> Value {
        json!({
            "name": "Desk Lamp",
            "description": "LED lamp with adjustable arm",
            "price": 35.5,
            "category": "office"
        })
    }

    async fn store_len(state: &Arc<AppState>) -> usize {
        state.store.read().await.list().len()
    }

    #[tokio::test]
    async fn root_returns_welcome_text() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(std::str::from_utf8(&body).unwrap(), WELCOME);
    }

    #[tokio::test]
    async fn list_returns_seeded_collection_in_order() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/api/products", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let products = json(&body);
        let ids: Vec<&str> = products
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn get_known_id_returns_record() {
        let state = test_state();
        let (status, body) =
            send(&state, request(Method::GET, "/api/products/2", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let product = json(&body);
        assert_eq!(product["id"], "2");
        assert_eq!(product["name"], "Smartphone");
        assert_eq!(product["category"], "electronics");
        assert_eq!(product["inStock"], true);
    }

    #[tokio::test]
    async fn missing_id_returns_404_for_get_put_delete() {
        let state = test_state();

        let (status, body) = send(
            &state,
            request(Method::GET, "/api/products/nope", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"], "Product not found");

        let (status, _) = send(
            &state,
            request(
                Method::PUT,
                "/api/products/nope",
                Some(TOKEN),
                Some(valid_draft()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &state,
            request(Method::DELETE, "/api/products/nope", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store_len(&state).await, 3);
    }

    #[tokio::test]
    async fn create_returns_201_with_fresh_id() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                Method::POST,
                "/api/products",
                Some(TOKEN),
                Some(valid_draft()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let created = json(&body);
        let id = created["id"].as_str().unwrap();
        assert!(!["1", "2", "3"].contains(&id));
        // inStock defaults to true when unspecified
        assert_eq!(created["inStock"], true);
        assert_eq!(store_len(&state).await, 4);
    }

    #[tokio::test]
    async fn create_round_trips_through_get() {
        let state = test_state();
        let (_, created) = send(
            &state,
            request(
                Method::POST,
                "/api/products",
                Some(TOKEN),
                Some(valid_draft()),
            ),
        )
        .await;
        let created = json(&created);

        let path = format!("/api/products/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(&state, request(Method::GET, &path, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&fetched), created);
    }

    #[tokio::test]
    async fn create_rejects_missing_or_falsy_fields() {
        let drafts = [
            json!({ "description": "d", "price": 1, "category": "c" }),
            json!({ "name": "", "description": "d", "price": 1, "category": "c" }),
            json!({ "name": "n", "price": 1, "category": "c" }),
            json!({ "name": "n", "description": "d", "category": "c" }),
            // A zero price counts as missing, like the published contract.
            json!({ "name": "n", "description": "d", "price": 0, "category": "c" }),
            json!({ "name": "n", "description": "d", "price": 1, "category": "" }),
        ];

        for draft in drafts {
            let state = test_state();
            let (status, body) = send(
                &state,
                request(Method::POST, "/api/products", Some(TOKEN), Some(draft)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json(&body)["error"], "Missing required fields");
            assert_eq!(store_len(&state).await, 3);
        }
    }

    #[tokio::test]
    async fn empty_body_reports_missing_fields() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(Method::POST, "/api/products", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn mutating_routes_require_exact_token() {
        let state = test_state();

        for auth in [
            None,
            Some("Bearer wrong"),
            Some("secret-token"),
            Some("bearer secret-token"),
        ] {
            let (status, body) = send(
                &state,
                request(Method::POST, "/api/products", auth, Some(valid_draft())),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(json(&body)["error"], "Unauthorized");
        }

        let (status, _) = send(
            &state,
            request(Method::PUT, "/api/products/1", None, Some(valid_draft())),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &state,
            request(Method::DELETE, "/api/products/1", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store_len(&state).await, 3);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_preserves_in_stock() {
        let state = test_state();

        // Record 3 is out of stock; omitting inStock keeps it that way.
        let (status, body) = send(
            &state,
            request(
                Method::PUT,
                "/api/products/3",
                Some(TOKEN),
                Some(valid_draft()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated = json(&body);
        assert_eq!(updated["id"], "3");
        assert_eq!(updated["name"], "Desk Lamp");
        assert_eq!(updated["inStock"], false);

        // An explicit flag is applied.
        let mut with_stock = valid_draft();
        with_stock["inStock"] = json!(true);
        let (status, body) = send(
            &state,
            request(Method::PUT, "/api/products/3", Some(TOKEN), Some(with_stock)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["inStock"], true);
    }

    #[tokio::test]
    async fn update_rejects_invalid_body_for_existing_id() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                Method::PUT,
                "/api/products/1",
                Some(TOKEN),
                Some(json!({ "name": "n" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_record() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(Method::DELETE, "/api/products/3", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert_eq!(store_len(&state).await, 2);

        let (status, _) = send(&state, request(Method::GET, "/api/products/3", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/api/users", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"], "Not found");
    }

    #[tokio::test]
    async fn malformed_json_collapses_to_500() {
        let state = test_state();
        let req = raw_request(
            Method::POST,
            "/api/products",
            Some(TOKEN),
            Bytes::from_static(b"{not json"),
        );
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "Something went wrong!");
        assert_eq!(store_len(&state).await, 3);
    }
}
