use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        items::{create_item, delete_item, get_item, list_items, list_items_by_state, update_item},
        lists::{create_list, delete_list, get_list, list_lists, update_list},
    },
    state::AppState,
};

/// Only explicit timeout in the service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION]);

    let list_routes = Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{list_id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route("/lists/{list_id}/items", get(list_items).post(create_item))
        .route(
            "/lists/{list_id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/lists/{list_id}/state/{state}", get(list_items_by_state))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .merge(list_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}
