use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::posts::add_comment;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_comment;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::like_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::unlike_post;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
        authenticator,
    };

    let require_token = middleware::from_fn_with_state(state.clone(), auth_middleware);

    // `/api/auth` is public for POST and protected for GET, so the layer is
    // attached to the GET method router only.
    let auth_routes = Router::new()
        .route("/api/users", post(register))
        .route(
            "/api/auth",
            get(current_user).route_layer(require_token.clone()).post(login),
        );

    let post_routes = Router::new()
        .route("/api/posts", post(create_post).get(list_posts))
        .route("/api/posts/:id", get(get_post).delete(delete_post))
        .route("/api/posts/like/:id", put(like_post))
        .route("/api/posts/dislike/:id", put(unlike_post))
        .route("/api/posts/comment/:id", post(add_comment))
        .route("/api/posts/comment/:id/:comment_id", delete(delete_comment))
        .route_layer(require_token);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(post_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
