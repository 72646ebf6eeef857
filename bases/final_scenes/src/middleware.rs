// bases/final_scenes/src/middleware.rs
use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Log every request as `<remote> <method> <uri>` before handling it
pub async fn log_requests(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!("{} {} {}", remote, request.method(), request.uri());

    next.run(request).await
}
