// bases/final_scenes/src/server.rs
use crate::config::Config;
use crate::handlers;
use crate::middleware::log_requests;
use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use film_catalog::Catalog;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

/// Application state shared across handlers
///
/// The catalog is loaded before the listener binds and never written
/// afterwards, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/guess", any(handlers::guess))
        .route("/guess/", any(handlers::guess))
        .route("/giveup", any(handlers::give_up))
        .route("/giveup/", any(handlers::give_up))
        .route("/random", get(handlers::random))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Run the HTTP server until interrupted
pub async fn run(catalog: Catalog, config: Config) -> color_eyre::Result<()> {
    info!(
        "Serving {} films from {}",
        catalog.len(),
        catalog.source().display()
    );

    let state = AppState {
        catalog: Arc::new(catalog),
    };
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on the first Ctrl+C; axum then drains in-flight requests
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received, shutting down"),
        Err(e) => {
            tracing::error!("failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{GiveUpResponse, GuessResponse, RandomFilm};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use film_catalog::{Film, FilmHash};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn films() -> Vec<Film> {
        vec![
            Film::new("Casablanca", "audio/a.mp3", "images/a.jpg", "1942"),
            Film::new("Vertigo", "audio/b.mp3", "images/b.jpg", "1958"),
        ]
    }

    fn app_with(films: Vec<Film>, static_dir: &Path) -> Router {
        let state = AppState {
            catalog: Arc::new(Catalog::from_films("films.json", films)),
        };
        build_router(state, static_dir)
    }

    fn app() -> Router {
        app_with(films(), Path::new("www"))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn asset_file_name(asset: &str) -> &str {
        asset.rsplit('/').next().unwrap_or(asset)
    }

    // ── GET / ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn index_lists_every_film_without_names() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        for film in films() {
            assert!(html.contains(film.hash().as_str()), "missing hash in:\n{html}");
            assert!(html.contains(asset_file_name(film.image_file())));
            assert!(html.contains(asset_file_name(film.audio_file())));
            assert!(html.contains(film.year()));
            assert!(!html.contains(film.name()), "{} leaked", film.name());
        }
    }

    #[tokio::test]
    async fn index_renders_empty_catalog() {
        let response = app_with(Vec::new(), Path::new("www"))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // ── /guess ───────────────────────────────────────────────────────────────

    #[rstest]
    #[case("/guess", "casablanca", true)]
    #[case("/guess/", "CASABLANCA", true)]
    #[case("/guess", "Casablanca ", false)]
    #[case("/guess", "Vertigo", false)]
    #[tokio::test]
    async fn guess_checks_answer(#[case] uri: &str, #[case] guess: &str, #[case] expected: bool) {
        let body = serde_json::json!({
            "question": FilmHash::of_title("Casablanca").as_str(),
            "guess": guess,
        });

        let response = app()
            .oneshot(post_json(uri, &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let answer: GuessResponse = body_json(response).await;
        assert_eq!(answer, GuessResponse { answer: expected });
    }

    #[rstest]
    #[case::no_question(r#"{"guess": "heat"}"#)]
    #[case::no_guess(r#"{"question": "abc"}"#)]
    #[case::empty_object(r#"{}"#)]
    #[tokio::test]
    async fn guess_with_missing_fields_is_just_wrong(#[case] body: &str) {
        let response = app().oneshot(post_json("/guess", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let answer: GuessResponse = body_json(response).await;
        assert_eq!(answer, GuessResponse { answer: false });
    }

    #[tokio::test]
    async fn guess_rejects_get() {
        let response = app()
            .oneshot(Request::builder().uri("/guess").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_text(response).await, "Only POST requests are supported");
    }

    #[tokio::test]
    async fn guess_rejects_wrong_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/guess")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"question":"x","guess":"y"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Unsupported Content-Type");
    }

    #[tokio::test]
    async fn guess_with_bad_body_is_a_server_error() {
        let response = app()
            .oneshot(post_json("/guess", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ── /giveup ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn giveup_reveals_the_title() {
        let body = serde_json::json!({ "FilmHash": FilmHash::of_title("vertigo").as_str() });

        let response = app()
            .oneshot(post_json("/giveup", &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let revealed: GiveUpResponse = body_json(response).await;
        assert_eq!(revealed.name, "Vertigo");
    }

    #[rstest]
    #[case::unknown_hash(r#"{"FilmHash": "0000"}"#)]
    #[case::empty_hash(r#"{"FilmHash": ""}"#)]
    #[case::missing_hash(r#"{}"#)]
    #[tokio::test]
    async fn giveup_without_a_known_film_fails(#[case] body: &str) {
        let response = app().oneshot(post_json("/giveup/", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "something went wrong");
    }

    #[tokio::test]
    async fn giveup_rejects_get() {
        let response = app()
            .oneshot(Request::builder().uri("/giveup").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // ── /random ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn random_returns_a_catalog_film() {
        let response = app()
            .oneshot(Request::builder().uri("/random").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let picked: RandomFilm = body_json(response).await;
        let expected: Vec<RandomFilm> = films().iter().map(RandomFilm::from).collect();
        assert!(expected.contains(&picked), "unexpected film {picked:?}");
    }

    #[tokio::test]
    async fn random_on_empty_catalog_is_not_found() {
        let response = app_with(Vec::new(), Path::new("www"))
            .oneshot(Request::builder().uri("/random").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── /static ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn serves_static_assets() {
        let www = TempDir::new().unwrap();
        std::fs::create_dir(www.path().join("images")).unwrap();
        std::fs::write(www.path().join("images/a.jpg"), b"jpeg bytes").unwrap();

        let response = app_with(films(), www.path())
            .oneshot(
                Request::builder()
                    .uri("/static/images/a.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "jpeg bytes");
    }

    #[tokio::test]
    async fn missing_static_asset_is_not_found() {
        let www = TempDir::new().unwrap();

        let response = app_with(films(), www.path())
            .oneshot(
                Request::builder()
                    .uri("/static/audio/nope.mp3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
