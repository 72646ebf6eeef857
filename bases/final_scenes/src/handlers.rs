// bases/final_scenes/src/handlers.rs
use crate::error::AppError;
use crate::server::AppState;
use askama::Template;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method},
    response::Html,
    Json,
};
use film_catalog::{verify, Film};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Catalog page: every film as a still, a clip and a guess box
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    films: &'a [Film],
}

/// Absent keys decode as empty strings, which never verify
#[derive(Debug, Deserialize)]
pub struct GuessAttempt {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub guess: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GuessResponse {
    pub answer: bool,
}

#[derive(Debug, Deserialize)]
pub struct GiveUpRequest {
    #[serde(rename = "FilmHash", default)]
    pub film_hash: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GiveUpResponse {
    pub name: String,
}

/// A film as shown to players: everything except the answer
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RandomFilm {
    pub hash: String,
    pub audio_file: String,
    pub image_file: String,
    pub year: String,
}

impl From<&Film> for RandomFilm {
    fn from(film: &Film) -> Self {
        Self {
            hash: film.hash().to_string(),
            audio_file: film.audio_file().to_string(),
            image_file: film.image_file().to_string(),
            year: film.year().to_string(),
        }
    }
}

/// Handler for the catalog page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        films: state.catalog.all(),
    };

    Ok(Html(template.render()?))
}

/// Handler for guess submissions
pub async fn guess(
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GuessResponse>, AppError> {
    let attempt: GuessAttempt = decode_json(&method, &headers, &body)?;

    let answer = verify(&attempt.guess, &attempt.question);
    tracing::debug!("guess for {} was {}", attempt.question, answer);

    Ok(Json(GuessResponse { answer }))
}

/// Handler for giving up: reveals the film's title
pub async fn give_up(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GiveUpResponse>, AppError> {
    let request: GiveUpRequest = decode_json(&method, &headers, &body)?;
    if request.film_hash.is_empty() {
        return Err(AppError::MissingHash);
    }

    let film = state.catalog.find_by_hash(&request.film_hash)?;

    Ok(Json(GiveUpResponse {
        name: film.name().to_string(),
    }))
}

/// Handler for a random question
pub async fn random(State(state): State<AppState>) -> Result<Json<RandomFilm>, AppError> {
    let film = state.catalog.random()?;

    Ok(Json(RandomFilm::from(film)))
}

/// Validate a JSON POST and decode its body
///
/// Checks run in order: method, then content type, then the body itself.
fn decode_json<T: DeserializeOwned>(
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, AppError> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed(method.clone()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    if content_type != "application/json" {
        return Err(AppError::UnsupportedContentType(content_type));
    }

    serde_json::from_slice(body).map_err(AppError::Decode)
}
