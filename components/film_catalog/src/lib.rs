//! Film catalog for final-scenes
//!
//! The catalog is a JSON document of films. Each film is identified by the
//! SHA-256 of its lowercased title, which doubles as the answer key for
//! guesses:
//!
//! ```
//! use film_catalog::{verify, Film};
//!
//! let film = Film::new("Casablanca", "audio/a.mp3", "images/a.jpg", "1942");
//! assert!(verify("casablanca", film.hash().as_str()));
//! assert!(!verify("Casablanca ", film.hash().as_str()));
//! ```

mod document;
mod error;
mod model;
mod store;
mod verify;

pub use document::CatalogDocument;
pub use error::{CatalogError, MissingFields, RecordDefect, Result};
pub use model::{Film, FilmHash};
pub use store::Catalog;
pub use verify::verify;
