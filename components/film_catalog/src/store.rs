use crate::document::CatalogDocument;
use crate::error::{CatalogError, Result};
use crate::model::{Film, FilmHash};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// In-memory film catalog
///
/// Loaded once at startup and read-only afterwards, so it can be shared
/// between request handlers behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    films: Vec<Film>,
    source: PathBuf,
}

impl Catalog {
    /// Load the catalog file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let films = CatalogDocument::read(path)?.into_films();
        let catalog = Self::from_films(path, films);

        for hash in catalog.duplicate_hashes() {
            tracing::warn!("catalog {} lists film {} more than once", path.display(), hash);
        }
        tracing::info!("Loaded {} films from {}", catalog.len(), path.display());

        Ok(catalog)
    }

    pub fn from_films(source: impl Into<PathBuf>, films: Vec<Film>) -> Self {
        Self {
            films,
            source: source.into(),
        }
    }

    /// File the catalog was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn all(&self) -> &[Film] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn find_by_hash(&self, hash: &str) -> Result<&Film> {
        self.find(|film| film.hash() == hash)
            .ok_or_else(|| CatalogError::NotFound(format!("no film with hash {}", hash)))
    }

    /// Exact, case-sensitive title lookup
    pub fn find_by_name(&self, name: &str) -> Result<&Film> {
        self.find(|film| film.name() == name)
            .ok_or_else(|| CatalogError::NotFound(format!("no film named {:?}", name)))
    }

    pub fn find(&self, matches: impl Fn(&Film) -> bool) -> Option<&Film> {
        self.films.iter().find(|film| matches(film))
    }

    pub fn random(&self) -> Result<&Film> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Film> {
        self.films.choose(rng).ok_or(CatalogError::Empty)
    }

    /// Hashes that appear on more than one record
    pub fn duplicate_hashes(&self) -> Vec<&FilmHash> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for film in &self.films {
            if !seen.insert(film.hash()) && !duplicates.contains(&film.hash()) {
                duplicates.push(film.hash());
            }
        }
        duplicates
    }
}
