//! On-disk catalog document
//!
//! `{"films": [{"Name", "AudioFile", "Year", "ImageFile"}, ...]}`. The
//! server only reads it; the ingestion tool reads, appends and writes it
//! back.

use crate::error::{CatalogError, RecordDefect, Result};
use crate::model::{Film, FilmHash, FilmRecord};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(alias = "Films")]
    films: Vec<FilmRecord>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    films: &'a [Film],
}

/// Decoded catalog file contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    films: Vec<Film>,
}

impl CatalogDocument {
    pub fn new(films: Vec<Film>) -> Self {
        Self { films }
    }

    /// Read and decode the document at `path`
    ///
    /// All-or-nothing: one bad record fails the whole read, and the error
    /// lists every missing field of every bad record.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| CatalogError::read(path, e))?;
        Self::decode(path, &bytes)
    }

    fn decode(path: &Path, bytes: &[u8]) -> Result<Self> {
        let raw: RawDocument =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::parse(path, e))?;

        let mut films = Vec::with_capacity(raw.films.len());
        let mut defects = Vec::new();
        for (index, record) in raw.films.into_iter().enumerate() {
            match Film::try_from(record) {
                Ok(film) => films.push(film),
                Err(missing) => defects.push(RecordDefect { index, missing }),
            }
        }

        if !defects.is_empty() {
            return Err(CatalogError::InvalidRecords {
                path: path.to_path_buf(),
                defects,
            });
        }

        Ok(Self { films })
    }

    /// Write the document to `path`, replacing it atomically
    ///
    /// The new contents go to a temp file in the same directory which is
    /// then renamed over the target. An existing file's permissions carry
    /// over to the replacement.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(&DocumentRef { films: &self.films })
            .map_err(CatalogError::Encode)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| CatalogError::write(path, e))?;
        temp.write_all(&json)
            .and_then(|()| temp.write_all(b"\n"))
            .map_err(|e| CatalogError::write(path, e))?;
        if let Ok(existing) = std::fs::metadata(path) {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| CatalogError::write(path, e))?;
        }
        temp.persist(path)
            .map_err(|e| CatalogError::write(path, e.error))?;

        Ok(())
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn into_films(self) -> Vec<Film> {
        self.films
    }

    pub fn contains(&self, hash: &FilmHash) -> bool {
        self.films.iter().any(|film| film.hash() == hash)
    }

    /// Append a film, refusing one whose title is already present
    /// (case-insensitively)
    pub fn push(&mut self, film: Film) -> Result<()> {
        if self.contains(film.hash()) {
            return Err(CatalogError::Duplicate {
                name: film.name().to_string(),
                hash: film.hash().to_string(),
            });
        }
        self.films.push(film);
        Ok(())
    }
}
