use crate::error::MissingFields;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Public identifier for a film
///
/// Lowercase hex SHA-256 of the lowercased title. Clients reference films by
/// this value so the page never has to carry the plaintext answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilmHash(String);

impl FilmHash {
    /// Hash a title the same way guesses are hashed
    pub fn of_title(title: &str) -> Self {
        let digest = Sha256::digest(title.to_lowercase().as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilmHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for FilmHash {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for FilmHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A film in the catalog
///
/// Fields are private so the hash can only come from [`Film::new`] or from
/// decoding a record, both of which derive it from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilmRecord")]
pub struct Film {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "AudioFile")]
    audio_file: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "ImageFile")]
    image_file: String,
    #[serde(skip_serializing)]
    hash: FilmHash,
}

impl Film {
    pub fn new(
        name: impl Into<String>,
        audio_file: impl Into<String>,
        image_file: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let hash = FilmHash::of_title(&name);
        Self {
            name,
            audio_file: audio_file.into(),
            year: year.into(),
            image_file: image_file.into(),
            hash,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Audio clip path, relative to the static root
    pub fn audio_file(&self) -> &str {
        &self.audio_file
    }

    /// Still frame path, relative to the static root
    pub fn image_file(&self) -> &str {
        &self.image_file
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn hash(&self) -> &FilmHash {
        &self.hash
    }
}

/// Undecoded film record as it appears in the catalog file
///
/// Every field is optional here so a bad record can report all of its
/// missing fields at once instead of stopping at the first. A stored
/// `Hash` key is ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilmRecord {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "AudioFile")]
    audio_file: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "ImageFile")]
    image_file: Option<String>,
}

impl TryFrom<FilmRecord> for Film {
    type Error = MissingFields;

    fn try_from(record: FilmRecord) -> Result<Self, Self::Error> {
        match record {
            FilmRecord {
                name: Some(name),
                audio_file: Some(audio_file),
                year: Some(year),
                image_file: Some(image_file),
            } => Ok(Film::new(name, audio_file, image_file, year)),
            record => {
                let missing = [
                    ("Name", record.name.is_none()),
                    ("AudioFile", record.audio_file.is_none()),
                    ("Year", record.year.is_none()),
                    ("ImageFile", record.image_file.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(MissingFields(missing))
            }
        }
    }
}
