use crate::error::{IngestError, Result};
use film_catalog::{Film, FilmHash};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{0}': expected hh:mm:ss")]
pub struct InvalidTimestamp(String);

/// Position in a video, `hh:mm:ss` with optional fractional seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    text: String,
    seconds: f64,
}

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl FromStr for Timestamp {
    type Err = InvalidTimestamp;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || InvalidTimestamp(s.to_string());

        let parts: Vec<&str> = s.split(':').collect();
        let [hours, minutes, seconds] = parts.as_slice() else {
            return Err(invalid());
        };
        let (hours, minutes, seconds) = (*hours, *minutes, *seconds);

        let (whole_seconds, fraction) = match seconds.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (seconds, None),
        };

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hours)
            || minutes.len() != 2
            || !all_digits(minutes)
            || whole_seconds.len() != 2
            || !all_digits(whole_seconds)
            || fraction.is_some_and(|f| !all_digits(f))
        {
            return Err(invalid());
        }

        let hours: f64 = hours.parse().map_err(|_| invalid())?;
        let minutes: f64 = minutes.parse().map_err(|_| invalid())?;
        let secs: f64 = seconds.parse().map_err(|_| invalid())?;
        if minutes >= 60.0 || secs >= 60.0 {
            return Err(invalid());
        }

        Ok(Self {
            text: s.to_string(),
            seconds: hours * 3600.0 + minutes * 60.0 + secs,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Everything needed to turn a source video into a catalog entry
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub url: Url,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub year: String,
    /// Where in the full video to grab the still frame
    pub still_at: Timestamp,
}

impl ClipRequest {
    pub fn new(
        url: Url,
        name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        year: impl Into<String>,
        still_at: Timestamp,
    ) -> Result<Self> {
        let name = name.into();
        let year = year.into();

        if name.trim().is_empty() {
            return Err(IngestError::InvalidRequest("film name is empty".to_string()));
        }
        if year.trim().is_empty() {
            return Err(IngestError::InvalidRequest("release year is empty".to_string()));
        }
        if end.seconds() <= start.seconds() {
            return Err(IngestError::InvalidRequest(format!(
                "clip end {} is not after clip start {}",
                end, start
            )));
        }

        Ok(Self {
            url,
            name,
            start,
            end,
            year,
            still_at,
        })
    }

    pub fn hash(&self) -> FilmHash {
        FilmHash::of_title(&self.name)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// File stem for a film's working files
///
/// Path separators, control characters and reserved names become `_`, and
/// so do spaces.
pub fn work_file_stem(name: &str) -> String {
    let options = sanitize_filename::Options {
        windows: true,
        truncate: true,
        replacement: "_",
    };
    sanitize_filename::sanitize_with_options(name, options).replace(' ', "_")
}

/// Intermediate files for one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    pub full_video: PathBuf,
    pub trimmed_video: PathBuf,
    pub audio: PathBuf,
    pub image: PathBuf,
}

impl WorkPaths {
    pub fn new(work_dir: &Path, name: &str) -> Self {
        let stem = work_file_stem(name);
        Self {
            full_video: work_dir.join(format!("{}-full.mp4", stem)),
            trimmed_video: work_dir.join(format!("{}-trim.mp4", stem)),
            audio: work_dir.join(format!("{}.mp3", stem)),
            image: work_dir.join(format!("{}.jpg", stem)),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.full_video,
            &self.trimmed_video,
            &self.audio,
            &self.image,
        ]
    }
}

/// The site directory: `films.json` next to the static `www/` root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("films.json")
    }

    pub fn static_root(&self) -> PathBuf {
        self.root.join("www")
    }

    /// Catalog path of a film's audio clip, relative to `www/`
    pub fn audio_asset(hash: &FilmHash) -> String {
        format!("audio/{}.mp3", hash)
    }

    /// Catalog path of a film's still frame, relative to `www/`
    pub fn image_asset(hash: &FilmHash) -> String {
        format!("images/{}.jpg", hash)
    }

    pub fn resolve(&self, asset: &str) -> PathBuf {
        self.static_root().join(asset)
    }
}

// ============================================================================
// Step outputs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedVideo {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedClip {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAudio {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFrame {
    pub path: PathBuf,
}

/// Audio and still frame ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipAssets {
    pub audio: ExtractedAudio,
    pub frame: ExtractedFrame,
}

/// A film that has been added to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFilm {
    pub film: Film,
    pub audio_path: PathBuf,
    pub image_path: PathBuf,
    pub catalog_path: PathBuf,
}
