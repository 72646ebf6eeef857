//! Ingestion pipeline
//!
//! download → trim → extract-audio → extract-frame → publish. Each step
//! consumes the typed output of an earlier one; a failure stops the run and
//! names the step. Nothing is retried or resumed.

use crate::error::{IngestError, Result};
use crate::runner::CommandRunner;
use crate::step::execute_step;
use crate::tools::Toolchain;
use crate::types::{ClipAssets, ClipRequest, PublishedFilm, SiteLayout, WorkPaths};
use film_catalog::{CatalogDocument, CatalogError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod download;
mod extract_audio;
mod extract_frame;
mod publish;
mod trim;

pub use download::DownloadVideo;
pub use extract_audio::ExtractAudio;
pub use extract_frame::ExtractFrame;
pub use publish::PublishFilm;
pub use trim::TrimVideo;

pub struct Ingestion {
    runner: Arc<dyn CommandRunner>,
    toolchain: Toolchain,
    work_dir: PathBuf,
    site: SiteLayout,
    cleanup: bool,
}

impl Ingestion {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        toolchain: Toolchain,
        work_dir: impl Into<PathBuf>,
        site: SiteLayout,
    ) -> Self {
        Self {
            runner,
            toolchain,
            work_dir: work_dir.into(),
            site,
            cleanup: false,
        }
    }

    /// Remove intermediate files once the film is published
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn work_paths(&self, request: &ClipRequest) -> WorkPaths {
        WorkPaths::new(&self.work_dir, &request.name)
    }

    /// Run every step for `request` and add the film to the catalog
    pub async fn run(&self, request: &ClipRequest) -> Result<PublishedFilm> {
        self.ensure_not_in_catalog(request)?;

        let work = self.work_paths(request);
        let runner = self.runner.as_ref();
        let ffmpeg = self.toolchain.ffmpeg;

        tracing::info!("🚀 Adding {} ({})", request.name, request.year);

        let downloaded = execute_step(
            &DownloadVideo {
                runner,
                downloader: self.toolchain.downloader,
                output: &work.full_video,
            },
            request.url.clone(),
        )
        .await?;

        let trimmed = execute_step(
            &TrimVideo {
                runner,
                ffmpeg,
                start: &request.start,
                end: &request.end,
                output: &work.trimmed_video,
            },
            downloaded.clone(),
        )
        .await?;

        let audio = execute_step(
            &ExtractAudio {
                runner,
                ffmpeg,
                output: &work.audio,
            },
            trimmed,
        )
        .await?;

        let frame = execute_step(
            &ExtractFrame {
                runner,
                ffmpeg,
                at: &request.still_at,
                output: &work.image,
            },
            downloaded,
        )
        .await?;

        let published = execute_step(
            &PublishFilm {
                site: &self.site,
                name: &request.name,
                year: &request.year,
            },
            ClipAssets { audio, frame },
        )
        .await?;

        if self.cleanup {
            remove_work_files(&work).await;
        }

        tracing::info!("✅ {} published as {}", request.name, published.film.hash());
        Ok(published)
    }

    fn ensure_not_in_catalog(&self, request: &ClipRequest) -> Result<()> {
        let catalog = CatalogDocument::read(&self.site.catalog_path())?;
        let hash = request.hash();
        if catalog.contains(&hash) {
            return Err(CatalogError::Duplicate {
                name: request.name.clone(),
                hash: hash.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Fail unless a tool actually left its output file behind
pub(crate) async fn expect_output(path: &Path) -> Result<()> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(IngestError::MissingOutput {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestError::io(format!("checking {}", path.display()), e)),
    }
}

async fn remove_work_files(work: &WorkPaths) {
    for path in work.all() {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!("Removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
