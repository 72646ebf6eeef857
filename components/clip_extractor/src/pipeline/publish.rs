//! Step 5: copy assets into the site and append the film to the catalog

use crate::error::{IngestError, Result};
use crate::step::{Step, StepId};
use crate::types::{ClipAssets, PublishedFilm, SiteLayout};
use film_catalog::{CatalogDocument, Film, FilmHash};
use std::path::Path;

pub struct PublishFilm<'a> {
    pub site: &'a SiteLayout,
    pub name: &'a str,
    pub year: &'a str,
}

impl Step<ClipAssets, PublishedFilm> for PublishFilm<'_> {
    fn id(&self) -> StepId {
        StepId::Publish
    }

    fn description(&self) -> String {
        format!("Publish {} to {}", self.name, self.site.root().display())
    }

    async fn run(&self, assets: ClipAssets) -> Result<PublishedFilm> {
        let catalog_path = self.site.catalog_path();
        let mut catalog = CatalogDocument::read(&catalog_path)?;

        let hash = FilmHash::of_title(self.name);
        let film = Film::new(
            self.name,
            SiteLayout::audio_asset(&hash),
            SiteLayout::image_asset(&hash),
            self.year,
        );
        // Refuse duplicates before touching the site
        catalog.push(film.clone())?;

        let audio_path = self.site.resolve(film.audio_file());
        let image_path = self.site.resolve(film.image_file());
        install_assets(
            [
                (assets.audio.path.as_path(), audio_path.as_path()),
                (assets.frame.path.as_path(), image_path.as_path()),
            ],
            || Ok(catalog.write(&catalog_path)?),
        )
        .await?;
        tracing::info!(
            "Added {} to {} ({} films)",
            film.name(),
            catalog_path.display(),
            catalog.films().len()
        );

        Ok(PublishedFilm {
            film,
            audio_path,
            image_path,
            catalog_path,
        })
    }
}

/// Copy each asset into place, then run `commit`
///
/// If a copy or the commit fails, the assets copied so far are removed.
async fn install_assets(
    copies: [(&Path, &Path); 2],
    commit: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let mut installed = Vec::with_capacity(copies.len());
    for (from, to) in copies {
        if let Err(e) = copy_asset(from, to).await {
            remove_assets(&installed).await;
            return Err(e);
        }
        installed.push(to);
    }

    if let Err(e) = commit() {
        remove_assets(&installed).await;
        return Err(e);
    }
    Ok(())
}

async fn remove_assets(paths: &[&Path]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

async fn copy_asset(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| IngestError::io(format!("creating {}", parent.display()), e))?;
    }
    tokio::fs::copy(from, to).await.map_err(|e| {
        IngestError::io(format!("copying {} to {}", from.display(), to.display()), e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use film_catalog::CatalogError;
    use tempfile::TempDir;

    struct Assets {
        dir: TempDir,
    }

    impl Assets {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("clip.mp3"), b"mp3").unwrap();
            std::fs::write(dir.path().join("still.jpg"), b"jpg").unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> std::path::PathBuf {
            self.dir.path().join(name)
        }
    }

    #[tokio::test]
    async fn installs_assets_when_commit_succeeds() {
        let assets = Assets::new();
        let audio = assets.path("www/audio/h.mp3");
        let image = assets.path("www/images/h.jpg");

        install_assets(
            [
                (assets.path("clip.mp3").as_path(), audio.as_path()),
                (assets.path("still.jpg").as_path(), image.as_path()),
            ],
            || Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read(&audio).unwrap(), b"mp3");
        assert_eq!(std::fs::read(&image).unwrap(), b"jpg");
    }

    #[tokio::test]
    async fn failed_commit_removes_copied_assets() {
        let assets = Assets::new();
        let audio = assets.path("www/audio/h.mp3");
        let image = assets.path("www/images/h.jpg");

        let result = install_assets(
            [
                (assets.path("clip.mp3").as_path(), audio.as_path()),
                (assets.path("still.jpg").as_path(), image.as_path()),
            ],
            || Err(CatalogError::Empty.into()),
        )
        .await;

        assert_matches!(result, Err(IngestError::Catalog(CatalogError::Empty)));
        assert!(!audio.exists());
        assert!(!image.exists());
        assert!(assets.path("clip.mp3").exists());
    }

    #[tokio::test]
    async fn failed_copy_removes_earlier_assets() {
        let assets = Assets::new();
        let audio = assets.path("www/audio/h.mp3");
        let image = assets.path("www/images/h.jpg");

        let result = install_assets(
            [
                (assets.path("clip.mp3").as_path(), audio.as_path()),
                (assets.path("missing.jpg").as_path(), image.as_path()),
            ],
            || panic!("commit must not run after a failed copy"),
        )
        .await;

        assert_matches!(result, Err(IngestError::Io { .. }));
        assert!(!audio.exists());
    }
}
