use crate::error::{IngestError, Result};

/// Program used to fetch the source video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoDownloader {
    YtDlp,
    YoutubeDl,
}

impl VideoDownloader {
    pub fn program(&self) -> &'static str {
        match self {
            VideoDownloader::YtDlp => "yt-dlp",
            VideoDownloader::YoutubeDl => "youtube-dl",
        }
    }

    /// First downloader found on `PATH`, preferring yt-dlp
    pub fn detect() -> Result<Self> {
        Self::detect_with(|program| which::which(program).is_ok())
    }

    fn detect_with(available: impl Fn(&str) -> bool) -> Result<Self> {
        [VideoDownloader::YtDlp, VideoDownloader::YoutubeDl]
            .into_iter()
            .find(|downloader| available(downloader.program()))
            .ok_or(IngestError::ToolNotFound("yt-dlp or youtube-dl"))
    }
}

/// External programs the pipeline shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolchain {
    pub downloader: VideoDownloader,
    pub ffmpeg: &'static str,
}

impl Toolchain {
    pub const FFMPEG: &'static str = "ffmpeg";

    /// Locate every required program before any work starts
    pub fn detect() -> Result<Self> {
        let downloader = VideoDownloader::detect()?;
        which::which(Self::FFMPEG).map_err(|_| IngestError::ToolNotFound(Self::FFMPEG))?;

        tracing::debug!("Using {} and {}", downloader.program(), Self::FFMPEG);
        Ok(Self::new(downloader))
    }

    pub fn new(downloader: VideoDownloader) -> Self {
        Self {
            downloader,
            ffmpeg: Self::FFMPEG,
        }
    }
}
