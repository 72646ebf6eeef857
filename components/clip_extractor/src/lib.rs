//! Builds final-scenes catalog entries from a source video
//!
//! Shells out to `yt-dlp` (or `youtube-dl`) and `ffmpeg` to download a
//! video, cut the clip, pull out its audio and a still frame, then copies
//! both into the site and appends the film to `films.json`.

mod error;
mod pipeline;
mod runner;
mod step;
mod tools;
mod types;

pub use error::{IngestError, Result};
pub use pipeline::{
    DownloadVideo, ExtractAudio, ExtractFrame, Ingestion, PublishFilm, TrimVideo,
};
pub use runner::{describe_command, CommandRunner, SystemRunner};
pub use step::{execute_step, Step, StepId};
pub use tools::{Toolchain, VideoDownloader};
pub use types::{
    work_file_stem, ClipAssets, ClipRequest, DownloadedVideo, ExtractedAudio, ExtractedFrame,
    InvalidTimestamp, PublishedFilm, SiteLayout, Timestamp, TrimmedClip, WorkPaths,
};
