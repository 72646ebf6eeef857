//! Step 1: fetch the source video

use crate::error::Result;
use crate::pipeline::expect_output;
use crate::runner::CommandRunner;
use crate::step::{Step, StepId};
use crate::tools::VideoDownloader;
use crate::types::DownloadedVideo;
use std::ffi::OsString;
use std::path::Path;
use url::Url;

pub struct DownloadVideo<'a> {
    pub runner: &'a dyn CommandRunner,
    pub downloader: VideoDownloader,
    pub output: &'a Path,
}

impl Step<Url, DownloadedVideo> for DownloadVideo<'_> {
    fn id(&self) -> StepId {
        StepId::Download
    }

    fn description(&self) -> String {
        format!("Download source video with {}", self.downloader.program())
    }

    async fn run(&self, url: Url) -> Result<DownloadedVideo> {
        let args: Vec<OsString> = vec![
            "-f".into(),
            "mp4".into(),
            "-o".into(),
            self.output.into(),
            url.as_str().into(),
        ];
        self.runner.run(self.downloader.program(), &args).await?;

        expect_output(self.output).await?;
        Ok(DownloadedVideo {
            path: self.output.to_path_buf(),
        })
    }
}
