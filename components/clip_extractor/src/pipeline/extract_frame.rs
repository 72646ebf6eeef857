//! Step 4: one still frame from the full video

use crate::error::Result;
use crate::pipeline::expect_output;
use crate::runner::CommandRunner;
use crate::step::{Step, StepId};
use crate::types::{DownloadedVideo, ExtractedFrame, Timestamp};
use std::ffi::OsString;
use std::path::Path;

pub struct ExtractFrame<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a str,
    pub at: &'a Timestamp,
    pub output: &'a Path,
}

impl Step<DownloadedVideo, ExtractedFrame> for ExtractFrame<'_> {
    fn id(&self) -> StepId {
        StepId::ExtractFrame
    }

    fn description(&self) -> String {
        format!("Extract still frame at {}", self.at)
    }

    async fn run(&self, video: DownloadedVideo) -> Result<ExtractedFrame> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-ss".into(),
            self.at.as_str().into(),
            "-i".into(),
            video.path.into(),
            "-vframes".into(),
            "1".into(),
            "-q:v".into(),
            "2".into(),
            self.output.into(),
        ];
        self.runner.run(self.ffmpeg, &args).await?;

        expect_output(self.output).await?;
        Ok(ExtractedFrame {
            path: self.output.to_path_buf(),
        })
    }
}
