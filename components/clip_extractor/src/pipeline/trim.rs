//! Step 2: cut the clip out of the full video

use crate::error::Result;
use crate::pipeline::expect_output;
use crate::runner::CommandRunner;
use crate::step::{Step, StepId};
use crate::types::{DownloadedVideo, Timestamp, TrimmedClip};
use std::ffi::OsString;
use std::path::Path;

pub struct TrimVideo<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a str,
    pub start: &'a Timestamp,
    pub end: &'a Timestamp,
    pub output: &'a Path,
}

impl Step<DownloadedVideo, TrimmedClip> for TrimVideo<'_> {
    fn id(&self) -> StepId {
        StepId::Trim
    }

    fn description(&self) -> String {
        format!("Trim clip from {} to {}", self.start, self.end)
    }

    async fn run(&self, video: DownloadedVideo) -> Result<TrimmedClip> {
        // -ss/-to before -i seek in the input, so both are source positions
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-ss".into(),
            self.start.as_str().into(),
            "-to".into(),
            self.end.as_str().into(),
            "-i".into(),
            video.path.into(),
            "-c".into(),
            "copy".into(),
            self.output.into(),
        ];
        self.runner.run(self.ffmpeg, &args).await?;

        expect_output(self.output).await?;
        Ok(TrimmedClip {
            path: self.output.to_path_buf(),
        })
    }
}
