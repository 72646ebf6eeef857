//! Step 3: the clip's soundtrack as mp3

use crate::error::Result;
use crate::pipeline::expect_output;
use crate::runner::CommandRunner;
use crate::step::{Step, StepId};
use crate::types::{ExtractedAudio, TrimmedClip};
use std::ffi::OsString;
use std::path::Path;

const AUDIO_BITRATE: &str = "192000";

pub struct ExtractAudio<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a str,
    pub output: &'a Path,
}

impl Step<TrimmedClip, ExtractedAudio> for ExtractAudio<'_> {
    fn id(&self) -> StepId {
        StepId::ExtractAudio
    }

    fn description(&self) -> String {
        "Extract mp3 audio from clip".to_string()
    }

    async fn run(&self, clip: TrimmedClip) -> Result<ExtractedAudio> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-i".into(),
            clip.path.into(),
            "-f".into(),
            "mp3".into(),
            "-ab".into(),
            AUDIO_BITRATE.into(),
            "-vn".into(),
            self.output.into(),
        ];
        self.runner.run(self.ffmpeg, &args).await?;

        expect_output(self.output).await?;
        Ok(ExtractedAudio {
            path: self.output.to_path_buf(),
        })
    }
}
