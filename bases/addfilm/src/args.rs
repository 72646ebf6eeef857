// bases/addfilm/src/args.rs
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use clip_extractor::Timestamp;
use std::path::PathBuf;
use url::Url;

/// Add a film to the final-scenes catalog from a video URL
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video to cut the final scene from
    #[arg(long)]
    pub url: Url,

    /// Film title, the answer players have to guess
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Clip start (hh:mm:ss)
    #[arg(long)]
    pub start: Timestamp,

    /// Clip end (hh:mm:ss), a position in the source video, not a duration
    ///
    /// `--start 01:40:00 --end 01:42:30` cuts a clip of two and a half
    /// minutes. Must be later than --start.
    #[arg(long)]
    pub end: Timestamp,

    /// Release year
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub year: String,

    /// Where to grab the still frame (hh:mm:ss)
    #[arg(long)]
    pub image: Timestamp,

    /// Scratch directory for downloads and intermediate files
    #[arg(long, env = "FINAL_SCENES_ADD_FILM_DIR")]
    pub work_dir: PathBuf,

    /// Site directory holding films.json and www/
    #[arg(long, env = "FINAL_SCENES_DIR")]
    pub site_dir: PathBuf,

    /// Remove intermediate files after publishing
    #[arg(long)]
    pub cleanup: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
